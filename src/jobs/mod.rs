//! 任务层：注册表与生命周期追踪

pub mod registry;

pub use registry::{
    Job, JobError, JobId, JobRegistry, JobStatus, JobType, GENERATION_ERROR_CODE,
};
