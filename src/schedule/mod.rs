//! 排期启发式引擎：时长估计、聚合指标、置信度、反馈调整（纯函数层）

pub mod estimate;
pub mod feedback;
pub mod metrics;
pub mod types;

pub use estimate::estimate_study_time;
pub use feedback::adjust_for_feedback;
pub use metrics::{completion_date, compute_metrics, confidence_score, weekly_commitment};
pub use types::{
    ContentCategory, Difficulty, Effort, MaterialDescriptor, Priority, ScheduleMetrics,
    ScheduledSession, SessionType, StudyGoals, StudyPreferences, DEFAULT_SESSION_MINUTES,
    MAX_SESSION_MINUTES, MIN_SESSION_MINUTES,
};
