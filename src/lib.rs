//! Mentor - 学习助手 AI 任务编排核心
//!
//! 模块划分：
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 编排器、错误、请求校验、prompt 模板、调用方轮询
//! - **interpret**: 响应解释器（两段式解码 + sanitation，永不报错）
//! - **jobs**: 任务注册表与生命周期（pending → processing → 终态 → sweep）
//! - **llm**: 生成后端抽象与实现（OpenAI 兼容 / Mock）+ fallback 客户端
//! - **observability**: tracing 初始化
//! - **schedule**: 排期启发式引擎（时长估计、指标、置信度、反馈调整）
//!
//! HTTP 路由、鉴权、持久化与二进制格式抽取均是外部协作者：它们把纯文本
//! 材料与偏好记录交给本核心，并通过轮询任务快照取回结果。

pub mod config;
pub mod core;
pub mod interpret;
pub mod jobs;
pub mod llm;
pub mod observability;
pub mod schedule;

pub use crate::core::{poll_until_terminal, CoreError, JobRequest, Orchestrator};
pub use jobs::{Job, JobRegistry, JobStatus, JobType};
