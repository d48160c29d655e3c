//! 核心错误类型
//!
//! 校验失败在任何异步工作开始前同步拒绝；生成失败在 fallback 耗尽后把
//! 任务置为 failed；解析失败从不出现在这里（由解释器就地吸收为兜底
//! 结构）；轮询超时只属于调用方，不改动任务状态。

use thiserror::Error;

use crate::llm::GenerationError;

/// 核心错误
#[derive(Error, Debug)]
pub enum CoreError {
    /// 请求形状不合法，任务未创建
    #[error("Validation error: {0}")]
    Validation(String),

    /// 生成后端在 fallback 之后仍然失败
    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// 调用方轮询超出预算
    #[error("Polling timed out after {attempts} attempts")]
    Timeout { attempts: u32 },

    #[error("Job not found: {0}")]
    JobNotFound(String),
}
