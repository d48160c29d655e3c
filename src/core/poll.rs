//! 调用方轮询
//!
//! 固定间隔、有限次数地查询任务状态；超出预算返回 Timeout，任务本身
//! 不受影响，后台 task 照常跑到终态。

use std::time::Duration;

use super::error::CoreError;
use crate::jobs::{Job, JobRegistry};

/// 轮询直到任务进入终态
pub async fn poll_until_terminal(
    registry: &JobRegistry,
    job_id: &str,
    interval: Duration,
    max_attempts: u32,
) -> Result<Job, CoreError> {
    for _ in 0..max_attempts {
        match registry.status(job_id).await {
            None => return Err(CoreError::JobNotFound(job_id.to_string())),
            Some(job) if job.is_finished() => return Ok(job),
            Some(_) => tokio::time::sleep(interval).await,
        }
    }
    Err(CoreError::Timeout {
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::{JobStatus, JobType};
    use serde_json::json;

    #[tokio::test]
    async fn test_poll_returns_terminal_snapshot() {
        let registry = JobRegistry::new();
        let id = registry.create(JobType::Notes).await;
        registry.complete(&id, json!({"content": "ok"})).await;

        let job = poll_until_terminal(&registry, &id, Duration::from_millis(1), 5)
            .await
            .unwrap();
        assert_eq!(job.status, JobStatus::Completed);
    }

    #[tokio::test]
    async fn test_poll_times_out_without_mutating_job() {
        let registry = JobRegistry::new();
        let id = registry.create(JobType::Notes).await;
        registry.begin(&id).await;

        let err = poll_until_terminal(&registry, &id, Duration::from_millis(1), 3)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Timeout { attempts: 3 }));

        // 超时只属于调用方，任务仍在处理中
        let job = registry.status(&id).await.unwrap();
        assert_eq!(job.status, JobStatus::Processing);
    }

    #[tokio::test]
    async fn test_poll_unknown_job() {
        let registry = JobRegistry::new();
        let err = poll_until_terminal(&registry, "job_missing", Duration::from_millis(1), 3)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::JobNotFound(_)));
    }
}
