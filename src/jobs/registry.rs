//! 任务注册表
//!
//! 追踪异步任务生命周期：pending → processing → completed/failed。
//! 终态之后条目不再变化，直到被定时清理（sweep）删除。注册表是唯一的
//! 共享可变资源：每个任务的字段只由该任务自己的执行体写入，底层 map 用
//! 一把 RwLock 保护即可；终态判定与删除在同一把写锁内完成，sweep 不会
//! 与「转入终态」竞争。

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// 任务 ID
pub type JobId = String;

/// 生成失败的错误码
pub const GENERATION_ERROR_CODE: &str = "GENERATION_ERROR";

/// 任务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    Summarization,
    Scheduling,
    Flashcards,
    Quiz,
    Notes,
    StudyPlan,
    Analysis,
}

/// 任务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// 已创建，尚未开始
    Pending,
    /// 执行中
    Processing,
    /// 成功结束
    Completed,
    /// 失败结束
    Failed,
}

/// 失败详情（仅失败任务持有）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobError {
    pub code: String,
    pub message: String,
    /// 毫秒时间戳
    pub timestamp: i64,
}

/// 一个被追踪的异步任务
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub job_type: JobType,
    pub status: JobStatus,
    /// 0-100，终态前单调不减（由执行体保证）
    pub progress: u8,
    /// 创建时间（毫秒时间戳）
    pub started_at: i64,
    /// 终态时间，只写一次
    pub completed_at: Option<i64>,
    /// 结果载荷，形态取决于 job_type
    pub result: Option<serde_json::Value>,
    pub error: Option<JobError>,
}

impl Job {
    fn new(job_type: JobType) -> Self {
        Self {
            id: format!("job_{}", uuid::Uuid::new_v4()),
            job_type,
            status: JobStatus::Pending,
            progress: 0,
            started_at: chrono::Utc::now().timestamp_millis(),
            completed_at: None,
            result: None,
            error: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, JobStatus::Completed | JobStatus::Failed)
    }
}

/// 任务注册表（内存保留，超过 retention 的终态任务被 sweep 删除）
#[derive(Default)]
pub struct JobRegistry {
    jobs: RwLock<HashMap<JobId, Job>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建任务：分配唯一 id，pending / progress 0 / started_at=now。不会失败。
    pub async fn create(&self, job_type: JobType) -> JobId {
        let job = Job::new(job_type);
        let id = job.id.clone();
        self.jobs.write().await.insert(id.clone(), job);
        id
    }

    /// pending → processing，由编排器在第一个副作用步骤前显式调用；终态任务忽略
    pub async fn begin(&self, job_id: &str) {
        let mut jobs = self.jobs.write().await;
        if let Some(job) = jobs.get_mut(job_id) {
            if !job.is_finished() {
                job.status = JobStatus::Processing;
            }
        }
    }

    /// 更新进度（上限 100）；终态任务忽略
    pub async fn set_progress(&self, job_id: &str, percent: u8) {
        let mut jobs = self.jobs.write().await;
        if let Some(job) = jobs.get_mut(job_id) {
            if !job.is_finished() {
                job.progress = percent.min(100);
            }
        }
    }

    /// 成功收尾：completed / progress 100 / completed_at=now。对已终态任务是 no-op。
    pub async fn complete(&self, job_id: &str, result: serde_json::Value) {
        let mut jobs = self.jobs.write().await;
        if let Some(job) = jobs.get_mut(job_id) {
            if job.is_finished() {
                return;
            }
            job.status = JobStatus::Completed;
            job.progress = 100;
            job.completed_at = Some(chrono::Utc::now().timestamp_millis());
            job.result = Some(result);
        }
    }

    /// 失败收尾：failed / completed_at=now / error 填充。对已终态任务是 no-op。
    pub async fn fail(&self, job_id: &str, code: &str, message: impl Into<String>) {
        let mut jobs = self.jobs.write().await;
        if let Some(job) = jobs.get_mut(job_id) {
            if job.is_finished() {
                return;
            }
            job.status = JobStatus::Failed;
            job.completed_at = Some(chrono::Utc::now().timestamp_millis());
            job.error = Some(JobError {
                code: code.to_string(),
                message: message.into(),
                timestamp: chrono::Utc::now().timestamp_millis(),
            });
        }
    }

    /// 只读快照
    pub async fn status(&self, job_id: &str) -> Option<Job> {
        self.jobs.read().await.get(job_id).cloned()
    }

    /// 未到终态的任务
    pub async fn list_active(&self) -> Vec<Job> {
        self.jobs
            .read()
            .await
            .values()
            .filter(|j| !j.is_finished())
            .cloned()
            .collect()
    }

    /// 删除 completed_at 早于 retention 的终态任务，返回删除数量
    pub async fn sweep(&self, retention: Duration) -> usize {
        let cutoff = chrono::Utc::now().timestamp_millis() - retention.as_millis() as i64;

        let mut jobs = self.jobs.write().await;
        let old_ids: Vec<_> = jobs
            .iter()
            .filter(|(_, j)| j.is_finished() && j.completed_at.map(|c| c < cutoff).unwrap_or(false))
            .map(|(id, _)| id.clone())
            .collect();

        for id in &old_ids {
            jobs.remove(id);
        }
        old_ids.len()
    }

    /// 启动固定间隔的后台清理任务，与任务执行并发运行
    pub fn spawn_sweeper(
        self: &Arc<Self>,
        interval: Duration,
        retention: Duration,
    ) -> JoinHandle<()> {
        let registry = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await; // 首个 tick 立即返回，跳过
            loop {
                ticker.tick().await;
                let removed = registry.sweep(retention).await;
                if removed > 0 {
                    tracing::info!("Swept {} expired jobs", removed);
                }
            }
        })
    }
}
