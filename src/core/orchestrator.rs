//! 任务编排器
//!
//! submit 同步校验后立即返回任务 id，实际工作在每任务一个的后台 task
//! 中进行：begin → 组 prompt → 生成（含 fallback）→ 解释 → 排期任务
//! 追加指标计算 → complete/fail。task 内所有路径必达终态，失败全部落进
//! 注册表，不存在丢失的错误。

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use super::error::CoreError;
use super::prompt;
use super::request::JobRequest;
use crate::config::AppConfig;
use crate::interpret::{
    interpret_cards, interpret_document, interpret_schedule, interpret_summary,
};
use crate::jobs::{JobId, JobRegistry, JobType, GENERATION_ERROR_CODE};
use crate::llm::{
    GenerationBackend, GenerationClient, GenerationOptions, OpenAiBackend, ScriptedBackend,
};
use crate::schedule::{completion_date, compute_metrics};

/// 根据配置与环境变量选择生成后端（OpenAI 兼容 / Mock）
pub fn create_backend_from_config(cfg: &AppConfig) -> Arc<dyn GenerationBackend> {
    if std::env::var("OPENAI_API_KEY").is_ok() {
        tracing::info!("Using OpenAI-compatible backend ({})", cfg.llm.model);
        Arc::new(OpenAiBackend::new(
            cfg.llm.base_url.as_deref(),
            std::env::var("OPENAI_API_KEY").ok().as_deref(),
        ))
    } else {
        tracing::warn!("No API key set, using scripted mock backend");
        Arc::new(ScriptedBackend::new())
    }
}

/// 编排器：组合注册表、生成客户端与解释/排期层
pub struct Orchestrator {
    registry: Arc<JobRegistry>,
    client: Arc<GenerationClient>,
    options: GenerationOptions,
    /// 单次生成请求的硬超时
    request_timeout: Duration,
}

impl Orchestrator {
    pub fn new(
        registry: Arc<JobRegistry>,
        client: Arc<GenerationClient>,
        options: GenerationOptions,
    ) -> Self {
        Self {
            registry,
            client,
            options,
            request_timeout: Duration::from_secs(60),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// 按配置组装整套编排器（注册表新建，后端按环境选择）
    pub fn from_config(cfg: &AppConfig) -> Self {
        let backend = create_backend_from_config(cfg);
        let client = Arc::new(GenerationClient::new(backend, cfg.llm.fallback_model.clone()));
        let options = GenerationOptions {
            temperature: cfg.llm.temperature,
            max_output_tokens: cfg.llm.max_output_tokens,
            model: cfg.llm.model.clone(),
        };
        Self::new(Arc::new(JobRegistry::new()), client, options)
            .with_request_timeout(Duration::from_secs(cfg.llm.request_timeout_secs))
    }

    pub fn registry(&self) -> &Arc<JobRegistry> {
        &self.registry
    }

    /// 提交任务：校验失败同步返回且不创建任务；否则立即返回 id，
    /// 不等待生成
    pub async fn submit(&self, request: JobRequest) -> Result<JobId, CoreError> {
        request.validate()?;

        let id = self.registry.create(request.job_type()).await;
        tracing::info!(job_id = %id, job_type = ?request.job_type(), "Job submitted");

        let registry = Arc::clone(&self.registry);
        let client = Arc::clone(&self.client);
        let options = self.options.clone();
        let timeout = self.request_timeout;
        let job_id = id.clone();

        tokio::spawn(async move {
            match run_job(&registry, &client, &options, timeout, &job_id, request).await {
                Ok(result) => registry.complete(&job_id, result).await,
                Err(e) => {
                    tracing::error!(job_id = %job_id, "Job failed: {}", e);
                    registry
                        .fail(&job_id, GENERATION_ERROR_CODE, e.to_string())
                        .await;
                }
            }
        });

        Ok(id)
    }
}

async fn run_job(
    registry: &JobRegistry,
    client: &GenerationClient,
    options: &GenerationOptions,
    timeout: Duration,
    job_id: &str,
    request: JobRequest,
) -> Result<serde_json::Value, CoreError> {
    registry.begin(job_id).await;
    registry.set_progress(job_id, 10).await;

    let prompt = prompt::build_prompt(&request);
    let system = prompt::system_text(request.job_type());
    registry.set_progress(job_id, 25).await;

    let text = tokio::time::timeout(timeout, client.generate(&prompt, Some(system), options))
        .await
        .map_err(|_| {
            crate::llm::GenerationError::Backend("generation request timed out".to_string())
        })??;
    registry.set_progress(job_id, 70).await;

    Ok(compile_result(&request, &text))
}

/// 解释生成文本并组装结果载荷；解析失败被解释器吸收，这里不会失败
fn compile_result(request: &JobRequest, text: &str) -> serde_json::Value {
    match request.job_type() {
        JobType::Scheduling => {
            let out = interpret_schedule(text);
            let degraded = !out.is_strict();
            let resp = out.into_value();
            let metrics = compute_metrics(&resp.schedule);
            json!({
                "schedule": resp.schedule,
                "suggestions": resp.suggestions,
                "metrics": metrics,
                "completionDate": completion_date(&resp.schedule),
                "degraded": degraded,
            })
        }
        JobType::Summarization => {
            let out = interpret_summary(text);
            let degraded = !out.is_strict();
            json!({ "summary": out.into_value(), "degraded": degraded })
        }
        JobType::Flashcards | JobType::Quiz => {
            let out = interpret_cards(text);
            let degraded = !out.is_strict();
            json!({ "cards": out.into_value().cards, "degraded": degraded })
        }
        JobType::Notes | JobType::StudyPlan | JobType::Analysis => {
            let out = interpret_document(text);
            let degraded = !out.is_strict();
            json!({ "content": out.into_value().content, "degraded": degraded })
        }
    }
}
