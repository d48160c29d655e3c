//! 生成后端抽象
//!
//! 所有后端（OpenAI 兼容 / Mock）实现 GenerationBackend：generate（非流式）、
//! generate_stream（流式 chunk）。模型、温度、输出上限通过 GenerationOptions
//! 显式传入，不使用松散参数袋。

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;
use thiserror::Error;

/// 流式生成的 chunk 流
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<String, GenerationError>> + Send>>;

/// 生成后端错误（fallback 耗尽后作为任务失败向上传播）
#[derive(Error, Debug, Clone)]
pub enum GenerationError {
    #[error("generation backend error: {0}")]
    Backend(String),

    #[error("generation stream error: {0}")]
    Stream(String),
}

/// 一次生成调用的显式配置
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    /// 输出 token 上限
    pub max_output_tokens: u32,
    pub model: String,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 2048,
            model: "gpt-4o-mini".to_string(),
        }
    }
}

impl GenerationOptions {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = max;
        self
    }
}

/// 生成后端 trait：任何满足该契约的实现（LLM 服务 / Mock / 本地模型）均可替换
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// 非流式生成
    async fn generate(
        &self,
        prompt: &str,
        system: Option<&str>,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError>;

    /// 流式生成，返回 chunk 流
    async fn generate_stream(
        &self,
        prompt: &str,
        system: Option<&str>,
        options: &GenerationOptions,
    ) -> Result<ChunkStream, GenerationError>;
}
