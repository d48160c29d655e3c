//! 生成客户端：有界重试 + fallback 模型
//!
//! 失败时若本次使用的模型不是 fallback 模型，则换用 fallback 模型重试
//! 恰好一次；fallback 也失败、或首次就在用 fallback，直接向上传播。
//! 至多两次尝试，无递归。流式调用不做重试：已送出的部分输出无法安全重放。

use std::sync::Arc;

use futures_util::StreamExt;

use super::traits::{GenerationBackend, GenerationError, GenerationOptions};

/// 生成客户端，持有后端与 fallback 模型名
pub struct GenerationClient {
    backend: Arc<dyn GenerationBackend>,
    fallback_model: String,
}

impl GenerationClient {
    pub fn new(backend: Arc<dyn GenerationBackend>, fallback_model: impl Into<String>) -> Self {
        Self {
            backend,
            fallback_model: fallback_model.into(),
        }
    }

    pub fn fallback_model(&self) -> &str {
        &self.fallback_model
    }

    /// 非流式生成（含一次 fallback 重试）
    pub async fn generate(
        &self,
        prompt: &str,
        system: Option<&str>,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        match self.backend.generate(prompt, system, options).await {
            Ok(text) => Ok(text),
            Err(e) if options.model != self.fallback_model => {
                tracing::warn!(
                    model = %options.model,
                    fallback = %self.fallback_model,
                    "Generation failed ({}), retrying with fallback model",
                    e
                );
                let fallback = options.clone().with_model(self.fallback_model.clone());
                self.backend.generate(prompt, system, &fallback).await
            }
            Err(e) => Err(e),
        }
    }

    /// 流式生成：对每个 chunk 调用 on_chunk，返回全文拼接；不做 fallback
    pub async fn generate_stream(
        &self,
        prompt: &str,
        system: Option<&str>,
        mut on_chunk: impl FnMut(&str),
        options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        let mut stream = self.backend.generate_stream(prompt, system, options).await?;

        let mut full = String::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            on_chunk(&chunk);
            full.push_str(&chunk);
        }
        Ok(full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ScriptedBackend;

    #[tokio::test]
    async fn test_fallback_retry_on_failure() {
        let backend = Arc::new(
            ScriptedBackend::new()
                .with_failure("primary down")
                .with_response("rescued"),
        );
        let client = GenerationClient::new(backend.clone(), "gpt-4o-mini");

        let options = GenerationOptions::default().with_model("gpt-4o");
        let text = client.generate("hi", None, &options).await.unwrap();
        assert_eq!(text, "rescued");

        let calls = backend.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].model, "gpt-4o");
        assert_eq!(calls[1].model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_no_retry_when_already_on_fallback() {
        let backend = Arc::new(ScriptedBackend::new().with_failure("down"));
        let client = GenerationClient::new(backend.clone(), "gpt-4o-mini");

        let options = GenerationOptions::default().with_model("gpt-4o-mini");
        assert!(client.generate("hi", None, &options).await.is_err());
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_fallback_failure_propagates() {
        let backend = Arc::new(
            ScriptedBackend::new()
                .with_failure("primary down")
                .with_failure("fallback down"),
        );
        let client = GenerationClient::new(backend.clone(), "gpt-4o-mini");

        let options = GenerationOptions::default().with_model("gpt-4o");
        let err = client.generate("hi", None, &options).await.unwrap_err();
        assert!(err.to_string().contains("fallback down"));
        // 恰好两次尝试，无进一步递归
        assert_eq!(backend.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_stream_concatenates_chunks() {
        let backend = Arc::new(ScriptedBackend::new().with_response("整段流式输出的内容本体"));
        let client = GenerationClient::new(backend, "gpt-4o-mini");

        let mut seen = Vec::new();
        let full = client
            .generate_stream(
                "hi",
                None,
                |chunk| seen.push(chunk.to_string()),
                &GenerationOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(full, "整段流式输出的内容本体");
        assert!(seen.len() > 1);
        assert_eq!(seen.concat(), full);
    }

    #[tokio::test]
    async fn test_stream_has_no_fallback() {
        let backend = Arc::new(ScriptedBackend::new().with_failure("down"));
        let client = GenerationClient::new(backend.clone(), "gpt-4o-mini");

        let options = GenerationOptions::default().with_model("gpt-4o");
        let result = client
            .generate_stream("hi", None, |_| {}, &options)
            .await;
        assert!(result.is_err());
        assert_eq!(backend.calls().len(), 1);
    }
}
