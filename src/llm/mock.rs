//! 脚本化 Mock 后端（用于测试，无需 API）
//!
//! 按入队顺序弹出预设的成功/失败结果，并记录每次调用收到的
//! GenerationOptions，便于断言 fallback 模型替换是否发生。

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use futures_util::stream;

use super::traits::{ChunkStream, GenerationBackend, GenerationError, GenerationOptions};

/// 脚本化后端：无脚本时回显 prompt 首行
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    script: Mutex<VecDeque<Result<String, GenerationError>>>,
    calls: Mutex<Vec<GenerationOptions>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一次成功响应
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.script
            .lock()
            .expect("script lock poisoned")
            .push_back(Ok(text.into()));
        self
    }

    /// 追加一次失败
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.script
            .lock()
            .expect("script lock poisoned")
            .push_back(Err(GenerationError::Backend(message.into())));
        self
    }

    /// 已收到的各次调用配置快照
    pub fn calls(&self) -> Vec<GenerationOptions> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    fn next(&self, prompt: &str, options: &GenerationOptions) -> Result<String, GenerationError> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(options.clone());

        self.script
            .lock()
            .expect("script lock poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                let first_line = prompt.lines().next().unwrap_or("(no input)");
                Ok(format!("Echo from mock: {}", first_line))
            })
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    async fn generate(
        &self,
        prompt: &str,
        _system: Option<&str>,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        self.next(prompt, options)
    }

    async fn generate_stream(
        &self,
        prompt: &str,
        _system: Option<&str>,
        options: &GenerationOptions,
    ) -> Result<ChunkStream, GenerationError> {
        let content = self.next(prompt, options)?;
        // 按 8 字符一片切分，模拟增量输出
        let chunks: Vec<Result<String, GenerationError>> = content
            .chars()
            .collect::<Vec<_>>()
            .chunks(8)
            .map(|c| Ok(c.iter().collect()))
            .collect();
        Ok(Box::pin(stream::iter(chunks)))
    }
}
