//! 生成层：后端抽象与实现（OpenAI 兼容 / Mock）+ 带 fallback 的客户端

pub mod client;
pub mod mock;
pub mod openai;
pub mod traits;

pub use client::GenerationClient;
pub use mock::ScriptedBackend;
pub use openai::{OpenAiBackend, TokenUsage};
pub use traits::{ChunkStream, GenerationBackend, GenerationError, GenerationOptions};
