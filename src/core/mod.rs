//! 核心层：编排、错误、请求校验、prompt 模板、调用方轮询

pub mod error;
pub mod orchestrator;
pub mod poll;
pub mod prompt;
pub mod request;

pub use error::CoreError;
pub use orchestrator::{create_backend_from_config, Orchestrator};
pub use poll::poll_until_terminal;
pub use request::{JobRequest, MAX_ITEM_COUNT};
