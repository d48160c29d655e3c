//! 响应解释器：把不可信的生成文本整理为类型化、有界的领域结构
//!
//! 两段式：先从围栏块严格解码，失败再走启发式兜底；所有字段经过
//! sanitation。解释器永不报错，总是返回可用结构 + 是否严格解码的标签。

pub mod extract;
pub mod generic;
pub mod sanitize;
pub mod schedule;
pub mod summary;
pub mod types;

pub use extract::extract_json_block;
pub use generic::{interpret_cards, interpret_document};
pub use sanitize::{sanitize_duration, sanitize_session};
pub use schedule::{interpret_schedule, SCHEDULE_UNAVAILABLE_NOTICE};
pub use summary::interpret_summary;
pub use types::{
    CardResponse, DocumentResponse, Flashcard, Interpretation, ScheduleResponse, SummaryResponse,
};
