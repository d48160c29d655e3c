//! 解释器目标形状与标签化结果

use serde::{Deserialize, Serialize};

use crate::schedule::ScheduledSession;

/// 解释结果：严格解码成功，或带说明的兜底结构。解释器永不报错。
#[derive(Debug, Clone, PartialEq)]
pub enum Interpretation<T> {
    /// 从结构化块严格解码得到
    Decoded(T),
    /// 启发式兜底，notice 说明降级原因
    Fallback { partial: T, notice: String },
}

impl<T> Interpretation<T> {
    /// 严格解码是否成功
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Decoded(_))
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Decoded(v) => v,
            Self::Fallback { partial, .. } => partial,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Decoded(v) => v,
            Self::Fallback { partial, .. } => partial,
        }
    }

    pub fn notice(&self) -> Option<&str> {
        match self {
            Self::Decoded(_) => None,
            Self::Fallback { notice, .. } => Some(notice),
        }
    }
}

/// 排期形状：会话列表 + 建议
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub schedule: Vec<ScheduledSession>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// 摘要形状
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "summary")]
    pub content: String,
    #[serde(default)]
    pub key_points: Vec<String>,
}

/// 卡片（flashcards / quiz 共用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

/// 卡片集合形状
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardResponse {
    pub cards: Vec<Flashcard>,
}

/// 纯文本形状（notes / study-plan / analysis 共用）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub content: String,
}
