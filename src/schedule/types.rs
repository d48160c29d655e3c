//! 排期领域类型
//!
//! 材料描述、学习会话、聚合指标、用户偏好与目标。所有枚举字段经过
//! sanitation 后保证落在固定取值集合内，时长保证落在 [15,180] 分钟。

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 会话时长下界（分钟）
pub const MIN_SESSION_MINUTES: u32 = 15;
/// 会话时长上界（分钟）
pub const MAX_SESSION_MINUTES: u32 = 180;
/// 缺省会话时长（分钟）
pub const DEFAULT_SESSION_MINUTES: u32 = 60;

/// 学习材料类别（时长估计的速率依据）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentCategory {
    Document,
    Video,
    Audio,
    PlainText,
}

/// 学习材料描述：仅用于时长估计，在一次排期任务内不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialDescriptor {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: ContentCategory,
}

impl MaterialDescriptor {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        category: ContentCategory,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            category,
        }
    }

    /// 内容长度（字符数，派生字段）
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

/// 会话类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Study,
    Review,
    Practice,
    Assessment,
}

impl Default for SessionType {
    fn default() -> Self {
        Self::Study
    }
}

/// 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Intermediate
    }
}

/// 优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// 预估投入强度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Light,
    Moderate,
    Intensive,
}

impl Default for Effort {
    fn default() -> Self {
        Self::Moderate
    }
}

/// 一次排好的学习会话（sanitation 之后的安全形态）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledSession {
    pub id: String,
    pub material_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub scheduled_date: DateTime<Utc>,
    /// 分钟，恒在 [15,180]
    pub duration: u32,
    pub session_type: SessionType,
    pub difficulty: Difficulty,
    pub priority: Priority,
    /// 前置会话 id（有序）
    #[serde(default)]
    pub prerequisites: Vec<String>,
    pub estimated_effort: Effort,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<u8>,
}

/// 排期聚合指标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleMetrics {
    /// 总学习时长（小时）
    pub total_estimated_time: f64,
    /// 材料 id -> 占比（百分数，总时长 > 0 时各项相加 ≈ 100）
    pub material_distribution: HashMap<String, u32>,
    /// 会话类型 -> 数量
    pub session_type_distribution: HashMap<SessionType, usize>,
    /// 周序号（从 1 起）-> 该周首个会话的难度
    pub difficulty_progression: HashMap<u32, Difficulty>,
    /// 每周投入（小时/周）
    pub weekly_time_commitment: f64,
    /// 启发式置信度 [0,1]
    pub confidence: f64,
}

/// 用户学习偏好（由调用方提供，核心不负责存取）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPreferences {
    /// 星期 -> 可用时间窗（如 "19:00-21:00"）
    #[serde(default)]
    pub available_time: HashMap<String, Vec<String>>,
    /// 期望单次会话时长（分钟）
    pub preferred_session_length: u32,
    /// 每日会话数上限
    pub max_sessions_per_day: u32,
    /// 学习风格标签（visual / auditory / ...）
    #[serde(default)]
    pub learning_style: String,
    /// 难度推进方式（gradual / steep / ...）
    #[serde(default)]
    pub difficulty_curve: String,
}

impl Default for StudyPreferences {
    fn default() -> Self {
        Self {
            available_time: HashMap::new(),
            preferred_session_length: DEFAULT_SESSION_MINUTES,
            max_sessions_per_day: 2,
            learning_style: String::new(),
            difficulty_curve: String::new(),
        }
    }
}

/// 学习目标
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyGoals {
    /// 目标完成日期
    #[serde(default)]
    pub target_date: Option<DateTime<Utc>>,
    /// 优先模式（deadline / mastery / ...）
    #[serde(default)]
    pub priority_mode: String,
    /// 复习频率（次/周）
    #[serde(default)]
    pub review_frequency: u32,
}
