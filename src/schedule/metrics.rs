//! 排期聚合指标与置信度
//!
//! 全部为纯函数，输入是 sanitation 之后的会话列表，结果确定且可重算。
//! difficulty_progression 按数组位置每 7 个会话记一周（沿用既有行为，
//! 不按 scheduled_date 的日历周）。

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::types::{
    ScheduleMetrics, ScheduledSession, MAX_SESSION_MINUTES, MIN_SESSION_MINUTES,
};

/// 从会话列表计算全部指标
pub fn compute_metrics(sessions: &[ScheduledSession]) -> ScheduleMetrics {
    let total_minutes: u64 = sessions.iter().map(|s| s.duration as u64).sum();
    let total_hours = total_minutes as f64 / 60.0;

    // 材料占比：仅在总时长 > 0 时有定义
    let mut material_distribution = HashMap::new();
    if total_minutes > 0 {
        let mut per_material: HashMap<&str, u64> = HashMap::new();
        for s in sessions {
            *per_material.entry(s.material_id.as_str()).or_default() += s.duration as u64;
        }
        for (id, minutes) in per_material {
            let pct = (100.0 * minutes as f64 / total_minutes as f64).round() as u32;
            material_distribution.insert(id.to_string(), pct);
        }
    }

    let mut session_type_distribution = HashMap::new();
    for s in sessions {
        *session_type_distribution.entry(s.session_type).or_insert(0) += 1;
    }

    // 每连续 7 个会话为一周，取该周首个会话的难度
    let mut difficulty_progression = HashMap::new();
    for (i, chunk) in sessions.chunks(7).enumerate() {
        if let Some(first) = chunk.first() {
            difficulty_progression.insert(i as u32 + 1, first.difficulty);
        }
    }

    ScheduleMetrics {
        total_estimated_time: total_hours,
        material_distribution,
        session_type_distribution,
        difficulty_progression,
        weekly_time_commitment: weekly_commitment(sessions),
        confidence: confidence_score(sessions),
    }
}

/// 计划完成日期：最晚的 scheduled_date；空列表取当前时刻
pub fn completion_date(sessions: &[ScheduledSession]) -> DateTime<Utc> {
    sessions
        .iter()
        .map(|s| s.scheduled_date)
        .max()
        .unwrap_or_else(Utc::now)
}

/// 每周投入（小时/周）：总时长 ÷ max(1, 首末日期间的周数向上取整)
pub fn weekly_commitment(sessions: &[ScheduledSession]) -> f64 {
    if sessions.is_empty() {
        return 0.0;
    }

    let total_hours: f64 = sessions.iter().map(|s| s.duration as f64).sum::<f64>() / 60.0;
    let first = sessions
        .iter()
        .map(|s| s.scheduled_date)
        .min()
        .unwrap_or_else(Utc::now);
    let last = completion_date(sessions);

    let days = (last - first).num_days().max(0);
    let weeks = ((days + 6) / 7).max(1);
    total_hours / weeks as f64
}

/// 启发式置信度 [0,1]
///
/// 基线 0.5；日期非递减 +0.2；会话类型多于一种 +0.2；
/// 所有时长落在合法区间 +0.1。
pub fn confidence_score(sessions: &[ScheduledSession]) -> f64 {
    let mut score: f64 = 0.5;

    let ordered = sessions.len() <= 1
        || sessions
            .windows(2)
            .all(|w| w[0].scheduled_date <= w[1].scheduled_date);
    if ordered {
        score += 0.2;
    }

    let distinct_types = sessions
        .iter()
        .map(|s| s.session_type)
        .collect::<std::collections::HashSet<_>>()
        .len();
    if distinct_types > 1 {
        score += 0.2;
    }

    let durations_ok = sessions
        .iter()
        .all(|s| (MIN_SESSION_MINUTES..=MAX_SESSION_MINUTES).contains(&s.duration));
    if durations_ok {
        score += 0.1;
    }

    score.clamp(0.0, 1.0)
}
