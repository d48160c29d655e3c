//! 不可信结构字段的 sanitation
//!
//! 逐字段钳制/兜底：时长夹到 [15,180]，枚举字段落在固定集合否则取默认，
//! 前置列表缺失给空，id 缺失则合成。非对象条目整体丢弃，其余字段各自
//! 兜底，不因单个字段放弃整条会话。

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::schedule::{
    Difficulty, Effort, Priority, ScheduledSession, SessionType, DEFAULT_SESSION_MINUTES,
    MAX_SESSION_MINUTES, MIN_SESSION_MINUTES,
};

/// 时长钳制：缺失给 60，越界夹到 [15,180]
pub fn sanitize_duration(raw: Option<f64>) -> u32 {
    let minutes = raw.unwrap_or(DEFAULT_SESSION_MINUTES as f64);
    if !minutes.is_finite() {
        return DEFAULT_SESSION_MINUTES;
    }
    minutes
        .round()
        .clamp(MIN_SESSION_MINUTES as f64, MAX_SESSION_MINUTES as f64) as u32
}

pub fn parse_session_type(s: &str) -> SessionType {
    match s {
        "study" => SessionType::Study,
        "review" => SessionType::Review,
        "practice" => SessionType::Practice,
        "assessment" => SessionType::Assessment,
        _ => SessionType::default(),
    }
}

pub fn parse_difficulty(s: &str) -> Difficulty {
    match s {
        "beginner" => Difficulty::Beginner,
        "intermediate" => Difficulty::Intermediate,
        "advanced" => Difficulty::Advanced,
        _ => Difficulty::default(),
    }
}

pub fn parse_priority(s: &str) -> Priority {
    match s {
        "high" => Priority::High,
        "medium" => Priority::Medium,
        "low" => Priority::Low,
        _ => Priority::default(),
    }
}

pub fn parse_effort(s: &str) -> Effort {
    match s {
        "light" => Effort::Light,
        "moderate" => Effort::Moderate,
        "intensive" => Effort::Intensive,
        _ => Effort::default(),
    }
}

/// 日期解析：RFC3339 优先，其次 `YYYY-MM-DD`（取当日零点），失败取当前时刻
fn sanitize_date(raw: Option<&str>) -> DateTime<Utc> {
    if let Some(s) = raw {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return dt.with_timezone(&Utc);
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return dt.and_utc();
            }
        }
    }
    Utc::now()
}

fn str_field(obj: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(String::from)
}

/// 将一个未经信任的 JSON 条目整理为安全会话；非对象返回 None（丢弃）
pub fn sanitize_session(value: &Value, index: usize) -> Option<ScheduledSession> {
    let obj = value.as_object()?;

    Some(ScheduledSession {
        id: str_field(obj, "id")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("session_{}", uuid::Uuid::new_v4())),
        material_id: str_field(obj, "materialId").unwrap_or_default(),
        title: str_field(obj, "title")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("Study session {}", index + 1)),
        description: str_field(obj, "description").unwrap_or_default(),
        scheduled_date: sanitize_date(obj.get("scheduledDate").and_then(Value::as_str)),
        duration: sanitize_duration(obj.get("duration").and_then(Value::as_f64)),
        session_type: parse_session_type(
            obj.get("sessionType").and_then(Value::as_str).unwrap_or(""),
        ),
        difficulty: parse_difficulty(
            obj.get("difficulty").and_then(Value::as_str).unwrap_or(""),
        ),
        priority: parse_priority(obj.get("priority").and_then(Value::as_str).unwrap_or("")),
        prerequisites: obj
            .get("prerequisites")
            .and_then(Value::as_array)
            .map(|a| {
                a.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default(),
        estimated_effort: parse_effort(
            obj.get("estimatedEffort").and_then(Value::as_str).unwrap_or(""),
        ),
        completed: obj.get("completed").and_then(Value::as_bool).unwrap_or(false),
        actual_duration: obj
            .get("actualDuration")
            .and_then(Value::as_f64)
            .map(|d| d.round().max(0.0) as u32),
        user_rating: obj
            .get("userRating")
            .and_then(Value::as_u64)
            .map(|r| r.min(5) as u8),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_duration_always_in_bounds() {
        for raw in [
            None,
            Some(-50.0),
            Some(0.0),
            Some(14.9),
            Some(15.0),
            Some(90.0),
            Some(180.0),
            Some(500.0),
            Some(f64::NAN),
            Some(f64::INFINITY),
        ] {
            let d = sanitize_duration(raw);
            assert!(
                (MIN_SESSION_MINUTES..=MAX_SESSION_MINUTES).contains(&d),
                "{:?} -> {}",
                raw,
                d
            );
        }
        assert_eq!(sanitize_duration(None), DEFAULT_SESSION_MINUTES);
    }

    #[test]
    fn test_out_of_range_fields_get_defaults() {
        // duration 500 -> 180；difficulty "expert" -> intermediate
        let raw = json!({
            "materialId": "m1",
            "title": "第一课",
            "duration": 500,
            "difficulty": "expert"
        });
        let s = sanitize_session(&raw, 0).unwrap();
        assert_eq!(s.duration, 180);
        assert_eq!(s.difficulty, Difficulty::Intermediate);
        assert_eq!(s.session_type, SessionType::Study);
        assert_eq!(s.priority, Priority::Medium);
        assert_eq!(s.estimated_effort, Effort::Moderate);
        assert!(s.prerequisites.is_empty());
        assert!(!s.id.is_empty());
    }

    #[test]
    fn test_valid_fields_pass_through() {
        let raw = json!({
            "id": "s1",
            "materialId": "m1",
            "title": "复习",
            "scheduledDate": "2026-09-15T09:00:00Z",
            "duration": 45,
            "sessionType": "review",
            "difficulty": "advanced",
            "priority": "high",
            "prerequisites": ["s0"],
            "estimatedEffort": "intensive"
        });
        let s = sanitize_session(&raw, 3).unwrap();
        assert_eq!(s.id, "s1");
        assert_eq!(s.duration, 45);
        assert_eq!(s.session_type, SessionType::Review);
        assert_eq!(s.difficulty, Difficulty::Advanced);
        assert_eq!(s.priority, Priority::High);
        assert_eq!(s.estimated_effort, Effort::Intensive);
        assert_eq!(s.prerequisites, vec!["s0".to_string()]);
        assert_eq!(s.scheduled_date.to_rfc3339(), "2026-09-15T09:00:00+00:00");
    }

    #[test]
    fn test_plain_date_accepted() {
        let raw = json!({ "scheduledDate": "2026-10-01", "duration": 30 });
        let s = sanitize_session(&raw, 0).unwrap();
        assert_eq!(s.scheduled_date.to_rfc3339(), "2026-10-01T00:00:00+00:00");
    }

    #[test]
    fn test_non_object_dropped() {
        assert!(sanitize_session(&json!("not an object"), 0).is_none());
        assert!(sanitize_session(&json!(42), 0).is_none());
        assert!(sanitize_session(&json!(null), 0).is_none());
    }
}
