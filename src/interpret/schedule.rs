//! 排期形状的两段式解码

use serde_json::Value;

use super::extract::extract_json_block;
use super::sanitize::sanitize_session;
use super::types::{Interpretation, ScheduleResponse};

/// 排期生成不可用时写入 suggestions 的降级说明
pub const SCHEDULE_UNAVAILABLE_NOTICE: &str =
    "Automatic schedule generation was unavailable; please retry or plan sessions manually.";

fn schedule_items(root: &Value) -> Option<&Vec<Value>> {
    root.get("schedule")
        .and_then(Value::as_array)
        .or_else(|| root.as_array())
}

/// 解码排期输出：严格路径取围栏 JSON 并逐条 sanitize；失败则给出
/// 空会话列表 + 降级说明，永不报错
pub fn interpret_schedule(text: &str) -> Interpretation<ScheduleResponse> {
    if let Some(block) = extract_json_block(text) {
        if let Ok(root) = serde_json::from_str::<Value>(block) {
            if let Some(items) = schedule_items(&root) {
                let schedule = items
                    .iter()
                    .enumerate()
                    .filter_map(|(i, v)| sanitize_session(v, i))
                    .collect();
                let suggestions = root
                    .get("suggestions")
                    .and_then(Value::as_array)
                    .map(|a| {
                        a.iter()
                            .filter_map(|v| v.as_str().map(String::from))
                            .collect()
                    })
                    .unwrap_or_default();
                return Interpretation::Decoded(ScheduleResponse {
                    schedule,
                    suggestions,
                });
            }
        }
    }

    tracing::debug!("Schedule block missing or malformed, using empty fallback");
    Interpretation::Fallback {
        partial: ScheduleResponse {
            schedule: vec![],
            suggestions: vec![SCHEDULE_UNAVAILABLE_NOTICE.to_string()],
        },
        notice: SCHEDULE_UNAVAILABLE_NOTICE.to_string(),
    }
}
