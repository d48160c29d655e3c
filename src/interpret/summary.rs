//! 摘要形状的两段式解码
//!
//! 严格路径直接反序列化围栏 JSON；兜底路径从原始文本启发式提取：
//! 首个标题样式行作 title，列表行作 key_points，全文作 content。

use super::extract::extract_json_block;
use super::types::{Interpretation, SummaryResponse};

const SUMMARY_FALLBACK_NOTICE: &str =
    "No structured summary block found; summary derived from raw text.";

fn heading_title(text: &str) -> String {
    for line in text.lines() {
        let t = line.trim();
        if t.is_empty() {
            continue;
        }
        if let Some(h) = t.strip_prefix('#') {
            return h.trim_start_matches('#').trim().to_string();
        }
        return t.chars().take(80).collect();
    }
    String::new()
}

fn bullet_text(line: &str) -> Option<&str> {
    let t = line.trim();
    for marker in ["- ", "* ", "• "] {
        if let Some(rest) = t.strip_prefix(marker) {
            return Some(rest.trim());
        }
    }
    // 编号列表："1. xxx" / "2) xxx"
    for sep in [". ", ") "] {
        if let Some((num, rest)) = t.split_once(sep) {
            if !num.is_empty() && num.chars().all(|c| c.is_ascii_digit()) {
                return Some(rest.trim());
            }
        }
    }
    None
}

/// 解码摘要输出，永不报错
pub fn interpret_summary(text: &str) -> Interpretation<SummaryResponse> {
    if let Some(block) = extract_json_block(text) {
        if let Ok(resp) = serde_json::from_str::<SummaryResponse>(block) {
            if !resp.content.is_empty() || !resp.title.is_empty() {
                return Interpretation::Decoded(resp);
            }
        }
    }

    let key_points = text.lines().filter_map(bullet_text).map(String::from).collect();
    Interpretation::Fallback {
        partial: SummaryResponse {
            title: heading_title(text),
            content: text.trim().to_string(),
            key_points,
        },
        notice: SUMMARY_FALLBACK_NOTICE.to_string(),
    }
}
