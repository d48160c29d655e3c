//! 从生成文本中提取结构化块
//!
//! 优先取 ```json 围栏内容；否则按先出现的括号判定根形状，取
//! `{`..`}` 或 `[`..`]` 区间。提取不到返回 None，由调用方走启发式兜底。

/// 提取疑似 JSON 的文本片段
pub fn extract_json_block(text: &str) -> Option<&str> {
    let trimmed = text.trim();

    if let Some(start) = trimmed.find("```json") {
        let rest = &trimmed[start + 7..];
        let inner = rest
            .find("```")
            .map(|end| rest[..end].trim())
            .unwrap_or_else(|| rest.trim());
        if !inner.is_empty() {
            return Some(inner);
        }
    }

    // 先出现的括号决定根形状：`[` 在 `{` 之前说明根是数组，
    // 取对象区间会把数组根截成首个元素
    let obj_start = trimmed.find('{');
    let arr_start = trimmed.find('[');
    let array_root = match (obj_start, arr_start) {
        (Some(o), Some(a)) => a < o,
        (None, Some(_)) => true,
        _ => false,
    };

    if array_root {
        if let (Some(start), Some(end)) = (arr_start, trimmed.rfind(']')) {
            if start < end {
                return Some(&trimmed[start..=end]);
            }
        }
    }
    if let (Some(start), Some(end)) = (obj_start, trimmed.rfind('}')) {
        if start < end {
            return Some(&trimmed[start..=end]);
        }
    }
    if let (Some(start), Some(end)) = (arr_start, trimmed.rfind(']')) {
        if start < end {
            return Some(&trimmed[start..=end]);
        }
    }

    None
}
