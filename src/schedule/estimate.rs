//! 学习时长估计
//!
//! 按材料类别取每千字符的基础分钟数，再按内容中的复杂度模式（数学记号、
//! 大写缩略语、小数、函数调用样式 token）放大，向上取整得到分钟数。

use std::sync::OnceLock;

use regex::Regex;

use super::types::{ContentCategory, MaterialDescriptor};

/// 单类复杂度模式出现次数超过该阈值时，乘数 +0.2
const COMPLEXITY_THRESHOLD: usize = 10;

static MATH_RE: OnceLock<Regex> = OnceLock::new();
static ACRONYM_RE: OnceLock<Regex> = OnceLock::new();
static DECIMAL_RE: OnceLock<Regex> = OnceLock::new();
static CALL_RE: OnceLock<Regex> = OnceLock::new();

fn complexity_patterns() -> [&'static Regex; 4] {
    [
        // 数学记号：特殊符号或 a <op> b 形式的算式
        MATH_RE.get_or_init(|| {
            Regex::new(r"[∑∏∫√≤≥≠±^]|\b\d+\s*[=+*/-]\s*\d+").unwrap()
        }),
        // 长大写缩略语（HTTP、CRDT 等）
        ACRONYM_RE.get_or_init(|| Regex::new(r"\b[A-Z]{3,}\b").unwrap()),
        // 小数
        DECIMAL_RE.get_or_init(|| Regex::new(r"\b\d+\.\d+\b").unwrap()),
        // 函数调用样式 token
        CALL_RE.get_or_init(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*\([^)\n]*\)").unwrap()),
    ]
}

/// 每 1000 字符的基础分钟数
fn category_rate(category: ContentCategory) -> f64 {
    match category {
        ContentCategory::Document => 2.0,
        ContentCategory::Video => 1.5,
        ContentCategory::Audio => 1.2,
        ContentCategory::PlainText => 1.8,
    }
}

/// 估计一份材料的学习时长（分钟）
///
/// `ceil((字符数/1000 * 类别速率) * 复杂度乘数)`；乘数从 1.0 起，
/// 四类模式中每有一类出现次数超过阈值便 +0.2。
pub fn estimate_study_time(material: &MaterialDescriptor) -> u32 {
    let base = material.char_len() as f64 / 1000.0 * category_rate(material.category);

    let mut multiplier = 1.0;
    for re in complexity_patterns() {
        if re.find_iter(&material.content).count() > COMPLEXITY_THRESHOLD {
            multiplier += 0.2;
        }
    }

    (base * multiplier).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(content: &str, category: ContentCategory) -> MaterialDescriptor {
        MaterialDescriptor::new("m1", "测试材料", content, category)
    }

    #[test]
    fn test_document_rate_without_complexity() {
        // 5000 字符 document：ceil(5000/1000 * 2.0) = 10 分钟
        let m = material(&"a".repeat(5000), ContentCategory::Document);
        assert_eq!(estimate_study_time(&m), 10);
    }

    #[test]
    fn test_monotonic_in_length() {
        let mut last = 0;
        for len in [100, 1000, 3000, 8000, 20000] {
            let m = material(&"a".repeat(len), ContentCategory::Video);
            let t = estimate_study_time(&m);
            assert!(t >= last, "length {} gave {} < {}", len, t, last);
            last = t;
        }
    }

    #[test]
    fn test_complexity_multiplier_applies() {
        let plain = "word ".repeat(1000);
        // 超过 10 个函数调用样式 token
        let complex = format!("{} {}", plain, "compute(x) ".repeat(12));

        let t_plain = estimate_study_time(&material(&plain, ContentCategory::Document));
        let t_complex = estimate_study_time(&material(&complex, ContentCategory::Document));
        assert!(t_complex > t_plain);
    }

    #[test]
    fn test_empty_content_is_zero() {
        let m = material("", ContentCategory::PlainText);
        assert_eq!(estimate_study_time(&m), 0);
    }
}
