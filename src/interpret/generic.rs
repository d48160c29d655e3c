//! 卡片与纯文本形状的解码

use serde_json::Value;

use super::extract::extract_json_block;
use super::types::{CardResponse, DocumentResponse, Flashcard, Interpretation};

const CARDS_FALLBACK_NOTICE: &str =
    "No structured card block found; card generation was unavailable.";
const DOCUMENT_FALLBACK_NOTICE: &str = "Generation returned no content.";

fn sanitize_card(value: &Value) -> Option<Flashcard> {
    let obj = value.as_object()?;
    // quiz 输出常用 question/answer 键名
    let front = obj
        .get("front")
        .or_else(|| obj.get("question"))
        .and_then(Value::as_str)?
        .trim()
        .to_string();
    if front.is_empty() {
        return None;
    }
    let back = obj
        .get("back")
        .or_else(|| obj.get("answer"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_string();
    Some(Flashcard { front, back })
}

/// 解码卡片输出（flashcards / quiz），永不报错
pub fn interpret_cards(text: &str) -> Interpretation<CardResponse> {
    if let Some(block) = extract_json_block(text) {
        if let Ok(root) = serde_json::from_str::<Value>(block) {
            let items = root
                .get("cards")
                .and_then(Value::as_array)
                .or_else(|| root.as_array());
            if let Some(items) = items {
                let cards = items.iter().filter_map(sanitize_card).collect();
                return Interpretation::Decoded(CardResponse { cards });
            }
        }
    }

    Interpretation::Fallback {
        partial: CardResponse::default(),
        notice: CARDS_FALLBACK_NOTICE.to_string(),
    }
}

/// 解码纯文本输出（notes / study-plan / analysis）：这一形状本就期望
/// 自由文本，非空原文即视为有效内容
pub fn interpret_document(text: &str) -> Interpretation<DocumentResponse> {
    if let Some(block) = extract_json_block(text) {
        if let Ok(root) = serde_json::from_str::<Value>(block) {
            if let Some(content) = root.get("content").and_then(Value::as_str) {
                return Interpretation::Decoded(DocumentResponse {
                    content: content.to_string(),
                });
            }
        }
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        Interpretation::Fallback {
            partial: DocumentResponse::default(),
            notice: DOCUMENT_FALLBACK_NOTICE.to_string(),
        }
    } else {
        Interpretation::Decoded(DocumentResponse {
            content: trimmed.to_string(),
        })
    }
}
