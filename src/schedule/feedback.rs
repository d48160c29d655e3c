//! 基于用户评分的偏好调整

use super::types::{StudyPreferences, MAX_SESSION_MINUTES, MIN_SESSION_MINUTES};

/// 按历史评分（1-5）调整偏好
///
/// 平均分 < 3：单次会话时长缩短 20%（下限 15 分钟）；
/// 平均分 > 4：延长 20%（上限 180 分钟）；其余不变。评分为空时原样返回。
pub fn adjust_for_feedback(preferences: &StudyPreferences, ratings: &[u8]) -> StudyPreferences {
    let mut adjusted = preferences.clone();
    if ratings.is_empty() {
        return adjusted;
    }

    let avg = ratings.iter().map(|&r| r as f64).sum::<f64>() / ratings.len() as f64;
    let len = adjusted.preferred_session_length as f64;

    if avg < 3.0 {
        adjusted.preferred_session_length =
            ((len * 0.8).round() as u32).max(MIN_SESSION_MINUTES);
    } else if avg > 4.0 {
        adjusted.preferred_session_length =
            ((len * 1.2).round() as u32).min(MAX_SESSION_MINUTES);
    }

    adjusted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs(len: u32) -> StudyPreferences {
        StudyPreferences {
            preferred_session_length: len,
            ..Default::default()
        }
    }

    #[test]
    fn test_low_ratings_shrink_session() {
        let p = adjust_for_feedback(&prefs(60), &[1, 2, 2]);
        assert_eq!(p.preferred_session_length, 48);
    }

    #[test]
    fn test_shrink_floors_at_minimum() {
        let p = adjust_for_feedback(&prefs(16), &[1, 1]);
        assert_eq!(p.preferred_session_length, MIN_SESSION_MINUTES);
    }

    #[test]
    fn test_high_ratings_grow_session() {
        let p = adjust_for_feedback(&prefs(100), &[5, 5, 4]);
        assert_eq!(p.preferred_session_length, 120);
    }

    #[test]
    fn test_grow_caps_at_maximum() {
        let p = adjust_for_feedback(&prefs(170), &[5, 5]);
        assert_eq!(p.preferred_session_length, MAX_SESSION_MINUTES);
    }

    #[test]
    fn test_neutral_or_empty_unchanged() {
        assert_eq!(adjust_for_feedback(&prefs(60), &[3, 4]).preferred_session_length, 60);
        assert_eq!(adjust_for_feedback(&prefs(60), &[]).preferred_session_length, 60);
    }
}
