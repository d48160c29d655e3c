//! 提交请求的形状与同步校验

use serde::{Deserialize, Serialize};

use super::error::CoreError;
use crate::jobs::JobType;
use crate::schedule::{MaterialDescriptor, StudyGoals, StudyPreferences};

/// 卡片/测验的数量上限
pub const MAX_ITEM_COUNT: u32 = 50;

/// 一次任务提交请求
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum JobRequest {
    Summarize {
        material: MaterialDescriptor,
    },
    Schedule {
        materials: Vec<MaterialDescriptor>,
        preferences: StudyPreferences,
        goals: StudyGoals,
        /// 历史会话评分（1-5），用于在排期前调整偏好
        #[serde(default)]
        feedback_ratings: Vec<u8>,
    },
    Flashcards {
        material: MaterialDescriptor,
        count: u32,
    },
    Quiz {
        material: MaterialDescriptor,
        count: u32,
    },
    Notes {
        material: MaterialDescriptor,
    },
    StudyPlan {
        materials: Vec<MaterialDescriptor>,
        goals: StudyGoals,
    },
    Analysis {
        material: MaterialDescriptor,
    },
}

impl JobRequest {
    pub fn job_type(&self) -> JobType {
        match self {
            Self::Summarize { .. } => JobType::Summarization,
            Self::Schedule { .. } => JobType::Scheduling,
            Self::Flashcards { .. } => JobType::Flashcards,
            Self::Quiz { .. } => JobType::Quiz,
            Self::Notes { .. } => JobType::Notes,
            Self::StudyPlan { .. } => JobType::StudyPlan,
            Self::Analysis { .. } => JobType::Analysis,
        }
    }

    /// 同步校验：缺字段/越界立即拒绝，不创建任务
    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            Self::Summarize { material }
            | Self::Notes { material }
            | Self::Analysis { material } => validate_material(material),
            Self::Flashcards { material, count } | Self::Quiz { material, count } => {
                validate_material(material)?;
                if !(1..=MAX_ITEM_COUNT).contains(count) {
                    return Err(CoreError::Validation(format!(
                        "count must be within 1..={}, got {}",
                        MAX_ITEM_COUNT, count
                    )));
                }
                Ok(())
            }
            Self::Schedule { materials, .. } | Self::StudyPlan { materials, .. } => {
                if materials.is_empty() {
                    return Err(CoreError::Validation(
                        "at least one material is required".to_string(),
                    ));
                }
                materials.iter().try_for_each(validate_material)
            }
        }
    }
}

fn validate_material(material: &MaterialDescriptor) -> Result<(), CoreError> {
    if material.id.trim().is_empty() {
        return Err(CoreError::Validation("material id is empty".to_string()));
    }
    if material.content.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "material '{}' has empty content",
            material.id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ContentCategory;

    fn material() -> MaterialDescriptor {
        MaterialDescriptor::new("m1", "第一课", "content body", ContentCategory::Document)
    }

    #[test]
    fn test_valid_requests_pass() {
        assert!(JobRequest::Summarize { material: material() }.validate().is_ok());
        assert!(JobRequest::Flashcards { material: material(), count: 10 }
            .validate()
            .is_ok());
    }

    #[test]
    fn test_empty_content_rejected() {
        let mut m = material();
        m.content = "   ".to_string();
        assert!(matches!(
            JobRequest::Notes { material: m }.validate(),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_count_bounds_enforced() {
        for count in [0, MAX_ITEM_COUNT + 1] {
            assert!(matches!(
                JobRequest::Quiz { material: material(), count }.validate(),
                Err(CoreError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_schedule_needs_materials() {
        let request = JobRequest::Schedule {
            materials: vec![],
            preferences: StudyPreferences::default(),
            goals: StudyGoals::default(),
            feedback_ratings: vec![],
        };
        assert!(matches!(request.validate(), Err(CoreError::Validation(_))));
    }
}
