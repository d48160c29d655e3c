//! Prompt 模板：按任务类型做固定模板替换
//!
//! 排期模板会先用启发式估计每份材料的学习分钟数、并按历史评分调整
//! 偏好，再把两者写进 prompt，让生成结果贴近确定性的估计值。

use crate::core::request::JobRequest;
use crate::jobs::JobType;
use crate::schedule::{
    adjust_for_feedback, estimate_study_time, MaterialDescriptor, StudyGoals, StudyPreferences,
};

const SCHEDULE_SYSTEM: &str = "You are a study planner. Reply with a single ```json block: \
{\"schedule\": [{\"id\", \"materialId\", \"title\", \"description\", \"scheduledDate\" (ISO 8601), \
\"duration\" (minutes, 15-180), \"sessionType\" (study|review|practice|assessment), \
\"difficulty\" (beginner|intermediate|advanced), \"priority\" (high|medium|low), \
\"prerequisites\" (ids), \"estimatedEffort\" (light|moderate|intensive)}], \
\"suggestions\": [string]}. No text outside the block.";

const SUMMARY_SYSTEM: &str = "You are a study assistant. Reply with a single ```json block: \
{\"title\": string, \"summary\": string, \"keyPoints\": [string]}. No text outside the block.";

const CARDS_SYSTEM: &str = "You are a study assistant. Reply with a single ```json block: \
{\"cards\": [{\"front\": string, \"back\": string}]}. No text outside the block.";

const DOCUMENT_SYSTEM: &str =
    "You are a study assistant. Reply with well-structured plain text, no JSON.";

const SCHEDULE_TEMPLATE: &str = "\
Create a study schedule for the following materials.

Materials (with estimated study minutes):
{materials}

Preferences: {preferences}
Goals: {goals}

Spread sessions between today and the target date, honor the per-day limits, \
and keep the estimated minutes close to the estimates above.";

const SUMMARIZE_TEMPLATE: &str = "\
Summarize the following material titled \"{title}\".

{content}";

const CARDS_TEMPLATE: &str = "\
Create exactly {count} {kind} from the material titled \"{title}\".

{content}";

const NOTES_TEMPLATE: &str = "\
Write structured study notes for the material titled \"{title}\".

{content}";

const STUDY_PLAN_TEMPLATE: &str = "\
Outline a study plan covering these materials:
{materials}

Goals: {goals}";

const ANALYSIS_TEMPLATE: &str = "\
Analyze the difficulty, prerequisites and key concepts of the material titled \"{title}\".

{content}";

/// 每种任务类型的 system 文本
pub fn system_text(job_type: JobType) -> &'static str {
    match job_type {
        JobType::Scheduling => SCHEDULE_SYSTEM,
        JobType::Summarization => SUMMARY_SYSTEM,
        JobType::Flashcards | JobType::Quiz => CARDS_SYSTEM,
        JobType::Notes | JobType::StudyPlan | JobType::Analysis => DOCUMENT_SYSTEM,
    }
}

fn render(template: &str, vars: &[(&str, String)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{}}}", key), value)
    })
}

fn material_lines(materials: &[MaterialDescriptor]) -> String {
    materials
        .iter()
        .map(|m| {
            format!(
                "- {} | {} | {:?} | ~{} min",
                m.id,
                m.title,
                m.category,
                estimate_study_time(m)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn prefs_line(preferences: &StudyPreferences) -> String {
    serde_json::to_string(preferences).unwrap_or_default()
}

fn goals_line(goals: &StudyGoals) -> String {
    serde_json::to_string(goals).unwrap_or_default()
}

/// 从请求构造 prompt 文本
pub fn build_prompt(request: &JobRequest) -> String {
    match request {
        JobRequest::Schedule {
            materials,
            preferences,
            goals,
            feedback_ratings,
        } => {
            let adjusted = adjust_for_feedback(preferences, feedback_ratings);
            render(
                SCHEDULE_TEMPLATE,
                &[
                    ("materials", material_lines(materials)),
                    ("preferences", prefs_line(&adjusted)),
                    ("goals", goals_line(goals)),
                ],
            )
        }
        JobRequest::Summarize { material } => render(
            SUMMARIZE_TEMPLATE,
            &[
                ("title", material.title.clone()),
                ("content", material.content.clone()),
            ],
        ),
        JobRequest::Flashcards { material, count } => render(
            CARDS_TEMPLATE,
            &[
                ("count", count.to_string()),
                ("kind", "flashcards".to_string()),
                ("title", material.title.clone()),
                ("content", material.content.clone()),
            ],
        ),
        JobRequest::Quiz { material, count } => render(
            CARDS_TEMPLATE,
            &[
                ("count", count.to_string()),
                ("kind", "quiz questions with answers".to_string()),
                ("title", material.title.clone()),
                ("content", material.content.clone()),
            ],
        ),
        JobRequest::Notes { material } => render(
            NOTES_TEMPLATE,
            &[
                ("title", material.title.clone()),
                ("content", material.content.clone()),
            ],
        ),
        JobRequest::StudyPlan { materials, goals } => render(
            STUDY_PLAN_TEMPLATE,
            &[
                ("materials", material_lines(materials)),
                ("goals", goals_line(goals)),
            ],
        ),
        JobRequest::Analysis { material } => render(
            ANALYSIS_TEMPLATE,
            &[
                ("title", material.title.clone()),
                ("content", material.content.clone()),
            ],
        ),
    }
}
