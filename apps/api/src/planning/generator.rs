//! Plan Generator — orchestrates resume-source resolution and plan prompting.
//!
//! Flow: resolve resume text (structured CV > raw text > uploaded file) →
//!       build plan prompt → one LLM call → parse → caller-name override.
//!
//! Unlike the structurer, an unparsable completion here is a hard, typed
//! error: a plan with invented empty weeks would read as a real schedule.

use std::fmt;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::extractor::extract_pdf_text_async;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{strip_json_fences, TextGenerator};
use crate::models::plan::IntegrationPlan;
use crate::models::resume::ResumeRecord;
use crate::planning::prompts::{
    BACKEND_STACK, FRONTEND_STACK, INTEGRATION_WEEKS, PLAN_PROMPT_TEMPLATE, REACT_NATIVE_STACK,
};

/// Coarse role classification driving which stack the prompt emphasizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfileType {
    #[default]
    Frontend,
    Backend,
}

impl ProfileType {
    /// Parses the `planType` form field. Absent defaults to frontend (the UI
    /// always sends one); an unrecognized value is a client error.
    pub fn parse(value: Option<&str>) -> Result<Self, AppError> {
        match value.map(str::trim) {
            None | Some("") => Ok(ProfileType::default()),
            Some(v) if v.eq_ignore_ascii_case("frontend") => Ok(ProfileType::Frontend),
            Some(v) if v.eq_ignore_ascii_case("backend") => Ok(ProfileType::Backend),
            Some(v) => Err(AppError::Validation(format!(
                "planType must be 'frontend' or 'backend', got '{v}'"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileType::Frontend => "frontend",
            ProfileType::Backend => "backend",
        }
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a plan-generation request may carry. Exactly one resume source
/// is used; precedence when several are populated: `cv_data` > `resume_text`
/// > `file`.
#[derive(Debug, Default)]
pub struct PlanRequest {
    pub profile_type: ProfileType,
    /// Structured CV as a JSON string (user-edited form fields).
    pub cv_data: Option<String>,
    pub resume_text: Option<String>,
    pub file: Option<Bytes>,
    pub resume_id: Option<Uuid>,
}

/// Runs the generation stage: resolves a resume text, prompts the model, and
/// applies the caller-name override. Persistence is the handler's concern.
pub async fn generate_plan(
    request: &PlanRequest,
    llm: &dyn TextGenerator,
) -> Result<IntegrationPlan, AppError> {
    let cv = request.cv_data.as_deref().and_then(parse_cv_data);

    let resume_text = resolve_resume_text(cv.as_ref(), request).await?;
    let prompt = build_plan_prompt(request.profile_type, &resume_text);

    let raw = llm.generate(&prompt).await?;
    let mut plan: IntegrationPlan = serde_json::from_str(strip_json_fences(&raw))
        .map_err(|e| AppError::PlanParse(format!("completion was not valid plan JSON: {e}")))?;

    // Caller-provided identity is trusted over model output.
    if let Some(cv) = &cv {
        let full_name = cv.full_name.trim();
        if !full_name.is_empty() {
            plan.name = full_name.to_string();
        }
    }

    info!("Generated {} plan for '{}'", plan.plan_type, plan.name);
    Ok(plan)
}

/// Parses the `cvData` JSON string. A payload that does not parse is logged
/// and dropped so resolution falls through to the next resume source.
fn parse_cv_data(raw: &str) -> Option<ResumeRecord> {
    match serde_json::from_str(raw) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!("Ignoring unparsable cvData, falling through to next source: {e}");
            None
        }
    }
}

/// Resolves the resume text the prompt will embed, in precedence order.
async fn resolve_resume_text(
    cv: Option<&ResumeRecord>,
    request: &PlanRequest,
) -> Result<String, AppError> {
    if let Some(cv) = cv {
        return Ok(flatten_resume(cv));
    }
    if let Some(text) = request.resume_text.as_deref() {
        let text = text.trim();
        if !text.is_empty() {
            return Ok(text.to_string());
        }
    }
    if let Some(bytes) = &request.file {
        return extract_pdf_text_async(bytes.clone()).await;
    }
    Err(AppError::Validation(
        "Provide a resume file, resume text, or structured CV data".to_string(),
    ))
}

/// Flattens a structured CV into the readable multi-section text the prompt
/// embeds: summary, skills line, one block per experience entry, one block per
/// education entry, links line.
pub fn flatten_resume(record: &ResumeRecord) -> String {
    let mut sections = Vec::new();

    if !record.summary.trim().is_empty() {
        sections.push(format!("Summary: {}", record.summary.trim()));
    }
    if !record.skills.is_empty() {
        sections.push(format!("Skills: {}", record.skills.join(", ")));
    }
    if !record.experience.is_empty() {
        let blocks: Vec<String> = record
            .experience
            .iter()
            .map(|e| {
                format!(
                    "- {} at {} ({} to {}): {}",
                    e.role, e.company, e.start, e.end, e.description
                )
            })
            .collect();
        sections.push(format!("Experience:\n{}", blocks.join("\n")));
    }
    if !record.education.is_empty() {
        let blocks: Vec<String> = record
            .education
            .iter()
            .map(|e| format!("- {}, {} ({} to {})", e.degree, e.school, e.start, e.end))
            .collect();
        sections.push(format!("Education:\n{}", blocks.join("\n")));
    }
    if !record.links.is_empty() {
        sections.push(format!("Links: {}", record.links.join(", ")));
    }

    sections.join("\n\n")
}

fn build_plan_prompt(profile_type: ProfileType, resume_text: &str) -> String {
    let body = PLAN_PROMPT_TEMPLATE
        .replace("{profile_type}", profile_type.as_str())
        .replace("{weeks}", &INTEGRATION_WEEKS.to_string())
        .replace("{frontend_stack}", FRONTEND_STACK)
        .replace("{react_native_stack}", REACT_NATIVE_STACK)
        .replace("{backend_stack}", BACKEND_STACK)
        .replace("{resume_text}", resume_text);
    format!("{JSON_ONLY_INSTRUCTION}\n\n{body}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::models::resume::{EducationEntry, ExperienceEntry};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Fake that records every prompt it is asked to complete.
    struct RecordingLlm {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl RecordingLlm {
        fn replying(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn last_prompt(&self) -> String {
            self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl TextGenerator for RecordingLlm {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    const PLAN_JSON: &str = r#"{
        "type": "backend",
        "name": "Model Invented Name",
        "plan": {"week1": "- learn Prisma", "week2": "- tRPC", "week3": "- team", "week4": "- ship"}
    }"#;

    fn sample_cv() -> ResumeRecord {
        ResumeRecord {
            full_name: "Jane Doe".into(),
            summary: "Seasoned backend engineer".into(),
            skills: vec!["Node.js".into(), "PostgreSQL".into()],
            experience: vec![ExperienceEntry {
                company: "Acme".into(),
                role: "Engineer".into(),
                start: "2019".into(),
                end: "2023".into(),
                description: "Built billing".into(),
            }],
            education: vec![EducationEntry {
                school: "MIT".into(),
                degree: "BSc".into(),
                start: "2015".into(),
                end: "2019".into(),
            }],
            links: vec!["https://janedoe.dev".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_profile_type_parsing() {
        assert_eq!(ProfileType::parse(None).unwrap(), ProfileType::Frontend);
        assert_eq!(ProfileType::parse(Some("")).unwrap(), ProfileType::Frontend);
        assert_eq!(
            ProfileType::parse(Some("Backend")).unwrap(),
            ProfileType::Backend
        );
        assert!(matches!(
            ProfileType::parse(Some("fullstack")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_flatten_resume_has_all_sections() {
        let flat = flatten_resume(&sample_cv());
        assert!(flat.contains("Summary: Seasoned backend engineer"));
        assert!(flat.contains("Skills: Node.js, PostgreSQL"));
        assert!(flat.contains("- Engineer at Acme (2019 to 2023): Built billing"));
        assert!(flat.contains("- BSc, MIT (2015 to 2019)"));
        assert!(flat.contains("Links: https://janedoe.dev"));
    }

    #[test]
    fn test_flatten_resume_skips_empty_sections() {
        let flat = flatten_resume(&ResumeRecord::default());
        assert!(flat.is_empty());
    }

    #[tokio::test]
    async fn test_cv_data_takes_precedence_over_resume_text() {
        let llm = RecordingLlm::replying(PLAN_JSON);
        let request = PlanRequest {
            cv_data: Some(serde_json::to_string(&sample_cv()).unwrap()),
            resume_text: Some("RAW TEXT THAT MUST NOT WIN".into()),
            ..Default::default()
        };

        generate_plan(&request, &llm).await.unwrap();

        let prompt = llm.last_prompt();
        assert!(prompt.contains("Seasoned backend engineer"));
        assert!(!prompt.contains("RAW TEXT THAT MUST NOT WIN"));
    }

    #[tokio::test]
    async fn test_unparsable_cv_data_falls_through_to_resume_text() {
        let llm = RecordingLlm::replying(PLAN_JSON);
        let request = PlanRequest {
            cv_data: Some("{not json".into()),
            resume_text: Some("fallback resume text".into()),
            ..Default::default()
        };

        let plan = generate_plan(&request, &llm).await.unwrap();

        assert!(llm.last_prompt().contains("fallback resume text"));
        // No parsed CV means no name override
        assert_eq!(plan.name, "Model Invented Name");
    }

    #[tokio::test]
    async fn test_cv_full_name_overrides_model_name() {
        let llm = RecordingLlm::replying(PLAN_JSON);
        let request = PlanRequest {
            cv_data: Some(serde_json::to_string(&sample_cv()).unwrap()),
            ..Default::default()
        };

        let plan = generate_plan(&request, &llm).await.unwrap();
        assert_eq!(plan.name, "Jane Doe");
        assert_eq!(plan.plan_type, "backend");
        assert_eq!(plan.plan.week2, "- tRPC");
    }

    #[tokio::test]
    async fn test_empty_cv_name_keeps_model_name() {
        let mut cv = sample_cv();
        cv.full_name = "   ".into();
        let llm = RecordingLlm::replying(PLAN_JSON);
        let request = PlanRequest {
            cv_data: Some(serde_json::to_string(&cv).unwrap()),
            ..Default::default()
        };

        let plan = generate_plan(&request, &llm).await.unwrap();
        assert_eq!(plan.name, "Model Invented Name");
    }

    #[tokio::test]
    async fn test_no_resume_source_is_invalid_input() {
        let llm = RecordingLlm::replying(PLAN_JSON);
        let request = PlanRequest::default();

        let err = generate_plan(&request, &llm).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        // Validation happens before any LLM traffic
        assert!(llm.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unparsable_completion_is_a_typed_plan_parse_error() {
        let llm = RecordingLlm::replying("Here is your plan: week one ...");
        let request = PlanRequest {
            resume_text: Some("some resume".into()),
            ..Default::default()
        };

        let err = generate_plan(&request, &llm).await.unwrap_err();
        assert!(matches!(err, AppError::PlanParse(_)));
    }

    #[tokio::test]
    async fn test_prompt_carries_stacks_and_profile_type() {
        let llm = RecordingLlm::replying(PLAN_JSON);
        let request = PlanRequest {
            profile_type: ProfileType::Backend,
            resume_text: Some("some resume".into()),
            ..Default::default()
        };

        generate_plan(&request, &llm).await.unwrap();

        let prompt = llm.last_prompt();
        assert!(prompt.contains("\"backend\" profile"));
        assert!(prompt.contains(FRONTEND_STACK));
        assert!(prompt.contains(BACKEND_STACK));
        assert!(prompt.contains("4-week integration plan"));
    }
}
