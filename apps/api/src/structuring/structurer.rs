//! Resume Structurer — turns extracted text into a normalized `ResumeRecord`.
//!
//! Flow: build extraction prompt → one LLM call → parse (degrading to an empty
//! record on bad JSON) → best-effort persist.

use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{strip_json_fences, TextGenerator};
use crate::models::resume::ResumeRecord;
use crate::models::PersistenceOutcome;
use crate::structuring::prompts::STRUCTURE_PROMPT_TEMPLATE;

/// Runs the structuring stage over already-extracted resume text.
///
/// Upstream failures (missing key, transport, API errors) propagate; a
/// completion that is not valid JSON does NOT — it degrades to an all-empty
/// record so review flows are never blocked by one malformed completion.
pub async fn structure_resume(
    text: &str,
    llm: &dyn TextGenerator,
) -> Result<ResumeRecord, AppError> {
    let prompt = build_structure_prompt(text);
    let raw = llm.generate(&prompt).await?;
    Ok(parse_resume_completion(&raw))
}

fn build_structure_prompt(text: &str) -> String {
    format!(
        "{JSON_ONLY_INSTRUCTION}\n\n{}",
        STRUCTURE_PROMPT_TEMPLATE.replace("{resume_text}", text)
    )
}

/// Parses a completion into a `ResumeRecord`, falling back to the empty record
/// when the payload is not valid JSON for the schema.
pub fn parse_resume_completion(raw: &str) -> ResumeRecord {
    match serde_json::from_str(strip_json_fences(raw)) {
        Ok(record) => record,
        Err(e) => {
            warn!("Resume completion was not valid JSON, substituting empty record: {e}");
            ResumeRecord::default()
        }
    }
}

/// Best-effort persistence of the structured resume with its source text.
/// Failure is logged and absorbed; the caller reports a `null` identifier.
pub async fn persist_resume(
    pool: &PgPool,
    raw_text: &str,
    record: &ResumeRecord,
) -> PersistenceOutcome {
    match insert_resume(pool, raw_text, record).await {
        Ok(id) => {
            info!("Persisted structured resume {id}");
            PersistenceOutcome::Saved(id)
        }
        Err(e) => {
            warn!("Failed to persist structured resume: {e}");
            PersistenceOutcome::Failed
        }
    }
}

async fn insert_resume(
    pool: &PgPool,
    raw_text: &str,
    record: &ResumeRecord,
) -> Result<Uuid, anyhow::Error> {
    let id = Uuid::new_v4();
    let data = serde_json::to_value(record)?;

    sqlx::query("INSERT INTO resumes (id, raw_text, data) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(raw_text)
        .bind(&data)
        .execute(pool)
        .await?;

    Ok(id)
}
