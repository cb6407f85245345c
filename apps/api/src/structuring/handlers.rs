//! Axum route handlers for the Structuring API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ResumeRecord, ResumeRow};
use crate::state::AppState;
use crate::structuring::structurer::{persist_resume, structure_resume};

#[derive(Debug, Deserialize)]
pub struct StructureRequest {
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StructureResponse {
    pub data: ResumeRecord,
    #[serde(rename = "resumeId")]
    pub resume_id: Option<Uuid>,
}

/// POST /api/v1/structure
///
/// Structures extracted resume text into a `ResumeRecord`. Persistence is
/// best-effort: on storage failure the record is still returned and
/// `resumeId` is null.
pub async fn handle_structure(
    State(state): State<AppState>,
    Json(request): Json<StructureRequest>,
) -> Result<Json<StructureResponse>, AppError> {
    let text = request
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("Missing text".to_string()))?;

    let record = structure_resume(text, state.llm.as_ref()).await?;
    let outcome = persist_resume(&state.db, text, &record).await;

    Ok(Json(StructureResponse {
        data: record,
        resume_id: outcome.id(),
    }))
}

/// GET /api/v1/resumes/:id
///
/// Returns a persisted resume (structured record plus source text).
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    let resume = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    Ok(Json(resume))
}
