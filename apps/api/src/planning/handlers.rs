//! Axum route handlers for the Planning API.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::plan::{IntegrationPlan, WeeklyPlan};
use crate::planning::generator::{generate_plan, PlanRequest, ProfileType};
use crate::planning::store::{
    create_plan, fetch_plan, persist_generated_plan, update_plan, NewPlan, PlanPatch,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GeneratePlanResponse {
    #[serde(flatten)]
    pub plan: IntegrationPlan,
    #[serde(rename = "planId")]
    pub plan_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePlanRequest {
    #[serde(rename = "type")]
    pub plan_type: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub plan: WeeklyPlan,
    #[serde(rename = "resumeId")]
    pub resume_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WeeklyPlanPatchBody {
    pub week1: Option<String>,
    pub week2: Option<String>,
    pub week3: Option<String>,
    pub week4: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlanRequest {
    pub id: Option<Uuid>,
    #[serde(rename = "type")]
    pub plan_type: Option<String>,
    pub name: Option<String>,
    pub plan: Option<WeeklyPlanPatchBody>,
    #[serde(rename = "resumeId")]
    pub resume_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct PlanIdResponse {
    #[serde(rename = "planId")]
    pub plan_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct PlanDetailResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub plan_type: String,
    pub name: String,
    pub plan: WeeklyPlan,
    #[serde(rename = "resumeId")]
    pub resume_id: Option<Uuid>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/plans/generate
///
/// Full pipeline: resolve resume source → LLM plan generation → best-effort
/// persistence. The plan is returned even when persistence fails; `planId`
/// is null in that case.
pub async fn handle_generate_plan(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<GeneratePlanResponse>, AppError> {
    let request = read_plan_request(multipart).await?;

    let plan = generate_plan(&request, state.llm.as_ref()).await?;
    let outcome = persist_generated_plan(&state.db, &plan, request.resume_id).await;

    Ok(Json(GeneratePlanResponse {
        plan,
        plan_id: outcome.id(),
    }))
}

/// POST /api/v1/plans
///
/// Manual creation, for plans edited outside the generation flow.
pub async fn handle_create_plan(
    State(state): State<AppState>,
    Json(request): Json<CreatePlanRequest>,
) -> Result<Json<PlanIdResponse>, AppError> {
    let new_plan = NewPlan::validate(
        request.plan_type,
        request.name,
        request.plan,
        request.resume_id,
    )?;
    let plan_id = create_plan(&state.db, new_plan).await?;
    Ok(Json(PlanIdResponse { plan_id }))
}

/// PUT /api/v1/plans
///
/// Sparse patch: only fields present in the body are written.
pub async fn handle_update_plan(
    State(state): State<AppState>,
    Json(request): Json<UpdatePlanRequest>,
) -> Result<Json<PlanIdResponse>, AppError> {
    let id = request
        .id
        .ok_or_else(|| AppError::Validation("Missing plan id".to_string()))?;

    let weeks = request.plan.unwrap_or_default();
    let patch = PlanPatch {
        plan_type: request.plan_type,
        name: request.name,
        resume_id: request.resume_id,
        week1: weeks.week1,
        week2: weeks.week2,
        week3: weeks.week3,
        week4: weeks.week4,
    };

    let plan_id = update_plan(&state.db, id, patch).await?;
    Ok(Json(PlanIdResponse { plan_id }))
}

/// GET /api/v1/plans/:id
pub async fn handle_get_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PlanDetailResponse>, AppError> {
    let row = fetch_plan(&state.db, id).await?;
    Ok(Json(PlanDetailResponse {
        id: row.id,
        plan_type: row.plan_type.clone(),
        name: row.name.clone(),
        plan: row.weekly_plan(),
        resume_id: row.resume_id,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart parsing
// ────────────────────────────────────────────────────────────────────────────

/// Reads the generation form fields. Empty text fields count as absent so the
/// precedence rules in the generator see only real sources.
async fn read_plan_request(mut multipart: Multipart) -> Result<PlanRequest, AppError> {
    let mut request = PlanRequest::default();
    let mut plan_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "file" => {
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read file field: {e}"))
                })?;
                if !bytes.is_empty() {
                    request.file = Some(bytes);
                }
            }
            "planType" => plan_type = Some(read_text_field(field, &name).await?),
            "resumeText" => {
                request.resume_text = nonempty(read_text_field(field, &name).await?);
            }
            "cvData" => {
                request.cv_data = nonempty(read_text_field(field, &name).await?);
            }
            "resumeId" => {
                let raw = read_text_field(field, &name).await?;
                if let Some(raw) = nonempty(raw) {
                    let id = raw.trim().parse::<Uuid>().map_err(|_| {
                        AppError::Validation(format!("resumeId is not a valid UUID: '{raw}'"))
                    })?;
                    request.resume_id = Some(id);
                }
            }
            _ => {}
        }
    }

    request.profile_type = ProfileType::parse(plan_type.as_deref())?;
    Ok(request)
}

async fn read_text_field(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read {name} field: {e}")))
}

fn nonempty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
