//! Plan Store — persisted plan rows, keyed by UUID.
//!
//! Two write shapes: full create (used by the pipeline and the manual create
//! endpoint) and sparse update (only fields present in the request are
//! written). Plans are never deleted.

use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::plan::{IntegrationPlan, PlanRow, WeeklyPlan};
use crate::models::PersistenceOutcome;

/// Best-effort persistence of a freshly generated plan. Failure is logged and
/// absorbed; the caller reports `planId: null` alongside the plan itself.
pub async fn persist_generated_plan(
    pool: &PgPool,
    plan: &IntegrationPlan,
    resume_id: Option<Uuid>,
) -> PersistenceOutcome {
    match insert_plan(pool, &plan.plan_type, &plan.name, &plan.plan, resume_id).await {
        Ok(id) => {
            info!("Persisted generated plan {id}");
            PersistenceOutcome::Saved(id)
        }
        Err(e) => {
            warn!("Failed to persist generated plan: {e}");
            PersistenceOutcome::Failed
        }
    }
}

/// Validated input for the manual create operation.
pub struct NewPlan {
    pub plan_type: String,
    pub name: String,
    pub plan: WeeklyPlan,
    pub resume_id: Option<Uuid>,
}

impl NewPlan {
    /// `type` and `name` are required non-empty; the week fields default to
    /// empty strings.
    pub fn validate(
        plan_type: Option<String>,
        name: Option<String>,
        plan: WeeklyPlan,
        resume_id: Option<Uuid>,
    ) -> Result<Self, AppError> {
        let plan_type = plan_type.unwrap_or_default();
        let name = name.unwrap_or_default();
        if plan_type.trim().is_empty() || name.trim().is_empty() {
            return Err(AppError::Validation(
                "Missing required fields: type, name".to_string(),
            ));
        }
        Ok(NewPlan {
            plan_type,
            name,
            plan,
            resume_id,
        })
    }
}

/// Creates a plan row and returns only its identifier — the caller already
/// holds the data it wrote.
pub async fn create_plan(pool: &PgPool, new_plan: NewPlan) -> Result<Uuid, AppError> {
    let id = insert_plan(
        pool,
        &new_plan.plan_type,
        &new_plan.name,
        &new_plan.plan,
        new_plan.resume_id,
    )
    .await?;
    Ok(id)
}

async fn insert_plan(
    pool: &PgPool,
    plan_type: &str,
    name: &str,
    plan: &WeeklyPlan,
    resume_id: Option<Uuid>,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO plans (id, plan_type, name, week1, week2, week3, week4, resume_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(id)
    .bind(plan_type)
    .bind(name)
    .bind(&plan.week1)
    .bind(&plan.week2)
    .bind(&plan.week3)
    .bind(&plan.week4)
    .bind(resume_id)
    .execute(pool)
    .await?;

    Ok(id)
}

/// Sparse patch over an existing plan row. Only fields carried by the patch
/// are written; everything else keeps its stored value.
#[derive(Debug, Default)]
pub struct PlanPatch {
    pub plan_type: Option<String>,
    pub name: Option<String>,
    pub resume_id: Option<Uuid>,
    pub week1: Option<String>,
    pub week2: Option<String>,
    pub week3: Option<String>,
    pub week4: Option<String>,
}

/// Applies a sparse patch to the plan with the given id.
/// Unknown id is the caller's error — `NotFound`, never an insert.
pub async fn update_plan(pool: &PgPool, id: Uuid, patch: PlanPatch) -> Result<Uuid, AppError> {
    let updated: Option<Uuid> = sqlx::query_scalar(
        r#"
        UPDATE plans SET
            plan_type = COALESCE($2, plan_type),
            name = COALESCE($3, name),
            resume_id = COALESCE($4, resume_id),
            week1 = COALESCE($5, week1),
            week2 = COALESCE($6, week2),
            week3 = COALESCE($7, week3),
            week4 = COALESCE($8, week4),
            updated_at = NOW()
        WHERE id = $1
        RETURNING id
        "#,
    )
    .bind(id)
    .bind(patch.plan_type)
    .bind(patch.name)
    .bind(patch.resume_id)
    .bind(patch.week1)
    .bind(patch.week2)
    .bind(patch.week3)
    .bind(patch.week4)
    .fetch_optional(pool)
    .await?;

    updated.ok_or_else(|| AppError::NotFound(format!("Plan {id} not found")))
}

/// Fetches a plan row by id.
pub async fn fetch_plan(pool: &PgPool, id: Uuid) -> Result<PlanRow, AppError> {
    sqlx::query_as::<_, PlanRow>("SELECT * FROM plans WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Plan {id} not found")))
}
