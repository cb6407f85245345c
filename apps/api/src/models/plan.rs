use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Four weeks of onboarding, each a free-form bullet-point string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklyPlan {
    pub week1: String,
    pub week2: String,
    pub week3: String,
    pub week4: String,
}

/// A generated integration plan as returned by the model (and to the caller).
///
/// Total like `ResumeRecord`: missing fields default rather than error, so the
/// only hard failure on this path is JSON that does not parse at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationPlan {
    #[serde(rename = "type")]
    pub plan_type: String,
    pub name: String,
    pub plan: WeeklyPlan,
}

/// A persisted plan. Week fields are denormalized plain text columns.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlanRow {
    pub id: Uuid,
    pub plan_type: String,
    pub name: String,
    pub week1: String,
    pub week2: String,
    pub week3: String,
    pub week4: String,
    pub resume_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlanRow {
    pub fn weekly_plan(&self) -> WeeklyPlan {
        WeeklyPlan {
            week1: self.week1.clone(),
            week2: self.week2.clone(),
            week3: self.week3.clone(),
            week4: self.week4.clone(),
        }
    }
}
