use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::{classify_upstream_message, LlmError};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Persistence failures are deliberately NOT represented here — best-effort
/// writes are absorbed into `models::PersistenceOutcome` and never fail a
/// request.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service misconfigured: {0}")]
    Misconfigured(String),

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Plan parse error: {0}")]
    PlanParse(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Misconfigured(msg) => {
                tracing::error!("Misconfiguration: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Upstream(msg) => {
                tracing::error!("Upstream failure: {msg}");
                (StatusCode::BAD_GATEWAY, msg.clone())
            }
            AppError::Extraction(msg) => {
                tracing::error!("Extraction failure: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Could not parse PDF".to_string())
            }
            AppError::PlanParse(msg) => {
                tracing::error!("Plan parse failure: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Model returned an unparsable plan".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        // All endpoints speak `{"error": "..."}` plus a status code, nothing else.
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingApiKey => {
                AppError::Misconfigured("GEMINI_API_KEY is not configured".to_string())
            }
            other => AppError::Upstream(classify_upstream_message(&other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            status_of(AppError::Validation("missing field".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(
            status_of(AppError::NotFound("plan x".into())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_misconfigured_maps_to_500() {
        assert_eq!(
            status_of(AppError::Misconfigured("no key".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_maps_to_502() {
        assert_eq!(
            status_of(AppError::Upstream("quota".into())),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_extraction_and_plan_parse_map_to_500() {
        assert_eq!(
            status_of(AppError::Extraction("bad bytes".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::PlanParse("bad json".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_missing_api_key_becomes_misconfigured() {
        let err: AppError = LlmError::MissingApiKey.into();
        assert!(matches!(err, AppError::Misconfigured(_)));
    }

    #[test]
    fn test_api_error_becomes_upstream() {
        let err: AppError = LlmError::Api {
            status: 503,
            message: "quota exceeded".into(),
        }
        .into();
        assert!(matches!(err, AppError::Upstream(_)));
    }
}
