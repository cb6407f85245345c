use std::sync::Arc;

use sqlx::PgPool;

use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Handles are constructed once in `main` and passed by reference into each
/// pipeline stage — no module-level singletons.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Generative-text service handle. A trait object so tests substitute a fake.
    pub llm: Arc<dyn TextGenerator>,
}
