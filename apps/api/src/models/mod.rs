pub mod plan;
pub mod resume;

use uuid::Uuid;

/// Outcome of a best-effort write. Persistence failures never fail the request
/// that produced the primary artifact; they surface to the caller as a `null`
/// identifier instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceOutcome {
    Saved(Uuid),
    Failed,
}

impl PersistenceOutcome {
    pub fn id(&self) -> Option<Uuid> {
        match self {
            PersistenceOutcome::Saved(id) => Some(*id),
            PersistenceOutcome::Failed => None,
        }
    }
}
