//! Command abstractions.

use uuid::Uuid;

/// A state-changing request against a single game.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Stable name used in logs and spans, e.g. `game.record_score`.
    fn command_type(&self) -> &'static str;

    /// Correlation ID linking the HTTP request to the store writes it causes.
    fn correlation_id(&self) -> Uuid;
}
