//! Structured observability hooks for the submission lifecycle.
//!
//! This module provides:
//! - Attempt-scoped tracing spans via [`AttemptSpan`]
//! - Emission functions for lifecycle events: started, ignored, rejected,
//!   succeeded, failed, interrupted
//!
//! Backend failure reasons are logged here in full; user-facing messages
//! go through [`crate::notify`] instead.

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::ValidationError;

/// Span tagged with an attempt id, for instrumenting the async send.
///
/// # Example
///
/// ```ignore
/// let span = AttemptSpan::new(attempt_id);
/// send(record).instrument(span.span()).await;
/// ```
pub struct AttemptSpan {
    span: tracing::Span,
}

impl AttemptSpan {
    pub fn new(attempt_id: Uuid) -> Self {
        Self {
            span: tracing::info_span!("leadform.attempt", attempt_id = %attempt_id),
        }
    }

    pub fn span(&self) -> tracing::Span {
        self.span.clone()
    }
}

/// Emit event: a submission attempt passed the re-entry guard.
pub fn emit_submit_started(attempt_id: Uuid) {
    info!(event = "submit.started", attempt_id = %attempt_id);
}

/// Emit event: `submit` was called while an attempt was already in flight.
pub fn emit_submit_ignored() {
    info!(event = "submit.ignored", "submission already in progress");
}

/// Emit event: validation rejected the attempt before any backend call.
pub fn emit_submit_rejected(attempt_id: Uuid, errors: &[ValidationError]) {
    let fields = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    info!(
        event = "submit.rejected",
        attempt_id = %attempt_id,
        error_count = errors.len(),
        errors = %fields,
    );
}

/// Emit event: backend accepted the submission.
pub fn emit_submit_succeeded(attempt_id: Uuid, duration_ms: u64) {
    info!(
        event = "submit.succeeded",
        attempt_id = %attempt_id,
        duration_ms = duration_ms,
    );
}

/// Emit event: backend rejected the submission (warning level).
pub fn emit_submit_failed(attempt_id: Uuid, duration_ms: u64, reason: &str) {
    warn!(
        event = "submit.failed",
        attempt_id = %attempt_id,
        duration_ms = duration_ms,
        reason = %reason,
    );
}

/// Emit event: the attempt ended without the sender resolving, because the
/// `submit` future was dropped or the sender panicked (warning level).
pub fn emit_submit_interrupted(attempt_id: Uuid) {
    warn!(
        event = "submit.interrupted",
        attempt_id = %attempt_id,
        "attempt ended before the backend answered",
    );
}
