//! Submission lifecycle controller.
//!
//! Owns the form's [`SubmissionState`] and current [`RawFieldSet`], and runs
//! one attempt at a time through validate → serialize → send → notify.
//!
//! ```text
//! Idle ─┐
//! Succeeded ─┼─ submit ─> Submitting ─┬─ validation errors ─> Failed(Validation)
//! Failed ────┘                        ├─ backend ok ────────> Succeeded (fields cleared)
//!                                     └─ backend error ─────> Failed(Backend)
//! ```
//!
//! `submit` while `Submitting` is ignored. The state lock is never held
//! across the awaited send. If the attempt ends before the sender resolves
//! (the `submit` future is dropped, or the sender panics), the state moves
//! to `Failed(Backend(INTERRUPTED_REASON))` so the controller stays usable.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::domain::{serialize, FieldName, RawFieldSet, ValidationError};
use crate::metrics::{Counter, METRICS};
use crate::notify::{NotificationTemplates, Notifier};
use crate::obs::{
    emit_submit_failed, emit_submit_ignored, emit_submit_interrupted, emit_submit_rejected,
    emit_submit_started, emit_submit_succeeded, AttemptSpan,
};
use crate::sender::LeadSender;
use crate::validation::validate;

/// Backend reason recorded when an attempt ends without the sender resolving.
pub const INTERRUPTED_REASON: &str = "submission interrupted";

/// Why the last attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "detail", rename_all = "snake_case")]
pub enum FailureReason {
    /// Rejected before reaching the backend.
    Validation(Vec<ValidationError>),
    /// Opaque reason reported by the backend sender.
    Backend(String),
}

/// UI-visible lifecycle state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(FailureReason),
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }
}

/// What a single `submit` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another attempt was in flight; nothing happened.
    Ignored,
    /// Validation failed; the backend was not called.
    Rejected(Vec<ValidationError>),
    Succeeded,
    /// Backend failure reason.
    Failed(String),
}

#[derive(Debug, Default)]
struct ControllerInner {
    state: SubmissionState,
    fields: RawFieldSet,
    last_timestamp: Option<DateTime<Utc>>,
}

pub struct SubmissionController {
    sender: Arc<dyn LeadSender>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    templates: NotificationTemplates,
    inner: Mutex<ControllerInner>,
}

impl SubmissionController {
    pub fn new(sender: Arc<dyn LeadSender>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            sender,
            notifier,
            clock: Arc::new(SystemClock),
            templates: NotificationTemplates::default(),
            inner: Mutex::new(ControllerInner::default()),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_templates(mut self, templates: NotificationTemplates) -> Self {
        self.templates = templates;
        self
    }

    fn inner(&self) -> MutexGuard<'_, ControllerInner> {
        // Every write is a single assignment, so a poisoned lock is still consistent.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn state(&self) -> SubmissionState {
        self.inner().state.clone()
    }

    /// Whether the submit affordance should be disabled.
    pub fn is_submitting(&self) -> bool {
        self.inner().state.is_submitting()
    }

    /// Current form values.
    pub fn fields(&self) -> RawFieldSet {
        self.inner().fields.clone()
    }

    pub fn set_field(&self, field: FieldName, value: impl Into<String>) {
        self.inner().fields.set(field, value);
    }

    pub fn clear_fields(&self) {
        self.inner().fields.clear();
    }

    /// Submit the current form values.
    pub async fn submit_current(&self) -> SubmitOutcome {
        let fields = self.fields();
        self.submit(fields).await
    }

    /// Run one submission attempt with `fields` as the form snapshot.
    ///
    /// Never fails: every outcome is reflected in [`Self::state`] and the
    /// returned [`SubmitOutcome`].
    pub async fn submit(&self, fields: RawFieldSet) -> SubmitOutcome {
        let attempt_id = Uuid::new_v4();

        let record = {
            let mut inner = self.inner();
            if inner.state.is_submitting() {
                drop(inner);
                METRICS.inc(Counter::Ignored);
                emit_submit_ignored();
                return SubmitOutcome::Ignored;
            }

            inner.state = SubmissionState::Submitting;
            inner.fields = fields;
            METRICS.inc(Counter::AttemptsStarted);
            emit_submit_started(attempt_id);

            let validated = validate(&inner.fields);
            match validated {
                Err(errors) => {
                    inner.state =
                        SubmissionState::Failed(FailureReason::Validation(errors.clone()));
                    drop(inner);
                    METRICS.inc(Counter::ValidationRejected);
                    emit_submit_rejected(attempt_id, &errors);
                    return SubmitOutcome::Rejected(errors);
                }
                Ok(validated) => {
                    // Timestamps never run backwards within one controller.
                    let now = self.clock.now();
                    let now = inner.last_timestamp.map_or(now, |last| last.max(now));
                    inner.last_timestamp = Some(now);
                    serialize(&validated, now)
                }
            }
        };

        let mut in_flight = InFlight {
            controller: self,
            attempt_id,
            armed: true,
        };
        let started = Instant::now();
        let result = self
            .sender
            .submit_lead(&record)
            .instrument(AttemptSpan::new(attempt_id).span())
            .await;
        in_flight.disarm();
        drop(record);
        let duration_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(()) => {
                {
                    let mut inner = self.inner();
                    inner.state = SubmissionState::Succeeded;
                    inner.fields.clear();
                }
                METRICS.inc(Counter::Succeeded);
                emit_submit_succeeded(attempt_id, duration_ms);
                self.notifier.notify(self.templates.success());
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                self.inner().state =
                    SubmissionState::Failed(FailureReason::Backend(err.reason.clone()));
                METRICS.inc(Counter::Failed);
                emit_submit_failed(attempt_id, duration_ms, &err.reason);
                self.notifier.notify(self.templates.failure(&err.reason));
                SubmitOutcome::Failed(err.reason)
            }
        }
    }
}

/// Armed while the send is awaited. Dropping it armed means the attempt never
/// reached an outcome, so `Submitting` is replaced with a backend failure.
struct InFlight<'a> {
    controller: &'a SubmissionController,
    attempt_id: Uuid,
    armed: bool,
}

impl InFlight<'_> {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self.controller.inner();
        if !inner.state.is_submitting() {
            return;
        }
        inner.state =
            SubmissionState::Failed(FailureReason::Backend(INTERRUPTED_REASON.to_string()));
        drop(inner);
        METRICS.inc(Counter::Interrupted);
        emit_submit_interrupted(self.attempt_id);
    }
}
