//! Lead Intake Core Library
//!
//! Validation, canonical record building and the submission lifecycle
//! controller for the contact/lead form. Rendering and persistence stay
//! outside: the controller talks to them through [`LeadSender`] and
//! [`Notifier`].

pub mod clock;
pub mod controller;
pub mod domain;
pub mod fakes;
pub mod metrics;
pub mod notify;
pub mod obs;
pub mod sender;
pub mod telemetry;
pub mod validation;

pub use domain::{
    serialize, BackendError, FieldName, LeadFormError, LeadSubmission, ProductSolution,
    RawFieldSet, Result, ValidatedFields, ValidationError, ValidationReason,
    SUBMISSION_TYPE_CONTACT_INFO,
};

pub use clock::{Clock, SystemClock};
pub use controller::{
    FailureReason, SubmissionController, SubmissionState, SubmitOutcome, INTERRUPTED_REASON,
};
pub use notify::{Notification, NotificationKind, NotificationTemplates, Notifier, TracingNotifier};
pub use sender::{HttpSender, HttpSenderConfig, LeadSender, SendResult, SimulatedSender};
pub use validation::{is_valid_email, validate};

pub use metrics::{Counter, METRICS};
pub use obs::{
    emit_submit_failed, emit_submit_ignored, emit_submit_interrupted, emit_submit_rejected,
    emit_submit_started, emit_submit_succeeded, AttemptSpan,
};
pub use telemetry::{init_tracing, LogFormat};

/// leadform version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
