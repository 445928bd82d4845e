//! Backend sender abstraction.
//!
//! A [`LeadSender`] takes a finished [`LeadSubmission`] and hands it to
//! whatever persists leads. The controller treats it as opaque I/O: no
//! retry, no backoff. Timeouts are the sender's concern and surface as
//! an ordinary [`BackendError`].

use async_trait::async_trait;

use crate::domain::{BackendError, LeadSubmission};

pub mod http;
pub mod simulated;

pub use http::{HttpSender, HttpSenderConfig};
pub use simulated::SimulatedSender;

/// Result type for sender operations
pub type SendResult = std::result::Result<(), BackendError>;

#[async_trait]
pub trait LeadSender: Send + Sync {
    /// Deliver one submission. `Ok` means the backend accepted it.
    async fn submit_lead(&self, record: &LeadSubmission) -> SendResult;
}
