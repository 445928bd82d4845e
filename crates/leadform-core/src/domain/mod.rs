//! Domain models for lead intake.
//!
//! Canonical definitions for the core entities:
//! - `RawFieldSet`: form values as captured at submit time
//! - `ProductSolution`: the closed set of solutions a lead can pick
//! - `LeadSubmission`: the immutable, backend-ready record

pub mod error;
pub mod fields;
pub mod solution;
pub mod submission;

// Re-export main types and errors
pub use error::{BackendError, LeadFormError, Result, ValidationError, ValidationReason};
pub use fields::{FieldName, RawFieldSet};
pub use solution::ProductSolution;
pub use submission::{serialize, LeadSubmission, ValidatedFields, SUBMISSION_TYPE_CONTACT_INFO};
