//! Domain-level error taxonomy for lead intake.

use serde::{Deserialize, Serialize};

use super::fields::FieldName;

/// Why a single field failed validation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ValidationReason {
    /// Field is empty after trimming whitespace.
    Required,
    /// Field is present but malformed (only `email` today).
    Format,
    /// Value is not one of the allowed choices.
    InvalidChoice,
}

impl ValidationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationReason::Required => "required",
            ValidationReason::Format => "format",
            ValidationReason::InvalidChoice => "invalid_choice",
        }
    }
}

impl std::fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One offending field, as reported back to the form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: FieldName,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: FieldName, reason: ValidationReason) -> Self {
        Self { field, reason }
    }
}

/// Failure reported by a backend sender. The reason is opaque and not
/// guaranteed to be safe to show to an end user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("backend error: {reason}")]
pub struct BackendError {
    pub reason: String,
}

impl BackendError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Lead intake errors outside the submission lifecycle itself.
#[derive(Debug, thiserror::Error)]
pub enum LeadFormError {
    #[error("unknown form field: {0}")]
    UnknownField(String),

    #[error("unknown product solution: {0}")]
    UnknownSolution(String),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for lead intake operations.
pub type Result<T> = std::result::Result<T, LeadFormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(FieldName::Email, ValidationReason::Format);
        assert_eq!(err.to_string(), "email: format");

        let err = ValidationError::new(FieldName::SelectedSolution, ValidationReason::InvalidChoice);
        assert_eq!(err.to_string(), "selectedSolution: invalid_choice");
    }

    #[test]
    fn test_validation_error_serializes_wire_names() {
        let err = ValidationError::new(FieldName::FirstName, ValidationReason::Required);
        let json = serde_json::to_value(&err).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"field": "firstName", "reason": "required"})
        );
    }

    #[test]
    fn test_backend_error_keeps_reason() {
        let err = BackendError::new("network error");
        assert_eq!(err.reason, "network error");
        assert!(err.to_string().contains("network error"));
    }

    #[test]
    fn test_lead_form_error_display() {
        let err = LeadFormError::UnknownField("fax".to_string());
        assert!(err.to_string().contains("unknown form field"));
        assert!(err.to_string().contains("fax"));
    }

    #[test]
    fn test_parse_failures_use_domain_variants() {
        let err = "fax".parse::<FieldName>().unwrap_err();
        assert!(matches!(err, LeadFormError::UnknownField(ref name) if name == "fax"));

        let err = "crm".parse::<crate::domain::ProductSolution>().unwrap_err();
        assert!(matches!(err, LeadFormError::UnknownSolution(ref value) if value == "crm"));
        assert_eq!(err.to_string(), "unknown product solution: crm");
    }
}
