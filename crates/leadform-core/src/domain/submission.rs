//! Canonical, backend-ready lead record.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use super::solution::ProductSolution;

/// Tag distinguishing this record kind from other forms sharing a backend.
pub const SUBMISSION_TYPE_CONTACT_INFO: &str = "contact_info";

/// Field values that passed validation, already trimmed.
///
/// Only [`crate::validation::validate`] constructs these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFields {
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) email: String,
    pub(crate) phone: Option<String>,
    pub(crate) company: String,
    pub(crate) position: Option<String>,
    pub(crate) business_type: Option<String>,
    pub(crate) message: Option<String>,
    pub(crate) selected_solution: ProductSolution,
}

impl ValidatedFields {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn selected_solution(&self) -> ProductSolution {
        self.selected_solution
    }
}

/// One lead, ready to hand to a [`crate::sender::LeadSender`].
///
/// Fields are private so a record can only come out of [`serialize`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    first_name: String,
    last_name: String,
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    business_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    selected_solution: ProductSolution,
    submission_type: &'static str,
    #[serde(serialize_with = "serialize_iso_millis")]
    timestamp: DateTime<Utc>,
}

impl LeadSubmission {
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn position(&self) -> Option<&str> {
        self.position.as_deref()
    }

    pub fn business_type(&self) -> Option<&str> {
        self.business_type.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn selected_solution(&self) -> ProductSolution {
        self.selected_solution
    }

    pub fn submission_type(&self) -> &'static str {
        self.submission_type
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Build the canonical record from validated fields.
///
/// Pure: the same fields and `now` always produce an equal record.
pub fn serialize(fields: &ValidatedFields, now: DateTime<Utc>) -> LeadSubmission {
    LeadSubmission {
        first_name: fields.first_name.clone(),
        last_name: fields.last_name.clone(),
        email: fields.email.clone(),
        phone: fields.phone.clone(),
        company: fields.company.clone(),
        position: fields.position.clone(),
        business_type: fields.business_type.clone(),
        message: fields.message.clone(),
        selected_solution: fields.selected_solution,
        submission_type: SUBMISSION_TYPE_CONTACT_INFO,
        timestamp: now,
    }
}

// `2024-05-01T09:30:00.000Z`, millisecond precision with a `Z` suffix.
fn serialize_iso_millis<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}
