//! Raw form values as captured from the UI.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::LeadFormError;

/// The fields collected by the contact form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    FirstName,
    LastName,
    Email,
    Phone,
    Company,
    Position,
    BusinessType,
    Message,
    SelectedSolution,
}

impl FieldName {
    /// All fields, in form order.
    pub const ALL: [FieldName; 9] = [
        FieldName::FirstName,
        FieldName::LastName,
        FieldName::Email,
        FieldName::Phone,
        FieldName::Company,
        FieldName::Position,
        FieldName::BusinessType,
        FieldName::Message,
        FieldName::SelectedSolution,
    ];

    /// Fields that must be non-blank for a submission to be accepted.
    pub const REQUIRED: [FieldName; 5] = [
        FieldName::FirstName,
        FieldName::LastName,
        FieldName::Email,
        FieldName::Company,
        FieldName::SelectedSolution,
    ];

    /// Wire name of the field (matches the form's `name` attribute).
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::FirstName => "firstName",
            FieldName::LastName => "lastName",
            FieldName::Email => "email",
            FieldName::Phone => "phone",
            FieldName::Company => "company",
            FieldName::Position => "position",
            FieldName::BusinessType => "businessType",
            FieldName::Message => "message",
            FieldName::SelectedSolution => "selectedSolution",
        }
    }

    pub fn is_required(&self) -> bool {
        FieldName::REQUIRED.contains(self)
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = LeadFormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| LeadFormError::UnknownField(s.to_string()))
    }
}

/// Snapshot of the form's field values at submit time.
///
/// Absent keys and empty strings are equivalent; [`RawFieldSet::get`]
/// returns `""` for both.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RawFieldSet {
    values: BTreeMap<FieldName, String>,
}

impl RawFieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, field: FieldName, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Raw value of a field, untrimmed. Missing fields read as `""`.
    pub fn get(&self, field: FieldName) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Trimmed value, or `None` when the field is blank.
    pub fn non_blank(&self, field: FieldName) -> Option<&str> {
        let value = self.get(field).trim();
        (!value.is_empty()).then_some(value)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// True when every field is blank.
    pub fn is_empty(&self) -> bool {
        self.values.values().all(|v| v.trim().is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_round_trips_through_str() {
        for field in FieldName::ALL {
            assert_eq!(field.as_str().parse::<FieldName>().unwrap(), field);
        }
        assert!("fax".parse::<FieldName>().is_err());
    }

    #[test]
    fn test_serde_name_matches_as_str() {
        for field in FieldName::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.as_str()));
        }
    }

    #[test]
    fn test_required_fields() {
        assert!(FieldName::Email.is_required());
        assert!(FieldName::SelectedSolution.is_required());
        assert!(!FieldName::Phone.is_required());
        assert!(!FieldName::BusinessType.is_required());
    }

    #[test]
    fn test_missing_field_reads_empty() {
        let fields = RawFieldSet::new().with(FieldName::FirstName, "  Abel ");
        assert_eq!(fields.get(FieldName::LastName), "");
        assert_eq!(fields.get(FieldName::FirstName), "  Abel ");
        assert_eq!(fields.non_blank(FieldName::FirstName), Some("Abel"));
        assert_eq!(fields.non_blank(FieldName::LastName), None);
    }

    #[test]
    fn test_clear_and_is_empty() {
        let mut fields = RawFieldSet::new()
            .with(FieldName::Company, "Acme")
            .with(FieldName::Message, "   ");
        assert!(!fields.is_empty());
        fields.clear();
        assert!(fields.is_empty());
        assert_eq!(fields.iter().count(), 0);
    }

    #[test]
    fn test_deserialize_from_form_json() {
        let fields: RawFieldSet =
            serde_json::from_str(r#"{"firstName": "Abel", "selectedSolution": "not-sure"}"#)
                .unwrap();
        assert_eq!(fields.get(FieldName::FirstName), "Abel");
        assert_eq!(fields.get(FieldName::SelectedSolution), "not-sure");

        let bad: std::result::Result<RawFieldSet, _> = serde_json::from_str(r#"{"fax": "1"}"#);
        assert!(bad.is_err());
    }
}
