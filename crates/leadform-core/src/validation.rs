//! Field validation for the contact form.
//!
//! Checks every rule and accumulates all violations so the form can flag
//! each offending field at once. Pure: no I/O, no clock, no logging.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{
    FieldName, ProductSolution, RawFieldSet, ValidatedFields, ValidationError, ValidationReason,
};

/// local-part `@` domain, where the domain contains at least one dot.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("EMAIL_PATTERN is a valid regex"))
}

/// Check email syntax. Surrounding whitespace is ignored.
pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value.trim())
}

/// Validate a form snapshot.
///
/// Rules, evaluated in form order:
/// 1. Every required field must be non-blank after trimming (`required`).
/// 2. A non-blank `email` must be syntactically valid (`format`).
/// 3. `selectedSolution` must be one of [`ProductSolution::ALL`]
///    (`invalid_choice`). A blank selection reports both `required` and
///    `invalid_choice`.
///
/// # Errors
///
/// Returns every [`ValidationError`] found; never an empty list.
pub fn validate(fields: &RawFieldSet) -> Result<ValidatedFields, Vec<ValidationError>> {
    let mut errors = Vec::new();

    for field in FieldName::REQUIRED {
        if fields.non_blank(field).is_none() {
            errors.push(ValidationError::new(field, ValidationReason::Required));
        }
    }

    if let Some(email) = fields.non_blank(FieldName::Email) {
        if !is_valid_email(email) {
            errors.push(ValidationError::new(
                FieldName::Email,
                ValidationReason::Format,
            ));
        }
    }

    let solution = fields
        .get(FieldName::SelectedSolution)
        .trim()
        .parse::<ProductSolution>()
        .ok();
    if solution.is_none() {
        errors.push(ValidationError::new(
            FieldName::SelectedSolution,
            ValidationReason::InvalidChoice,
        ));
    }

    let (Some(solution), true) = (solution, errors.is_empty()) else {
        errors.sort_by_key(|e| e.field);
        return Err(errors);
    };

    let required = |field: FieldName| {
        fields
            .non_blank(field)
            .map(str::to_string)
            .unwrap_or_default()
    };
    let optional = |field: FieldName| fields.non_blank(field).map(str::to_string);

    Ok(ValidatedFields {
        first_name: required(FieldName::FirstName),
        last_name: required(FieldName::LastName),
        email: required(FieldName::Email),
        phone: optional(FieldName::Phone),
        company: required(FieldName::Company),
        position: optional(FieldName::Position),
        business_type: optional(FieldName::BusinessType),
        message: optional(FieldName::Message),
        selected_solution: solution,
    })
}
