//! Field validation rules
//!
//! Rules are pure: they read a field and return a verdict. Showing or
//! clearing the error is the presenter's job.

use super::error::FieldValidationError;
use super::field::{FieldKind, FormField};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-()]{10,}$").expect("phone pattern is valid"));

/// Check an email address against the `local@domain.tld` shape
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Check a phone number: optional leading `+`, then ten or more digits,
/// spaces, dashes or parentheses
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// Validate a single field.
///
/// The empty check uses the trimmed value; format rules match the raw value.
/// An empty optional email/tel field is valid.
pub fn validate(field: &FormField) -> Result<(), FieldValidationError> {
    let is_empty = field.value.trim().is_empty();

    if is_empty {
        return if field.required {
            Err(FieldValidationError::Required)
        } else {
            Ok(())
        };
    }

    match field.kind {
        FieldKind::Email if !is_valid_email(&field.value) => {
            Err(FieldValidationError::InvalidEmail)
        }
        FieldKind::Tel if !is_valid_phone(&field.value) => Err(FieldValidationError::InvalidPhone),
        _ => Ok(()),
    }
}

/// Whether a submit pass must look at this field
pub fn needs_validation(field: &FormField) -> bool {
    field.required || field.kind.has_format_rule()
}
