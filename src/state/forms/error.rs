//! Error types for form validation, submission and notifications

use std::time::Duration;
use thiserror::Error;

/// Per-field validation failure. Shown inline next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldValidationError {
    #[error("This field is mandatory.")]
    Required,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please enter a valid phone number.")]
    InvalidPhone,
}

/// Whole-form submission failure. Shown as a notification; the user can retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The submit operation refused the payload
    #[error("{0}")]
    Rejected(String),
    /// The submit operation did not resolve in time
    #[error("The request timed out after {} seconds. Please try again.", .0.as_secs())]
    Timeout(Duration),
}

/// The notification sink could not display a message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("notification could not be displayed: {0}")]
pub struct NotificationError(pub String);
