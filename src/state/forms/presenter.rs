//! Inline error annotations for form fields

use std::collections::HashMap;

/// Error annotation attached to one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub message: String,
}

/// Tracks the visible error annotation of each field.
///
/// A field carries at most one annotation: showing an error replaces the
/// previous one, and clearing a field without an error does nothing.
#[derive(Debug, Clone, Default)]
pub struct ErrorPresenter {
    errors: HashMap<String, FieldError>,
}

impl ErrorPresenter {
    /// Mark the field as in error and attach `message`
    pub fn show_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.insert(
            field.to_string(),
            FieldError {
                message: message.into(),
            },
        );
    }

    /// Remove the field's annotation; returns true if one was removed
    pub fn clear_error(&mut self, field: &str) -> bool {
        self.errors.remove(field).is_some()
    }

    /// Remove every annotation
    pub fn clear_all(&mut self) {
        self.errors.clear();
    }

    pub fn error_for(&self, field: &str) -> Option<&FieldError> {
        self.errors.get(field)
    }

    #[cfg(test)]
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Number of visible annotations for a field (0 or 1)
    #[cfg(test)]
    pub fn annotation_count(&self, field: &str) -> usize {
        usize::from(self.has_error(field))
    }

    /// Number of fields currently in error
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}
