//! Form state management and the contact form

use super::field::FormField;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Lifecycle of one submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormSubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl FormSubmissionState {
    /// A new submit trigger is ignored in these states
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Validating | Self::Submitting)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

/// Snapshot of all field values taken when a submission starts.
///
/// Never mutated after capture; fields are only readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    id: Uuid,
    captured_at: DateTime<Utc>,
    values: BTreeMap<String, String>,
}

impl SubmissionPayload {
    pub fn capture<'a>(fields: impl IntoIterator<Item = &'a FormField>) -> Self {
        Self {
            id: Uuid::new_v4(),
            captured_at: Utc::now(),
            values: fields
                .into_iter()
                .map(|f| (f.name.clone(), f.value.clone()))
                .collect(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

/// Services offered on the contact form
pub const SERVICE_OPTIONS: [&str; 5] = [
    "diagnostic",
    "repair",
    "installation",
    "maintenance",
    "other",
];

/// An ordered set of fields plus a trailing submit-button row
#[derive(Debug, Clone)]
pub struct ContactForm {
    fields: Vec<FormField>,
    pub active_field_index: usize,
}

impl ContactForm {
    /// Bind a form over the given fields. Field names must be unique.
    pub fn new(fields: Vec<FormField>) -> Self {
        debug_assert!(
            {
                let mut names: Vec<_> = fields.iter().map(|f| &f.name).collect();
                names.sort();
                names.windows(2).all(|w| w[0] != w[1])
            },
            "field names must be unique"
        );
        Self {
            fields,
            active_field_index: 0,
        }
    }

    /// The business contact form: name, email, phone, service, message
    pub fn contact() -> Self {
        Self::new(vec![
            FormField::text("name", "Full name", true).with_placeholder("Your name"),
            FormField::email("email", "Email", true).with_placeholder("you@example.com"),
            FormField::tel("phone", "Phone", false).with_placeholder("01 02 03 04 05"),
            FormField::select("service", "Service", &SERVICE_OPTIONS, false),
            FormField::textarea("message", "Message", true)
                .with_placeholder("Describe your problem"),
        ])
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FormField> {
        self.index_of(name).and_then(|i| self.fields.get(i))
    }

    pub fn field_by_name_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.index_of(name).and_then(|i| self.fields.get_mut(i))
    }

    /// Index of the submit-button row
    pub fn buttons_row(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the submit-button row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == self.buttons_row()
    }

    pub fn active_field_ref(&self) -> Option<&FormField> {
        self.fields.get(self.active_field_index)
    }

    /// Clear every value and move focus back to the first field
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.active_field_index = 0;
    }

    pub fn snapshot(&self) -> SubmissionPayload {
        SubmissionPayload::capture(&self.fields)
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::contact()
    }
}

impl Form for ContactForm {
    fn field_count(&self) -> usize {
        self.fields.len() + 1 // fields plus the buttons row
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.buttons_row());
    }
}
