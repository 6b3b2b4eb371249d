//! Submission state machine for a single form
//!
//! The engine never touches the screen. Every visible effect is returned
//! as a [`PresentationCommand`] that the view layer applies.
//!
//! ```text
//! idle --submit--> validating --any invalid--> idle
//!                  validating --all valid--> submitting
//! submitting --accept--> succeeded --> idle
//! submitting --reject--> failed    --> idle
//! ```

use super::error::SubmissionError;
use super::field::ValidationState;
use super::form_state::{ContactForm, Form, FormSubmissionState, SubmissionPayload};
use super::validator;
use crate::state::NotificationKind;
use uuid::Uuid;

/// Label of the submit control when the form is ready
pub const SUBMIT_LABEL: &str = "Send request";
/// Label of the submit control while a submission is in flight
pub const SENDING_LABEL: &str = "Sending...";
/// Message shown once a submission is accepted
pub const SUCCESS_MESSAGE: &str = "Request sent! We will get back to you shortly.";

/// Visible state of the submit control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: String,
}

impl SubmitControl {
    pub fn ready() -> Self {
        Self {
            enabled: true,
            label: SUBMIT_LABEL.to_string(),
        }
    }

    pub fn sending() -> Self {
        Self {
            enabled: false,
            label: SENDING_LABEL.to_string(),
        }
    }
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self::ready()
    }
}

/// Presentation effect requested by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentationCommand {
    SetFieldError { field: String, message: String },
    ClearFieldError { field: String },
    ClearAllErrors,
    SetSubmitControl(SubmitControl),
    Notify { message: String, kind: NotificationKind },
}

/// How a value was edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Push(char),
    Pop,
    CycleOption { forward: bool },
    Replace(String),
}

/// Result of a submit trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStep {
    /// A submission is already in flight; nothing happened
    Ignored,
    /// Validation failed; errors were reported and no submission started
    Invalid(Vec<PresentationCommand>),
    /// The caller must now run the submit operation with `payload`
    Started {
        payload: SubmissionPayload,
        commands: Vec<PresentationCommand>,
    },
}

/// Owns one form and drives it from input through submission
#[derive(Debug, Clone)]
pub struct FormEngine {
    form: ContactForm,
    state: FormSubmissionState,
    in_flight: Option<Uuid>,
}

impl FormEngine {
    pub fn new(form: ContactForm) -> Self {
        Self {
            form,
            state: FormSubmissionState::Idle,
            in_flight: None,
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn state(&self) -> FormSubmissionState {
        self.state
    }

    /// Id of the payload currently being submitted
    pub fn in_flight(&self) -> Option<Uuid> {
        self.in_flight
    }

    fn transition(&mut self, next: FormSubmissionState) {
        tracing::debug!("form state {} -> {}", self.state.label(), next.label());
        self.state = next;
    }

    /// Move focus to the next row; the field losing focus is re-validated
    pub fn focus_next(&mut self) -> Vec<PresentationCommand> {
        let commands = self.blur_active();
        self.form.next_field();
        commands
    }

    /// Move focus to the previous row; the field losing focus is re-validated
    pub fn focus_prev(&mut self) -> Vec<PresentationCommand> {
        let commands = self.blur_active();
        self.form.prev_field();
        commands
    }

    /// Move focus to a specific row (mouse click)
    pub fn focus(&mut self, index: usize) -> Vec<PresentationCommand> {
        if index == self.form.active_field() {
            return Vec::new();
        }
        let commands = self.blur_active();
        self.form.set_active_field(index);
        commands
    }

    fn blur_active(&mut self) -> Vec<PresentationCommand> {
        match self.form.active_field_ref() {
            Some(field) => {
                let name = field.name.clone();
                self.on_blur(&name)
            }
            None => Vec::new(),
        }
    }

    /// Edit the focused field
    pub fn edit_active(&mut self, edit: FieldEdit) -> Vec<PresentationCommand> {
        match self.form.active_field_ref() {
            Some(field) => {
                let name = field.name.clone();
                self.on_input(&name, edit)
            }
            None => Vec::new(),
        }
    }

    /// Apply a value change. Any error on the field is cleared right away
    /// without re-validating.
    pub fn on_input(&mut self, name: &str, edit: FieldEdit) -> Vec<PresentationCommand> {
        let Some(field) = self.form.field_by_name_mut(name) else {
            return Vec::new();
        };
        let changed = match edit {
            FieldEdit::Push(c) => field.push_char(c),
            FieldEdit::Pop => field.pop_char(),
            FieldEdit::CycleOption { forward } => field.cycle_option(forward),
            FieldEdit::Replace(value) => {
                let changed = field.value != value;
                field.set_value(value);
                changed
            }
        };
        if !changed {
            return Vec::new();
        }
        // The last verdict no longer describes the new value
        field.validation_state = ValidationState::Untouched;
        vec![PresentationCommand::ClearFieldError {
            field: name.to_string(),
        }]
    }

    /// Re-validate one field after it loses focus
    pub fn on_blur(&mut self, name: &str) -> Vec<PresentationCommand> {
        self.validate_by_name(name)
            .map(|(_, commands)| commands)
            .unwrap_or_default()
    }

    /// Validate a field by name. Returns `None` when no such field exists.
    pub fn validate_by_name(&mut self, name: &str) -> Option<(bool, Vec<PresentationCommand>)> {
        self.form.field_by_name(name)?;
        let mut commands = Vec::new();
        let valid = self.validate_into(name, &mut commands);
        Some((valid, commands))
    }

    fn validate_into(&mut self, name: &str, commands: &mut Vec<PresentationCommand>) -> bool {
        let Some(field) = self.form.field_by_name_mut(name) else {
            return false;
        };
        match validator::validate(field) {
            Ok(()) => {
                field.validation_state = ValidationState::Valid;
                commands.push(PresentationCommand::ClearFieldError {
                    field: name.to_string(),
                });
                true
            }
            Err(err) => {
                field.validation_state = ValidationState::Invalid;
                commands.push(PresentationCommand::SetFieldError {
                    field: name.to_string(),
                    message: err.to_string(),
                });
                false
            }
        }
    }

    /// Handle a submit trigger.
    ///
    /// Every field that is required or carries a format rule is validated,
    /// and every failure is reported. When all pass, the payload is
    /// captured and the submit control switched to its sending state
    /// before the caller starts the submit operation.
    pub fn submit(&mut self) -> SubmitStep {
        if self.state.is_busy() {
            tracing::debug!("submit ignored while {}", self.state.label());
            return SubmitStep::Ignored;
        }

        self.transition(FormSubmissionState::Validating);

        let names: Vec<String> = self
            .form
            .fields()
            .iter()
            .filter(|f| validator::needs_validation(f))
            .map(|f| f.name.clone())
            .collect();

        let mut commands = Vec::new();
        let mut all_valid = true;
        for name in &names {
            all_valid &= self.validate_into(name, &mut commands);
        }

        if !all_valid {
            let invalid = self
                .form
                .fields()
                .iter()
                .filter(|f| f.validation_state == ValidationState::Invalid)
                .count();
            tracing::info!("submission blocked: {invalid} invalid field(s)");
            self.transition(FormSubmissionState::Idle);
            return SubmitStep::Invalid(commands);
        }

        let payload = self.form.snapshot();
        self.in_flight = Some(payload.id());
        self.transition(FormSubmissionState::Submitting);
        tracing::info!("submitting payload {}", payload.id());
        commands.push(PresentationCommand::SetSubmitControl(SubmitControl::sending()));

        SubmitStep::Started { payload, commands }
    }

    /// Resume after the submit operation resolved.
    ///
    /// Outcomes for a payload other than the in-flight one are ignored.
    /// The command list always ends by restoring the submit control.
    pub fn complete(
        &mut self,
        id: Uuid,
        outcome: Result<(), SubmissionError>,
    ) -> Vec<PresentationCommand> {
        if self.state != FormSubmissionState::Submitting || self.in_flight != Some(id) {
            tracing::warn!("ignoring outcome for stale submission {id}");
            return Vec::new();
        }
        self.in_flight = None;

        let mut commands = Vec::new();
        match outcome {
            Ok(()) => {
                self.transition(FormSubmissionState::Succeeded);
                tracing::info!("submission {id} accepted");
                commands.push(PresentationCommand::Notify {
                    message: SUCCESS_MESSAGE.to_string(),
                    kind: NotificationKind::Success,
                });
                self.form.reset();
                commands.push(PresentationCommand::ClearAllErrors);
            }
            Err(err) => {
                self.transition(FormSubmissionState::Failed);
                tracing::warn!("submission {id} failed: {err}");
                commands.push(PresentationCommand::Notify {
                    message: err.to_string(),
                    kind: NotificationKind::Error,
                });
            }
        }
        commands.push(PresentationCommand::SetSubmitControl(SubmitControl::ready()));
        self.transition(FormSubmissionState::Idle);
        commands
    }

    /// Clear all values and errors. Refused while a submission is in flight.
    pub fn reset(&mut self) -> Vec<PresentationCommand> {
        if self.state.is_busy() {
            return Vec::new();
        }
        self.form.reset();
        vec![PresentationCommand::ClearAllErrors]
    }
}

impl Default for FormEngine {
    fn default() -> Self {
        Self::new(ContactForm::contact())
    }
}
