//! Applies presentation commands to the state the renderer reads

use super::controller::{PresentationCommand, SubmitControl};
use super::error::NotificationError;
use super::presenter::ErrorPresenter;
use crate::state::NotificationSink;

/// Presentation state of one form: inline errors and the submit control
#[derive(Debug, Clone, Default)]
pub struct FormView {
    pub errors: ErrorPresenter,
    pub submit: SubmitControl,
}

impl FormView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply commands in order.
    ///
    /// A failing notification does not stop the remaining commands, so the
    /// submit control is always restored. The first notification error is
    /// returned after everything has been applied.
    pub fn apply(
        &mut self,
        commands: Vec<PresentationCommand>,
        sink: &mut dyn NotificationSink,
    ) -> Result<(), NotificationError> {
        let mut first_error = None;
        for command in commands {
            match command {
                PresentationCommand::SetFieldError { field, message } => {
                    self.errors.show_error(&field, message);
                }
                PresentationCommand::ClearFieldError { field } => {
                    self.errors.clear_error(&field);
                }
                PresentationCommand::ClearAllErrors => self.errors.clear_all(),
                PresentationCommand::SetSubmitControl(control) => self.submit = control,
                PresentationCommand::Notify { message, kind } => {
                    if let Err(err) = sink.notify(&message, kind) {
                        tracing::warn!("{err}");
                        first_error.get_or_insert(err);
                    }
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{
        FieldEdit, FormEngine, FormSubmissionState, SubmissionError, SubmitStep, SUCCESS_MESSAGE,
    };
    use crate::state::{MockNotificationSink, NotificationCenter, NotificationKind};
    use mockall::predicate::eq;

    fn valid_engine() -> FormEngine {
        let mut engine = FormEngine::default();
        for (name, value) in [
            ("name", "Ana Lee"),
            ("email", "ana@example.com"),
            ("phone", "0102030405"),
            ("message", "Please call me back."),
        ] {
            engine.on_input(name, FieldEdit::Replace(value.to_string()));
        }
        engine
    }

    #[test]
    fn test_show_error_twice_leaves_single_annotation() {
        let mut view = FormView::new();
        let mut sink = NotificationCenter::default();
        let set = || PresentationCommand::SetFieldError {
            field: "email".to_string(),
            message: "bad".to_string(),
        };
        view.apply(vec![set(), set()], &mut sink).unwrap();
        assert_eq!(view.errors.annotation_count("email"), 1);
    }

    #[test]
    fn test_notification_failure_still_restores_submit_control() {
        let mut view = FormView::new();
        view.submit = SubmitControl::sending();

        let mut sink = MockNotificationSink::new();
        sink.expect_notify()
            .times(1)
            .returning(|_, _| Err(NotificationError("terminal gone".to_string())));

        let result = view.apply(
            vec![
                PresentationCommand::Notify {
                    message: "network error".to_string(),
                    kind: NotificationKind::Error,
                },
                PresentationCommand::SetSubmitControl(SubmitControl::ready()),
            ],
            &mut sink,
        );

        assert!(result.is_err());
        assert_eq!(view.submit, SubmitControl::ready());
    }

    #[test]
    fn test_rejected_submission_scenario() {
        let mut engine = valid_engine();
        let mut view = FormView::new();
        let mut sink = MockNotificationSink::new();
        sink.expect_notify()
            .with(eq("network error"), eq(NotificationKind::Error))
            .times(1)
            .returning(|_, _| Ok(()));

        let SubmitStep::Started { payload, commands } = engine.submit() else {
            panic!("expected submission to start");
        };
        view.apply(commands, &mut sink).unwrap();
        assert!(!view.submit.enabled);
        assert_eq!(engine.state(), FormSubmissionState::Submitting);

        let commands = engine.complete(
            payload.id(),
            Err(SubmissionError::Rejected("network error".to_string())),
        );
        view.apply(commands, &mut sink).unwrap();

        assert_eq!(engine.state(), FormSubmissionState::Idle);
        assert!(view.submit.enabled);
        assert_eq!(
            engine.form().field_by_name("email").unwrap().value,
            "ana@example.com"
        );
    }

    #[test]
    fn test_accepted_submission_scenario() {
        let mut engine = valid_engine();
        let mut view = FormView::new();
        let mut sink = MockNotificationSink::new();
        sink.expect_notify()
            .with(eq(SUCCESS_MESSAGE), eq(NotificationKind::Success))
            .times(1)
            .returning(|_, _| Ok(()));

        let SubmitStep::Started { payload, commands } = engine.submit() else {
            panic!("expected submission to start");
        };
        view.apply(commands, &mut sink).unwrap();
        let commands = engine.complete(payload.id(), Ok(()));
        view.apply(commands, &mut sink).unwrap();

        assert!(view.errors.is_empty());
        assert_eq!(view.submit, SubmitControl::ready());
        assert!(engine.form().fields().iter().all(|f| f.value.is_empty()));
    }

    #[test]
    fn test_live_correction_removes_error_before_blur() {
        let mut engine = FormEngine::default();
        let mut view = FormView::new();
        let mut sink = NotificationCenter::default();

        engine.on_input("email", FieldEdit::Replace("nope".to_string()));
        view.apply(engine.on_blur("email"), &mut sink).unwrap();
        assert!(view.errors.has_error("email"));

        view.apply(engine.on_input("email", FieldEdit::Push('@')), &mut sink)
            .unwrap();
        assert!(!view.errors.has_error("email"));
    }

    #[test]
    fn test_invalid_submit_attaches_one_error_to_email() {
        let mut engine = valid_engine();
        engine.on_input("email", FieldEdit::Replace("not-an-email".to_string()));
        let mut view = FormView::new();
        let mut sink = MockNotificationSink::new();
        sink.expect_notify().never();

        let SubmitStep::Invalid(commands) = engine.submit() else {
            panic!("expected validation failure");
        };
        view.apply(commands, &mut sink).unwrap();

        assert_eq!(view.errors.len(), 1);
        assert_eq!(
            view.errors.error_for("email").unwrap().message,
            "Please enter a valid email address."
        );
        assert!(view.submit.enabled);
    }
}
