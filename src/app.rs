//! Application state and core logic

use crate::config::AppConfig;
use crate::state::forms::{FieldEdit, FieldKind, SubmissionError, SubmitStep};
use crate::state::{AppState, Capabilities, NotificationCenter, SplashState, View};
use crate::submit::{submit_with_timeout, SubmitOperation};
use crate::ui;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Shown when the submit operation crashed instead of reporting an outcome
const SUBMISSION_ABORTED: &str = "Sending failed unexpectedly. Please try again.";

/// Result of a submit task, delivered back to the event loop
#[derive(Debug)]
struct SubmissionOutcome {
    id: Uuid,
    result: Result<(), SubmissionError>,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Splash screen animation state
    pub splash_state: Option<SplashState>,
    /// Terminal size for layout calculations (height, width)
    pub terminal_size: Option<(u16, u16)>,
    /// When the in-flight submission started, for the spinner
    pub submit_started: Option<Instant>,
    submitter: Arc<dyn SubmitOperation>,
    submit_timeout: Option<Duration>,
    outcome_tx: mpsc::UnboundedSender<SubmissionOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<SubmissionOutcome>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(config: &AppConfig, submitter: Arc<dyn SubmitOperation>, terminal_width: u16) -> Self {
        let capabilities =
            Capabilities::detect(terminal_width, config.reduced_motion, config.pointer_input);
        let notifications =
            NotificationCenter::new(config.toasts_enabled, config.notification_duration());
        let mut state = AppState::new(capabilities, notifications);

        // Animated intro only on capable terminals
        let splash_state = if capabilities.animations_enabled() {
            state.current_view = View::Splash;
            Some(SplashState::new())
        } else {
            None
        };

        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        Self {
            state,
            splash_state,
            terminal_size: None,
            submit_started: None,
            submitter,
            submit_timeout: config.submit_timeout(),
            outcome_tx,
            outcome_rx,
            quit: false,
        }
    }

    /// Update splash animation state
    /// Returns true if animation is complete and we should transition
    pub fn update_splash(&mut self, terminal_height: u16) -> bool {
        if let Some(ref mut splash) = self.splash_state {
            splash.update(terminal_height);
            if splash.is_complete() {
                self.splash_state = None;
                self.state.current_view = View::ContactForm;
                return true;
            }
        }
        false
    }

    /// Check if in splash screen
    pub fn in_splash(&self) -> bool {
        matches!(self.state.current_view, View::Splash)
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// True while a submission is in flight
    pub fn is_submitting(&self) -> bool {
        self.state.engine.in_flight().is_some()
    }

    /// Periodic housekeeping: expire toasts and pick up finished submissions
    pub fn tick(&mut self) {
        self.state.notifications.expire(Instant::now());
        self.poll_submissions();
    }

    /// Resume the form engine for every submission that finished.
    /// Returns how many outcomes were handled.
    pub fn poll_submissions(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            let commands = self.state.engine.complete(outcome.id, outcome.result);
            self.state.apply(commands);
            handled += 1;
        }
        if !self.is_submitting() {
            self.submit_started = None;
        }
        handled
    }

    /// Trigger a submission of the contact form
    fn submit(&mut self) {
        match self.state.engine.submit() {
            SubmitStep::Ignored => {}
            SubmitStep::Invalid(commands) => self.state.apply(commands),
            SubmitStep::Started { payload, commands } => {
                // Submit control is disabled before the request goes out
                self.state.apply(commands);
                self.submit_started = Some(Instant::now());

                let id = payload.id();
                let submitter = Arc::clone(&self.submitter);
                let timeout = self.submit_timeout;
                let tx = self.outcome_tx.clone();
                tokio::spawn(async move {
                    // Run the operation in its own task so a panic still
                    // yields an outcome and the form leaves `submitting`
                    let attempt = tokio::spawn(async move {
                        submit_with_timeout(submitter.as_ref(), payload, timeout).await
                    });
                    let result = match attempt.await {
                        Ok(result) => result,
                        Err(err) => {
                            tracing::error!("submission {id} aborted: {err}");
                            Err(SubmissionError::Rejected(SUBMISSION_ABORTED.to_string()))
                        }
                    };
                    if tx.send(SubmissionOutcome { id, result }).is_err() {
                        tracing::warn!("submission {id} finished after shutdown");
                    }
                });
            }
        }
    }

    /// Main key handler
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.in_splash() {
            return self.handle_splash_key(key).await;
        }

        // An alert swallows all input until dismissed
        if self.state.notifications.is_blocking() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.notifications.dismiss();
            }
            return Ok(());
        }

        self.handle_contact_form_key(key).await
    }

    /// Handle keys in the contact form
    async fn handle_contact_form_key(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let on_buttons = self.state.engine.form().is_buttons_row_active();
        let active_kind = self
            .state
            .engine
            .form()
            .active_field_ref()
            .map(|f| f.kind.clone());

        let commands = match key.code {
            KeyCode::Esc => {
                if !self.state.notifications.dismiss() {
                    self.quit = true;
                }
                Vec::new()
            }
            KeyCode::Char('s') if ctrl => {
                self.submit();
                Vec::new()
            }
            KeyCode::Char('r') if ctrl => self.state.engine.reset(),
            KeyCode::Char(_) if ctrl => Vec::new(),
            KeyCode::Tab => self.state.engine.focus_next(),
            KeyCode::BackTab => self.state.engine.focus_prev(),
            KeyCode::Enter if on_buttons => {
                self.submit();
                Vec::new()
            }
            KeyCode::Enter => match active_kind {
                Some(FieldKind::Textarea) => self.state.engine.edit_active(FieldEdit::Push('\n')),
                _ => self.state.engine.focus_next(),
            },
            KeyCode::Left | KeyCode::Right if matches!(active_kind, Some(FieldKind::Select(_))) => {
                let forward = key.code == KeyCode::Right;
                self.state
                    .engine
                    .edit_active(FieldEdit::CycleOption { forward })
            }
            KeyCode::Char(c) => self.state.engine.edit_active(FieldEdit::Push(c)),
            KeyCode::Backspace => self.state.engine.edit_active(FieldEdit::Pop),
            _ => Vec::new(),
        };
        self.state.apply(commands);
        Ok(())
    }

    async fn handle_splash_key(&mut self, _key: KeyEvent) -> Result<()> {
        if let Some(ref mut splash) = self.splash_state {
            splash.skip();
        }
        Ok(())
    }

    /// Bracketed paste: append to the focused text field in one edit.
    /// Single-line fields get newlines flattened to spaces.
    pub async fn handle_paste(&mut self, text: String) -> Result<()> {
        if self.in_splash() || self.state.notifications.is_blocking() {
            return Ok(());
        }
        let Some(field) = self.state.engine.form().active_field_ref() else {
            return Ok(());
        };
        if matches!(field.kind, FieldKind::Select(_)) {
            return Ok(());
        }
        let pasted = if field.is_multiline() {
            text.replace("\r\n", "\n")
        } else {
            text.replace(['\r', '\n'], " ")
        };
        let value = format!("{}{pasted}", field.value);
        let commands = self.state.engine.edit_active(FieldEdit::Replace(value));
        self.state.apply(commands);
        Ok(())
    }

    /// Main mouse handler. Clicking a field focuses it, clicking the
    /// submit button submits.
    pub async fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        if !self.state.capabilities.pointer_input || self.in_splash() {
            return Ok(());
        }
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return Ok(());
        }
        if self.state.notifications.is_blocking() {
            return Ok(());
        }

        let Some(row) = self.row_at(mouse.column, mouse.row) else {
            return Ok(());
        };
        let commands = self.state.engine.focus(row);
        self.state.apply(commands);
        if self.state.engine.form().is_buttons_row_active() {
            self.submit();
        }
        Ok(())
    }

    /// Which form row (field index, or the buttons row) is under the cursor
    fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let (height, width) = self.terminal_size.unwrap_or((24, 80));
        let main = ui::main_area(Rect::new(0, 0, width, height));
        ui::forms::contact_form_rows(main, self.state.engine.form().fields())
            .iter()
            .position(|r| r.contains(Position::new(column, row)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{FormSubmissionState, SubmitControl, SUCCESS_MESSAGE};
    use crate::state::NotificationKind;
    use crate::submit::MockSubmitOperation;

    fn config() -> AppConfig {
        AppConfig {
            reduced_motion: true,
            ..Default::default()
        }
    }

    fn app_with(op: MockSubmitOperation, config: &AppConfig) -> App {
        App::new(config, Arc::new(op), 120)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    async fn fill_valid(app: &mut App) {
        type_text(app, "Ana Lee").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(app, "ana@example.com").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(app, "0102030405").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(app, "Screen stays black").await;
    }

    /// Let the spawned submit task run, then drain its outcome
    async fn settle(app: &mut App) {
        for _ in 0..50 {
            if app.poll_submissions() > 0 {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("submission never completed");
    }

    mod startup {
        use super::*;

        #[tokio::test]
        async fn test_low_performance_skips_splash() {
            let app = app_with(MockSubmitOperation::new(), &config());
            assert!(!app.in_splash());
            assert!(app.splash_state.is_none());
            assert!(!app.should_quit());
        }

        #[tokio::test]
        async fn test_capable_terminal_shows_splash() {
            let mut app = app_with(MockSubmitOperation::new(), &AppConfig::default());
            assert!(app.in_splash());
            app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
            assert!(app.update_splash(24));
            assert_eq!(app.state.current_view, View::ContactForm);
        }
    }

    mod submission {
        use super::*;

        #[tokio::test]
        async fn test_valid_form_submits_and_resets() {
            let mut op = MockSubmitOperation::new();
            op.expect_submit()
                .withf(|p| p.get("service") == Some("diagnostic"))
                .times(1)
                .returning(|_| Ok(()));
            let mut app = app_with(op, &config());

            fill_valid(&mut app).await;
            app.handle_key(ctrl('s')).await.unwrap();

            assert_eq!(app.state.engine.state(), FormSubmissionState::Submitting);
            assert_eq!(app.state.form_view.submit, SubmitControl::sending());
            assert!(app.submit_started.is_some());

            settle(&mut app).await;

            assert_eq!(app.state.engine.state(), FormSubmissionState::Idle);
            assert_eq!(app.state.form_view.submit, SubmitControl::ready());
            assert!(app.submit_started.is_none());
            assert!(app
                .state
                .engine
                .form()
                .fields()
                .iter()
                .all(|f| f.value.is_empty()));
            let toast = app.state.notifications.toast().unwrap();
            assert_eq!(toast.message, SUCCESS_MESSAGE);
            assert_eq!(toast.kind, NotificationKind::Success);
        }

        #[tokio::test]
        async fn test_rejection_keeps_values() {
            let mut op = MockSubmitOperation::new();
            op.expect_submit()
                .times(1)
                .returning(|_| Err(SubmissionError::Rejected("network error".to_string())));
            let mut app = app_with(op, &config());

            fill_valid(&mut app).await;
            app.handle_key(ctrl('s')).await.unwrap();
            settle(&mut app).await;

            assert_eq!(app.state.engine.state(), FormSubmissionState::Idle);
            assert!(app.state.form_view.submit.enabled);
            assert_eq!(
                app.state.engine.form().field_by_name("name").unwrap().value,
                "Ana Lee"
            );
            let toast = app.state.notifications.toast().unwrap();
            assert_eq!(toast.message, "network error");
            assert_eq!(toast.kind, NotificationKind::Error);
        }

        #[tokio::test]
        async fn test_double_submit_calls_operation_once() {
            let mut op = MockSubmitOperation::new();
            op.expect_submit().times(1).returning(|_| Ok(()));
            let mut app = app_with(op, &config());

            fill_valid(&mut app).await;
            app.handle_key(ctrl('s')).await.unwrap();
            app.handle_key(ctrl('s')).await.unwrap();
            settle(&mut app).await;

            assert_eq!(app.state.engine.state(), FormSubmissionState::Idle);
        }

        #[tokio::test]
        async fn test_invalid_form_never_reaches_operation() {
            let mut op = MockSubmitOperation::new();
            op.expect_submit().never();
            let mut app = app_with(op, &config());

            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            type_text(&mut app, "not-an-email").await;
            app.handle_key(ctrl('s')).await.unwrap();

            assert_eq!(app.state.engine.state(), FormSubmissionState::Idle);
            assert_eq!(
                app.state.form_view.errors.error_for("email").unwrap().message,
                "Please enter a valid email address."
            );
            assert!(app.state.form_view.errors.has_error("name"));
            assert!(app.state.form_view.errors.has_error("message"));
            assert!(!app.state.form_view.errors.has_error("phone"));
        }

        #[tokio::test]
        async fn test_enter_on_button_row_submits() {
            let mut op = MockSubmitOperation::new();
            op.expect_submit().times(1).returning(|_| Ok(()));
            let mut app = app_with(op, &config());

            fill_valid(&mut app).await;
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            assert!(app.state.engine.form().is_buttons_row_active());
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            settle(&mut app).await;
        }

        #[tokio::test(start_paused = true)]
        async fn test_hanging_submission_times_out() {
            struct Hanging;

            #[async_trait::async_trait]
            impl SubmitOperation for Hanging {
                async fn submit(
                    &self,
                    _payload: crate::state::forms::SubmissionPayload,
                ) -> Result<(), SubmissionError> {
                    std::future::pending().await
                }
            }

            let config = AppConfig {
                submit_timeout_ms: Some(2000),
                ..config()
            };
            let mut app = App::new(&config, Arc::new(Hanging), 120);
            fill_valid(&mut app).await;
            app.handle_key(ctrl('s')).await.unwrap();

            tokio::time::sleep(Duration::from_millis(2500)).await;
            settle(&mut app).await;

            assert_eq!(app.state.engine.state(), FormSubmissionState::Idle);
            assert!(app.state.form_view.submit.enabled);
            let toast = app.state.notifications.toast().unwrap();
            assert_eq!(toast.kind, NotificationKind::Error);
            assert!(toast.message.contains("timed out"));
        }

        #[tokio::test]
        async fn test_panicking_operation_still_restores_form() {
            struct Exploding;

            #[async_trait::async_trait]
            impl SubmitOperation for Exploding {
                async fn submit(
                    &self,
                    _payload: crate::state::forms::SubmissionPayload,
                ) -> Result<(), SubmissionError> {
                    panic!("endpoint client crashed")
                }
            }

            let mut app = App::new(&config(), Arc::new(Exploding), 120);
            fill_valid(&mut app).await;
            app.handle_key(ctrl('s')).await.unwrap();
            assert_eq!(app.state.engine.state(), FormSubmissionState::Submitting);

            settle(&mut app).await;

            assert_eq!(app.state.engine.state(), FormSubmissionState::Idle);
            assert_eq!(app.state.form_view.submit, SubmitControl::ready());
            assert!(!app.is_submitting());
            let toast = app.state.notifications.toast().unwrap();
            assert_eq!(toast.kind, NotificationKind::Error);
            assert_eq!(toast.message, SUBMISSION_ABORTED);
            assert_eq!(
                app.state.engine.form().field_by_name("name").unwrap().value,
                "Ana Lee"
            );
        }

        #[tokio::test]
        async fn test_alert_fallback_blocks_until_dismissed() {
            let mut op = MockSubmitOperation::new();
            op.expect_submit()
                .times(1)
                .returning(|_| Err(SubmissionError::Rejected("network error".to_string())));
            let config = AppConfig {
                toasts_enabled: false,
                ..config()
            };
            let mut app = app_with(op, &config);

            fill_valid(&mut app).await;
            app.handle_key(ctrl('s')).await.unwrap();
            settle(&mut app).await;

            assert!(app.state.notifications.is_blocking());
            app.handle_key(key(KeyCode::Char('z'))).await.unwrap();
            assert!(!app
                .state
                .engine
                .form()
                .field_by_name("message")
                .unwrap()
                .value
                .ends_with('z'));

            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert!(!app.state.notifications.is_blocking());
            assert!(!app.should_quit());
        }
    }

    mod editing {
        use super::*;

        #[tokio::test]
        async fn test_typing_clears_error_immediately() {
            let mut app = app_with(MockSubmitOperation::new(), &config());
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            assert!(app.state.form_view.errors.has_error("name"));

            app.handle_key(key(KeyCode::BackTab)).await.unwrap();
            app.handle_key(key(KeyCode::Char('A'))).await.unwrap();
            assert!(!app.state.form_view.errors.has_error("name"));
        }

        #[tokio::test]
        async fn test_enter_in_message_adds_newline() {
            let mut app = app_with(MockSubmitOperation::new(), &config());
            for _ in 0..4 {
                app.handle_key(key(KeyCode::Tab)).await.unwrap();
            }
            type_text(&mut app, "a").await;
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            type_text(&mut app, "b").await;
            assert_eq!(
                app.state.engine.form().field_by_name("message").unwrap().value,
                "a\nb"
            );
        }

        #[tokio::test]
        async fn test_ctrl_chars_are_not_typed() {
            let mut app = app_with(MockSubmitOperation::new(), &config());
            app.handle_key(ctrl('x')).await.unwrap();
            assert!(app.state.engine.form().fields()[0].value.is_empty());
        }

        #[tokio::test]
        async fn test_ctrl_r_resets_form() {
            let mut app = app_with(MockSubmitOperation::new(), &config());
            type_text(&mut app, "Ana").await;
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            app.handle_key(ctrl('r')).await.unwrap();
            assert!(app.state.engine.form().fields()[0].value.is_empty());
            assert!(app.state.form_view.errors.is_empty());
        }

        #[tokio::test]
        async fn test_paste_appends_and_flattens_newlines() {
            let mut app = app_with(MockSubmitOperation::new(), &config());
            type_text(&mut app, "Ana").await;
            app.handle_paste(" Lee\nJr".to_string()).await.unwrap();
            assert_eq!(
                app.state.engine.form().field_by_name("name").unwrap().value,
                "Ana Lee Jr"
            );
        }

        #[tokio::test]
        async fn test_paste_clears_field_error() {
            let mut app = app_with(MockSubmitOperation::new(), &config());
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            app.handle_key(key(KeyCode::BackTab)).await.unwrap();
            assert!(app.state.form_view.errors.has_error("name"));

            app.handle_paste("Ana".to_string()).await.unwrap();
            assert!(!app.state.form_view.errors.has_error("name"));
        }

        #[tokio::test]
        async fn test_esc_dismisses_toast_before_quitting() {
            let mut app = app_with(MockSubmitOperation::new(), &config());
            app.state.apply(vec![crate::state::forms::PresentationCommand::Notify {
                message: "hello".to_string(),
                kind: NotificationKind::Info,
            }]);

            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert!(!app.should_quit());
            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert!(app.should_quit());
        }
    }

    mod mouse {
        use super::*;

        fn click(column: u16, row: u16) -> MouseEvent {
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            }
        }

        #[tokio::test]
        async fn test_click_focuses_field() {
            let mut app = app_with(MockSubmitOperation::new(), &config());
            app.terminal_size = Some((40, 100));
            let rows = ui::forms::contact_form_rows(
                ui::main_area(Rect::new(0, 0, 100, 40)),
                app.state.engine.form().fields(),
            );

            app.handle_mouse(click(rows[2].x + 1, rows[2].y + 1))
                .await
                .unwrap();

            assert_eq!(app.state.engine.form().active_field_index, 2);
            // the name field lost focus and was validated
            assert!(app.state.form_view.errors.has_error("name"));
        }

        #[tokio::test]
        async fn test_click_ignored_without_pointer_input() {
            let config = AppConfig {
                pointer_input: false,
                ..config()
            };
            let mut app = app_with(MockSubmitOperation::new(), &config);
            app.terminal_size = Some((40, 100));
            let rows = ui::forms::contact_form_rows(
                ui::main_area(Rect::new(0, 0, 100, 40)),
                app.state.engine.form().fields(),
            );

            app.handle_mouse(click(rows[2].x + 1, rows[2].y + 1))
                .await
                .unwrap();

            assert_eq!(app.state.engine.form().active_field_index, 0);
        }

        #[tokio::test]
        async fn test_click_outside_form_does_nothing() {
            let mut app = app_with(MockSubmitOperation::new(), &config());
            app.terminal_size = Some((40, 100));
            app.handle_mouse(click(0, 0)).await.unwrap();
            assert_eq!(app.state.engine.form().active_field_index, 0);
            assert!(app.state.form_view.errors.is_empty());
        }
    }
}
