//! Application state definitions

use super::capabilities::Capabilities;
use super::forms::{ContactForm, FormEngine, FormView, PresentationCommand};
use super::notifications::NotificationCenter;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Splash screen with logo animation
    Splash,
    #[default]
    ContactForm,
}

/// Everything the renderer reads
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    pub capabilities: Capabilities,
    /// Contact form model and submission state machine
    pub engine: FormEngine,
    /// Inline errors and submit control as last applied
    pub form_view: FormView,
    pub notifications: NotificationCenter,
}

impl AppState {
    pub fn new(capabilities: Capabilities, notifications: NotificationCenter) -> Self {
        Self {
            current_view: View::ContactForm,
            capabilities,
            engine: FormEngine::new(ContactForm::contact()),
            form_view: FormView::new(),
            notifications,
        }
    }

    /// Route engine output through the view adapter
    pub fn apply(&mut self, commands: Vec<PresentationCommand>) {
        if commands.is_empty() {
            return;
        }
        if let Err(err) = self.form_view.apply(commands, &mut self.notifications) {
            tracing::error!("presentation update incomplete: {err}");
        }
    }
}
