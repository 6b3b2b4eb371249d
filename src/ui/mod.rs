//! UI module for rendering the TUI

mod components;
pub mod forms;
mod layout;
mod splash;

use crate::app::App;
use crate::state::View;
use components::{render_alert_dialog, render_toast};
use ratatui::{layout::Rect, Frame};

/// Content area: everything above the status bar
pub fn main_area(area: Rect) -> Rect {
    layout::create_layout(area)
}

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if let (View::Splash, Some(splash_state)) = (app.state.current_view, &app.splash_state) {
        splash::draw(frame, area, splash_state);
        return;
    }

    let main = main_area(area);
    forms::draw_contact_form(frame, main, app);

    layout::draw_status_bar(frame, app);

    // Overlays last so they sit on top of the form
    if let Some(toast) = app.state.notifications.toast() {
        render_toast(frame, main, toast);
    }
    if let Some(alert) = app.state.notifications.alert() {
        render_alert_dialog(frame, alert);
    }
}
