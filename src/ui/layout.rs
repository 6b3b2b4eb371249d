//! Layout components (status bar)

use crate::app::App;
use crate::platform::{RESET_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::forms::FormSubmissionState;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Reserve the bottom line for the status bar
pub fn create_layout(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    chunks[0]
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Submission status
    let state = app.state.engine.state();
    let indicator = match state {
        FormSubmissionState::Submitting | FormSubmissionState::Validating => {
            Span::styled(" ● ", Style::default().fg(Color::Yellow))
        }
        FormSubmissionState::Failed => Span::styled(" ● ", Style::default().fg(Color::Red)),
        _ => Span::styled(" ● ", Style::default().fg(Color::Green)),
    };
    spans.push(indicator);

    let hints = get_view_hints(&app.state.current_view, app.state.notifications.is_blocking());
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    let errors = &app.state.form_view.errors;
    if !errors.is_empty() {
        let invalid = errors.len();
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("{invalid} field(s) need attention"),
            Style::default().fg(Color::Red),
        ));
    }

    if app.state.capabilities.low_performance {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            "reduced motion",
            Style::default().fg(Color::Blue),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: &View, alert_open: bool) -> String {
    match view {
        View::Splash => "Press any key to skip".to_string(),
        View::ContactForm if alert_open => "Enter/Esc:dismiss".to_string(),
        View::ContactForm => format!("Tab:next  {SUBMIT_SHORTCUT}:send  {RESET_SHORTCUT}:reset"),
    }
}
