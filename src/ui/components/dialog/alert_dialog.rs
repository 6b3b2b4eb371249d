//! Blocking alert, used when toasts are unavailable

use super::base::{render_dialog, DialogConfig};
use crate::state::Notification;
use crate::ui::components::kind_color;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Render an alert overlay centered on the screen
pub fn render_alert_dialog(frame: &mut Frame, notification: &Notification) {
    let hint = vec![
        Span::raw("Press "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" or "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" to dismiss"),
    ];

    let color = kind_color(notification.kind);
    let message = notification.alert_text();
    render_dialog(
        frame,
        DialogConfig {
            title: notification.kind.label(),
            title_color: color,
            border_color: color,
            message: &message,
            hint: Some(hint),
            max_width: 60,
        },
    );
}
