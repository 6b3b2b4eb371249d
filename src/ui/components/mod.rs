//! Reusable UI components

mod button;
mod dialog;
mod toast;

pub use button::{render_submit_button, spinner_frame, BUTTON_HEIGHT, BUTTON_WIDTH};
pub use dialog::render_alert_dialog;
pub use toast::render_toast;

use crate::state::NotificationKind;
use ratatui::style::Color;

/// Accent colour for a notification
pub fn kind_color(kind: NotificationKind) -> Color {
    match kind {
        NotificationKind::Info => Color::Blue,
        NotificationKind::Success => Color::Green,
        NotificationKind::Error => Color::Red,
    }
}
