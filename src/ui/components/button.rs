//! Button component for TUI

use crate::state::forms::SubmitControl;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Widest the submit button gets
pub const BUTTON_WIDTH: u16 = 26;

/// Braille spinner shown next to the sending label
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner glyph for the given elapsed milliseconds
pub fn spinner_frame(elapsed_ms: u128) -> &'static str {
    SPINNER_FRAMES[(elapsed_ms / 80) as usize % SPINNER_FRAMES.len()]
}

/// Render a generic button with border
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
) {
    let border_style = if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let text_style = if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(format!(" {content} ")).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

/// Render the form's submit control. While sending, an optional spinner
/// precedes the label.
pub fn render_submit_button(
    frame: &mut Frame,
    area: Rect,
    control: &SubmitControl,
    is_selected: bool,
    spinner: Option<&str>,
) {
    let content = match spinner {
        Some(glyph) if !control.enabled => format!("{glyph} {}", control.label),
        _ => control.label.clone(),
    };
    render_button(frame, area, &content, is_selected, control.enabled);
}
