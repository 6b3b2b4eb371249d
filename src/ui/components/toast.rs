//! Transient notification box in the top-right corner

use super::kind_color;
use crate::state::Notification;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const TOAST_MAX_WIDTH: u16 = 44;

/// Where the toast goes for a message in `area`
pub fn toast_area(area: Rect, message: &str) -> Rect {
    let width = TOAST_MAX_WIDTH.min(area.width);
    let inner = width.saturating_sub(4).max(1) as usize;
    let lines = message.chars().count().div_ceil(inner).max(1) as u16;
    let height = (lines + 2).min(area.height);
    Rect {
        x: area.x + area.width - width,
        y: area.y,
        width,
        height,
    }
}

pub fn render_toast(frame: &mut Frame, area: Rect, notification: &Notification) {
    let color = kind_color(notification.kind);
    let rect = toast_area(area, &notification.message);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .title(format!(" {} ", notification.kind.label()))
        .title_bottom(Line::from(" Esc ").right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let paragraph = Paragraph::new(Line::from(Span::styled(
        notification.message.as_str(),
        Style::default().fg(Color::White),
    )))
    .wrap(Wrap { trim: true })
    .block(block);
    frame.render_widget(paragraph, rect);
}
