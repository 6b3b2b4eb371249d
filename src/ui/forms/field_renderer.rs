//! Field rendering utilities for forms

use crate::state::forms::{FieldError, FormField};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Height of the inline error line under each field
pub const ERROR_LINE_HEIGHT: u16 = 1;

/// Rows a field occupies: bordered box plus the error line
pub fn field_height(field: &FormField) -> Constraint {
    if field.is_multiline() {
        Constraint::Min(4 + ERROR_LINE_HEIGHT)
    } else {
        Constraint::Length(3 + ERROR_LINE_HEIGHT)
    }
}

/// Border colour: errors win over focus
fn border_color(is_active: bool, has_error: bool) -> Color {
    match (has_error, is_active) {
        (true, _) => Color::Red,
        (false, true) => Color::Cyan,
        (false, false) => Color::DarkGray,
    }
}

/// Field title with a required marker
fn field_title(field: &FormField) -> Line<'_> {
    let mut spans = vec![Span::raw(" "), Span::raw(field.accessible_label())];
    if field.required {
        spans.push(Span::styled(" *", Style::default().fg(Color::Red)));
    }
    spans.push(Span::raw(" "));
    Line::from(spans)
}

/// Draw a form field and, below it, its inline error (if any).
/// `area` covers both the box and the error line.
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    error: Option<&FieldError>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(ERROR_LINE_HEIGHT)])
        .split(area);

    let value_style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };
    let cursor = Span::styled(
        if is_active { "▌" } else { "" },
        Style::default().fg(Color::Cyan),
    );

    let value = field.value.as_str();
    let is_blank = value.is_empty() && !field.kind.is_select();
    let mut lines: Vec<Line> = if is_blank && is_active {
        vec![Line::from(cursor.clone())]
    } else if is_blank {
        // Placeholder stands in for the empty value
        vec![Line::from(Span::styled(
            field.placeholder.clone(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))]
    } else if field.is_multiline() {
        value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), value_style)))
            .collect()
    } else {
        vec![Line::from(Span::styled(field.display_value(), value_style))]
    };

    if is_active && !is_blank {
        if let Some(last) = lines.last_mut() {
            last.spans.push(cursor);
        }
    }

    let block = Block::default()
        .title(field_title(field))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(is_active, error.is_some())));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        chunks[0],
    );

    if let Some(error) = error {
        let line = Line::from(Span::styled(
            format!(" {}", error.message),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(Paragraph::new(line), chunks[1]);
    }
}

/// Draw help text at the bottom of a form
pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
