//! Base dialog component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Configuration for rendering a dialog
pub struct DialogConfig<'a> {
    pub title: &'a str,
    pub title_color: Color,
    pub border_color: Color,
    /// Message content (can be multi-line with \n)
    pub message: &'a str,
    /// Hint line shown at the bottom
    pub hint: Option<Vec<Span<'a>>>,
    pub max_width: u16,
}

/// Horizontal padding inside the dialog (both sides together)
const PADDING: u16 = 4;

/// Center a `width` x `height` box inside `area`, shrinking it to fit
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Outer width and height of a dialog. Saturates instead of overflowing
/// when a message holds a word longer than any terminal.
fn dialog_size(title: &str, lines: &[String], has_hint: bool, max_width: u16) -> (u16, u16) {
    let content_chars = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(title.chars().count());
    let content_width = u16::try_from(content_chars).unwrap_or(u16::MAX);
    // +2 for borders
    let width = content_width.saturating_add(PADDING + 2).min(max_width);

    // title + blank + message + (blank + hint) + borders
    let hint_lines = if has_hint { 2 } else { 0 };
    let message_lines = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let height = message_lines.saturating_add(4 + hint_lines).max(5);

    (width, height)
}

/// Render a centered dialog overlay
pub fn render_dialog(frame: &mut Frame, config: DialogConfig) {
    let area = frame.area();
    let max_line_width = config.max_width.saturating_sub(PADDING).max(1) as usize;

    let wrapped_lines = wrap_text(config.message, max_line_width);

    let (dialog_width, dialog_height) = dialog_size(
        config.title,
        &wrapped_lines,
        config.hint.is_some(),
        config.max_width,
    );

    let dialog_area = centered_rect(area, dialog_width, dialog_height);

    frame.render_widget(Clear, dialog_area);

    let mut content = vec![
        Line::from(Span::styled(
            config.title,
            Style::default()
                .fg(config.title_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(wrapped_lines.into_iter().map(Line::from));

    if let Some(hint_spans) = config.hint {
        content.push(Line::from(""));
        content.push(Line::from(hint_spans));
    }

    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(config.border_color))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(dialog, dialog_area);
}

/// Word-wrap text to `max_width` characters per line. Words longer than a
/// line are kept whole.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;
        for word in paragraph.split_whitespace() {
            let word_width = word.chars().count();
            if current_width > 0 && current_width + 1 + word_width > max_width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }
        lines.push(current);
    }

    lines
}
