//! Contact form rendering

use super::field_renderer::{draw_field, draw_help_text, field_height};
use crate::app::App;
use crate::platform::{RESET_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::forms::FormField;
use crate::ui::components::{render_submit_button, spinner_frame, BUTTON_HEIGHT, BUTTON_WIDTH};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Screen rects for each form row: one per field (error line included),
/// then the submit button. Shared by drawing and mouse hit-testing.
pub fn contact_form_rows(area: Rect, fields: &[FormField]) -> Vec<Rect> {
    let mut constraints: Vec<Constraint> = fields.iter().map(field_height).collect();
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Length(1)); // Help text

    let inner = Block::default().borders(Borders::ALL).inner(area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(1)
        .split(inner);

    let mut rows: Vec<Rect> = chunks[..fields.len()].to_vec();
    let button_slot = chunks[fields.len()];
    rows.push(Rect {
        width: button_slot.width.min(BUTTON_WIDTH),
        ..button_slot
    });
    rows
}

/// Help line under the button
fn help_text() -> String {
    format!("Tab:next  Shift+Tab:prev  ←/→:choose  {SUBMIT_SHORTCUT}:send  {RESET_SHORTCUT}:reset  Esc:quit")
}

/// Draw the contact form
pub fn draw_contact_form(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.state.engine.form();
    let fields = form.fields();

    let block = Block::default()
        .title(" Contact us ")
        .title_bottom(format!(" {} ", app.state.engine.state().label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let rows = contact_form_rows(area, fields);

    for (idx, field) in fields.iter().enumerate() {
        draw_field(
            frame,
            rows[idx],
            field,
            form.active_field_index == idx,
            app.state.form_view.errors.error_for(&field.name),
        );
    }

    // Spinner only on terminals that animate
    let spinner = app
        .submit_started
        .filter(|_| app.state.capabilities.animations_enabled())
        .map(|started| spinner_frame(started.elapsed().as_millis()));
    render_submit_button(
        frame,
        rows[fields.len()],
        &app.state.form_view.submit,
        form.is_buttons_row_active(),
        spinner,
    );

    let help_area = Rect {
        x: area.x + 2,
        y: rows[fields.len()].y + BUTTON_HEIGHT,
        width: area.width.saturating_sub(4),
        height: 1,
    };
    // Skip when squeezed onto the bottom border
    if help_area.y < area.bottom().saturating_sub(1) {
        draw_help_text(frame, help_area, &help_text());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::ContactForm;

    #[test]
    fn test_one_row_per_field_plus_button() {
        let form = ContactForm::contact();
        let rows = contact_form_rows(Rect::new(0, 0, 80, 40), form.fields());
        assert_eq!(rows.len(), form.fields().len() + 1);
    }

    #[test]
    fn test_rows_are_stacked_without_overlap() {
        let form = ContactForm::contact();
        let rows = contact_form_rows(Rect::new(0, 0, 80, 40), form.fields());
        for pair in rows.windows(2) {
            assert!(pair[0].y + pair[0].height <= pair[1].y);
        }
    }

    #[test]
    fn test_message_gets_the_spare_height() {
        let form = ContactForm::contact();
        let rows = contact_form_rows(Rect::new(0, 0, 80, 40), form.fields());
        let message = form.index_of("message").unwrap();
        assert!(rows[message].height > rows[0].height);
    }

    #[test]
    fn test_button_is_narrow() {
        let form = ContactForm::contact();
        let rows = contact_form_rows(Rect::new(0, 0, 80, 40), form.fields());
        let button = rows[form.fields().len()];
        assert_eq!(button.width, BUTTON_WIDTH);
        assert_eq!(button.height, BUTTON_HEIGHT);
    }
}
