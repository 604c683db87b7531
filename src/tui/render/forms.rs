use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::validate::{Field, ValidationError};
use crate::tui::modal::{BoardField, BoardForm, TaskField, TaskForm};
use crate::tui::modal_layout::{BoardFormLayout, TaskFormLayout};
use crate::tui::theme::Theme;
use crate::util::unicode;

use super::helpers::{
    ButtonKind, modal_frame, render_button, render_icon, render_input, render_label,
};

const REMOVE_ICON: &str = "\u{2715}";

/// Label on the left, an error for the whole group on the right
fn render_group_label(
    frame: &mut Frame,
    theme: &Theme,
    rect: Rect,
    label: &str,
    error: Option<ValidationError>,
) {
    render_label(frame, theme, rect, label);
    if let Some(error) = error {
        let text = error.to_string();
        let w = (unicode::display_width(&text) as u16).min(rect.width);
        let style = Style::default().fg(theme.destructive).bg(theme.surface);
        frame.render_widget(
            Paragraph::new(Span::styled(text, style)),
            Rect::new(rect.x + rect.width - w, rect.y, w, rect.height),
        );
    }
}

pub fn render_board_form(frame: &mut Frame, theme: &Theme, form: &BoardForm, layout: &BoardFormLayout) {
    modal_frame(frame, theme, layout.area, form.title());

    render_label(frame, theme, layout.name_label, "Board Name");
    render_input(
        frame,
        theme,
        layout.name,
        &form.name,
        form.focus == BoardField::Name,
        form.errors.get(Field::BoardName),
        "e.g. Web Design",
    );

    render_group_label(
        frame,
        theme,
        layout.columns_label,
        "Board Columns",
        form.errors.get(Field::Columns),
    );
    for (i, (row, rects)) in form.columns.iter().zip(&layout.columns).enumerate() {
        render_input(
            frame,
            theme,
            rects.name,
            &row.name,
            form.focus == BoardField::ColumnName(i),
            form.errors.get(Field::Column(i)),
            "e.g. Todo",
        );
        render_icon(
            frame,
            theme,
            rects.color,
            "\u{25CF}",
            theme.column_color(row.color),
            form.focus == BoardField::ColumnColor(i),
        );
        render_icon(
            frame,
            theme,
            rects.remove,
            REMOVE_ICON,
            theme.text_dim,
            form.focus == BoardField::RemoveColumn(i),
        );
    }

    render_button(
        frame,
        theme,
        layout.add_column,
        form.add_column_label(),
        ButtonKind::Secondary,
        form.focus == BoardField::AddColumn,
    );
    render_button(
        frame,
        theme,
        layout.submit,
        form.submit_label(),
        ButtonKind::Primary,
        form.focus == BoardField::Submit,
    );
}

pub fn render_task_form(frame: &mut Frame, theme: &Theme, form: &TaskForm, layout: &TaskFormLayout) {
    modal_frame(frame, theme, layout.area, form.title_text());

    render_label(frame, theme, layout.title_label, "Title");
    render_input(
        frame,
        theme,
        layout.title,
        &form.title,
        form.focus == TaskField::Title,
        form.errors.get(Field::Title),
        "e.g. Take coffee break",
    );

    render_label(frame, theme, layout.description_label, "Description");
    render_input(
        frame,
        theme,
        layout.description,
        &form.description,
        form.focus == TaskField::Description,
        None,
        "e.g. It's always good to take a break.",
    );

    render_label(frame, theme, layout.subtasks_label, "Subtasks");
    for (i, (row, rects)) in form.subtasks.iter().zip(&layout.subtasks).enumerate() {
        render_input(
            frame,
            theme,
            rects.title,
            &row.title,
            form.focus == TaskField::Subtask(i),
            form.errors.get(Field::Subtask(i)),
            "e.g. Make coffee",
        );
        render_icon(
            frame,
            theme,
            rects.remove,
            REMOVE_ICON,
            theme.text_dim,
            form.focus == TaskField::RemoveSubtask(i),
        );
    }
    render_button(
        frame,
        theme,
        layout.add_subtask,
        "+ Add New Subtask",
        ButtonKind::Secondary,
        form.focus == TaskField::AddSubtask,
    );

    if let Some((label, selector)) = layout.status {
        render_group_label(frame, theme, label, "Status", form.errors.get(Field::Status));
        render_status_selector(
            frame,
            theme,
            selector,
            form.selected_status(),
            form.focus == TaskField::Status,
        );
    }

    render_button(
        frame,
        theme,
        layout.submit,
        form.submit_label(),
        ButtonKind::Primary,
        form.focus == TaskField::Submit,
    );
}

/// "‹ Doing ›" cycling through the board's columns
pub(super) fn render_status_selector(
    frame: &mut Frame,
    theme: &Theme,
    rect: Rect,
    status: Option<&str>,
    focused: bool,
) {
    if rect.height == 0 {
        return;
    }
    let bg = if focused { theme.selection } else { theme.background };
    let border = if focused { theme.accent } else { theme.lines };
    let arrow = Style::default().fg(border).bg(bg).add_modifier(Modifier::BOLD);
    let text = Style::default().fg(theme.text).bg(bg);
    let name = status.unwrap_or("No columns");
    let inner = (rect.width as usize).saturating_sub(4);
    let name = unicode::pad_to_width(name, inner);
    let line = Line::from(vec![
        Span::styled("\u{2039} ", arrow),
        Span::styled(name, text),
        Span::styled(" \u{203A}", arrow),
    ]);
    frame.render_widget(Paragraph::new(line).style(text), rect);
}

#[cfg(test)]
mod tests {
    use crate::tui::input::handle_key;
    use crate::tui::modal::Modal;
    use crate::tui::render::test_helpers::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn add_board_form_lists_default_columns() {
        let mut app = demo_app();
        app.open_add_board();
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("Add New Board"));
        assert!(out.contains("Board Name"));
        assert!(out.contains("Board Columns"));
        assert!(out.contains("Todo"));
        assert!(out.contains("Doing"));
        assert!(out.contains("Create New Board"));
    }

    #[test]
    fn empty_submit_shows_inline_error() {
        let mut app = demo_app();
        app.open_add_board();
        app.sync_layout(ratatui::layout::Rect::new(0, 0, TERM_W, TERM_H));
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
        );
        assert!(matches!(app.modal, Some(Modal::BoardForm(_))));
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("can't be empty"));
    }

    #[test]
    fn add_task_form_has_status_selector() {
        let mut app = demo_app();
        app.open_add_task(Some(1));
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("Add New Task"));
        assert!(out.contains("+ Add New Subtask"));
        assert!(out.contains("\u{2039} Doing"));
        assert!(out.contains("Create Task"));
    }

    #[test]
    fn edit_task_form_prefills_and_hides_status() {
        let mut app = demo_app();
        let id = app.selected_task().unwrap().id;
        app.open_edit_task(id);
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("Edit Task"));
        assert!(out.contains("Save Changes"));
        assert!(!out.contains("\u{2039} "));
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(app.modal.is_none());
    }
}
