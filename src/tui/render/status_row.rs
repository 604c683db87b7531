use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus};
use crate::tui::modal::Modal;
use crate::util::unicode;

use super::helpers::spans_width;

/// Key hints for whatever currently has the keyboard
fn hint_for(app: &App) -> &'static str {
    if app.drag.is_dragging() {
        return "release to drop  Esc cancel";
    }
    match &app.modal {
        Some(Modal::BoardForm(_)) | Some(Modal::TaskForm(_)) => {
            "Tab next  Ctrl-S save  Esc cancel"
        }
        Some(Modal::TaskDetail(_)) => "Space toggle  \u{2190}\u{2192} status  m menu  Esc close",
        Some(Modal::ConfirmDelete(_)) => "y delete  n cancel",
        Some(Modal::BoardMenu(_)) => "Enter select  Esc close",
        None if app.focus == Focus::Sidebar => "jk move  Enter open  Tab board  ? help",
        None => "hjkl move  HJKL move task  n new  Enter open  ? help",
    }
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = Vec::new();
    if let Some(source) = app.drag.source()
        && app.drag.is_dragging()
    {
        let title = app
            .active_board()
            .and_then(|b| b.find_task(source.task_id))
            .map_or(String::new(), |t| t.title.clone());
        let target = app
            .drag
            .hover()
            .map_or("nowhere".to_string(), |h| h.column.clone());
        spans.push(Span::styled(
            format!(" Moving '{}' \u{2192} {}", title, target),
            Style::default().fg(app.theme.accent).bg(bg),
        ));
    } else if let Some(message) = &app.status_message {
        spans.push(Span::styled(
            format!(" {}", message),
            Style::default().fg(app.theme.text).bg(bg),
        ));
    }

    if app.show_key_hints {
        let hint = hint_for(app);
        let content_width = spans_width(&spans);
        let hint_width = unicode::display_width(hint) + 1;
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(
                hint,
                Style::default().fg(app.theme.text_dim).bg(bg),
            ));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use crate::tui::render::test_helpers::*;

    #[test]
    fn status_message_on_the_left_hints_on_the_right() {
        let mut app = demo_app();
        app.set_status("Created board 'X'");
        let out = render_app(&mut app, TERM_W, TERM_H);
        let last = out.lines().last().unwrap();
        assert!(last.starts_with(" Created board 'X'"));
        assert!(last.ends_with("? help"));
    }

    #[test]
    fn hints_can_be_turned_off() {
        let mut app = demo_app();
        app.show_key_hints = false;
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(!out.lines().last().unwrap_or("").contains("? help"));
    }
}
