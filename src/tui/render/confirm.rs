use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::modal::ConfirmDelete;
use crate::tui::modal_layout::{ConfirmLayout, MenuLayout};
use crate::tui::theme::Theme;
use crate::util::unicode;

use super::helpers::{ButtonKind, modal_frame, render_button};

/// Delete confirmation: red title, wrapped warning, Delete / Cancel
pub fn render_confirm(frame: &mut Frame, theme: &Theme, confirm: &ConfirmDelete, layout: &ConfirmLayout) {
    modal_frame(frame, theme, layout.area, "");
    let title_style = Style::default()
        .fg(theme.destructive)
        .bg(theme.surface)
        .add_modifier(Modifier::BOLD);
    frame.render_widget(
        Paragraph::new(Span::styled(confirm.title(), title_style)),
        layout.title,
    );

    let style = Style::default().fg(theme.text_dim).bg(theme.surface);
    let lines: Vec<Line> = layout
        .message_lines
        .iter()
        .map(|l| Line::from(Span::styled(l.clone(), style)))
        .collect();
    frame.render_widget(Paragraph::new(lines), layout.message);

    render_button(
        frame,
        theme,
        layout.delete,
        "Delete",
        ButtonKind::Destructive,
        confirm.confirm_focused,
    );
    render_button(
        frame,
        theme,
        layout.cancel,
        "Cancel",
        ButtonKind::Secondary,
        !confirm.confirm_focused,
    );
}

/// Dropdown menu; the last item is the destructive one
pub fn render_menu(frame: &mut Frame, theme: &Theme, items: &[&str], cursor: usize, layout: &MenuLayout) {
    frame.render_widget(Clear, layout.area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.lines).bg(theme.surface))
        .style(Style::default().bg(theme.surface));
    frame.render_widget(block, layout.area);

    for (i, (label, rect)) in items.iter().zip(&layout.items).enumerate() {
        let fg = if i + 1 == items.len() {
            theme.destructive
        } else {
            theme.text_dim
        };
        let mut style = Style::default().fg(fg).bg(theme.surface);
        if i == cursor {
            style = style.bg(theme.selection).add_modifier(Modifier::BOLD);
        }
        let text = unicode::pad_to_width(&format!(" {}", label), rect.width as usize);
        frame.render_widget(Paragraph::new(Span::styled(text, style)), *rect);
    }
}

#[cfg(test)]
mod tests {
    use crate::tui::modal::Modal;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn confirm_names_board() {
        let mut app = demo_app();
        app.open_delete_board();
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("Delete this board?"));
        assert!(out.contains("'Platform"));
        assert!(out.contains("Delete"));
        assert!(out.contains("Cancel"));
    }

    #[test]
    fn board_menu_hangs_under_header_button() {
        let mut app = demo_app();
        app.open_board_menu();
        assert!(matches!(app.modal, Some(Modal::BoardMenu(_))));
        let out = render_app(&mut app, TERM_W, TERM_H);
        let rows: Vec<&str> = out.lines().collect();
        let edit_row = rows.iter().position(|r| r.contains("Edit Board")).unwrap();
        assert!(edit_row > 1);
        assert!(rows[edit_row + 1].contains("Delete Board"));
    }
}
