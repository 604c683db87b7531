use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::App;
use crate::tui::layout::ADD_TASK_LABEL;
use crate::util::unicode;

/// Board title, "+ Add New Task" and the board menu button
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.surface;
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.lines).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(block, area);

    let header = app.header;
    let Some(board) = app.active_board() else {
        let style = Style::default().fg(theme.text_dim).bg(bg);
        frame.render_widget(Paragraph::new(Span::styled("No boards", style)), header.title);
        return;
    };

    let title_style = Style::default()
        .fg(theme.text)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let title = unicode::truncate_to_width(&board.name, header.title.width as usize);
    frame.render_widget(Paragraph::new(Span::styled(title, title_style)), header.title);

    if !board.columns.is_empty() {
        let style = Style::default()
            .fg(theme.text)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD);
        frame.render_widget(
            Paragraph::new(Span::styled(ADD_TASK_LABEL, style)),
            header.add_task,
        );
    }

    let menu_style = Style::default().fg(theme.text_dim).bg(bg);
    frame.render_widget(
        Paragraph::new(Span::styled(" \u{22EE} ", menu_style)),
        header.menu,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::intent::Intent;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn header_shows_board_name_and_add_button() {
        let mut app = demo_app();
        let out = render_app(&mut app, TERM_W, TERM_H);
        let first = out.lines().nth(1).unwrap();
        assert!(first.contains("Platform Launch"));
        assert!(first.contains("+ Add New Task"));
        assert!(first.contains("\u{22EE}"));
    }

    #[test]
    fn add_button_hidden_without_columns() {
        let mut app = demo_app();
        app.dispatch(Intent::AddBoard {
            name: "Empty".into(),
            columns: Vec::new(),
        })
        .unwrap();
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(!out.contains("+ Add New Task"));
    }
}
