use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Focus};
use crate::tui::layout::SidebarItem;
use crate::util::unicode;

/// Board list, create button, theme toggle and hide button
pub fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.surface;
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(theme.lines).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(block, area);

    if let Some(rect) = app.sidebar.title {
        let title = format!("  ALL BOARDS ({})", app.state.boards.len());
        let style = Style::default()
            .fg(theme.text_dim)
            .bg(bg)
            .add_modifier(Modifier::BOLD);
        frame.render_widget(Paragraph::new(Span::styled(title, style)), rect);
    }

    let items = SidebarItem::all(app.state.boards.len());
    let keyboard = (app.focus == Focus::Sidebar)
        .then(|| items.get(app.sidebar_cursor).copied())
        .flatten();

    for (item, rect) in &app.sidebar.rows {
        let focused = keyboard == Some(*item);
        let line = match item {
            SidebarItem::Board(i) => {
                let Some(board) = app.state.boards.get(*i) else {
                    continue;
                };
                let active = app.state.active == Some(board.id);
                let (fg, row_bg) = if active {
                    (theme.text, theme.accent)
                } else {
                    (theme.text_dim, bg)
                };
                let mut style = Style::default().fg(fg).bg(row_bg);
                if active {
                    style = style.add_modifier(Modifier::BOLD);
                }
                if focused {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                let name = unicode::pad_to_width(
                    &format!("  \u{25A6} {}", board.name),
                    rect.width as usize,
                );
                Line::from(Span::styled(name, style))
            }
            SidebarItem::CreateBoard => {
                let style = Style::default().fg(theme.accent).bg(bg);
                let style = if focused {
                    style.add_modifier(Modifier::REVERSED)
                } else {
                    style
                };
                Line::from(Span::styled(
                    unicode::pad_to_width("  \u{25A6} + Create New Board", rect.width as usize),
                    style,
                ))
            }
            SidebarItem::ThemeToggle => theme_toggle_line(app, rect.width as usize, focused),
            SidebarItem::HideSidebar => {
                let style = Style::default().fg(theme.text_dim).bg(bg);
                let style = if focused {
                    style.add_modifier(Modifier::REVERSED)
                } else {
                    style
                };
                Line::from(Span::styled(
                    unicode::pad_to_width("  \u{2298} Hide Sidebar", rect.width as usize),
                    style,
                ))
            }
        };
        frame.render_widget(Paragraph::new(line), *rect);
    }
}

/// "☀ ━● ☾" with the knob on the active side
fn theme_toggle_line(app: &App, width: usize, focused: bool) -> Line<'static> {
    let theme = &app.theme;
    let dim = Style::default().fg(theme.text_dim).bg(theme.surface);
    let mut track = Style::default().fg(theme.text).bg(theme.accent);
    if focused {
        track = track.add_modifier(Modifier::REVERSED);
    }
    let knob = if app.scheme.is_dark() {
        " \u{2500}\u{25CF} "
    } else {
        " \u{25CF}\u{2500} "
    };
    let body = [" \u{2600} ", knob, " \u{263E} "];
    let used: usize = body.iter().map(|s| unicode::display_width(s)).sum();
    let pad = width.saturating_sub(used) / 2;
    Line::from(vec![
        Span::styled(" ".repeat(pad), dim),
        Span::styled(body[0], dim),
        Span::styled(body[1], track),
        Span::styled(body[2], dim),
    ])
}

/// Narrow strip shown while the sidebar is hidden; clicking it reopens
pub fn render_strip(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let style = Style::default().fg(theme.text).bg(theme.accent);
    frame.render_widget(Block::default().style(style), area);
    if area.height > 1 {
        let eye = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
        frame.render_widget(Paragraph::new(Span::styled("\u{25C9}", style)), eye);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn sidebar_lists_boards_and_controls() {
        let mut app = demo_app();
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("ALL BOARDS (3)"));
        assert!(out.contains("Platform Launch"));
        assert!(out.contains("Marketing Plan"));
        assert!(out.contains("Roadmap"));
        assert!(out.contains("+ Create New Board"));
        assert!(out.contains("Hide Sidebar"));
    }

    #[test]
    fn hidden_sidebar_leaves_strip() {
        let mut app = demo_app();
        app.toggle_sidebar();
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(!out.contains("ALL BOARDS"));
        assert!(out.contains("\u{25C9}"));
    }
}
