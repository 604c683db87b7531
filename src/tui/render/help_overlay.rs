use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::tui::modal_layout::centered_rect_fixed;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.surface;
    let key_style = Style::default()
        .fg(app.theme.accent)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Board", header_style)));
    add_binding(&mut lines, " hjkl/arrows", "Select card", key_style, desc_style);
    add_binding(&mut lines, " HJKL", "Move card", key_style, desc_style);
    add_binding(&mut lines, " g/G", "First/last card", key_style, desc_style);
    add_binding(&mut lines, " Enter", "Open card", key_style, desc_style);
    add_binding(&mut lines, " n", "New task", key_style, desc_style);
    add_binding(&mut lines, " x/Del", "Delete task", key_style, desc_style);
    add_binding(&mut lines, " c", "Add column", key_style, desc_style);
    add_binding(&mut lines, " e / D", "Edit / delete board", key_style, desc_style);
    add_binding(&mut lines, " m", "Board menu", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Boards", header_style)));
    add_binding(&mut lines, " [ ]", "Previous/next board", key_style, desc_style);
    add_binding(&mut lines, " B", "Create board", key_style, desc_style);
    add_binding(&mut lines, " s / Tab", "Sidebar / focus", key_style, desc_style);
    add_binding(&mut lines, " t", "Toggle theme", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Mouse", header_style)));
    add_binding(&mut lines, " click", "Open card", key_style, desc_style);
    add_binding(&mut lines, " drag", "Move card", key_style, desc_style);
    add_binding(&mut lines, " wheel", "Scroll", key_style, desc_style);
    lines.push(Line::from(""));

    add_binding(&mut lines, " ?", "Close help", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit", key_style, desc_style);

    let height = (lines.len() as u16 + 2).min(area.height);
    let width = area.width.min(44);
    let overlay_area = centered_rect_fixed(width, height, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.lines).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 16;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

#[cfg(test)]
mod tests {
    use crate::tui::render::test_helpers::*;

    #[test]
    fn help_lists_bindings() {
        let mut app = demo_app();
        app.show_help = true;
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("Key Bindings"));
        assert!(out.contains("Move card"));
        assert!(out.contains("Toggle theme"));
    }
}
