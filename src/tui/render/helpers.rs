use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::ops::validate::ValidationError;
use crate::tui::text_input::TextInput;
use crate::tui::theme::Theme;
use crate::util::unicode;

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Clear the area and draw a rounded modal frame
pub(super) fn modal_frame(frame: &mut Frame, theme: &Theme, area: Rect, title: &str) {
    frame.render_widget(Clear, area);
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.lines).bg(theme.surface))
        .style(Style::default().bg(theme.surface));
    if !title.is_empty() {
        block = block.title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(theme.text)
                .bg(theme.surface)
                .add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(block, area);
}

/// A dim one-line label
pub(super) fn render_label(frame: &mut Frame, theme: &Theme, rect: Rect, text: &str) {
    let style = Style::default().fg(theme.text_dim).bg(theme.surface);
    frame.render_widget(Paragraph::new(Line::from(Span::styled(text.to_string(), style))), rect);
}

/// Start byte of the window that keeps the cursor visible in `cells` columns
fn window_start(text: &str, cursor: usize, cells: usize) -> usize {
    let mut start = 0;
    while start < cursor && unicode::display_width(&text[start..cursor]) >= cells {
        match unicode::next_grapheme_boundary(text, start) {
            Some(next) => start = next,
            None => break,
        }
    }
    start
}

/// One line of `line` scrolled so `cursor` (a byte offset into it) is
/// visible. Returns the visible text and the cursor's cell column.
fn visible_line(line: &str, cursor: usize, cells: usize) -> (String, u16) {
    let start = window_start(line, cursor, cells);
    let shown = unicode::truncate_to_width(&line[start..], cells);
    let col = unicode::display_width(&line[start..cursor]) as u16;
    (shown, col)
}

/// A text field with an inline error on its right
pub(super) fn render_input(
    frame: &mut Frame,
    theme: &Theme,
    rect: Rect,
    input: &TextInput,
    focused: bool,
    error: Option<ValidationError>,
    placeholder: &str,
) {
    if rect.height == 0 || rect.width == 0 {
        return;
    }
    let bg = if focused { theme.selection } else { theme.background };
    let base = Style::default().fg(theme.text).bg(bg);
    frame.render_widget(Block::default().style(base), rect);

    let error_text = error.map(|e| format!(" {} ", e));
    let error_w = error_text.as_deref().map_or(0, unicode::display_width) as u16;
    let text_w = rect.width.saturating_sub(error_w + 2) as usize;
    let text_x = rect.x + 1;

    if input.text.is_empty() && !focused {
        let style = Style::default().fg(theme.text_dim).bg(bg);
        let hint = unicode::truncate_to_width(placeholder, text_w);
        frame.render_widget(
            Paragraph::new(Span::styled(hint, style)),
            Rect::new(text_x, rect.y, text_w as u16, 1),
        );
    } else if input.multiline {
        render_multiline(frame, rect, input, focused, base, text_w);
    } else {
        let (shown, col) = visible_line(&input.text, input.cursor, text_w);
        frame.render_widget(
            Paragraph::new(Span::styled(shown, base)),
            Rect::new(text_x, rect.y, text_w as u16, 1),
        );
        if focused {
            frame.set_cursor_position(Position::new(text_x + col, rect.y));
        }
    }

    if let Some(text) = error_text {
        let style = Style::default().fg(theme.destructive).bg(bg);
        let x = rect.x + rect.width.saturating_sub(error_w + 1);
        frame.render_widget(
            Paragraph::new(Span::styled(text, style)),
            Rect::new(x, rect.y, error_w.min(rect.width), 1),
        );
    }
}

fn render_multiline(
    frame: &mut Frame,
    rect: Rect,
    input: &TextInput,
    focused: bool,
    style: Style,
    text_w: usize,
) {
    let rows = rect.height as usize;
    let cursor_line = input.cursor_line();
    let first = cursor_line.saturating_sub(rows.saturating_sub(1));
    let line_start = input.text[..input.cursor].rfind('\n').map_or(0, |i| i + 1);

    for (row, (i, line)) in input.text.split('\n').enumerate().skip(first).take(rows).enumerate() {
        let y = rect.y + row as u16;
        let area = Rect::new(rect.x + 1, y, text_w as u16, 1);
        if i == cursor_line {
            let (shown, col) = visible_line(line, input.cursor - line_start, text_w);
            frame.render_widget(Paragraph::new(Span::styled(shown, style)), area);
            if focused {
                frame.set_cursor_position(Position::new(area.x + col, y));
            }
        } else {
            let shown = unicode::truncate_to_width(line, text_w);
            frame.render_widget(Paragraph::new(Span::styled(shown, style)), area);
        }
    }
}

/// Which palette role a button is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ButtonKind {
    Primary,
    Secondary,
    Destructive,
}

/// A full-width button with a centered label
pub(super) fn render_button(
    frame: &mut Frame,
    theme: &Theme,
    rect: Rect,
    label: &str,
    kind: ButtonKind,
    focused: bool,
) {
    if rect.height == 0 {
        return;
    }
    let (fg, bg) = match kind {
        ButtonKind::Primary => (theme.text, theme.accent),
        ButtonKind::Secondary => (theme.accent, theme.background),
        ButtonKind::Destructive => (theme.text, theme.destructive),
    };
    let mut style = Style::default().fg(fg).bg(bg);
    if focused {
        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
    }
    let text = if focused {
        format!("\u{25B8} {} \u{25C2}", label)
    } else {
        label.to_string()
    };
    let text = unicode::truncate_to_width(&text, rect.width as usize);
    let pad = (rect.width as usize).saturating_sub(unicode::display_width(&text)) / 2;
    let line = Line::from(vec![
        Span::styled(" ".repeat(pad), style),
        Span::styled(text, style),
    ]);
    frame.render_widget(Paragraph::new(line).style(style), rect);
}

/// A small square button such as the remove cross
pub(super) fn render_icon(
    frame: &mut Frame,
    theme: &Theme,
    rect: Rect,
    icon: &str,
    color: ratatui::style::Color,
    focused: bool,
) {
    if rect.height == 0 {
        return;
    }
    let bg = if focused { theme.selection } else { theme.surface };
    let style = Style::default().fg(color).bg(bg);
    let text = format!("{:^width$}", icon, width = rect.width as usize);
    frame.render_widget(Paragraph::new(Span::styled(text, style)), rect);
}
