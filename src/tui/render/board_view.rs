use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::model::{Board, Task};
use crate::ops::drag::{DropIndicator, drop_indicator};
use crate::tui::app::{App, Focus};
use crate::tui::layout::{
    ADD_COLUMN_LABEL, CREATE_BOARD_LABEL, LANE_GAP, LANE_W, LaneLayout, prompt_button, prompt_row,
};
use crate::tui::theme::Theme;
use crate::util::unicode;

/// Columns and cards of the active board, plus drag feedback
pub fn render_board(frame: &mut Frame, app: &App, area: Rect) {
    let Some(board) = app.active_board() else {
        render_prompt(
            frame,
            &app.theme,
            area,
            "There are no boards yet. Create one to get started.",
            CREATE_BOARD_LABEL,
        );
        return;
    };
    if board.columns.is_empty() {
        render_prompt(
            frame,
            &app.theme,
            area,
            "This board is empty. Create a new column to get started.",
            ADD_COLUMN_LABEL,
        );
        return;
    }

    let layout = &app.board_layout;
    let scroll_row = layout.scroll.row;
    let dragged = app
        .drag
        .is_dragging()
        .then(|| app.drag.source().map(|s| s.task_id))
        .flatten();
    let selected = (app.focus == Focus::Board && app.modal.is_none() && dragged.is_none())
        .then(|| board.columns.get(app.cursor.column))
        .flatten()
        .and_then(|c| c.tasks.get(app.cursor.task))
        .map(|t| t.id);

    for lane in &layout.lanes {
        let Some(column) = board.columns.get(lane.column) else {
            continue;
        };
        render_lane_header(frame, &app.theme, board, lane);
        for (i, card) in lane.cards.iter().enumerate() {
            let Some(rect) = lane.card_rect(i, scroll_row) else {
                continue;
            };
            let Some(task) = column.tasks.get(i) else {
                continue;
            };
            render_card(
                frame,
                &app.theme,
                task,
                &card.title_lines,
                rect,
                selected == Some(task.id),
                dragged == Some(task.id),
            );
        }
    }

    if let Some(rect) = layout.new_column {
        render_new_column(frame, &app.theme, rect);
    }

    if let Some(target) = app.drag.hover()
        && let Some(lane) = layout.lanes.iter().find(|l| l.name == target.column)
    {
        render_drop_line(frame, &app.theme, lane, target.index, scroll_row);
    }

    if let (Some(pointer), Some(source)) = (app.drag.pointer(), app.drag.source())
        && let Some(task) = board.find_task(source.task_id)
    {
        render_ghost(frame, &app.theme, task, pointer, area);
    }
}

/// Centered message with a button two rows below it
fn render_prompt(frame: &mut Frame, theme: &Theme, area: Rect, text: &str, label: &str) {
    let row = prompt_row(area);
    let style = Style::default()
        .fg(theme.text_dim)
        .bg(theme.background)
        .add_modifier(Modifier::BOLD);
    let text = unicode::truncate_to_width(text, row.width as usize);
    let pad = (row.width as usize).saturating_sub(unicode::display_width(&text)) / 2;
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" ".repeat(pad), style),
            Span::styled(text, style),
        ])),
        row,
    );

    let button = prompt_button(area, label);
    let style = Style::default()
        .fg(theme.text)
        .bg(theme.accent)
        .add_modifier(Modifier::BOLD);
    let label = format!("{:^width$}", label, width = button.width as usize);
    frame.render_widget(Paragraph::new(Span::styled(label, style)), button);
}

/// "● TODO (4)" with the dot in the column color
fn render_lane_header(frame: &mut Frame, theme: &Theme, board: &Board, lane: &LaneLayout) {
    let Some(column) = board.columns.get(lane.column) else {
        return;
    };
    let dot = Style::default()
        .fg(theme.column_color(column.color))
        .bg(theme.background);
    let label = Style::default()
        .fg(theme.text_dim)
        .bg(theme.background)
        .add_modifier(Modifier::BOLD);
    let name = format!(" {} ({})", column.name.to_uppercase(), column.tasks.len());
    let name = unicode::truncate_to_width(&name, lane.header.width.saturating_sub(1) as usize);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("\u{25CF}", dot),
            Span::styled(name, label),
        ])),
        lane.header,
    );
}

/// One task card: rounded box, up to two title lines, subtask summary.
/// `dimmed` marks the card being dragged.
pub fn render_card(
    frame: &mut Frame,
    theme: &Theme,
    task: &Task,
    title_lines: &[String],
    rect: Rect,
    selected: bool,
    dimmed: bool,
) {
    let border = if selected { theme.accent } else { theme.lines };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border).bg(theme.surface))
        .style(Style::default().bg(theme.surface));
    if dimmed {
        block = block.border_style(Style::default().fg(theme.text_dim).bg(theme.background));
    }
    frame.render_widget(block, rect);

    let text_fg = if dimmed { theme.text_dim } else { theme.text };
    let bg = if dimmed { theme.background } else { theme.surface };
    let mut title_style = Style::default().fg(text_fg).bg(bg).add_modifier(Modifier::BOLD);
    if selected {
        title_style = title_style.fg(theme.accent);
    }
    let mut lines: Vec<Line> = title_lines
        .iter()
        .map(|l| Line::from(Span::styled(l.clone(), title_style)))
        .collect();
    if let Some(summary) = task.subtask_summary() {
        lines.push(Line::from(Span::styled(
            summary,
            Style::default().fg(theme.text_dim).bg(bg),
        )));
    }

    let inner = Rect::new(
        rect.x + 2,
        rect.y + 1,
        rect.width.saturating_sub(4),
        rect.height.saturating_sub(2),
    );
    let style = Style::default().bg(bg);
    frame.render_widget(Block::default().style(style), inner);
    frame.render_widget(Paragraph::new(lines).style(style), inner);
}

fn render_new_column(frame: &mut Frame, theme: &Theme, rect: Rect) {
    let style = Style::default().fg(theme.text_dim).bg(theme.lines);
    frame.render_widget(Block::default().style(style), rect);
    let label = "+ New Column";
    let row = Rect::new(rect.x, rect.y + rect.height / 2, rect.width, rect.height.min(1));
    let text = format!("{:^width$}", label, width = rect.width as usize);
    frame.render_widget(
        Paragraph::new(Span::styled(text, style.add_modifier(Modifier::BOLD))),
        row,
    );
}

/// Insertion line on the border row nearest the drop position
fn render_drop_line(frame: &mut Frame, theme: &Theme, lane: &LaneLayout, index: usize, scroll: u16) {
    let y = match drop_indicator(index, lane.cards.len()) {
        DropIndicator::Empty => Some(lane.content_top),
        DropIndicator::Before(i) => lane.card_rect(i, scroll).map(|r| r.y),
        DropIndicator::After(i) => lane
            .card_rect(i, scroll)
            .map(|r| r.y + r.height.saturating_sub(1)),
    };
    let Some(y) = y else {
        return;
    };
    if y >= lane.content_top + lane.content_height {
        return;
    }
    let style = Style::default().fg(theme.accent).bg(theme.background);
    let line = "\u{2501}".repeat(lane.rect.width as usize);
    frame.render_widget(
        Paragraph::new(Span::styled(line, style)),
        Rect::new(lane.rect.x, y, lane.rect.width, 1),
    );
}

/// Floating copy of the dragged card at the pointer, kept inside the board
fn render_ghost(frame: &mut Frame, theme: &Theme, task: &Task, pointer: (u16, u16), area: Rect) {
    let width = (LANE_W - LANE_GAP).min(area.width);
    let height = area.height.min(3);
    let right = area.x + area.width;
    let bottom = area.y + area.height;
    let x = pointer.0.saturating_sub(2).max(area.x).min(right.saturating_sub(width));
    let y = pointer.1.max(area.y).min(bottom.saturating_sub(height));
    let rect = Rect::new(x, y, width, height);

    frame.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent).bg(theme.surface))
        .style(Style::default().bg(theme.surface));
    frame.render_widget(block, rect);
    let title = unicode::truncate_to_width(&task.title, width.saturating_sub(4) as usize);
    let style = Style::default()
        .fg(theme.text)
        .bg(theme.surface)
        .add_modifier(Modifier::BOLD);
    if height > 2 {
        frame.render_widget(
            Paragraph::new(Span::styled(title, style)),
            Rect::new(x + 2, y + 1, width.saturating_sub(4), 1),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::drag::DragSource;
    use crate::ops::intent::Intent;
    use crate::tui::layout::card_height;
    use crate::tui::render::test_helpers::*;
    use insta::assert_snapshot;

    #[test]
    fn card_shows_wrapped_title_and_summary() {
        let app = demo_app();
        let task = app.active_board().unwrap().columns[0].tasks[0].clone();
        let (height, lines) = card_height(&task);
        assert_eq!(height, 5);
        let output = render_to_string(28, 5, |frame, area| {
            render_card(frame, &app.theme, &task, &lines, area, false, false);
        });
        assert_snapshot!(output, @r"
        ╭──────────────────────────╮
        │ Build UI for onboarding  │
        │ flow                     │
        │ 1 of 3 subtasks          │
        ╰──────────────────────────╯
        ");
    }

    #[test]
    fn lanes_show_column_names_and_counts() {
        let mut app = demo_app();
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("TODO (4)"));
        assert!(out.contains("DOING (3)"));
        assert!(out.contains("DONE (3)"));
        assert!(out.contains("Build UI for search"));
    }

    #[test]
    fn empty_board_prompts_for_column() {
        let mut app = demo_app();
        app.dispatch(Intent::AddBoard {
            name: "Blank".into(),
            columns: Vec::new(),
        })
        .unwrap();
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("This board is empty. Create a new column to get started."));
        assert!(out.contains(ADD_COLUMN_LABEL));
    }

    #[test]
    fn no_boards_prompts_for_board() {
        let mut app = demo_app();
        let ids: Vec<_> = app.state.boards.iter().map(|b| b.id).collect();
        for id in ids {
            app.dispatch(Intent::DeleteBoard(id)).unwrap();
        }
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains(CREATE_BOARD_LABEL));
        assert!(out.contains("No boards"));
    }

    #[test]
    fn dragging_draws_drop_line_and_ghost() {
        let mut app = demo_app();
        render_app(&mut app, TERM_W, TERM_H);
        let board = app.active_board().unwrap();
        let task = &board.columns[0].tasks[0];
        let source = DragSource {
            task_id: task.id,
            column: "Todo".into(),
            index: 0,
        };
        let lane = app.board_layout.lane(1).unwrap();
        let (x, y) = (lane.rect.x + 4, lane.content_top + 1);
        app.drag.press(source, (31, 6));
        let zone = app.board_layout.drop_zone_at(x, y);
        assert!(app.drag.motion((x, y), zone, 1));

        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("\u{2501}\u{2501}\u{2501}"));
        assert!(out.matches("Build UI for onboarding").count() >= 2);
    }
}
