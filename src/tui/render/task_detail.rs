use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Board;
use crate::tui::modal::{DETAIL_MENU, DetailField, TaskDetail};
use crate::tui::modal_layout::DetailLayout;
use crate::tui::theme::Theme;
use crate::util::unicode;

use super::confirm::render_menu;
use super::forms::render_status_selector;
use super::helpers::{modal_frame, render_label};

pub fn render_task_detail(
    frame: &mut Frame,
    theme: &Theme,
    board: &Board,
    detail: &TaskDetail,
    layout: &DetailLayout,
) {
    let Some(task) = board.find_task(detail.task_id) else {
        return;
    };
    modal_frame(frame, theme, layout.area, "");
    let bg = theme.surface;

    let title_style = Style::default()
        .fg(theme.text)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let lines: Vec<Line> = layout
        .title_lines
        .iter()
        .map(|l| Line::from(Span::styled(l.clone(), title_style)))
        .collect();
    frame.render_widget(Paragraph::new(lines), layout.title);

    let menu_style = if detail.menu.is_some() {
        Style::default().fg(theme.accent).bg(bg)
    } else {
        Style::default().fg(theme.text_dim).bg(bg)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(" \u{22EE} ", menu_style)),
        layout.menu_button,
    );

    if !layout.description_lines.is_empty() {
        let style = Style::default().fg(theme.text_dim).bg(bg);
        let lines: Vec<Line> = layout
            .description_lines
            .iter()
            .map(|l| Line::from(Span::styled(l.clone(), style)))
            .collect();
        frame.render_widget(Paragraph::new(lines), layout.description);
    }

    render_label(
        frame,
        theme,
        layout.subtasks_label,
        &format!(
            "Subtasks ({} of {})",
            task.completed_subtasks(),
            task.subtasks.len()
        ),
    );
    for (i, (subtask, rect)) in task.subtasks.iter().zip(&layout.subtasks).enumerate() {
        if rect.height == 0 {
            continue;
        }
        let focused = detail.menu.is_none() && detail.focus == DetailField::Subtask(i);
        let row_bg = if focused { theme.selection } else { theme.background };
        let (mark, mark_style) = if subtask.is_completed {
            ("\u{2611}", Style::default().fg(theme.accent).bg(row_bg))
        } else {
            ("\u{2610}", Style::default().fg(theme.text_dim).bg(row_bg))
        };
        let text_style = if subtask.is_completed {
            Style::default()
                .fg(theme.text_dim)
                .bg(row_bg)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(theme.text).bg(row_bg)
        };
        let title = unicode::pad_to_width(&subtask.title, (rect.width as usize).saturating_sub(4));
        let line = Line::from(vec![
            Span::styled(format!(" {} ", mark), mark_style),
            Span::styled(title, text_style),
        ]);
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(row_bg)), *rect);
    }

    render_label(frame, theme, layout.status_label, "Current Status");
    render_status_selector(
        frame,
        theme,
        layout.status,
        Some(task.status.as_str()),
        detail.menu.is_none() && detail.focus == DetailField::Status,
    );

    if let (Some(cursor), Some(menu)) = (detail.menu, &layout.menu) {
        render_menu(frame, theme, &DETAIL_MENU, cursor, menu);
    }
}

#[cfg(test)]
mod tests {
    use crate::ops::intent::Intent;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn detail_shows_checklist_and_status() {
        let mut app = demo_app();
        let id = app.active_board().unwrap().columns[0].tasks[0].id;
        app.open_task_detail(id);
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("Subtasks (1 of 3)"));
        assert!(out.contains("\u{2611}"));
        assert!(out.contains("\u{2610}"));
        assert!(out.contains("Current Status"));
        assert!(out.contains("\u{2039} Todo"));
    }

    #[test]
    fn detail_tracks_toggles() {
        let mut app = demo_app();
        let id = app.active_board().unwrap().columns[0].tasks[0].id;
        app.open_task_detail(id);
        app.dispatch(Intent::ToggleSubtask { task_id: id, index: 1 })
            .unwrap();
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("Subtasks (2 of 3)"));
    }

    #[test]
    fn detail_menu_lists_actions() {
        let mut app = demo_app();
        let id = app.active_board().unwrap().columns[0].tasks[0].id;
        app.open_task_detail(id);
        if let Some(crate::tui::modal::Modal::TaskDetail(d)) = &mut app.modal {
            d.menu = Some(0);
        }
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("Edit Task"));
        assert!(out.contains("Delete Task"));
    }
}
