use crossterm::event::{KeyCode, KeyEvent};

use crate::model::TaskId;
use crate::ops::intent::Intent;
use crate::tui::app::App;
use crate::tui::modal::{DETAIL_MENU, DetailField, Modal};

use super::*;

pub(super) fn handle_detail(app: &mut App, key: KeyEvent) {
    let Some(Modal::TaskDetail(detail)) = &app.modal else {
        return;
    };
    let task_id = detail.task_id;
    let Some(subtask_count) = app
        .active_board()
        .and_then(|b| b.find_task(task_id))
        .map(|t| t.subtasks.len())
    else {
        app.modal = None;
        return;
    };

    if detail.menu.is_some() {
        handle_detail_menu(app, task_id, key);
        return;
    }

    let Some(Modal::TaskDetail(detail)) = &mut app.modal else {
        return;
    };
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.modal = None,
        KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => detail.focus_next(subtask_count, true),
        KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => {
            detail.focus_next(subtask_count, false)
        }
        KeyCode::Char('m') => detail.menu = Some(0),
        KeyCode::Char('e') => app.open_edit_task(task_id),
        KeyCode::Char('d') | KeyCode::Delete => app.open_delete_task(task_id),
        KeyCode::Enter | KeyCode::Char(' ') => match detail.focus {
            DetailField::Subtask(index) => toggle_subtask(app, task_id, index),
            DetailField::Status => step_status(app, task_id, true),
        },
        KeyCode::Left | KeyCode::Char('h') if detail.focus == DetailField::Status => {
            step_status(app, task_id, false)
        }
        KeyCode::Right | KeyCode::Char('l') if detail.focus == DetailField::Status => {
            step_status(app, task_id, true)
        }
        _ => {}
    }
}

fn handle_detail_menu(app: &mut App, task_id: TaskId, key: KeyEvent) {
    let Some(Modal::TaskDetail(detail)) = &mut app.modal else {
        return;
    };
    let cursor = detail.menu.unwrap_or(0);
    match key.code {
        KeyCode::Esc | KeyCode::Char('m') => detail.menu = None,
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
            detail.menu = Some((cursor + 1) % DETAIL_MENU.len())
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
            detail.menu = Some((cursor + DETAIL_MENU.len() - 1) % DETAIL_MENU.len())
        }
        KeyCode::Enter | KeyCode::Char(' ') => run_detail_menu_item(app, task_id, cursor),
        _ => {}
    }
}

/// Edit Task (0) or Delete Task (1)
pub(super) fn run_detail_menu_item(app: &mut App, task_id: TaskId, item: usize) {
    match item {
        0 => app.open_edit_task(task_id),
        1 => app.open_delete_task(task_id),
        _ => {}
    }
}

pub(super) fn toggle_subtask(app: &mut App, task_id: TaskId, index: usize) {
    let _ = app.dispatch(Intent::ToggleSubtask { task_id, index });
}

/// Move the task to the neighbouring column, wrapping around
pub(super) fn step_status(app: &mut App, task_id: TaskId, forward: bool) {
    let Some(board) = app.active_board() else {
        return;
    };
    let Some((column, _)) = board.locate_task(task_id) else {
        return;
    };
    let n = board.columns.len();
    if n < 2 {
        return;
    }
    let next = if forward {
        (column + 1) % n
    } else {
        (column + n - 1) % n
    };
    let status = board.columns[next].name.clone();
    if app
        .dispatch(Intent::UpdateTaskStatus {
            task_id,
            status: status.clone(),
        })
        .is_ok()
    {
        app.select_task(task_id);
        app.set_status(format!("Status: {}", status));
    }
}
