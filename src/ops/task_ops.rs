use crate::model::{Board, KanbanState, Subtask, Task, TaskId};

use super::validate::{self, Field, ValidationError, ValidationErrors};

/// A new task as submitted by the add task form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    /// Target column name; None or an unknown name means the first column
    pub status: Option<String>,
    /// Subtask titles; blank entries are dropped
    pub subtasks: Vec<String>,
}

/// An edited task. Carries no status: column membership only changes
/// through [`update_task_status`] and [`move_task`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub subtasks: Vec<Subtask>,
}

impl TaskEdit {
    pub fn from_task(task: &Task) -> Self {
        TaskEdit {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            subtasks: task.subtasks.clone(),
        }
    }
}

/// Clone the board holding `task_id`, let `f` edit it, and swap it in.
/// `f` returns false when it changed nothing; the input state is then
/// returned as is.
fn edit_task_board(
    state: &KanbanState,
    task_id: TaskId,
    f: impl FnOnce(&mut Board) -> bool,
) -> KanbanState {
    let Some(index) = state.board_index_of_task(task_id) else {
        return state.clone();
    };
    let mut board = (*state.boards[index]).clone();
    if f(&mut board) {
        state.with_board(index, board)
    } else {
        state.clone()
    }
}

/// Append a new task to the active board's column named by `draft.status`,
/// falling back to the first column.
pub fn add_task(state: &KanbanState, draft: &TaskDraft) -> Result<KanbanState, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if let Err(e) = validate::check_title(&draft.title) {
        errors.add(Field::Title, e);
    }
    let target = state.active_index().and_then(|bi| {
        let board = &state.boards[bi];
        let ci = draft
            .status
            .as_deref()
            .and_then(|s| board.column_index(s))
            .or(if board.columns.is_empty() { None } else { Some(0) })?;
        Some((bi, ci))
    });
    if target.is_none() {
        errors.add(Field::Status, ValidationError::NoColumns);
    }
    errors.into_result()?;
    let Some((bi, ci)) = target else {
        return Ok(state.clone());
    };

    let mut board = (*state.boards[bi]).clone();
    let column = &mut board.columns[ci];
    let mut task = Task::new(draft.title.trim(), column.name.clone());
    task.description = draft.description.clone();
    task.subtasks = draft
        .subtasks
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| Subtask::new(s.trim()))
        .collect();
    column.tasks.push(task);
    Ok(state.with_board(bi, board))
}

/// Replace title, description and subtasks of an existing task in place
pub fn update_task(state: &KanbanState, edit: &TaskEdit) -> Result<KanbanState, ValidationErrors> {
    if state.board_index_of_task(edit.id).is_none() {
        return Ok(state.clone());
    }
    validate::check_task(
        &edit.title,
        edit.subtasks.iter().map(|s| s.title.as_str()),
        true,
    )?;

    Ok(edit_task_board(state, edit.id, |board| {
        let Some((ci, ti)) = board.locate_task(edit.id) else {
            return false;
        };
        let task = &mut board.columns[ci].tasks[ti];
        let title = edit.title.trim().to_string();
        let subtasks: Vec<Subtask> = edit
            .subtasks
            .iter()
            .map(|s| Subtask {
                title: s.title.trim().to_string(),
                ..s.clone()
            })
            .collect();
        if task.title == title && task.description == edit.description && task.subtasks == subtasks
        {
            return false;
        }
        task.title = title;
        task.description = edit.description.clone();
        task.subtasks = subtasks;
        true
    }))
}

/// Move a task to the end of the column named `new_status` on its board,
/// updating its status in the same step.
pub fn update_task_status(state: &KanbanState, task_id: TaskId, new_status: &str) -> KanbanState {
    edit_task_board(state, task_id, |board| {
        let Some((ci, ti)) = board.locate_task(task_id) else {
            return false;
        };
        if board.columns[ci].name == new_status {
            return false;
        }
        let Some(target) = board.column_index(new_status) else {
            return false;
        };
        let mut task = board.columns[ci].tasks.remove(ti);
        task.status = new_status.to_string();
        board.columns[target].tasks.push(task);
        true
    })
}

pub fn delete_task(state: &KanbanState, task_id: TaskId) -> KanbanState {
    edit_task_board(state, task_id, |board| {
        let Some((ci, ti)) = board.locate_task(task_id) else {
            return false;
        };
        board.columns[ci].tasks.remove(ti);
        true
    })
}

/// Flip the completion flag of one subtask. Out-of-range indexes are ignored.
pub fn toggle_subtask(state: &KanbanState, task_id: TaskId, index: usize) -> KanbanState {
    edit_task_board(state, task_id, |board| {
        let Some((ci, ti)) = board.locate_task(task_id) else {
            return false;
        };
        match board.columns[ci].tasks[ti].subtasks.get_mut(index) {
            Some(subtask) => {
                subtask.is_completed = !subtask.is_completed;
                true
            }
            None => false,
        }
    })
}

/// Move a task out of `source` into `target` at `target_index`.
///
/// `target_index` is a slot in the target column as rendered before the
/// move, so within one column the dragged task still occupies its old
/// slot: indexes past it are shifted down by one after removal. Dropping a
/// task onto its own slot changes nothing. Across columns the index is
/// clamped to the target list and the task takes the target's name as
/// its status.
pub fn move_task(
    state: &KanbanState,
    task_id: TaskId,
    source: &str,
    target: &str,
    target_index: usize,
) -> KanbanState {
    edit_task_board(state, task_id, |board| {
        let Some(src) = board.column_index(source) else {
            return false;
        };
        let Some(dst) = board.column_index(target) else {
            return false;
        };
        let Some(from) = board.columns[src].position_of(task_id) else {
            return false;
        };

        if src == dst {
            if target_index == from || target_index == from + 1 {
                return false;
            }
            let tasks = &mut board.columns[src].tasks;
            let task = tasks.remove(from);
            let to = if target_index > from {
                target_index - 1
            } else {
                target_index
            };
            let to = to.min(tasks.len());
            tasks.insert(to, task);
            return true;
        }

        let mut task = board.columns[src].tasks.remove(from);
        task.status = board.columns[dst].name.clone();
        let tasks = &mut board.columns[dst].tasks;
        let to = target_index.min(tasks.len());
        tasks.insert(to, task);
        true
    })
}
