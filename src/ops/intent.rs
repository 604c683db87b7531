use crate::model::{BoardId, KanbanState, TaskId};

use super::board_ops::{self, BoardDraft, ColumnDraft};
use super::task_ops::{self, TaskDraft, TaskEdit};
use super::validate::ValidationErrors;

/// A request to change the board collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    AddBoard {
        name: String,
        columns: Vec<ColumnDraft>,
    },
    UpdateBoard(BoardDraft),
    DeleteBoard(BoardId),
    SelectBoard(BoardId),
    AddTask(TaskDraft),
    UpdateTask(TaskEdit),
    UpdateTaskStatus {
        task_id: TaskId,
        status: String,
    },
    DeleteTask(TaskId),
    ToggleSubtask {
        task_id: TaskId,
        index: usize,
    },
    MoveTask {
        task_id: TaskId,
        source: String,
        target: String,
        index: usize,
    },
}

impl Intent {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Intent::AddBoard { .. } => "add_board",
            Intent::UpdateBoard(_) => "update_board",
            Intent::DeleteBoard(_) => "delete_board",
            Intent::SelectBoard(_) => "select_board",
            Intent::AddTask(_) => "add_task",
            Intent::UpdateTask(_) => "update_task",
            Intent::UpdateTaskStatus { .. } => "update_task_status",
            Intent::DeleteTask(_) => "delete_task",
            Intent::ToggleSubtask { .. } => "toggle_subtask",
            Intent::MoveTask { .. } => "move_task",
        }
    }
}

/// Run one intent against a state, producing the next state.
///
/// Only form-backed intents can fail, and only with validation errors.
/// Intents naming things that do not exist return the input unchanged.
pub fn apply(state: &KanbanState, intent: &Intent) -> Result<KanbanState, ValidationErrors> {
    let result = match intent {
        Intent::AddBoard { name, columns } => board_ops::add_board(state, name, columns),
        Intent::UpdateBoard(draft) => board_ops::update_board(state, draft),
        Intent::DeleteBoard(id) => Ok(board_ops::delete_board(state, *id)),
        Intent::SelectBoard(id) => Ok(board_ops::select_board(state, *id)),
        Intent::AddTask(draft) => task_ops::add_task(state, draft),
        Intent::UpdateTask(edit) => task_ops::update_task(state, edit),
        Intent::UpdateTaskStatus { task_id, status } => {
            Ok(task_ops::update_task_status(state, *task_id, status))
        }
        Intent::DeleteTask(id) => Ok(task_ops::delete_task(state, *id)),
        Intent::ToggleSubtask { task_id, index } => {
            Ok(task_ops::toggle_subtask(state, *task_id, *index))
        }
        Intent::MoveTask {
            task_id,
            source,
            target,
            index,
        } => Ok(task_ops::move_task(state, *task_id, source, target, *index)),
    };

    match &result {
        Ok(next) if next.shares_all_boards(state) && next.active == state.active => {
            tracing::debug!(intent = intent.name(), "intent left state unchanged");
        }
        Ok(_) => tracing::debug!(intent = intent.name(), "intent applied"),
        Err(errors) => {
            tracing::debug!(intent = intent.name(), %errors, "intent rejected");
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnColor;
    use crate::ops::validate::{Field, ValidationError};

    fn seeded() -> KanbanState {
        apply(
            &KanbanState::default(),
            &Intent::AddBoard {
                name: "Platform Launch".into(),
                columns: vec![
                    ColumnDraft::new("Todo", ColumnColor::Color1),
                    ColumnDraft::new("Done", ColumnColor::Color2),
                ],
            },
        )
        .unwrap()
    }

    #[test]
    fn duplicate_board_leaves_collection_unchanged() {
        let state = seeded();
        let err = apply(
            &state,
            &Intent::AddBoard {
                name: "platform launch".into(),
                columns: vec![ColumnDraft::new("Todo", ColumnColor::Color1)],
            },
        )
        .unwrap_err();
        assert_eq!(err.get(Field::BoardName), Some(ValidationError::Duplicate));
        assert_eq!(state.boards.len(), 1);
    }

    #[test]
    fn add_then_move_then_toggle() {
        let state = seeded();
        let state = apply(
            &state,
            &Intent::AddTask(TaskDraft {
                title: "Write launch post".into(),
                subtasks: vec!["Draft".into()],
                ..Default::default()
            }),
        )
        .unwrap();
        let task_id = state.boards[0].columns[0].tasks[0].id;

        let state = apply(
            &state,
            &Intent::UpdateTaskStatus {
                task_id,
                status: "Done".into(),
            },
        )
        .unwrap();
        assert_eq!(state.boards[0].columns[1].tasks[0].status, "Done");

        let state = apply(&state, &Intent::ToggleSubtask { task_id, index: 0 }).unwrap();
        assert!(state.boards[0].find_task(task_id).unwrap().subtasks[0].is_completed);

        let state = apply(
            &state,
            &Intent::MoveTask {
                task_id,
                source: "Done".into(),
                target: "Todo".into(),
                index: 0,
            },
        )
        .unwrap();
        assert_eq!(state.boards[0].columns[0].tasks[0].status, "Todo");

        let state = apply(&state, &Intent::DeleteTask(task_id)).unwrap();
        assert_eq!(state.boards[0].task_count(), 0);
    }

    #[test]
    fn delete_only_board_empties_selection() {
        let state = seeded();
        let id = state.boards[0].id;
        let state = apply(&state, &Intent::DeleteBoard(id)).unwrap();
        assert!(state.active.is_none());
    }

    #[test]
    fn intent_names_are_snake_case() {
        assert_eq!(Intent::DeleteTask(TaskId::new()).name(), "delete_task");
        assert_eq!(Intent::SelectBoard(BoardId::new()).name(), "select_board");
    }
}
