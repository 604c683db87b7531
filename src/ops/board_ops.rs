use std::sync::Arc;

use crate::model::{Board, BoardId, Column, ColumnColor, ColumnId, KanbanState};

use super::validate::{self, ValidationErrors};

/// A column as submitted by the add/edit board forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDraft {
    /// Id of the existing column this row edits; None for a new column
    pub id: Option<ColumnId>,
    pub name: String,
    pub color: ColumnColor,
}

impl ColumnDraft {
    pub fn new(name: impl Into<String>, color: ColumnColor) -> Self {
        ColumnDraft {
            id: None,
            name: name.into(),
            color,
        }
    }

    pub fn from_column(column: &Column) -> Self {
        ColumnDraft {
            id: Some(column.id),
            name: column.name.clone(),
            color: column.color,
        }
    }
}

/// An edited board: same id, new name and column list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardDraft {
    pub id: BoardId,
    pub name: String,
    pub columns: Vec<ColumnDraft>,
}

impl BoardDraft {
    pub fn from_board(board: &Board) -> Self {
        BoardDraft {
            id: board.id,
            name: board.name.clone(),
            columns: board.columns.iter().map(ColumnDraft::from_column).collect(),
        }
    }
}

/// Create a board with fresh ids and empty columns, append it and make it active.
pub fn add_board(
    state: &KanbanState,
    name: &str,
    columns: &[ColumnDraft],
) -> Result<KanbanState, ValidationErrors> {
    validate::check_board(
        name,
        columns.iter().map(|c| c.name.as_str()),
        &state.boards,
        None,
    )?;

    let mut board = Board::new(name.trim());
    board.columns = columns
        .iter()
        .map(|c| Column::new(c.name.trim(), c.color))
        .collect();

    let id = board.id;
    let mut boards = state.boards.clone();
    boards.push(Arc::new(board));
    Ok(KanbanState {
        boards,
        active: Some(id),
    })
}

/// Apply an edited board.
///
/// Columns matched by id keep their tasks (renames carry over to task
/// status); unmatched draft columns start empty; columns missing from the
/// draft are dropped along with their tasks.
pub fn update_board(
    state: &KanbanState,
    draft: &BoardDraft,
) -> Result<KanbanState, ValidationErrors> {
    let Some(index) = state.board_index(draft.id) else {
        return Ok(state.clone());
    };
    validate::check_board(
        &draft.name,
        draft.columns.iter().map(|c| c.name.as_str()),
        &state.boards,
        Some(draft.id),
    )?;

    let current = &state.boards[index];
    let columns = draft
        .columns
        .iter()
        .map(|d| {
            let name = d.name.trim().to_string();
            let existing = d
                .id
                .and_then(|id| current.columns.iter().find(|c| c.id == id));
            match existing {
                Some(col) => {
                    let mut tasks = col.tasks.clone();
                    if col.name != name {
                        for task in &mut tasks {
                            task.status = name.clone();
                        }
                    }
                    Column {
                        id: col.id,
                        name,
                        color: d.color,
                        tasks,
                    }
                }
                None => Column::new(name, d.color),
            }
        })
        .collect();

    let board = Board {
        id: current.id,
        name: draft.name.trim().to_string(),
        columns,
    };
    Ok(state.with_board(index, board))
}

/// Remove a board and fix up the selection.
///
/// If the active board is removed the preceding board becomes active, or
/// the new first board when it was first, or nothing when none remain.
pub fn delete_board(state: &KanbanState, id: BoardId) -> KanbanState {
    let Some(index) = state.board_index(id) else {
        return state.clone();
    };
    let mut boards = state.boards.clone();
    boards.remove(index);

    let active = if state.active == Some(id) {
        if index > 0 {
            Some(boards[index - 1].id)
        } else {
            boards.first().map(|b| b.id)
        }
    } else {
        state.active
    };
    KanbanState { boards, active }
}

/// Make an existing board the active one
pub fn select_board(state: &KanbanState, id: BoardId) -> KanbanState {
    if state.board_index(id).is_none() || state.active == Some(id) {
        return state.clone();
    }
    KanbanState {
        boards: state.boards.clone(),
        active: Some(id),
    }
}
