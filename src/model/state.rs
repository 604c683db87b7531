use std::sync::Arc;

use super::board::Board;
use super::ids::{BoardId, TaskId};

/// The whole board collection plus the active-board selection.
///
/// Boards are shared behind `Arc`: an operation that touches one board
/// rebuilds only that board, every other entry stays pointer-equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KanbanState {
    pub boards: Vec<Arc<Board>>,
    pub active: Option<BoardId>,
}

impl KanbanState {
    /// Build a state from plain boards, selecting the first one
    pub fn new(boards: Vec<Board>) -> Self {
        let active = boards.first().map(|b| b.id);
        KanbanState {
            boards: boards.into_iter().map(Arc::new).collect(),
            active,
        }
    }

    pub fn active_board(&self) -> Option<&Board> {
        let id = self.active?;
        self.board(id)
    }

    pub fn active_index(&self) -> Option<usize> {
        let id = self.active?;
        self.board_index(id)
    }

    pub fn board(&self, id: BoardId) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == id).map(|b| b.as_ref())
    }

    pub fn board_index(&self, id: BoardId) -> Option<usize> {
        self.boards.iter().position(|b| b.id == id)
    }

    /// Index of the board holding a task
    pub fn board_index_of_task(&self, task_id: TaskId) -> Option<usize> {
        self.boards
            .iter()
            .position(|b| b.locate_task(task_id).is_some())
    }

    /// A copy of this state with board `index` replaced. Other boards are shared.
    pub fn with_board(&self, index: usize, board: Board) -> Self {
        let mut boards = self.boards.clone();
        boards[index] = Arc::new(board);
        KanbanState {
            boards,
            active: self.active,
        }
    }

    /// True when both states hold the very same board allocations
    pub fn shares_all_boards(&self, other: &KanbanState) -> bool {
        self.boards.len() == other.boards.len()
            && self
                .boards
                .iter()
                .zip(&other.boards)
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_selects_first_board() {
        let state = KanbanState::new(vec![Board::new("A"), Board::new("B")]);
        assert_eq!(state.active_board().map(|b| b.name.as_str()), Some("A"));
        assert_eq!(state.active_index(), Some(0));
    }

    #[test]
    fn empty_state_has_no_active_board() {
        let state = KanbanState::new(Vec::new());
        assert!(state.active_board().is_none());
        assert!(state.active.is_none());
    }

    #[test]
    fn with_board_shares_untouched_boards() {
        let state = KanbanState::new(vec![Board::new("A"), Board::new("B")]);
        let mut renamed = (*state.boards[1]).clone();
        renamed.name = "C".into();
        let next = state.with_board(1, renamed);

        assert!(Arc::ptr_eq(&state.boards[0], &next.boards[0]));
        assert!(!Arc::ptr_eq(&state.boards[1], &next.boards[1]));
        assert!(!next.shares_all_boards(&state));
        assert!(state.clone().shares_all_boards(&state));
    }
}
