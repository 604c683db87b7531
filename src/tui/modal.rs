//! State of the modal dialogs: board and task forms, the task detail
//! card, delete confirmation and the board menu.
//!
//! A modal owns a draft copied out of the board state. Nothing here
//! touches `KanbanState`; committing a modal produces one `Intent`.

use crate::model::{
    Board, BoardId, ColumnColor, ColumnId, MAX_COLUMNS, Subtask, SubtaskId, Task, TaskId,
};
use crate::ops::board_ops::{BoardDraft, ColumnDraft};
use crate::ops::intent::Intent;
use crate::ops::task_ops::{TaskDraft, TaskEdit};
use crate::ops::validate::{Field, ValidationErrors};

use super::text_input::TextInput;

/// The dialog currently on screen
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    BoardForm(BoardForm),
    TaskForm(TaskForm),
    TaskDetail(TaskDetail),
    ConfirmDelete(ConfirmDelete),
    BoardMenu(BoardMenu),
}

/// Step through a focus ring, wrapping at both ends
pub fn cycle_focus<T: Copy + PartialEq>(order: &[T], current: T, forward: bool) -> Option<T> {
    if order.is_empty() {
        return None;
    }
    let pos = order.iter().position(|f| *f == current);
    let next = match (pos, forward) {
        (None, _) => 0,
        (Some(i), true) => (i + 1) % order.len(),
        (Some(0), false) => order.len() - 1,
        (Some(i), false) => i - 1,
    };
    Some(order[next])
}

// ── Board form ──

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardField {
    Name,
    ColumnName(usize),
    ColumnColor(usize),
    RemoveColumn(usize),
    AddColumn,
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRow {
    pub id: Option<ColumnId>,
    pub name: TextInput,
    pub color: ColumnColor,
}

/// Add Board / Edit Board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardForm {
    /// Board being edited; None when adding
    pub editing: Option<BoardId>,
    pub name: TextInput,
    pub columns: Vec<ColumnRow>,
    pub focus: BoardField,
    pub errors: ValidationErrors,
}

impl BoardForm {
    /// Empty form with the default Todo / Doing columns
    pub fn add() -> Self {
        let row = |name: &str, color| ColumnRow {
            id: None,
            name: TextInput::new(name),
            color,
        };
        BoardForm {
            editing: None,
            name: TextInput::default(),
            columns: vec![
                row("Todo", ColumnColor::Color1),
                row("Doing", ColumnColor::Color2),
            ],
            focus: BoardField::Name,
            errors: ValidationErrors::new(),
        }
    }

    /// Form pre-filled from an existing board; column ids are kept
    pub fn edit(board: &Board) -> Self {
        BoardForm {
            editing: Some(board.id),
            name: TextInput::new(board.name.clone()),
            columns: board
                .columns
                .iter()
                .map(|c| ColumnRow {
                    id: Some(c.id),
                    name: TextInput::new(c.name.clone()),
                    color: c.color,
                })
                .collect(),
            focus: BoardField::Name,
            errors: ValidationErrors::new(),
        }
    }

    /// Edit form with one fresh blank column focused
    pub fn edit_with_new_column(board: &Board) -> Self {
        let mut form = BoardForm::edit(board);
        form.add_column();
        form
    }

    pub fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Board"
        } else {
            "Add New Board"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing.is_some() {
            "Save Changes"
        } else {
            "Create New Board"
        }
    }

    pub fn focus_order(&self) -> Vec<BoardField> {
        let mut order = vec![BoardField::Name];
        for i in 0..self.columns.len() {
            order.push(BoardField::ColumnName(i));
            order.push(BoardField::ColumnColor(i));
            order.push(BoardField::RemoveColumn(i));
        }
        order.push(BoardField::AddColumn);
        order.push(BoardField::Submit);
        order
    }

    pub fn focus_next(&mut self, forward: bool) {
        if let Some(next) = cycle_focus(&self.focus_order(), self.focus, forward) {
            self.focus = next;
        }
    }

    pub fn can_add_column(&self) -> bool {
        self.columns.len() < MAX_COLUMNS
    }

    pub fn add_column_label(&self) -> &'static str {
        if self.can_add_column() {
            "+ Add New Column"
        } else {
            "Maximum Columns Reached"
        }
    }

    /// Append a blank column and focus it. False at the column limit.
    pub fn add_column(&mut self) -> bool {
        if !self.can_add_column() {
            return false;
        }
        let index = self.columns.len();
        self.columns.push(ColumnRow {
            id: None,
            name: TextInput::default(),
            color: ColumnColor::for_index(index),
        });
        self.errors.clear(Field::Columns);
        self.focus = BoardField::ColumnName(index);
        true
    }

    pub fn remove_column(&mut self, index: usize) {
        if index >= self.columns.len() {
            return;
        }
        self.columns.remove(index);
        // positions shifted; stale per-column errors no longer line up
        self.errors
            .retain(|f| !matches!(f, Field::Column(_) | Field::Columns));
        self.focus = match self.columns.len() {
            0 => BoardField::AddColumn,
            n => BoardField::ColumnName(index.min(n - 1)),
        };
    }

    pub fn cycle_color(&mut self, index: usize) {
        if let Some(row) = self.columns.get_mut(index) {
            row.color = row.color.next();
        }
    }

    /// The text field under focus and the error slot it owns
    pub fn focused_input(&mut self) -> Option<(Field, &mut TextInput)> {
        match self.focus {
            BoardField::Name => Some((Field::BoardName, &mut self.name)),
            BoardField::ColumnName(i) => self
                .columns
                .get_mut(i)
                .map(|row| (Field::Column(i), &mut row.name)),
            _ => None,
        }
    }

    pub fn intent(&self) -> Intent {
        let columns: Vec<ColumnDraft> = self
            .columns
            .iter()
            .map(|row| ColumnDraft {
                id: row.id,
                name: row.name.text.clone(),
                color: row.color,
            })
            .collect();
        match self.editing {
            Some(id) => Intent::UpdateBoard(BoardDraft {
                id,
                name: self.name.text.clone(),
                columns,
            }),
            None => Intent::AddBoard {
                name: self.name.text.clone(),
                columns,
            },
        }
    }
}

// ── Task form ──

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Title,
    Description,
    Subtask(usize),
    RemoveSubtask(usize),
    AddSubtask,
    Status,
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtaskRow {
    pub id: Option<SubtaskId>,
    pub is_completed: bool,
    pub title: TextInput,
}

/// Add New Task / Edit Task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    /// Task being edited; None when adding
    pub editing: Option<TaskId>,
    pub title: TextInput,
    pub description: TextInput,
    pub subtasks: Vec<SubtaskRow>,
    /// Column names offered by the status selector (add only)
    pub statuses: Vec<String>,
    pub status: usize,
    pub focus: TaskField,
    pub errors: ValidationErrors,
}

impl TaskForm {
    /// Blank form; status defaults to `column` or the first column
    pub fn add(board: &Board, column: Option<usize>) -> Self {
        let statuses: Vec<String> = board.columns.iter().map(|c| c.name.clone()).collect();
        let status = column.filter(|c| *c < statuses.len()).unwrap_or(0);
        TaskForm {
            editing: None,
            title: TextInput::default(),
            description: TextInput::multiline(""),
            subtasks: Vec::new(),
            statuses,
            status,
            focus: TaskField::Title,
            errors: ValidationErrors::new(),
        }
    }

    pub fn edit(task: &Task) -> Self {
        TaskForm {
            editing: Some(task.id),
            title: TextInput::new(task.title.clone()),
            description: TextInput::multiline(task.description.clone()),
            subtasks: task
                .subtasks
                .iter()
                .map(|s| SubtaskRow {
                    id: Some(s.id),
                    is_completed: s.is_completed,
                    title: TextInput::new(s.title.clone()),
                })
                .collect(),
            statuses: Vec::new(),
            status: 0,
            focus: TaskField::Title,
            errors: ValidationErrors::new(),
        }
    }

    pub fn title_text(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Task"
        } else {
            "Add New Task"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing.is_some() {
            "Save Changes"
        } else {
            "Create Task"
        }
    }

    /// Only the add form picks a status
    pub fn has_status(&self) -> bool {
        self.editing.is_none()
    }

    pub fn selected_status(&self) -> Option<&str> {
        self.statuses.get(self.status).map(String::as_str)
    }

    pub fn focus_order(&self) -> Vec<TaskField> {
        let mut order = vec![TaskField::Title, TaskField::Description];
        for i in 0..self.subtasks.len() {
            order.push(TaskField::Subtask(i));
            order.push(TaskField::RemoveSubtask(i));
        }
        order.push(TaskField::AddSubtask);
        if self.has_status() {
            order.push(TaskField::Status);
        }
        order.push(TaskField::Submit);
        order
    }

    pub fn focus_next(&mut self, forward: bool) {
        if let Some(next) = cycle_focus(&self.focus_order(), self.focus, forward) {
            self.focus = next;
        }
    }

    pub fn add_subtask(&mut self) {
        self.subtasks.push(SubtaskRow {
            id: None,
            is_completed: false,
            title: TextInput::default(),
        });
        self.focus = TaskField::Subtask(self.subtasks.len() - 1);
    }

    pub fn remove_subtask(&mut self, index: usize) {
        if index >= self.subtasks.len() {
            return;
        }
        self.subtasks.remove(index);
        self.errors.retain(|f| !matches!(f, Field::Subtask(_)));
        self.focus = match self.subtasks.len() {
            0 => TaskField::AddSubtask,
            n => TaskField::Subtask(index.min(n - 1)),
        };
    }

    pub fn cycle_status(&mut self, forward: bool) {
        let n = self.statuses.len();
        if n == 0 {
            return;
        }
        self.status = if forward {
            (self.status + 1) % n
        } else {
            (self.status + n - 1) % n
        };
    }

    pub fn focused_input(&mut self) -> Option<(Option<Field>, &mut TextInput)> {
        match self.focus {
            TaskField::Title => Some((Some(Field::Title), &mut self.title)),
            TaskField::Description => Some((None, &mut self.description)),
            TaskField::Subtask(i) => self
                .subtasks
                .get_mut(i)
                .map(|row| (Some(Field::Subtask(i)), &mut row.title)),
            _ => None,
        }
    }

    pub fn intent(&self) -> Intent {
        match self.editing {
            Some(id) => Intent::UpdateTask(TaskEdit {
                id,
                title: self.title.text.clone(),
                description: self.description.text.clone(),
                subtasks: self
                    .subtasks
                    .iter()
                    .map(|row| Subtask {
                        id: row.id.unwrap_or_default(),
                        title: row.title.text.clone(),
                        is_completed: row.is_completed,
                    })
                    .collect(),
            }),
            None => Intent::AddTask(TaskDraft {
                title: self.title.text.clone(),
                description: self.description.text.clone(),
                status: self.selected_status().map(str::to_string),
                subtasks: self.subtasks.iter().map(|r| r.title.text.clone()).collect(),
            }),
        }
    }
}

// ── Task detail ──

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailField {
    Subtask(usize),
    Status,
}

pub const DETAIL_MENU: [&str; 2] = ["Edit Task", "Delete Task"];

/// Read-only view of one task with checklist and status selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetail {
    pub task_id: TaskId,
    pub focus: DetailField,
    /// Cursor into DETAIL_MENU while the menu is open
    pub menu: Option<usize>,
}

impl TaskDetail {
    pub fn new(task: &Task) -> Self {
        TaskDetail {
            task_id: task.id,
            focus: if task.subtasks.is_empty() {
                DetailField::Status
            } else {
                DetailField::Subtask(0)
            },
            menu: None,
        }
    }

    pub fn focus_order(subtask_count: usize) -> Vec<DetailField> {
        let mut order: Vec<DetailField> = (0..subtask_count).map(DetailField::Subtask).collect();
        order.push(DetailField::Status);
        order
    }

    pub fn focus_next(&mut self, subtask_count: usize, forward: bool) {
        if let Some(next) = cycle_focus(&Self::focus_order(subtask_count), self.focus, forward) {
            self.focus = next;
        }
    }
}

// ── Delete confirmation and board menu ──

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Board { id: BoardId, name: String },
    Task { id: TaskId, title: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDelete {
    pub target: DeleteTarget,
    /// Delete button focused (otherwise Cancel)
    pub confirm_focused: bool,
}

impl ConfirmDelete {
    pub fn board(board: &Board) -> Self {
        ConfirmDelete {
            target: DeleteTarget::Board {
                id: board.id,
                name: board.name.clone(),
            },
            confirm_focused: true,
        }
    }

    pub fn task(task: &Task) -> Self {
        ConfirmDelete {
            target: DeleteTarget::Task {
                id: task.id,
                title: task.title.clone(),
            },
            confirm_focused: true,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.target {
            DeleteTarget::Board { .. } => "Delete this board?",
            DeleteTarget::Task { .. } => "Delete this task?",
        }
    }

    pub fn message(&self) -> String {
        match &self.target {
            DeleteTarget::Board { name, .. } => format!(
                "Are you sure you want to delete the '{}' board? This action will remove all columns and tasks and cannot be reversed.",
                name
            ),
            DeleteTarget::Task { title, .. } => format!(
                "Are you sure you want to delete the '{}' task and its subtasks? This action cannot be reversed.",
                title
            ),
        }
    }

    pub fn intent(&self) -> Intent {
        match &self.target {
            DeleteTarget::Board { id, .. } => Intent::DeleteBoard(*id),
            DeleteTarget::Task { id, .. } => Intent::DeleteTask(*id),
        }
    }
}

pub const BOARD_MENU: [&str; 2] = ["Edit Board", "Delete Board"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardMenu {
    pub cursor: usize,
}
