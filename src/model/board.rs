use serde::{Deserialize, Serialize};

use super::ids::{BoardId, ColumnId, TaskId};
use super::task::Task;

/// Maximum number of columns a board may have
pub const MAX_COLUMNS: usize = 5;

/// Maximum length of a column name, in characters
pub const MAX_COLUMN_NAME_LEN: usize = 45;

/// The fixed palette a column dot is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnColor {
    #[default]
    Color1,
    Color2,
    Color3,
    Color4,
    Color5,
}

impl ColumnColor {
    pub const ALL: [ColumnColor; 5] = [
        ColumnColor::Color1,
        ColumnColor::Color2,
        ColumnColor::Color3,
        ColumnColor::Color4,
        ColumnColor::Color5,
    ];

    /// Color for the column added at position `index`
    pub fn for_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Next color in the cycle (color5 wraps to color1)
    pub fn next(self) -> Self {
        Self::for_index(self.index() + 1)
    }

    pub fn index(self) -> usize {
        match self {
            ColumnColor::Color1 => 0,
            ColumnColor::Color2 => 1,
            ColumnColor::Color3 => 2,
            ColumnColor::Color4 => 3,
            ColumnColor::Color5 => 4,
        }
    }
}

/// A named lane holding tasks in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    #[serde(default)]
    pub id: ColumnId,
    pub name: String,
    #[serde(default)]
    pub color: ColumnColor,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Column {
    pub fn new(name: impl Into<String>, color: ColumnColor) -> Self {
        Column {
            id: ColumnId::new(),
            name: name.into(),
            color,
            tasks: Vec::new(),
        }
    }

    pub fn position_of(&self, task_id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }
}

/// A board: a named, ordered set of columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub id: BoardId,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Board {
    pub fn new(name: impl Into<String>) -> Self {
        Board {
            id: BoardId::new(),
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Find a column by its exact name
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// (column index, task index) of a task on this board
    pub fn locate_task(&self, task_id: TaskId) -> Option<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(ci, col)| col.position_of(task_id).map(|ti| (ci, ti)))
    }

    pub fn column_of_task(&self, task_id: TaskId) -> Option<&Column> {
        self.locate_task(task_id).map(|(ci, _)| &self.columns[ci])
    }

    pub fn find_task(&self, task_id: TaskId) -> Option<&Task> {
        self.locate_task(task_id)
            .map(|(ci, ti)| &self.columns[ci].tasks[ti])
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_cycles_through_all_five() {
        let mut color = ColumnColor::Color1;
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(color);
            color = color.next();
        }
        assert_eq!(seen, ColumnColor::ALL.to_vec());
        assert_eq!(color, ColumnColor::Color1);
    }

    #[test]
    fn color_for_index_wraps() {
        assert_eq!(ColumnColor::for_index(0), ColumnColor::Color1);
        assert_eq!(ColumnColor::for_index(4), ColumnColor::Color5);
        assert_eq!(ColumnColor::for_index(7), ColumnColor::Color3);
    }

    #[test]
    fn color_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ColumnColor::Color4).unwrap(),
            "\"color4\""
        );
    }

    #[test]
    fn locate_task_across_columns() {
        let mut board = Board::new("Demo");
        board.columns.push(Column::new("Todo", ColumnColor::Color1));
        board.columns.push(Column::new("Done", ColumnColor::Color2));
        let task = Task::new("Ship", "Done");
        let id = task.id;
        board.columns[1].tasks.push(task);

        assert_eq!(board.locate_task(id), Some((1, 0)));
        assert_eq!(board.column_of_task(id).map(|c| c.name.as_str()), Some("Done"));
        assert_eq!(board.find_task(id).map(|t| t.title.as_str()), Some("Ship"));
        assert_eq!(board.task_count(), 1);
        assert!(board.locate_task(TaskId::new()).is_none());
    }
}
