use serde::Serialize;

use crate::model::{Board, ColumnColor, Task};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct BoardSummaryJson {
    pub name: String,
    pub active: bool,
    pub columns: usize,
    pub tasks: usize,
}

#[derive(Serialize)]
pub struct BoardJson {
    pub name: String,
    pub columns: Vec<ColumnJson>,
}

#[derive(Serialize)]
pub struct ColumnJson {
    pub name: String,
    pub color: ColumnColor,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskJson {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub status: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<SubtaskJson>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskJson {
    pub title: String,
    pub is_completed: bool,
}

pub fn board_summary_json(board: &Board, active: bool) -> BoardSummaryJson {
    BoardSummaryJson {
        name: board.name.clone(),
        active,
        columns: board.columns.len(),
        tasks: board.task_count(),
    }
}

pub fn board_to_json(board: &Board) -> BoardJson {
    BoardJson {
        name: board.name.clone(),
        columns: board
            .columns
            .iter()
            .map(|c| ColumnJson {
                name: c.name.clone(),
                color: c.color,
                tasks: c.tasks.iter().map(task_to_json).collect(),
            })
            .collect(),
    }
}

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id.to_string(),
        title: task.title.clone(),
        description: task.description.clone(),
        status: task.status.clone(),
        subtasks: task
            .subtasks
            .iter()
            .map(|s| SubtaskJson {
                title: s.title.clone(),
                is_completed: s.is_completed,
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// One row per board: marker, padded name, counts
pub fn format_board_listing(boards: &[(&Board, bool)]) -> Vec<String> {
    let name_w = boards
        .iter()
        .map(|(b, _)| b.name.len())
        .max()
        .unwrap_or(0)
        .max(4); // "name"
    boards
        .iter()
        .map(|(board, active)| {
            let marker = if *active { '*' } else { ' ' };
            format!(
                "{} {:<name_w$}  {} columns  {} tasks",
                marker,
                board.name,
                board.columns.len(),
                board.task_count(),
                name_w = name_w
            )
        })
        .collect()
}

/// A task as one line, with its subtask progress when it has any
pub fn format_task_line(task: &Task) -> String {
    if task.subtasks.is_empty() {
        format!("- {}", task.title)
    } else {
        format!(
            "- {} [{}/{}]",
            task.title,
            task.completed_subtasks(),
            task.subtasks.len()
        )
    }
}

/// Board name, then each column with its tasks indented
pub fn format_board(board: &Board) -> Vec<String> {
    let mut lines = vec![board.name.clone()];
    if board.columns.is_empty() {
        lines.push("  (no columns)".to_string());
    }
    for column in &board.columns {
        lines.push(String::new());
        lines.push(format!("  {} ({})", column.name, column.tasks.len()));
        for task in &column.tasks {
            lines.push(format!("    {}", format_task_line(task)));
            for sub in &task.subtasks {
                let mark = if sub.is_completed { 'x' } else { ' ' };
                lines.push(format!("        [{}] {}", mark, sub.title));
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, Subtask};
    use pretty_assertions::assert_eq;

    fn board() -> Board {
        let mut board = Board::new("Roadmap");
        let mut now = Column::new("Now", ColumnColor::Color1);
        let mut task = Task::new("Launch", "Now");
        task.subtasks = vec![Subtask::new("Ship"), Subtask::new("Announce")];
        task.subtasks[0].is_completed = true;
        now.tasks.push(task);
        board.columns = vec![now, Column::new("Later", ColumnColor::Color2)];
        board
    }

    #[test]
    fn board_text_lists_columns_tasks_and_subtasks() {
        assert_eq!(
            format_board(&board()),
            vec![
                "Roadmap",
                "",
                "  Now (1)",
                "    - Launch [1/2]",
                "        [x] Ship",
                "        [ ] Announce",
                "",
                "  Later (0)",
            ]
        );
    }

    #[test]
    fn listing_pads_names_and_marks_active() {
        let a = board();
        let b = Board::new("Marketing Plan");
        let lines = format_board_listing(&[(&a, true), (&b, false)]);
        assert_eq!(lines[0], "* Roadmap         2 columns  1 tasks");
        assert_eq!(lines[1], "  Marketing Plan  0 columns  0 tasks");
    }

    #[test]
    fn json_uses_seed_field_names() {
        let json = serde_json::to_value(board_to_json(&board())).unwrap();
        assert_eq!(json["columns"][0]["color"], "color1");
        assert_eq!(json["columns"][0]["tasks"][0]["subtasks"][0]["isCompleted"], true);
        assert!(json["columns"][0]["tasks"][0].get("description").is_none());
    }
}
