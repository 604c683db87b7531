use serde::{Deserialize, Serialize};

use super::ids::{SubtaskId, TaskId};

/// A checklist item inside a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    #[serde(default)]
    pub id: SubtaskId,
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
}

impl Subtask {
    pub fn new(title: impl Into<String>) -> Self {
        Subtask {
            id: SubtaskId::new(),
            title: title.into(),
            is_completed: false,
        }
    }
}

/// A work item living in exactly one column.
///
/// `status` mirrors the name of the containing column. Only the move
/// operations in `ops::task_ops` change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

impl Task {
    pub fn new(title: impl Into<String>, status: impl Into<String>) -> Self {
        Task {
            id: TaskId::new(),
            title: title.into(),
            description: String::new(),
            status: status.into(),
            subtasks: Vec::new(),
        }
    }

    /// Number of subtasks marked completed
    pub fn completed_subtasks(&self) -> usize {
        self.subtasks.iter().filter(|s| s.is_completed).count()
    }

    /// "2 of 3 subtasks", or None when the task has no subtasks
    pub fn subtask_summary(&self) -> Option<String> {
        if self.subtasks.is_empty() {
            return None;
        }
        Some(format!(
            "{} of {} subtasks",
            self.completed_subtasks(),
            self.subtasks.len()
        ))
    }
}
