use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::model::{Board, BoardId, MAX_COLUMNS, MAX_COLUMN_NAME_LEN};

/// A single field-level validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("can't be empty")]
    Empty,
    #[error("already exists")]
    Duplicate,
    #[error("max {max} characters")]
    TooLong { max: usize },
    #[error("max {max} columns")]
    TooMany { max: usize },
    #[error("board has no columns")]
    NoColumns,
}

/// The form field a validation error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    BoardName,
    /// Column name at a position in the submitted column list
    Column(usize),
    /// The column list as a whole
    Columns,
    Title,
    /// Subtask title at a position in the submitted subtask list
    Subtask(usize),
    Status,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::BoardName => write!(f, "board name"),
            Field::Column(i) => write!(f, "column {}", i + 1),
            Field::Columns => write!(f, "columns"),
            Field::Title => write!(f, "title"),
            Field::Subtask(i) => write!(f, "subtask {}", i + 1),
            Field::Status => write!(f, "status"),
        }
    }
}

/// Errors keyed by field, in the order they were found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: IndexMap<Field, ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error; the first error reported for a field wins
    pub fn add(&mut self, field: Field, error: ValidationError) {
        self.errors.entry(field).or_insert(error);
    }

    pub fn get(&self, field: Field) -> Option<ValidationError> {
        self.errors.get(&field).copied()
    }

    pub fn clear(&mut self, field: Field) {
        self.errors.shift_remove(&field);
    }

    /// Keep only errors whose field passes `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(Field) -> bool) {
        self.errors.retain(|f, _| keep(*f));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, ValidationError)> + '_ {
        self.errors.iter().map(|(f, e)| (*f, *e))
    }

    /// Ok(()) when nothing was recorded, otherwise Err(self)
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, err)| format!("{}: {}", field, err))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Board name must be non-empty and unique (case-insensitive) among
/// `boards`, ignoring the board being edited.
pub fn check_board_name(
    name: &str,
    boards: &[Arc<Board>],
    editing: Option<BoardId>,
) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    let duplicate = boards
        .iter()
        .filter(|b| Some(b.id) != editing)
        .any(|b| same_name(&b.name, trimmed));
    if duplicate {
        return Err(ValidationError::Duplicate);
    }
    Ok(())
}

/// A single column name, checked in isolation
pub fn check_column_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    if trimmed.chars().count() > MAX_COLUMN_NAME_LEN {
        return Err(ValidationError::TooLong {
            max: MAX_COLUMN_NAME_LEN,
        });
    }
    Ok(())
}

/// Check a full column list: count, each name, and duplicates within the list.
/// The later of two clashing names carries the `Duplicate` error.
pub fn check_columns<'a>(names: impl IntoIterator<Item = &'a str>, errors: &mut ValidationErrors) {
    let names: Vec<&str> = names.into_iter().collect();
    if names.len() > MAX_COLUMNS {
        errors.add(Field::Columns, ValidationError::TooMany { max: MAX_COLUMNS });
    }
    for (i, name) in names.iter().enumerate() {
        if let Err(e) = check_column_name(name) {
            errors.add(Field::Column(i), e);
            continue;
        }
        if names[..i].iter().any(|earlier| same_name(earlier, name)) {
            errors.add(Field::Column(i), ValidationError::Duplicate);
        }
    }
}

/// Validate a whole board draft
pub fn check_board<'a>(
    name: &str,
    column_names: impl IntoIterator<Item = &'a str>,
    boards: &[Arc<Board>],
    editing: Option<BoardId>,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if let Err(e) = check_board_name(name, boards, editing) {
        errors.add(Field::BoardName, e);
    }
    check_columns(column_names, &mut errors);
    errors.into_result()
}

/// Task title must be non-empty after trimming
pub fn check_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        Err(ValidationError::Empty)
    } else {
        Ok(())
    }
}

/// Validate a task draft. Blank subtasks are reported only when
/// `strict_subtasks` is set; otherwise callers drop them.
pub fn check_task<'a>(
    title: &str,
    subtask_titles: impl IntoIterator<Item = &'a str>,
    strict_subtasks: bool,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if let Err(e) = check_title(title) {
        errors.add(Field::Title, e);
    }
    if strict_subtasks {
        for (i, sub) in subtask_titles.into_iter().enumerate() {
            if sub.trim().is_empty() {
                errors.add(Field::Subtask(i), ValidationError::Empty);
            }
        }
    }
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boards(names: &[&str]) -> Vec<Arc<Board>> {
        names.iter().map(|n| Arc::new(Board::new(*n))).collect()
    }

    #[test]
    fn board_name_empty_and_whitespace() {
        assert_eq!(check_board_name("", &[], None), Err(ValidationError::Empty));
        assert_eq!(check_board_name("   ", &[], None), Err(ValidationError::Empty));
    }

    #[test]
    fn board_name_duplicate_is_case_insensitive() {
        let existing = boards(&["Platform Launch"]);
        assert_eq!(
            check_board_name("platform launch", &existing, None),
            Err(ValidationError::Duplicate)
        );
        assert_eq!(
            check_board_name("  PLATFORM LAUNCH ", &existing, None),
            Err(ValidationError::Duplicate)
        );
        assert!(check_board_name("Roadmap", &existing, None).is_ok());
    }

    #[test]
    fn board_name_excludes_board_being_edited() {
        let existing = boards(&["Platform Launch", "Roadmap"]);
        let editing = existing[0].id;
        assert!(check_board_name("platform launch", &existing, Some(editing)).is_ok());
        assert_eq!(
            check_board_name("roadmap", &existing, Some(editing)),
            Err(ValidationError::Duplicate)
        );
    }

    #[test]
    fn column_name_length_limit() {
        let ok = "x".repeat(MAX_COLUMN_NAME_LEN);
        let long = "x".repeat(MAX_COLUMN_NAME_LEN + 1);
        assert!(check_column_name(&ok).is_ok());
        assert_eq!(
            check_column_name(&long),
            Err(ValidationError::TooLong { max: 45 })
        );
    }

    #[test]
    fn columns_flag_later_duplicate_and_blank() {
        let mut errors = ValidationErrors::new();
        check_columns(["Todo", "", "todo"], &mut errors);
        assert_eq!(errors.get(Field::Column(0)), None);
        assert_eq!(errors.get(Field::Column(1)), Some(ValidationError::Empty));
        assert_eq!(errors.get(Field::Column(2)), Some(ValidationError::Duplicate));
    }

    #[test]
    fn columns_over_limit() {
        let mut errors = ValidationErrors::new();
        check_columns(["a", "b", "c", "d", "e", "f"], &mut errors);
        assert_eq!(
            errors.get(Field::Columns),
            Some(ValidationError::TooMany { max: 5 })
        );
    }

    #[test]
    fn first_error_per_field_wins() {
        let mut errors = ValidationErrors::new();
        errors.add(Field::Title, ValidationError::Empty);
        errors.add(Field::Title, ValidationError::Duplicate);
        assert_eq!(errors.get(Field::Title), Some(ValidationError::Empty));
        assert_eq!(errors.len(), 1);
        errors.clear(Field::Title);
        assert!(errors.is_empty());
    }

    #[test]
    fn task_checks() {
        assert!(check_task("Do it", ["", "x"], false).is_ok());
        let errors = check_task(" ", ["", "x"], true).unwrap_err();
        assert_eq!(errors.get(Field::Title), Some(ValidationError::Empty));
        assert_eq!(errors.get(Field::Subtask(0)), Some(ValidationError::Empty));
        assert_eq!(errors.get(Field::Subtask(1)), None);
    }

    #[test]
    fn display_joins_fields() {
        let errors = check_board("", ["ok", "OK"], &[], None).unwrap_err();
        assert_eq!(
            errors.to_string(),
            "board name: can't be empty, column 2: already exists"
        );
    }
}
