use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use crate::model::{Board, BoardId, Column, ColumnColor, ColumnId, KanbanState, Task};
use crate::ops::validate::{self, ValidationErrors};

/// The dataset shown when no seed file is given
const DEMO_SEED: &str = include_str!("../data/demo.json");

/// Error type for loading an initial dataset
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse seed data: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("invalid board \"{board}\": {errors}")]
    InvalidBoard {
        board: String,
        errors: ValidationErrors,
    },
    #[error("id {0} is used more than once")]
    DuplicateId(Uuid),
}

/// On-disk shape of a seed file. Ids and colors may be left out.
#[derive(Debug, Deserialize)]
struct SeedFile {
    boards: Vec<SeedBoard>,
}

#[derive(Debug, Deserialize)]
struct SeedBoard {
    #[serde(default)]
    id: Option<BoardId>,
    name: String,
    #[serde(default)]
    columns: Vec<SeedColumn>,
}

#[derive(Debug, Deserialize)]
struct SeedColumn {
    #[serde(default)]
    id: Option<ColumnId>,
    name: String,
    #[serde(default)]
    color: Option<ColumnColor>,
    #[serde(default)]
    tasks: Vec<Task>,
}

/// The built-in demo boards
pub fn demo() -> Result<KanbanState, SeedError> {
    parse_seed(DEMO_SEED)
}

/// Load the seed file at `path`, or the demo boards when there is none
pub fn load(path: Option<&Path>) -> Result<KanbanState, SeedError> {
    match path {
        Some(path) => load_seed(path),
        None => demo(),
    }
}

pub fn load_seed(path: &Path) -> Result<KanbanState, SeedError> {
    let text = fs::read_to_string(path).map_err(|e| SeedError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let state = parse_seed(&text)?;
    tracing::info!(path = %path.display(), boards = state.boards.len(), "loaded seed file");
    Ok(state)
}

/// Parse and normalize seed JSON.
///
/// Missing ids are generated, a missing column color becomes the color
/// for the column's position, and every task's status is set to the name
/// of the column holding it. Boards are then checked with the same rules
/// as a newly added board.
pub fn parse_seed(text: &str) -> Result<KanbanState, SeedError> {
    let file: SeedFile = serde_json::from_str(text)?;

    let mut boards: Vec<Arc<Board>> = Vec::with_capacity(file.boards.len());
    for seed in file.boards {
        let columns: Vec<Column> = seed
            .columns
            .into_iter()
            .enumerate()
            .map(|(i, col)| {
                let name = col.name.trim().to_string();
                let tasks = col
                    .tasks
                    .into_iter()
                    .map(|mut task| {
                        task.status = name.clone();
                        task
                    })
                    .collect();
                Column {
                    id: col.id.unwrap_or_default(),
                    color: col.color.unwrap_or(ColumnColor::for_index(i)),
                    name,
                    tasks,
                }
            })
            .collect();

        if let Err(errors) = validate::check_board(
            &seed.name,
            columns.iter().map(|c| c.name.as_str()),
            &boards,
            None,
        ) {
            tracing::warn!(board = %seed.name, %errors, "rejected seed board");
            return Err(SeedError::InvalidBoard {
                board: seed.name,
                errors,
            });
        }

        boards.push(Arc::new(Board {
            id: seed.id.unwrap_or_default(),
            name: seed.name.trim().to_string(),
            columns,
        }));
    }

    check_unique_ids(&boards)?;
    Ok(KanbanState {
        active: boards.first().map(|b| b.id),
        boards,
    })
}

fn check_unique_ids(boards: &[Arc<Board>]) -> Result<(), SeedError> {
    let mut seen = HashSet::new();
    let mut claim = |id: &Uuid| {
        if seen.insert(*id) {
            Ok(())
        } else {
            Err(SeedError::DuplicateId(*id))
        }
    };
    for board in boards {
        claim(board.id.as_uuid())?;
        for column in &board.columns {
            claim(column.id.as_uuid())?;
            for task in &column.tasks {
                claim(task.id.as_uuid())?;
                for sub in &task.subtasks {
                    claim(sub.id.as_uuid())?;
                }
            }
        }
    }
    Ok(())
}
