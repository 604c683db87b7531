use std::fs;
use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

use crate::model::config::LogConfig;

/// Environment variable that overrides `[log] level`
pub const LOG_ENV: &str = "KANBAN_LOG";

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("invalid log filter \"{filter}\": {source}")]
    InvalidFilter {
        filter: String,
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("could not create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not start logging: {0}")]
    Init(String),
}

/// `<data_local_dir>/kanban/kanban.log`
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("kanban").join("kanban.log"))
}

/// Where the log goes, or None when logging is off
pub fn log_path(config: &LogConfig) -> Option<PathBuf> {
    if !config.enabled {
        return None;
    }
    config.file.clone().or_else(default_log_path)
}

/// Filter from `KANBAN_LOG` when set, otherwise the configured level
pub fn build_filter(level: &str, env_override: Option<&str>) -> Result<EnvFilter, LogError> {
    let filter = env_override
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(level);
    EnvFilter::try_new(filter).map_err(|e| LogError::InvalidFilter {
        filter: filter.to_string(),
        source: e,
    })
}

/// Install the global subscriber writing to the log file.
///
/// The terminal belongs to the UI, so nothing is ever logged to
/// stdout/stderr. Returns the log file path when logging is on.
pub fn init(config: &LogConfig) -> Result<Option<PathBuf>, LogError> {
    let Some(path) = log_path(config) else {
        return Ok(None);
    };
    let dir = path.parent().unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "kanban.log".into());
    fs::create_dir_all(dir).map_err(|e| LogError::CreateDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let env = std::env::var(LOG_ENV).ok();
    let filter = build_filter(&config.level, env.as_deref())?;
    let appender = tracing_appender::rolling::never(dir, file_name);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(appender)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| LogError::Init(e.to_string()))?;
    Ok(Some(path))
}
