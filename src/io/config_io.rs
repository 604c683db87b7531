use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::KanbanConfig;

/// Error type for reading config.toml
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// `$XDG_CONFIG_HOME/kanban/config.toml` (or the platform equivalent)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("kanban").join("config.toml"))
}

/// Load configuration.
///
/// An explicit path must exist. The default location is optional: when
/// there is no file there the defaults are used.
pub fn load_config(explicit: Option<&Path>) -> Result<KanbanConfig, ConfigError> {
    match explicit {
        Some(path) => read_config(path),
        None => match default_config_path() {
            Some(path) if path.is_file() => read_config(&path),
            _ => Ok(KanbanConfig::default()),
        },
    }
}

/// Read and parse one config file
pub fn read_config(path: &Path) -> Result<KanbanConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::ThemeChoice;
    use tempfile::TempDir;

    #[test]
    fn reads_partial_file_with_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[ui]\ntheme = \"light\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.ui.theme, ThemeChoice::Light);
        assert!(config.ui.sidebar);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(Some(&tmp.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn malformed_file_reports_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[ui\ntheme = ").unwrap();

        let err = read_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn unknown_theme_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[ui]\ntheme = \"sepia\"\n").unwrap();
        assert!(read_config(&path).is_err());
    }

    #[test]
    fn default_path_ends_in_kanban_dir() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("kanban/config.toml"));
        }
    }
}
