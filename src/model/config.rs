use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KanbanConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Which palette to start in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Follow the terminal's color-scheme signal
    #[default]
    Auto,
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: ThemeChoice,
    /// Start with the board sidebar open
    #[serde(default = "default_true")]
    pub sidebar: bool,
    /// Cells the pointer must travel before a press becomes a drag
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: u16,
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex overrides for theme roles, e.g. `accent = "#635FC7"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            theme: ThemeChoice::Auto,
            sidebar: true,
            drag_threshold: default_drag_threshold(),
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// EnvFilter directive, e.g. "info" or "kanban=debug"
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path; defaults to the platform data directory
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            enabled: true,
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_drag_threshold() -> u16 {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}
