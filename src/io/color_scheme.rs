//! Start-up theme preference: config choice, then the terminal's
//! `COLORFGBG` hint, then dark.

use crate::model::config::ThemeChoice;

/// Which palette to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Dark,
    Light,
}

impl ColorScheme {
    pub fn is_dark(self) -> bool {
        self == ColorScheme::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            ColorScheme::Dark => ColorScheme::Light,
            ColorScheme::Light => ColorScheme::Dark,
        }
    }
}

/// Interpret a `COLORFGBG` value (`"fg;bg"` or `"fg;default;bg"`).
///
/// The background is the last field; ANSI indices 0-6 and 8 are dark
/// backgrounds, everything else is light.
pub fn parse_colorfgbg(value: &str) -> Option<ColorScheme> {
    let bg = value.rsplit(';').next()?.trim();
    let index: u8 = bg.parse().ok()?;
    match index {
        0..=6 | 8 => Some(ColorScheme::Dark),
        _ => Some(ColorScheme::Light),
    }
}

/// Ask the environment for a preference
pub fn detect() -> Option<ColorScheme> {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|v| parse_colorfgbg(&v))
}

/// Resolve the configured choice; `auto` falls back to dark when the
/// terminal gives no signal.
pub fn resolve(choice: ThemeChoice, detected: Option<ColorScheme>) -> ColorScheme {
    match choice {
        ThemeChoice::Dark => ColorScheme::Dark,
        ThemeChoice::Light => ColorScheme::Light,
        ThemeChoice::Auto => detected.unwrap_or(ColorScheme::Dark),
    }
}
