use ratatui::style::Color;

use crate::io::color_scheme::ColorScheme;
use crate::model::{ColumnColor, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    /// Cards, sidebar, modals
    pub surface: Color,
    pub text: Color,
    pub text_dim: Color,
    pub accent: Color,
    pub destructive: Color,
    pub lines: Color,
    pub selection: Color,
    /// Dot colors for `color1`..`color5`
    pub columns: [Color; 5],
}

const COLUMN_DOTS: [Color; 5] = [
    Color::Rgb(0x49, 0xC4, 0xE5),
    Color::Rgb(0x84, 0x71, 0xF2),
    Color::Rgb(0x67, 0xE2, 0xAE),
    Color::Rgb(0xE5, 0xA4, 0x49),
    Color::Rgb(0xE5, 0x49, 0x8A),
];

impl Theme {
    pub fn dark() -> Self {
        Theme {
            background: Color::Rgb(0x20, 0x21, 0x2C),
            surface: Color::Rgb(0x2B, 0x2C, 0x37),
            text: Color::Rgb(0xFF, 0xFF, 0xFF),
            text_dim: Color::Rgb(0x82, 0x8F, 0xA3),
            accent: Color::Rgb(0x63, 0x5F, 0xC7),
            destructive: Color::Rgb(0xEA, 0x55, 0x55),
            lines: Color::Rgb(0x3E, 0x3F, 0x4E),
            selection: Color::Rgb(0x3B, 0x39, 0x6B),
            columns: COLUMN_DOTS,
        }
    }

    pub fn light() -> Self {
        Theme {
            background: Color::Rgb(0xF4, 0xF7, 0xFD),
            surface: Color::Rgb(0xFF, 0xFF, 0xFF),
            text: Color::Rgb(0x00, 0x01, 0x12),
            text_dim: Color::Rgb(0x82, 0x8F, 0xA3),
            accent: Color::Rgb(0x63, 0x5F, 0xC7),
            destructive: Color::Rgb(0xEA, 0x55, 0x55),
            lines: Color::Rgb(0xE4, 0xEB, 0xFA),
            selection: Color::Rgb(0xD8, 0xD7, 0xF1),
            columns: COLUMN_DOTS,
        }
    }

    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Dark => Theme::dark(),
            ColorScheme::Light => Theme::light(),
        }
    }

    /// Palette for `scheme` with `[ui.colors]` overrides applied
    pub fn from_config(ui: &UiConfig, scheme: ColorScheme) -> Self {
        let mut theme = Theme::for_scheme(scheme);

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key = %key, value = %value, "ignoring invalid color override");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "surface" => theme.surface = color,
                "text" => theme.text = color,
                "text_dim" => theme.text_dim = color,
                "accent" => theme.accent = color,
                "destructive" => theme.destructive = color,
                "lines" => theme.lines = color,
                "selection" => theme.selection = color,
                "color1" => theme.columns[0] = color,
                "color2" => theme.columns[1] = color,
                "color3" => theme.columns[2] = color,
                "color4" => theme.columns[3] = color,
                "color5" => theme.columns[4] = color,
                _ => {}
            }
        }

        theme
    }

    pub fn column_color(&self, color: ColumnColor) -> Color {
        self.columns[color.index()]
    }
}

/// Parse a hex color string like "#635FC7" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
