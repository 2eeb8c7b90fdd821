//! Foreground color theme for the glyph grid.

use ratatui::style::Color;

/// Color theme of the rendered grid. Only the foreground changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayTheme {
    /// White glyphs
    #[default]
    Default,
    /// Green "terminal" glyphs
    Alt,
}

impl DisplayTheme {
    pub fn toggle(&self) -> Self {
        match self {
            DisplayTheme::Default => DisplayTheme::Alt,
            DisplayTheme::Alt => DisplayTheme::Default,
        }
    }

    pub fn foreground(&self) -> Color {
        match self {
            DisplayTheme::Default => Color::White,
            DisplayTheme::Alt => Color::Green,
        }
    }

    /// 24-bit foreground color as RGB, used for exported text.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            DisplayTheme::Default => (0xff, 0xff, 0xff),
            DisplayTheme::Alt => (0x00, 0xff, 0x00),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DisplayTheme::Default => "default",
            DisplayTheme::Alt => "alt",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "default" | "white" => Some(DisplayTheme::Default),
            "alt" | "green" => Some(DisplayTheme::Alt),
            _ => None,
        }
    }
}
