//! CLI enum types for palette, theme, and sizing options.

use clap::ValueEnum;

use crate::ascii::PaletteKind;
use crate::display::{DisplayTheme, SizingPolicy};

/// Built-in glyph palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PaletteArg {
    #[default]
    Classic,
    Standard,
    Blocks,
    Minimal,
}

impl PaletteArg {
    pub fn name(&self) -> &'static str {
        PaletteKind::from(*self).name()
    }
}

impl From<PaletteArg> for PaletteKind {
    fn from(p: PaletteArg) -> Self {
        match p {
            PaletteArg::Classic => PaletteKind::Classic,
            PaletteArg::Standard => PaletteKind::Standard,
            PaletteArg::Blocks => PaletteKind::Blocks,
            PaletteArg::Minimal => PaletteKind::Minimal,
        }
    }
}

/// Foreground color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ThemeArg {
    #[default]
    Default,
    Alt,
}

impl ThemeArg {
    pub fn name(&self) -> &'static str {
        DisplayTheme::from(*self).name()
    }
}

impl From<ThemeArg> for DisplayTheme {
    fn from(t: ThemeArg) -> Self {
        match t {
            ThemeArg::Default => DisplayTheme::Default,
            ThemeArg::Alt => DisplayTheme::Alt,
        }
    }
}

/// How the grid is fitted to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PolicyArg {
    FitWidth,
    #[default]
    FitBoth,
}

impl PolicyArg {
    pub fn name(&self) -> &'static str {
        SizingPolicy::from(*self).name()
    }
}

impl From<PolicyArg> for SizingPolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::FitWidth => SizingPolicy::FitWidth,
            PolicyArg::FitBoth => SizingPolicy::FitBoth,
        }
    }
}
