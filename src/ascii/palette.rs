//! Glyph palettes for luminance mapping.

use std::sync::Arc;
use thiserror::Error;

// Every built-in ramp runs dense to sparse: the densest glyph marks the
// darkest cells and a space the brightest, so cycling keeps the polarity.

/// Classic 12-level ramp, index 0 is used for the darkest cells.
pub const CLASSIC_GLYPHS: &str = "@#S%?*+;:,. ";

/// Standard ASCII density ramp (10 levels).
pub const STANDARD_GLYPHS: &str = "@%#*+=-:. ";

/// Unicode block characters (5 levels).
pub const BLOCKS_GLYPHS: &str = "█▓▒░ ";

/// Minimal ramp (4 levels) for a clean look.
pub const MINIMAL_GLYPHS: &str = "#:. ";

/// Smallest usable palette length.
pub const MIN_PALETTE_LEN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("palette needs at least {MIN_PALETTE_LEN} glyphs, got {0}")]
    TooShort(usize),
    #[error("palette glyphs must not contain control characters")]
    ControlChar,
    #[error("unknown palette '{0}'. Available palettes: classic, standard, blocks, minimal")]
    UnknownName(String),
}

/// Built-in palettes selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteKind {
    #[default]
    Classic,
    Standard,
    Blocks,
    Minimal,
}

impl PaletteKind {
    pub const ALL: [PaletteKind; 4] = [
        PaletteKind::Classic,
        PaletteKind::Standard,
        PaletteKind::Blocks,
        PaletteKind::Minimal,
    ];

    pub fn glyphs(&self) -> &'static str {
        match self {
            PaletteKind::Classic => CLASSIC_GLYPHS,
            PaletteKind::Standard => STANDARD_GLYPHS,
            PaletteKind::Blocks => BLOCKS_GLYPHS,
            PaletteKind::Minimal => MINIMAL_GLYPHS,
        }
    }

    /// Order: Classic -> Standard -> Blocks -> Minimal -> Classic
    pub fn next(&self) -> Self {
        match self {
            PaletteKind::Classic => PaletteKind::Standard,
            PaletteKind::Standard => PaletteKind::Blocks,
            PaletteKind::Blocks => PaletteKind::Minimal,
            PaletteKind::Minimal => PaletteKind::Classic,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PaletteKind::Classic => "classic",
            PaletteKind::Standard => "standard",
            PaletteKind::Blocks => "blocks",
            PaletteKind::Minimal => "minimal",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// An ordered sequence of at least two glyphs.
///
/// Index 0 is used for luminance 0 and the last glyph for luminance 255.
/// Clones share the glyph storage, so a palette can ride along in every
/// settings snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    kind: Option<PaletteKind>,
    glyphs: Arc<[char]>,
}

impl Palette {
    pub fn named(kind: PaletteKind) -> Self {
        Self {
            kind: Some(kind),
            glyphs: kind.glyphs().chars().collect(),
        }
    }

    /// Build a palette from user-provided glyphs.
    pub fn custom(glyphs: &str) -> Result<Self, PaletteError> {
        let glyphs: Arc<[char]> = glyphs.chars().collect();
        if glyphs.len() < MIN_PALETTE_LEN {
            return Err(PaletteError::TooShort(glyphs.len()));
        }
        if glyphs.iter().any(|c| c.is_control()) {
            return Err(PaletteError::ControlChar);
        }
        Ok(Self { kind: None, glyphs })
    }

    /// Resolve a built-in palette by name.
    pub fn from_name(name: &str) -> Result<Self, PaletteError> {
        PaletteKind::from_name(name)
            .map(Self::named)
            .ok_or_else(|| PaletteError::UnknownName(name.to_string()))
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn kind(&self) -> Option<PaletteKind> {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.map(|k| k.name()).unwrap_or("custom")
    }

    /// Glyph at `index`, clamped to the last glyph.
    #[inline]
    pub fn glyph(&self, index: usize) -> char {
        self.glyphs[index.min(self.glyphs.len() - 1)]
    }

    /// The palette that follows this one when cycling.
    ///
    /// Custom palettes cycle back to the first built-in palette.
    pub fn next(&self) -> Self {
        match self.kind {
            Some(kind) => Self::named(kind.next()),
            None => Self::named(PaletteKind::Classic),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::named(PaletteKind::default())
    }
}
