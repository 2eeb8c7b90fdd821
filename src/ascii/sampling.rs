//! Sampling resolution for the character grid.

use thiserror::Error;

/// Width-to-height ratio of the sampled grid (16:9).
pub const ASPECT_NUMERATOR: u32 = 9;
pub const ASPECT_DENOMINATOR: u32 = 16;

/// Bytes per sampled cell in the offscreen surface (R, G, B, A).
pub const BYTES_PER_CELL: usize = 4;

/// Errors produced when building a [`SamplingConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SamplingError {
    #[error("sampling width must be at least 1 character")]
    ZeroWidth,
}

/// Number of sampled cells per row and per column.
///
/// The height is never set directly: it is always derived from the width
/// through the fixed 16:9 aspect ratio, and both are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplingConfig {
    width: u16,
    height: u16,
}

impl SamplingConfig {
    /// Build a config for `width` characters per row.
    ///
    /// `height = round(width * 9 / 16)`, floored at 1.
    pub fn from_width(width: u16) -> Result<Self, SamplingError> {
        if width == 0 {
            return Err(SamplingError::ZeroWidth);
        }
        Ok(Self {
            width,
            height: derive_height(width),
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Widest width whose derived height is at most `rows` (0 when none is).
    pub fn max_width_for_rows(rows: u16) -> u16 {
        // round-half-up(w * 9 / 16) <= rows  <=>  9w + 8 < 16 * (rows + 1)
        let limit = ASPECT_DENOMINATOR * (rows as u32 + 1) - ASPECT_DENOMINATOR / 2 - 1;
        (limit / ASPECT_NUMERATOR).min(u16::MAX as u32) as u16
    }

    /// Total number of sampled cells (`width * height`).
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Length of the RGBA buffer holding one sampled frame.
    pub fn buffer_len(&self) -> usize {
        self.cell_count() * BYTES_PER_CELL
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: derive_height(100),
        }
    }
}

impl std::fmt::Display for SamplingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Round-half-up of `width * 9 / 16` in integer math.
fn derive_height(width: u16) -> u16 {
    let scaled = width as u32 * ASPECT_NUMERATOR;
    let rounded = (scaled + ASPECT_DENOMINATOR / 2) / ASPECT_DENOMINATOR;
    rounded.clamp(1, u16::MAX as u32) as u16
}
