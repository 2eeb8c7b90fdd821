//! ASCII renderer module for converting camera frames to glyph grids.
//!
//! The per-tick conversion runs in two stages:
//!
//! 1. **Sampling** - [`FrameSampler`] draws the mirrored frame into an RGBA
//!    surface of [`SamplingConfig`] cells
//! 2. **Glyph mapping** - [`map_to_grid`] turns each cell's mean luminance
//!    into a glyph from a [`Palette`] and joins rows with newlines
//!
//! # Palettes
//!
//! Built-in palettes are available via [`PaletteKind`]:
//! - `Classic` - 12-level dense-to-sparse ramp (default)
//! - `Standard` - 10-level ASCII density ramp
//! - `Blocks` - Unicode block characters
//! - `Minimal` - 4-level clean look

mod grid;
mod mapper;
mod palette;
mod sampler;
mod sampling;

pub use grid::RenderedGrid;
pub use mapper::{glyph_index, map_into, map_to_grid};
pub use palette::{
    Palette, PaletteError, PaletteKind, BLOCKS_GLYPHS, CLASSIC_GLYPHS, MINIMAL_GLYPHS,
    MIN_PALETTE_LEN, STANDARD_GLYPHS,
};
pub use sampler::{FrameSampler, SampleError};
pub use sampling::{SamplingConfig, SamplingError, BYTES_PER_CELL};
