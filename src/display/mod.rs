//! How the glyph grid is presented: color theme and glyph sizing.

mod sizing;
mod theme;

pub use sizing::{
    fit_in_cells, fit_sampling, CharSize, CharSizer, GlyphMetrics, GridPlacement, SizingPolicy, Viewport,
    DEFAULT_MAX_CHAR_SIZE, DEFAULT_MIN_CHAR_SIZE, FALLBACK_CELL_HEIGHT_PX, FALLBACK_CELL_WIDTH_PX,
};
pub use theme::DisplayTheme;
