//! Character sizing and placement of the glyph grid on the display surface.
//!
//! Glyphs are drawn at one uniform size (no per-axis stretch). The size is
//! chosen so the whole grid fits the available surface, clamped to a
//! legible minimum and a maximum.

use ratatui::layout::Rect;

use crate::ascii::SamplingConfig;

/// Default smallest glyph size, in pixels.
pub const DEFAULT_MIN_CHAR_SIZE: f32 = 4.0;
/// Default largest glyph size, in pixels.
pub const DEFAULT_MAX_CHAR_SIZE: f32 = 32.0;

/// Pixel size assumed for a terminal cell when the terminal does not report one.
pub const FALLBACK_CELL_WIDTH_PX: u16 = 8;
pub const FALLBACK_CELL_HEIGHT_PX: u16 = 16;

/// Glyph box dimensions as ratios of the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    /// Horizontal advance per glyph (typical monospace: ~0.6)
    pub advance: f32,
    /// Line height per row
    pub line_height: f32,
}

impl Default for GlyphMetrics {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.0,
        }
    }
}

/// Which dimensions the grid is fitted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizingPolicy {
    /// Fit the grid width only; rows may overflow vertically
    FitWidth,
    /// Fit both width and height
    #[default]
    FitBoth,
}

impl SizingPolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fit-width" | "width" => Some(SizingPolicy::FitWidth),
            "fit-both" | "both" => Some(SizingPolicy::FitBoth),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SizingPolicy::FitWidth => "fit-width",
            SizingPolicy::FitBoth => "fit-both",
        }
    }
}

/// Available drawing area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Pixel viewport of a terminal area.
    ///
    /// `window_px` is the terminal's reported pixel size for `term_cols` x
    /// `term_rows` cells; zero means unknown and the fallback cell size is used.
    pub fn from_terminal(area: Rect, term_cols: u16, term_rows: u16, window_px: (u16, u16)) -> Self {
        let (cell_w, cell_h) = match window_px {
            (w, h) if w > 0 && h > 0 && term_cols > 0 && term_rows > 0 => (
                w as f32 / term_cols as f32,
                h as f32 / term_rows as f32,
            ),
            _ => (FALLBACK_CELL_WIDTH_PX as f32, FALLBACK_CELL_HEIGHT_PX as f32),
        };
        Self {
            width: area.width as f32 * cell_w,
            height: area.height as f32 * cell_h,
        }
    }
}

/// Result of a sizing pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharSize {
    /// Uniform glyph size (font size) in pixels
    pub size: f32,
    /// True when the grid does not fit even at `size`
    pub overflows: bool,
}

/// Computes the glyph size for a sampling config and viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharSizer {
    pub min: f32,
    pub max: f32,
    pub policy: SizingPolicy,
    pub metrics: GlyphMetrics,
}

impl Default for CharSizer {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_CHAR_SIZE,
            max: DEFAULT_MAX_CHAR_SIZE,
            policy: SizingPolicy::default(),
            metrics: GlyphMetrics::default(),
        }
    }
}

impl CharSizer {
    /// Build a sizer, swapping `min`/`max` if given in the wrong order.
    pub fn new(min: f32, max: f32, policy: SizingPolicy) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min: min.max(f32::EPSILON),
            max,
            policy,
            metrics: GlyphMetrics::default(),
        }
    }

    /// Largest uniform glyph size that fits `sampling` into `viewport`,
    /// clamped to `[min, max]`.
    pub fn size_for(&self, viewport: Viewport, sampling: SamplingConfig) -> CharSize {
        let grid_w = sampling.width() as f32 * self.metrics.advance;
        let grid_h = sampling.height() as f32 * self.metrics.line_height;

        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return CharSize {
                size: self.min,
                overflows: true,
            };
        }

        let by_width = viewport.width / grid_w;
        let by_height = viewport.height / grid_h;
        let fitted = match self.policy {
            SizingPolicy::FitWidth => by_width,
            SizingPolicy::FitBoth => by_width.min(by_height),
        };

        let size = fitted.clamp(self.min, self.max);
        let overflows = size > fitted;
        CharSize { size, overflows }
    }
}

/// Sampling config actually rendered into a terminal `area`.
///
/// A terminal draws one glyph per cell at its own font size, so the policy is
/// met by narrowing the grid rather than shrinking glyphs. `FitWidth` caps
/// the width at the available columns; `FitBoth` also keeps every row on
/// screen. Never wider than `requested` and never narrower than 1.
pub fn fit_sampling(requested: SamplingConfig, area: Rect, policy: SizingPolicy) -> SamplingConfig {
    let mut width = requested.width().min(area.width);
    if policy == SizingPolicy::FitBoth {
        width = width.min(SamplingConfig::max_width_for_rows(area.height));
    }
    if width == requested.width() {
        return requested;
    }
    SamplingConfig::from_width(width.max(1)).unwrap_or(requested)
}

/// Placement of the grid inside a terminal area, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPlacement {
    /// Visible part of the grid, centered in the area
    pub rect: Rect,
    /// True when the grid is larger than the area and gets cut off
    pub clipped: bool,
}

/// Center a `width` x `height` grid inside `area`, clipping what does not fit.
pub fn fit_in_cells(area: Rect, width: u16, height: u16) -> GridPlacement {
    let visible_w = width.min(area.width);
    let visible_h = height.min(area.height);
    GridPlacement {
        rect: Rect {
            x: area.x + (area.width - visible_w) / 2,
            y: area.y + (area.height - visible_h) / 2,
            width: visible_w,
            height: visible_h,
        },
        clipped: visible_w < width || visible_h < height,
    }
}
