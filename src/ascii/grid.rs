//! The rendered glyph grid shared by the display and export paths.

use super::mapper::map_into;
use super::palette::Palette;
use super::sampling::SamplingConfig;

/// Text form of the current ASCII frame.
///
/// Rows are separated (and terminated) by `'\n'`. The grid is rewritten
/// wholesale by [`RenderedGrid::render`]; readers only ever see a complete
/// frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedGrid {
    text: String,
    width: u16,
    height: u16,
}

impl RenderedGrid {
    /// An empty grid (no frame rendered yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the grid contents with a freshly mapped frame.
    ///
    /// The previous allocation is reused.
    pub fn render(&mut self, rgba: &[u8], config: SamplingConfig, palette: &Palette) {
        map_into(rgba, config.width(), config.height(), palette, &mut self.text);
        self.width = config.width();
        self.height = config.height();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// True until the first frame has been rendered.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Iterate over rows without their newline terminators.
    pub fn rows(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}

impl std::fmt::Display for RenderedGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let grid = RenderedGrid::new();
        assert!(grid.is_empty());
        assert_eq!(grid.width(), 0);
        assert_eq!(grid.height(), 0);
        assert_eq!(grid.rows().count(), 0);
    }

    #[test]
    fn test_render_replaces_content() {
        let config = SamplingConfig::from_width(2).unwrap();
        let palette = Palette::custom("AB").unwrap();
        let mut grid = RenderedGrid::new();

        grid.render(&[0, 0, 0, 255, 255, 255, 255, 255], config, &palette);
        assert_eq!(grid.as_str(), "AB\n");

        grid.render(&[255, 255, 255, 255, 0, 0, 0, 255], config, &palette);
        assert_eq!(grid.as_str(), "BA\n");
        assert_eq!((grid.width(), grid.height()), (2, 1));
    }

    #[test]
    fn test_rows_strip_newlines() {
        let config = SamplingConfig::from_width(4).unwrap();
        let palette = Palette::custom("AB").unwrap();
        let mut grid = RenderedGrid::new();
        grid.render(&[0; 4 * 2 * 4], config, &palette);
        let rows: Vec<&str> = grid.rows().collect();
        assert_eq!(rows, ["AAAA", "AAAA"]);
    }
}
