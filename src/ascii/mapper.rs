//! RGBA buffer to glyph grid conversion.

use super::palette::Palette;
use super::sampling::BYTES_PER_CELL;

/// Sum of the three channel maxima; luminance is `(r + g + b) / 3`.
const CHANNEL_SUM_MAX: usize = 3 * 255;

/// Palette index for one RGBA cell.
///
/// `floor(luminance / 255 * (levels - 1))` with `luminance = (r + g + b) / 3`,
/// computed exactly as `(r + g + b) * (levels - 1) / 765`. Alpha is ignored.
#[inline]
pub fn glyph_index(r: u8, g: u8, b: u8, levels: usize) -> usize {
    let sum = r as usize + g as usize + b as usize;
    (sum * levels.saturating_sub(1) / CHANNEL_SUM_MAX).min(levels.saturating_sub(1))
}

/// Map an RGBA buffer of `width * height` cells to a grid string.
///
/// Every row holds `width` glyphs followed by a newline, rows in source order.
///
/// # Example
/// ```ignore
/// let rgba = [0, 0, 0, 255, 255, 255, 255, 255];
/// let grid = map_to_grid(&rgba, 2, 1, &Palette::custom("AB")?);
/// assert_eq!(grid, "AB\n");
/// ```
pub fn map_to_grid(rgba: &[u8], width: u16, height: u16, palette: &Palette) -> String {
    let mut out = String::new();
    map_into(rgba, width, height, palette, &mut out);
    out
}

/// Allocation-reusing version of [`map_to_grid`].
///
/// Clears `out` and writes the grid into it. If `rgba` holds fewer than
/// `width * height` cells only the complete rows available are written.
pub fn map_into(rgba: &[u8], width: u16, height: u16, palette: &Palette, out: &mut String) {
    out.clear();

    let w = width as usize;
    let h = height as usize;
    if w == 0 || h == 0 {
        return;
    }

    let available_rows = rgba.len() / (w * BYTES_PER_CELL);
    if available_rows < h {
        log::debug!(
            "RGBA buffer holds {} of {} rows, truncating grid",
            available_rows,
            h
        );
    }
    let rows = available_rows.min(h);

    // Glyphs may be multi-byte (block palettes), reserve for the widest.
    let max_glyph_len = palette
        .glyphs()
        .iter()
        .map(|c| c.len_utf8())
        .max()
        .unwrap_or(1);
    out.reserve(rows * (w * max_glyph_len + 1));

    let levels = palette.len();
    for row in rgba.chunks_exact(w * BYTES_PER_CELL).take(rows) {
        for cell in row.chunks_exact(BYTES_PER_CELL) {
            out.push(palette.glyph(glyph_index(cell[0], cell[1], cell[2], levels)));
        }
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(values: &[u8]) -> Vec<u8> {
        values.iter().flat_map(|&v| [v, v, v, 255]).collect()
    }

    #[test]
    fn test_black_white_two_glyphs() {
        let palette = Palette::custom("AB").unwrap();
        let rgba = [0, 0, 0, 255, 255, 255, 255, 255];
        assert_eq!(map_to_grid(&rgba, 2, 1, &palette), "AB\n");
    }

    #[test]
    fn test_classic_mid_gray() {
        // floor(128 / 255 * 11) = floor(5.52) = 5, the sixth glyph
        let palette = Palette::custom("@#S%?*+;:,. ").unwrap();
        assert_eq!(glyph_index(128, 128, 128, 12), 5);
        assert_eq!(map_to_grid(&gray(&[128]), 1, 1, &palette), "*\n");
    }

    #[test]
    fn test_extremes() {
        for levels in 2..=16 {
            assert_eq!(glyph_index(0, 0, 0, levels), 0);
            assert_eq!(glyph_index(255, 255, 255, levels), levels - 1);
        }
    }

    #[test]
    fn test_alpha_ignored() {
        let palette = Palette::custom("AB").unwrap();
        let opaque = map_to_grid(&[255, 255, 255, 255], 1, 1, &palette);
        let clear = map_to_grid(&[255, 255, 255, 0], 1, 1, &palette);
        assert_eq!(opaque, clear);
    }

    #[test]
    fn test_unweighted_mean() {
        // Same channel sum, different channels, same glyph
        let a = glyph_index(255, 0, 0, 10);
        let b = glyph_index(0, 255, 0, 10);
        let c = glyph_index(0, 0, 255, 10);
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_rows_terminated() {
        let palette = Palette::custom("AB").unwrap();
        let rgba = gray(&[0, 255, 255, 0, 0, 0]);
        assert_eq!(map_to_grid(&rgba, 3, 2, &palette), "ABB\nAAA\n");
    }

    #[test]
    fn test_map_into_reuses_buffer() {
        let palette = Palette::custom("AB").unwrap();
        let mut out = String::from("stale content");
        map_into(&gray(&[255]), 1, 1, &palette, &mut out);
        assert_eq!(out, "B\n");
    }

    #[test]
    fn test_short_buffer_truncates_rows() {
        let palette = Palette::custom("AB").unwrap();
        // Two cells for a 2x2 grid: only the first row fits
        let out = map_to_grid(&gray(&[0, 255, 0]), 2, 2, &palette);
        assert_eq!(out, "AB\n");
    }

    #[test]
    fn test_zero_dimensions() {
        let palette = Palette::default();
        assert_eq!(map_to_grid(&[], 0, 5, &palette), "");
        assert_eq!(map_to_grid(&[], 5, 0, &palette), "");
    }
}
