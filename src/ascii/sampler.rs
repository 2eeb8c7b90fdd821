//! Offscreen sampling surface.
//!
//! The sampler owns an RGBA surface sized to the current [`SamplingConfig`]
//! and copies camera frames into it, one averaged cell per character.

use thiserror::Error;

use super::sampling::{SamplingConfig, BYTES_PER_CELL};
use crate::camera::Frame;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error("frame has no pixels ({width}x{height})")]
    EmptyFrame { width: u32, height: u32 },
    #[error("frame data too short: expected {expected} bytes, got {actual}")]
    ShortFrame { expected: usize, actual: usize },
}

/// Offscreen surface that frames are drawn into before glyph mapping.
#[derive(Debug)]
pub struct FrameSampler {
    config: SamplingConfig,
    surface: Vec<u8>,
}

impl FrameSampler {
    pub fn new(config: SamplingConfig) -> Self {
        Self {
            config,
            surface: vec![0; config.buffer_len()],
        }
    }

    /// Dimensions the surface is currently allocated for.
    pub fn config(&self) -> SamplingConfig {
        self.config
    }

    /// Resize the surface to a new sampling config.
    ///
    /// Returns true when the dimensions actually changed.
    pub fn resize(&mut self, config: SamplingConfig) -> bool {
        if config == self.config {
            return false;
        }
        log::debug!("Resizing sampling surface {} -> {}", self.config, config);
        self.config = config;
        self.surface.clear();
        self.surface.resize(config.buffer_len(), 0);
        true
    }

    /// Copy `frame` into the surface, mirrored horizontally, and return the
    /// RGBA buffer.
    ///
    /// If `config` differs from the current surface, the surface is resized
    /// before anything is copied, so the returned buffer always has exactly
    /// `config.buffer_len()` bytes.
    pub fn sample(&mut self, frame: &Frame, config: SamplingConfig) -> Result<&[u8], SampleError> {
        self.resize(config);

        if frame.width == 0 || frame.height == 0 {
            return Err(SampleError::EmptyFrame {
                width: frame.width,
                height: frame.height,
            });
        }
        let bpp = frame.bytes_per_pixel();
        let expected = frame.width as usize * frame.height as usize * bpp;
        if frame.data.len() < expected {
            return Err(SampleError::ShortFrame {
                expected,
                actual: frame.data.len(),
            });
        }

        draw_mirrored(frame, self.config, &mut self.surface);
        Ok(&self.surface)
    }

    /// The surface contents from the last successful sample.
    pub fn buffer(&self) -> &[u8] {
        &self.surface
    }
}

/// Box-average `frame` into `surface` with a horizontal flip.
///
/// The flip is a coordinate transform: destination column `cx` reads the
/// source span that belongs to column `width - 1 - cx`.
fn draw_mirrored(frame: &Frame, config: SamplingConfig, surface: &mut [u8]) {
    let img_width = frame.width;
    let img_height = frame.height;
    let bpp = frame.bytes_per_pixel();
    let char_width = config.width() as u32;
    let char_height = config.height() as u32;

    let cell_w = img_width as f32 / char_width as f32;
    let cell_h = img_height as f32 / char_height as f32;

    for cy in 0..char_height {
        let start_y = (cy as f32 * cell_h) as u32;
        // Upscaling leaves empty spans; always cover at least one source row.
        let end_y = (((cy + 1) as f32 * cell_h) as u32).max(start_y + 1).min(img_height);

        for cx in 0..char_width {
            let mx = char_width - 1 - cx;
            let start_x = (mx as f32 * cell_w) as u32;
            let end_x = (((mx + 1) as f32 * cell_w) as u32).max(start_x + 1).min(img_width);

            let mut sum_r = 0u32;
            let mut sum_g = 0u32;
            let mut sum_b = 0u32;
            let mut count = 0u32;

            for py in start_y.min(img_height - 1)..end_y {
                let row = py as usize * img_width as usize;
                for px in start_x.min(img_width - 1)..end_x {
                    let idx = (row + px as usize) * bpp;
                    sum_r += frame.data[idx] as u32;
                    sum_g += frame.data[idx + 1] as u32;
                    sum_b += frame.data[idx + 2] as u32;
                    count += 1;
                }
            }

            let out = (cy as usize * char_width as usize + cx as usize) * BYTES_PER_CELL;
            let cell = &mut surface[out..out + BYTES_PER_CELL];
            if count > 0 {
                cell[0] = (sum_r / count) as u8;
                cell[1] = (sum_g / count) as u8;
                cell[2] = (sum_b / count) as u8;
            } else {
                cell[..3].fill(0);
            }
            cell[3] = u8::MAX;
        }
    }
}
