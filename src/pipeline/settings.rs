//! Immutable render settings snapshots and the control inputs that derive
//! new ones.

use std::ops::RangeInclusive;
use thiserror::Error;

use crate::ascii::{Palette, SamplingConfig, SamplingError};
use crate::display::DisplayTheme;

/// Sampling widths reachable through the interactive controls.
pub const RESOLUTION_RANGE: RangeInclusive<u16> = 20..=200;

/// Width change per step of the interactive controls.
pub const RESOLUTION_STEP: i32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("width {0} is outside the supported range 20..=200")]
    WidthOutOfRange(u16),
    #[error(transparent)]
    Sampling(#[from] SamplingError),
}

/// A user control action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlInput {
    /// Select an exact sampling width
    SetWidth(u16),
    /// Widen (positive) or narrow (negative), clamped to [`RESOLUTION_RANGE`]
    AdjustWidth(i32),
    SetPalette(Palette),
    CyclePalette,
    ToggleTheme,
}

/// Everything a render tick reads, captured as one value.
///
/// Control handlers never mutate a snapshot in place; [`RenderSettings::apply`]
/// returns the next one and the event loop swaps it in between ticks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderSettings {
    pub sampling: SamplingConfig,
    pub palette: Palette,
    pub theme: DisplayTheme,
}

impl RenderSettings {
    pub fn new(sampling: SamplingConfig, palette: Palette, theme: DisplayTheme) -> Self {
        Self {
            sampling,
            palette,
            theme,
        }
    }

    /// Produce the snapshot that results from `input`.
    pub fn apply(&self, input: ControlInput) -> Result<Self, ControlError> {
        let mut next = self.clone();
        match input {
            ControlInput::SetWidth(width) => {
                if !RESOLUTION_RANGE.contains(&width) {
                    return Err(ControlError::WidthOutOfRange(width));
                }
                next.sampling = SamplingConfig::from_width(width)?;
            }
            ControlInput::AdjustWidth(delta) => {
                let current = self.sampling.width() as i32;
                let width = (current + delta).clamp(
                    *RESOLUTION_RANGE.start() as i32,
                    *RESOLUTION_RANGE.end() as i32,
                ) as u16;
                next.sampling = SamplingConfig::from_width(width)?;
            }
            ControlInput::SetPalette(palette) => next.palette = palette,
            ControlInput::CyclePalette => next.palette = self.palette.next(),
            ControlInput::ToggleTheme => next.theme = self.theme.toggle(),
        }
        Ok(next)
    }
}
