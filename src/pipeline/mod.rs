//! Per-tick render pipeline: frame source -> sampler -> glyph grid.
//!
//! A [`Pipeline`] walks a small state machine:
//!
//! ```text
//! Init -> AwaitingSource -> Running -> Stopped
//! ```
//!
//! `AwaitingSource` lasts until the source delivers its first frame (the
//! [`ReadinessGate`] opens once). Ticks that find no usable frame are skipped
//! and leave the previous grid untouched.

mod gate;
mod settings;
mod source;

pub use gate::ReadinessGate;
pub use settings::{ControlError, ControlInput, RenderSettings, RESOLUTION_RANGE, RESOLUTION_STEP};
pub use source::{FrameSource, SourceStatus};

use crate::ascii::{FrameSampler, RenderedGrid};

/// Lifecycle state of a pipeline session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    AwaitingSource,
    Running,
    Stopped,
}

impl PipelineState {
    pub fn name(&self) -> &'static str {
        match self {
            PipelineState::Init => "init",
            PipelineState::AwaitingSource => "waiting",
            PipelineState::Running => "live",
            PipelineState::Stopped => "stopped",
        }
    }
}

/// Why a tick did not produce a new grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Pipeline not started yet
    NotStarted,
    /// Source has not produced a frame yet
    NotReady,
    /// Source reported ready but handed out no frame
    NoFrame,
    /// Frame could not be sampled (empty or truncated)
    BadFrame,
}

/// Result of one [`Pipeline::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Rendered,
    Skipped(SkipReason),
    Stopped,
}

/// Owns the sampler and the rendered grid for one session.
#[derive(Debug)]
pub struct Pipeline<S: FrameSource> {
    source: S,
    sampler: FrameSampler,
    grid: RenderedGrid,
    gate: ReadinessGate,
    state: PipelineState,
}

impl<S: FrameSource> Pipeline<S> {
    pub fn new(source: S, settings: &RenderSettings) -> Self {
        Self {
            source,
            sampler: FrameSampler::new(settings.sampling),
            grid: RenderedGrid::new(),
            gate: ReadinessGate::default(),
            state: PipelineState::Init,
        }
    }

    /// Move from `Init` to `AwaitingSource`. No-op in any other state.
    pub fn start(&mut self) {
        if self.state == PipelineState::Init {
            self.state = PipelineState::AwaitingSource;
        }
    }

    /// Stop the session. Further ticks report [`TickOutcome::Stopped`].
    pub fn stop(&mut self) {
        if self.state != PipelineState::Stopped {
            log::info!("Render pipeline stopped");
            self.state = PipelineState::Stopped;
        }
    }

    /// Take in a new settings snapshot as soon as it is produced.
    ///
    /// A changed sampling resolution resizes the surface right away, so the
    /// next tick never reads a buffer laid out for the old dimensions.
    pub fn apply(&mut self, settings: &RenderSettings) {
        self.sampler.resize(settings.sampling);
    }

    /// Run one render step with the current settings snapshot.
    pub fn tick(&mut self, settings: &RenderSettings) -> TickOutcome {
        match self.state {
            PipelineState::Init => return TickOutcome::Skipped(SkipReason::NotStarted),
            PipelineState::Stopped => return TickOutcome::Stopped,
            PipelineState::AwaitingSource | PipelineState::Running => {}
        }

        match self.source.status() {
            SourceStatus::Ended => {
                log::warn!("Frame source ended");
                self.stop();
                return TickOutcome::Stopped;
            }
            // A source that is not ready is never read, even after the first frame
            SourceStatus::NotReady => return TickOutcome::Skipped(SkipReason::NotReady),
            SourceStatus::Ready => {}
        }

        let Some(frame) = self.source.current_frame() else {
            return TickOutcome::Skipped(if self.gate.is_open() {
                SkipReason::NoFrame
            } else {
                SkipReason::NotReady
            });
        };

        if self.gate.open() {
            log::info!(
                "First frame received ({}x{}), rendering at {}",
                frame.width,
                frame.height,
                settings.sampling
            );
            self.state = PipelineState::Running;
        }

        match self.sampler.sample(&frame, settings.sampling) {
            Ok(rgba) => {
                self.grid.render(rgba, settings.sampling, &settings.palette);
                TickOutcome::Rendered
            }
            Err(e) => {
                log::debug!("Skipping frame: {}", e);
                TickOutcome::Skipped(SkipReason::BadFrame)
            }
        }
    }

    /// The current grid (the last successfully rendered frame).
    pub fn grid(&self) -> &RenderedGrid {
        &self.grid
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn gate(&self) -> ReadinessGate {
        self.gate
    }

    /// Sampling dimensions the surface is currently allocated for.
    pub fn surface_config(&self) -> crate::ascii::SamplingConfig {
        self.sampler.config()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
