//! Async event loop driving the render pipeline inside the TUI.
//!
//! This module separates the main event loop logic from initialization,
//! making the code more testable and maintainable.

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::layout::Rect;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::display::{fit_sampling, CharSize, CharSizer, DisplayTheme, Viewport};
use crate::export::{export_snapshot, ExportError, ExportReport, Exporter};
use crate::input::{handle_key_event, KeyAction};
use crate::pipeline::{ControlInput, FrameSource, Pipeline, RenderSettings, TickOutcome};
use crate::terminal::{grid_placement, pixel_viewport, split_status, StatusBar, StatusInfo, Tui};

/// Why the event loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The user quit
    Quit,
    /// The frame source ended (camera unplugged or stream died)
    SourceEnded,
}

/// Render interval for a frame rate, never shorter than 1ms.
pub fn tick_interval(fps: u32) -> Duration {
    Duration::from_millis((1000 / u64::from(fps.max(1))).max(1))
}

/// Session state shared by the event handlers: the pipeline, the settings
/// snapshots, and what the status bar shows.
///
/// `settings` is what the user asked for; `render` is the same snapshot with
/// the sampling fitted to the grid area, and is what the pipeline ticks with.
#[derive(Debug)]
pub struct App<S: FrameSource> {
    pipeline: Pipeline<S>,
    settings: RenderSettings,
    render: RenderSettings,
    sizer: CharSizer,
    grid_area: Rect,
    viewport: Viewport,
    char_size: CharSize,
    status_bar: StatusBar,
}

impl<S: FrameSource> App<S> {
    /// `area` is the whole terminal; the grid gets what the status line leaves.
    pub fn new(
        source: S,
        settings: RenderSettings,
        sizer: CharSizer,
        status_bar: StatusBar,
        area: Rect,
    ) -> Self {
        let (grid_area, _) = split_status(area, status_bar.visible);
        let viewport = pixel_viewport(grid_area);
        let render = settings.clone();
        let mut pipeline = Pipeline::new(source, &render);
        pipeline.start();
        let mut app = Self {
            pipeline,
            settings,
            render,
            sizer,
            grid_area,
            viewport,
            char_size: CharSize {
                size: sizer.min,
                overflows: false,
            },
            status_bar,
        };
        app.refit();
        app
    }

    /// Settings as requested through config and controls.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Settings the pipeline renders with.
    pub fn render_settings(&self) -> &RenderSettings {
        &self.render
    }

    pub fn pipeline(&self) -> &Pipeline<S> {
        &self.pipeline
    }

    pub fn char_size(&self) -> CharSize {
        self.char_size
    }

    pub fn status_bar(&self) -> &StatusBar {
        &self.status_bar
    }

    /// Swap in the snapshot derived from `input`.
    ///
    /// The pipeline resizes right away; the glyph size is recomputed.
    pub fn apply_control(&mut self, input: ControlInput, now: Instant) {
        match self.settings.apply(input) {
            Ok(next) => {
                if next.sampling != self.settings.sampling {
                    log::info!("Sampling {} -> {}", self.settings.sampling, next.sampling);
                }
                self.settings = next;
                self.refit();
            }
            Err(e) => {
                log::warn!("Control rejected: {}", e);
                self.status_bar.set_notice(e.to_string(), now);
            }
        }
    }

    /// The terminal changed size.
    pub fn set_area(&mut self, area: Rect) {
        let (grid_area, _) = split_status(area, self.status_bar.visible);
        self.grid_area = grid_area;
        self.viewport = pixel_viewport(grid_area);
        self.refit();
    }

    fn refit(&mut self) {
        let sampling = fit_sampling(self.settings.sampling, self.grid_area, self.sizer.policy);
        if sampling != self.settings.sampling {
            log::debug!(
                "Sampling {} fitted to {} for a {}x{} grid area",
                self.settings.sampling,
                sampling,
                self.grid_area.width,
                self.grid_area.height
            );
        }
        self.render = RenderSettings {
            sampling,
            ..self.settings.clone()
        };
        self.pipeline.apply(&self.render);
        self.char_size = self.sizer.size_for(self.viewport, sampling);
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.pipeline.tick(&self.render)
    }

    /// The grid text and theme to export, or `None` before the first frame.
    pub fn export_request(&mut self, now: Instant) -> Option<(String, DisplayTheme)> {
        let grid = self.pipeline.grid();
        if grid.is_empty() {
            self.status_bar.set_notice("nothing to copy yet", now);
            return None;
        }
        Some((grid.as_str().to_string(), self.render.theme))
    }

    pub fn on_export_result(&mut self, result: Result<ExportReport, ExportError>, now: Instant) {
        let text = match result {
            Ok(report) if report.attempts > 1 => "copied (plain text)".to_string(),
            Ok(_) => "copied".to_string(),
            Err(e) => {
                log::warn!("Export failed: {}", e);
                format!("copy failed: {}", e)
            }
        };
        self.status_bar.set_notice(text, now);
    }

    /// Status line for the current frame, if the bar is visible.
    pub fn status_text(&self, clipped: bool, now: Instant) -> Option<String> {
        if !self.status_bar.visible {
            return None;
        }
        let info = StatusInfo {
            state: self.pipeline.state(),
            settings: &self.render,
            char_size: self.char_size,
            fitted: self.render.sampling != self.settings.sampling,
            clipped,
        };
        Some(self.status_bar.format(&info, now))
    }

    fn draw(&self, tui: &mut Tui) -> std::io::Result<()> {
        let grid = self.pipeline.grid();
        let clipped = !grid.is_empty() && grid_placement(grid, self.grid_area).clipped;
        let status = self.status_text(clipped, Instant::now());
        tui.draw(grid, self.render.theme, status.as_deref())?;
        Ok(())
    }
}

/// Async main event loop using tokio::select! for concurrent handling.
///
/// This loop handles three concurrent concerns:
/// 1. Terminal events (keyboard input, resize) via crossterm EventStream
/// 2. The render interval, one pipeline tick per interval
/// 3. Export results coming back from blocking clipboard writes
pub async fn run<S: FrameSource>(
    tui: &mut Tui,
    app: &mut App<S>,
    fps: u32,
    exporter: Arc<dyn Exporter>,
) -> Result<LoopExit, Box<dyn std::error::Error + Send + Sync>> {
    let mut event_stream = EventStream::new();

    let mut render_interval = tokio::time::interval(tick_interval(fps));
    render_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let (export_tx, mut export_rx) = mpsc::channel::<Result<ExportReport, ExportError>>(4);

    app.set_area(tui.area()?);

    loop {
        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => match handle_key_event(key_event) {
                        KeyAction::Control(input) => app.apply_control(input, Instant::now()),
                        KeyAction::Export => {
                            if let Some((text, theme)) = app.export_request(Instant::now()) {
                                let tx = export_tx.clone();
                                let exporter = Arc::clone(&exporter);
                                tokio::task::spawn_blocking(move || {
                                    let result = export_snapshot(exporter.as_ref(), &text, theme);
                                    let _ = tx.blocking_send(result);
                                });
                            }
                        }
                        KeyAction::Quit => return Ok(LoopExit::Quit),
                        KeyAction::None => {}
                    },
                    Some(Ok(Event::Resize(cols, rows))) => app.set_area(Rect::new(0, 0, cols, rows)),
                    Some(Ok(_)) => {
                        // Ignore other events (mouse, focus, paste)
                    }
                    Some(Err(e)) => return Err(Box::new(e)),
                    None => return Ok(LoopExit::Quit),
                }
            }

            _ = render_interval.tick() => {
                if app.tick() == TickOutcome::Stopped {
                    return Ok(LoopExit::SourceEnded);
                }
                app.draw(tui)?;
            }

            Some(result) = export_rx.recv() => {
                app.on_export_result(result, Instant::now());
            }
        }
    }
}
