//! TUI wrapper that manages the ratatui terminal with crossterm backend.
//!
//! This module handles terminal lifecycle (entering/exiting raw mode,
//! alternate screen) while delegating rendering to the `rendering` module.

use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::atomic::Ordering;

use super::raw_mode::{install_panic_hook, RAW_MODE_ACTIVE};
use super::rendering;
use crate::ascii::RenderedGrid;
use crate::display::{DisplayTheme, GridPlacement, Viewport};

/// TUI wrapper that manages the ratatui terminal with crossterm backend.
///
/// This struct handles:
/// - Entering raw mode and alternate screen on creation
/// - Restoring terminal state on drop (or explicit restore)
/// - Panic recovery (terminal is restored even if the app panics)
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Whether this TUI is responsible for cleanup
    active: bool,
}

impl Tui {
    /// Create a new TUI, entering raw mode and alternate screen.
    ///
    /// # Errors
    /// Returns an error if raw mode, the alternate screen, or the ratatui
    /// terminal cannot be set up.
    pub fn new() -> io::Result<Self> {
        install_panic_hook();

        enable_raw_mode()?;
        RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);

        let mut stdout = io::stdout();
        crossterm::execute!(stdout, EnterAlternateScreen, Hide)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            active: true,
        })
    }

    /// Get a mutable reference to the underlying ratatui terminal.
    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// Full terminal area in cells.
    pub fn area(&self) -> io::Result<Rect> {
        let size = self.terminal.size()?;
        Ok(Rect::new(0, 0, size.width, size.height))
    }

    /// Draw the grid and the optional status line.
    pub fn draw(
        &mut self,
        grid: &RenderedGrid,
        theme: DisplayTheme,
        status: Option<&str>,
    ) -> io::Result<GridPlacement> {
        let mut placement = None;
        self.terminal.draw(|frame| {
            let area = frame.area();
            placement = Some(rendering::render_screen(frame, grid, theme, status, area));
        })?;
        Ok(placement.unwrap_or(GridPlacement {
            rect: Rect::default(),
            clipped: false,
        }))
    }

    /// Restore the terminal to its original state.
    ///
    /// After calling this, the Tui's drop will be a no-op.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.active {
            self.active = false;
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);

            crossterm::execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.terminal.show_cursor()?;
        }
        Ok(())
    }

    /// Check if the TUI is still active (not yet restored).
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);

            // Best-effort cleanup - ignore errors during drop
            let _ = crossterm::execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show);
            let _ = disable_raw_mode();
        }
    }
}

/// Pixel viewport of `area`, using the terminal's reported pixel size when
/// it has one.
pub fn pixel_viewport(area: Rect) -> Viewport {
    match crossterm::terminal::window_size() {
        Ok(ws) => Viewport::from_terminal(area, ws.columns, ws.rows, (ws.width, ws.height)),
        Err(_) => Viewport::from_terminal(area, 0, 0, (0, 0)),
    }
}
