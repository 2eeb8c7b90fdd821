//! Terminal management module - raw mode, TUI wrapper, rendering, and status bar.

mod raw_mode;
mod rendering;
mod status_bar;
mod tui;

pub use rendering::{grid_placement, render_grid, render_screen, render_status_bar, split_status};
pub use status_bar::{StatusBar, StatusInfo, NOTICE_TTL};
pub use tui::{pixel_viewport, Tui};
