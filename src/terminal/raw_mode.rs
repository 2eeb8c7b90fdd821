//! Panic-safe restoration of the terminal while the TUI owns it.

use crossterm::cursor::Show;
use crossterm::terminal::{disable_raw_mode, LeaveAlternateScreen};
use std::io;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

/// Set while raw mode and the alternate screen are active (read by the panic hook).
pub(crate) static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Install a panic hook that restores terminal state before panicking,
/// so the panic message lands on a usable terminal.
pub(crate) fn install_panic_hook() {
    static HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

    if HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        if RAW_MODE_ACTIVE.swap(false, Ordering::SeqCst) {
            restore_terminal();
        }
        original_hook(panic_info);
    }));
}

/// Best-effort terminal restore: leave the alternate screen, show the
/// cursor, and disable raw mode.
pub(crate) fn restore_terminal() {
    let _ = crossterm::execute!(io::stdout(), LeaveAlternateScreen, Show);
    let _ = disable_raw_mode();
}
