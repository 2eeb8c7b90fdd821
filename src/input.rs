//! Keyboard input handling.
//!
//! Converts crossterm key events into render controls, export requests,
//! or quit.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::pipeline::{ControlInput, RESOLUTION_STEP};

/// Result of handling a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Derive a new render settings snapshot
    Control(ControlInput),
    /// Copy the current grid to the clipboard
    Export,
    /// Leave the TUI
    Quit,
    /// No action needed
    None,
}

/// Handle a key event.
///
/// Keys:
/// - `+` / `=` / Right: wider sampling
/// - `-` / `_` / Left: narrower sampling
/// - `p`: cycle palette
/// - `g`: toggle theme
/// - `y`: copy grid
/// - `q` / Esc / Ctrl+C: quit
pub fn handle_key_event(event: KeyEvent) -> KeyAction {
    let KeyEvent {
        code,
        modifiers,
        kind,
        ..
    } = event;

    if kind == KeyEventKind::Release {
        return KeyAction::None;
    }

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') | KeyCode::Char('C') => KeyAction::Quit,
            _ => KeyAction::None,
        };
    }

    match code {
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
            KeyAction::Control(ControlInput::AdjustWidth(RESOLUTION_STEP))
        }
        KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Left => {
            KeyAction::Control(ControlInput::AdjustWidth(-RESOLUTION_STEP))
        }
        KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::Control(ControlInput::CyclePalette),
        KeyCode::Char('g') | KeyCode::Char('G') => KeyAction::Control(ControlInput::ToggleTheme),
        KeyCode::Char('y') | KeyCode::Char('Y') => KeyAction::Export,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::None,
    }
}
