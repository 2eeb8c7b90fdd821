//! Plain-text export of the rendered grid to the system clipboard.
//!
//! Two backends are available:
//! - [`Osc52Exporter`] asks the terminal to set the clipboard through an
//!   OSC 52 escape sequence (works over SSH)
//! - [`CommandExporter`] pipes the text into `pbcopy`, `wl-copy`, `xclip`,
//!   `xsel` or `clip`
//!
//! [`export_snapshot`] copies the grid as plain text. Sinks that keep styled
//! text next to the plain text get the theme-colored version first, with one
//! plain-text retry if that is rejected.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::env;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::Mutex;
use thiserror::Error;

use crate::display::DisplayTheme;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("nothing to export yet")]
    Empty,
    #[error("clipboard not available")]
    NotAvailable,
    #[error("clipboard payload too large ({size} > {max} bytes)")]
    TooLarge { size: usize, max: usize },
    #[error("clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Shape of the exported text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Grid wrapped in the theme's 24-bit foreground color
    Formatted,
    /// Raw grid text
    Plain,
}

/// Build the exported text for `grid`.
pub fn build_payload(grid: &str, theme: DisplayTheme, format: ExportFormat) -> String {
    match format {
        ExportFormat::Plain => grid.to_string(),
        ExportFormat::Formatted => {
            let (r, g, b) = theme.rgb();
            format!("\x1b[38;2;{r};{g};{b}m{grid}\x1b[0m")
        }
    }
}

/// A clipboard sink.
pub trait Exporter: Send + Sync {
    fn export(&self, text: &str) -> Result<(), ExportError>;

    fn name(&self) -> &'static str;

    /// True when the sink stores styled text alongside the plain text.
    fn rich_text(&self) -> bool {
        false
    }
}

/// What a successful [`export_snapshot`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportReport {
    /// Number of write attempts (1 or 2)
    pub attempts: u8,
    /// Format that was finally accepted
    pub format: ExportFormat,
}

/// Export `grid`, the grid value at the time the export was requested.
///
/// Plain sinks receive the grid text unchanged. Rich-text sinks are offered
/// the formatted payload first and the plain grid once if that fails.
pub fn export_snapshot(
    exporter: &dyn Exporter,
    grid: &str,
    theme: DisplayTheme,
) -> Result<ExportReport, ExportError> {
    if grid.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut attempts = 0;
    if exporter.rich_text() {
        attempts += 1;
        let formatted = build_payload(grid, theme, ExportFormat::Formatted);
        match exporter.export(&formatted) {
            Ok(()) => {
                log::info!("Exported {} bytes via {}", formatted.len(), exporter.name());
                return Ok(ExportReport {
                    attempts,
                    format: ExportFormat::Formatted,
                });
            }
            Err(e) => log::warn!("Formatted export failed ({}), retrying as plain text", e),
        }
    }

    attempts += 1;
    exporter.export(grid)?;
    log::info!("Exported {} bytes via {} (plain)", grid.len(), exporter.name());
    Ok(ExportReport {
        attempts,
        format: ExportFormat::Plain,
    })
}

/// OSC 52 clipboard writer.
#[derive(Debug)]
pub struct Osc52Exporter<W> {
    writer: Mutex<W>,
    max_payload: usize,
}

impl<W: Write> Osc52Exporter<W> {
    /// Common OSC 52 size limit (base64 payload bytes).
    pub const DEFAULT_MAX_PAYLOAD: usize = 74_994;

    pub fn new(writer: W) -> Self {
        Self::with_max_payload(writer, Self::DEFAULT_MAX_PAYLOAD)
    }

    pub fn with_max_payload(writer: W, max_payload: usize) -> Self {
        Self {
            writer: Mutex::new(writer),
            max_payload,
        }
    }

    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Full OSC 52 "set clipboard" sequence for `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}

impl<W: Write + Send> Exporter for Osc52Exporter<W> {
    fn export(&self, text: &str) -> Result<(), ExportError> {
        let seq = osc52_sequence(text);
        // "\x1b]52;c;" + "\x07"
        let size = seq.len() - 8;
        if size > self.max_payload {
            return Err(ExportError::TooLarge {
                size,
                max: self.max_payload,
            });
        }
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| ExportError::WriteFailed("writer lock poisoned".to_string()))?;
        writer
            .write_all(seq.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| ExportError::WriteFailed(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "osc52"
    }
}

/// External clipboard programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandExporter {
    MacOS,
    Windows,
    Wayland,
    X11,
}

impl CommandExporter {
    /// Find a clipboard program for this platform/session.
    pub fn detect() -> Option<Self> {
        if cfg!(target_os = "macos") && command_exists("pbcopy") {
            return Some(Self::MacOS);
        }
        if cfg!(target_os = "windows") && command_exists("clip") {
            return Some(Self::Windows);
        }
        if env::var_os("WAYLAND_DISPLAY").is_some() && command_exists("wl-copy") {
            return Some(Self::Wayland);
        }
        if env::var_os("DISPLAY").is_some() && (command_exists("xclip") || command_exists("xsel")) {
            return Some(Self::X11);
        }
        None
    }
}

impl Exporter for CommandExporter {
    fn export(&self, text: &str) -> Result<(), ExportError> {
        match self {
            Self::MacOS => run_command_with_input("pbcopy", &[], text),
            Self::Windows => run_command_with_input("clip", &[], text),
            Self::Wayland => run_command_with_input("wl-copy", &[], text),
            Self::X11 => run_command_with_input("xclip", &["-selection", "clipboard"], text)
                .or_else(|_| run_command_with_input("xsel", &["--clipboard", "--input"], text)),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::MacOS => "pbcopy",
            Self::Windows => "clip",
            Self::Wayland => "wl-copy",
            Self::X11 => "xclip",
        }
    }
}

/// Pick the clipboard backend: a clipboard program when one is installed,
/// OSC 52 on stdout otherwise.
pub fn detect_exporter() -> Box<dyn Exporter> {
    match CommandExporter::detect() {
        Some(cmd) => {
            log::info!("Clipboard backend: {}", cmd.name());
            Box::new(cmd)
        }
        None => {
            log::info!("Clipboard backend: osc52");
            Box::new(Osc52Exporter::new(std::io::stdout()))
        }
    }
}

fn command_exists(command: &str) -> bool {
    if command.contains(std::path::MAIN_SEPARATOR) {
        return Path::new(command).is_file();
    }

    let Some(path_var) = env::var_os("PATH") else {
        return false;
    };

    env::split_paths(&path_var).any(|dir| {
        dir.join(command).is_file()
            || (cfg!(target_os = "windows") && dir.join(format!("{command}.exe")).is_file())
    })
}

fn run_command_with_input(cmd: &str, args: &[&str], content: &str) -> Result<(), ExportError> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|err| ExportError::WriteFailed(err.to_string()))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(content.as_bytes())
            .map_err(|err| ExportError::WriteFailed(err.to_string()))?;
    }

    let status = child
        .wait()
        .map_err(|err| ExportError::WriteFailed(err.to_string()))?;
    if status.success() {
        Ok(())
    } else {
        Err(ExportError::WriteFailed(format!("clipboard command failed: {cmd}")))
    }
}
