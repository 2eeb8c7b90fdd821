//! Diagnostic logging setup.
//!
//! Library code logs through the `log` macros. The binary forwards those
//! records to a `tracing-subscriber` formatter writing to a log file; the
//! terminal itself belongs to the TUI, so nothing is logged without one.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Default filter directive for a `-v` count.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the file logger. `RUST_LOG` overrides the verbosity level.
///
/// Returns `Ok(false)` when no log file was requested.
pub fn init(log_file: Option<&Path>, verbosity: u8) -> std::io::Result<bool> {
    let Some(path) = log_file else {
        return Ok(false);
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .is_ok();
    if installed {
        log::info!("Logging to {}", path.display());
    }
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(0), "info");
        assert_eq!(level_for(1), "debug");
        assert_eq!(level_for(5), "trace");
    }

    #[test]
    fn test_no_file_installs_nothing() {
        assert!(!init(None, 2).unwrap());
    }
}
