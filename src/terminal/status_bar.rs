//! Status bar for displaying render state at the bottom of the screen.

use std::time::{Duration, Instant};

use crate::display::CharSize;
use crate::pipeline::{PipelineState, RenderSettings};

/// How long an export notice stays in the status bar.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

const KEY_HINTS: &str = "+/- width  p palette  g theme  y copy  q quit";

/// Everything the status bar reports on, gathered by the event loop.
#[derive(Debug, Clone, Copy)]
pub struct StatusInfo<'a> {
    pub state: PipelineState,
    pub settings: &'a RenderSettings,
    pub char_size: CharSize,
    /// Sampling narrowed to fit the terminal
    pub fitted: bool,
    /// Grid cut off by the terminal
    pub clipped: bool,
}

/// Status bar for displaying render state at the bottom of the screen.
///
/// Shows: state | sampling size | palette | theme | glyph size | notice
#[derive(Debug, Clone)]
pub struct StatusBar {
    /// Whether the status bar is visible
    pub visible: bool,
    notice: Option<(String, Instant)>,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBar {
    /// Create a new status bar with default settings (visible).
    pub fn new() -> Self {
        Self::with_visibility(true)
    }

    /// Create a status bar with the specified visibility.
    pub fn with_visibility(visible: bool) -> Self {
        Self {
            visible,
            notice: None,
        }
    }

    /// Show a transient message until `now + NOTICE_TTL`.
    pub fn set_notice(&mut self, text: impl Into<String>, now: Instant) {
        self.notice = Some((text.into(), now + NOTICE_TTL));
    }

    /// Current notice, if it has not expired at `now`.
    pub fn notice(&self, now: Instant) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|(_, expires)| now < *expires)
            .map(|(text, _)| text.as_str())
    }

    /// Format the status bar text.
    ///
    /// Format: " live | 100x56 | classic | default | 9.6px | <notice or key hints> "
    ///
    /// The size reads "41x23 fit" when the terminal forced a narrower grid.
    pub fn format(&self, info: &StatusInfo<'_>, now: Instant) -> String {
        let size = if info.char_size.overflows || info.clipped {
            format!("{:.1}px clipped", info.char_size.size)
        } else {
            format!("{:.1}px", info.char_size.size)
        };
        let sampling = if info.fitted {
            format!("{} fit", info.settings.sampling)
        } else {
            info.settings.sampling.to_string()
        };
        format!(
            " {} | {} | {} | {} | {} | {} ",
            info.state.name(),
            sampling,
            info.settings.palette.name(),
            info.settings.theme.name(),
            size,
            self.notice(now).unwrap_or(KEY_HINTS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ControlInput;

    fn info(settings: &RenderSettings, clipped: bool) -> StatusInfo<'_> {
        StatusInfo {
            state: PipelineState::Running,
            settings,
            char_size: CharSize {
                size: 9.6,
                overflows: false,
            },
            fitted: false,
            clipped,
        }
    }

    #[test]
    fn test_format_marks_fitted_size() {
        let settings = RenderSettings::default()
            .apply(ControlInput::SetWidth(41))
            .unwrap();
        let info = StatusInfo {
            fitted: true,
            ..info(&settings, false)
        };
        assert!(StatusBar::new()
            .format(&info, Instant::now())
            .starts_with(" live | 41x23 fit | classic |"));
    }

    #[test]
    fn test_format_defaults() {
        let settings = RenderSettings::default();
        let bar = StatusBar::new();
        let text = bar.format(&info(&settings, false), Instant::now());
        assert_eq!(
            text,
            format!(" live | 100x56 | classic | default | 9.6px | {} ", KEY_HINTS)
        );
    }

    #[test]
    fn test_format_reflects_settings_and_clip() {
        let settings = RenderSettings::default()
            .apply(ControlInput::CyclePalette)
            .unwrap()
            .apply(ControlInput::ToggleTheme)
            .unwrap();
        let text = StatusBar::new().format(&info(&settings, true), Instant::now());
        assert!(text.contains("| standard | alt |"));
        assert!(text.contains("9.6px clipped"));
    }

    #[test]
    fn test_notice_expires() {
        let now = Instant::now();
        let mut bar = StatusBar::new();
        bar.set_notice("copied 100x56", now);
        assert_eq!(bar.notice(now), Some("copied 100x56"));

        let settings = RenderSettings::default();
        assert!(bar.format(&info(&settings, false), now).contains("copied 100x56"));

        let later = now + NOTICE_TTL;
        assert_eq!(bar.notice(later), None);
        assert!(bar.format(&info(&settings, false), later).contains(KEY_HINTS));
    }

    #[test]
    fn test_visibility() {
        assert!(StatusBar::new().visible);
        assert!(!StatusBar::with_visibility(false).visible);
    }
}
