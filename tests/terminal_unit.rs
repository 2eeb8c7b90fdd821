//! Unit tests for the terminal-facing pieces (keys, status bar, sizing, layout).
//!
//! These tests cover pure logic and render into ratatui's test backend, so
//! they run without a real terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use glyphcam::ascii::{Palette, RenderedGrid, SamplingConfig};
use glyphcam::display::{
    fit_in_cells, fit_sampling, CharSize, CharSizer, DisplayTheme, SizingPolicy, Viewport,
    DEFAULT_MAX_CHAR_SIZE, DEFAULT_MIN_CHAR_SIZE,
};
use glyphcam::input::{handle_key_event, KeyAction};
use glyphcam::pipeline::{ControlInput, PipelineState, RenderSettings, RESOLUTION_RANGE};
use glyphcam::terminal::{render_screen, split_status, StatusBar, StatusInfo};
use std::time::Instant;

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

// ==================== Key Handling ====================

#[test]
fn test_keys_drive_settings_through_full_range() {
    let mut settings = RenderSettings::default();
    for _ in 0..100 {
        if let KeyAction::Control(input) = handle_key_event(press(KeyCode::Right)) {
            settings = settings.apply(input).unwrap();
        }
    }
    assert_eq!(settings.sampling.width(), *RESOLUTION_RANGE.end());

    for _ in 0..100 {
        if let KeyAction::Control(input) = handle_key_event(press(KeyCode::Left)) {
            settings = settings.apply(input).unwrap();
        }
    }
    assert_eq!(settings.sampling.width(), *RESOLUTION_RANGE.start());
}

#[test]
fn test_theme_key_toggles_twice() {
    let mut settings = RenderSettings::default();
    for _ in 0..2 {
        match handle_key_event(press(KeyCode::Char('g'))) {
            KeyAction::Control(input) => settings = settings.apply(input).unwrap(),
            other => panic!("Expected a control, got {:?}", other),
        }
    }
    assert_eq!(settings.theme, DisplayTheme::Default);
}

// ==================== Status Bar ====================

#[test]
fn test_status_bar_reports_state_and_size() {
    let settings = RenderSettings::default()
        .apply(ControlInput::SetWidth(64))
        .unwrap();
    let info = StatusInfo {
        state: PipelineState::AwaitingSource,
        settings: &settings,
        char_size: CharSize {
            size: 12.5,
            overflows: false,
        },
        fitted: false,
        clipped: false,
    };
    let text = StatusBar::new().format(&info, Instant::now());
    assert!(text.starts_with(" waiting | 64x36 | classic | default | 12.5px"));
    assert!(!text.contains("clipped"));
}

#[test]
fn test_status_bar_overflow_marks_clipped() {
    let settings = RenderSettings::default();
    let info = StatusInfo {
        state: PipelineState::Running,
        settings: &settings,
        char_size: CharSize {
            size: DEFAULT_MIN_CHAR_SIZE,
            overflows: true,
        },
        fitted: false,
        clipped: false,
    };
    assert!(StatusBar::new()
        .format(&info, Instant::now())
        .contains("4.0px clipped"));
}

// ==================== Sizing ====================

#[test]
fn test_default_sizer_bounds() {
    let sizer = CharSizer::default();
    assert_eq!(sizer.min, DEFAULT_MIN_CHAR_SIZE);
    assert_eq!(sizer.max, DEFAULT_MAX_CHAR_SIZE);
    assert_eq!(sizer.policy, SizingPolicy::FitBoth);
}

#[test]
fn test_wider_sampling_never_grows_glyphs() {
    let sizer = CharSizer::default();
    let viewport = Viewport::new(1280.0, 720.0);
    let mut prev = f32::MAX;
    for width in (20..=200).step_by(4) {
        let size = sizer
            .size_for(viewport, SamplingConfig::from_width(width).unwrap())
            .size;
        assert!(size <= prev, "width {width}: {size} > {prev}");
        prev = size;
    }
}

#[test]
fn test_fit_width_allows_taller_glyphs() {
    let viewport = Viewport::new(1200.0, 300.0);
    let sampling = SamplingConfig::from_width(100).unwrap();
    let both = CharSizer::new(1.0, 100.0, SizingPolicy::FitBoth).size_for(viewport, sampling);
    let width = CharSizer::new(1.0, 100.0, SizingPolicy::FitWidth).size_for(viewport, sampling);
    assert!(width.size > both.size);
}

#[test]
fn test_fit_in_cells_exact() {
    let area = Rect::new(0, 0, 100, 56);
    let placement = fit_in_cells(area, 100, 56);
    assert_eq!(placement.rect, area);
    assert!(!placement.clipped);
}

#[test]
fn test_default_settings_fit_an_80x24_terminal() {
    let (main, _) = split_status(Rect::new(0, 0, 80, 24), true);
    let requested = RenderSettings::default().sampling;
    assert!(fit_in_cells(main, requested.width(), requested.height()).clipped);

    let fitted = fit_sampling(requested, main, SizingPolicy::FitBoth);
    let placement = fit_in_cells(main, fitted.width(), fitted.height());
    assert!(!placement.clipped);
    assert_eq!(placement.rect.height, main.height);
}

// ==================== Screen Layout ====================

#[test]
fn test_split_status_on_tiny_terminal() {
    let (main, status) = split_status(Rect::new(0, 0, 10, 1), true);
    assert_eq!(main.height, 0);
    assert_eq!(status, Some(Rect::new(0, 0, 10, 1)));
}

#[test]
fn test_render_screen_draws_grid_and_status() {
    let config = SamplingConfig::from_width(8).unwrap();
    let mut grid = RenderedGrid::new();
    grid.render(
        &vec![0; config.buffer_len()],
        config,
        &Palette::custom("#.").unwrap(),
    );

    let mut terminal = Terminal::new(TestBackend::new(8, 6)).unwrap();
    let mut clipped = None;
    terminal
        .draw(|frame| {
            let area = frame.area();
            let placement =
                render_screen(frame, &grid, DisplayTheme::Default, Some("status"), area);
            clipped = Some(placement.clipped);
        })
        .unwrap();

    // 8x5 grid in an 8x5 main area
    assert_eq!(clipped, Some(false));
    let buffer = terminal.backend().buffer();
    let row = |y: u16| -> String { (0..8).map(|x| buffer[(x, y)].symbol().to_string()).collect() };
    assert_eq!(row(0), "########");
    assert_eq!(row(4), "########");
    assert_eq!(row(5), "status  ");
}
