//! Rendering functions for terminal UI components.
//!
//! This module contains pure rendering logic separated from terminal
//! lifecycle management. All functions operate on ratatui Frame objects
//! without managing terminal state.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use crate::ascii::RenderedGrid;
use crate::display::{fit_in_cells, DisplayTheme, GridPlacement};

const WAITING_TEXT: &str = "waiting for camera...";

/// Split the terminal area into the grid area and the optional status line.
pub fn split_status(area: Rect, show_status: bool) -> (Rect, Option<Rect>) {
    if !show_status || area.height == 0 {
        return (area, None);
    }
    let main = Rect {
        height: area.height - 1,
        ..area
    };
    let status = Rect {
        y: area.y + area.height - 1,
        height: 1,
        ..area
    };
    (main, Some(status))
}

/// Where `grid` lands inside `area`.
pub fn grid_placement(grid: &RenderedGrid, area: Rect) -> GridPlacement {
    fit_in_cells(area, grid.width(), grid.height())
}

/// Render the glyph grid centered in `area`, in the theme's foreground color.
///
/// Before the first frame a waiting message is shown instead.
pub fn render_grid(
    frame: &mut ratatui::Frame,
    grid: &RenderedGrid,
    theme: DisplayTheme,
    area: Rect,
) -> GridPlacement {
    let style = Style::default().fg(theme.foreground());

    if grid.is_empty() {
        let placement = fit_in_cells(area, area.width, 1);
        let paragraph = Paragraph::new(WAITING_TEXT)
            .alignment(Alignment::Center)
            .style(style);
        frame.render_widget(paragraph, placement.rect);
        return placement;
    }

    let placement = grid_placement(grid, area);
    let paragraph = Paragraph::new(grid.as_str()).style(style);
    frame.render_widget(paragraph, placement.rect);
    placement
}

/// Render the status line text.
pub fn render_status_bar(frame: &mut ratatui::Frame, text: &str, area: Rect) {
    let paragraph =
        Paragraph::new(text).style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(paragraph, area);
}

/// Render a complete screen: grid plus optional status line.
pub fn render_screen(
    frame: &mut ratatui::Frame,
    grid: &RenderedGrid,
    theme: DisplayTheme,
    status: Option<&str>,
    area: Rect,
) -> GridPlacement {
    let (main, status_area) = split_status(area, status.is_some());
    let placement = render_grid(frame, grid, theme, main);
    if let (Some(text), Some(status_area)) = (status, status_area) {
        render_status_bar(frame, text, status_area);
    }
    placement
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::{Palette, SamplingConfig};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn grid(width: u16, rgba_value: u8) -> RenderedGrid {
        let config = SamplingConfig::from_width(width).unwrap();
        let mut grid = RenderedGrid::new();
        grid.render(
            &vec![rgba_value; config.buffer_len()],
            config,
            &Palette::custom("AB").unwrap(),
        );
        grid
    }

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_split_status() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(split_status(area, false), (area, None));
        let (main, status) = split_status(area, true);
        assert_eq!(main, Rect::new(0, 0, 80, 23));
        assert_eq!(status, Some(Rect::new(0, 23, 80, 1)));
    }

    #[test]
    fn test_render_grid_centered_with_theme() {
        let mut terminal = Terminal::new(TestBackend::new(12, 6)).unwrap();
        let grid = grid(4, 255);
        let mut placement = None;
        terminal
            .draw(|frame| {
                let area = frame.area();
                placement = Some(render_grid(frame, &grid, DisplayTheme::Alt, area));
            })
            .unwrap();

        let placement = placement.unwrap();
        assert_eq!(placement.rect, Rect::new(4, 2, 4, 2));
        assert!(!placement.clipped);
        assert_eq!(row_text(&terminal, 2), "    BBBB    ");
        assert_eq!(terminal.backend().buffer()[(4, 2)].fg, Color::Green);
    }

    #[test]
    fn test_render_grid_clips() {
        let mut terminal = Terminal::new(TestBackend::new(10, 4)).unwrap();
        let grid = grid(20, 0);
        let mut placement = None;
        terminal
            .draw(|frame| {
                let area = frame.area();
                placement = Some(render_grid(frame, &grid, DisplayTheme::Default, area));
            })
            .unwrap();
        assert!(placement.unwrap().clipped);
        assert_eq!(row_text(&terminal, 0), "AAAAAAAAAA");
    }

    #[test]
    fn test_render_screen_waiting_and_status() {
        let mut terminal = Terminal::new(TestBackend::new(30, 5)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_screen(
                    frame,
                    &RenderedGrid::new(),
                    DisplayTheme::Default,
                    Some(" waiting "),
                    area,
                );
            })
            .unwrap();
        assert!(row_text(&terminal, 1).contains(WAITING_TEXT));
        assert!(row_text(&terminal, 4).starts_with(" waiting "));
    }
}
