//! Layout helpers for full-screen views.

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// A `width` x `height` area centered in `area`, shrunk to fit.
pub fn centered_area(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}
