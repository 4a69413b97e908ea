//! Conversion between terminal cells and image pixels.

use serde::{Deserialize, Serialize};

/// Size of one terminal cell in pixels.
///
/// Terminals that answer the `TIOCGWINSZ` pixel fields report the real size;
/// everything else falls back to 10x20, which matches most monospace fonts
/// at common sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSize {
    pub width_px: u16,
    pub height_px: u16,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width_px: 10,
            height_px: 20,
        }
    }
}

impl CellSize {
    /// Derive the cell size from a window size in cells and pixels.
    ///
    /// Returns `None` if the terminal did not report pixel dimensions.
    pub fn from_window(columns: u16, rows: u16, width_px: u16, height_px: u16) -> Option<Self> {
        if columns == 0 || rows == 0 || width_px == 0 || height_px == 0 {
            return None;
        }
        let cell = Self {
            width_px: width_px / columns,
            height_px: height_px / rows,
        };
        (cell.width_px > 0 && cell.height_px > 0).then_some(cell)
    }

    /// Ask the terminal for its pixel size, falling back to the default.
    pub fn detect() -> Self {
        match crossterm::terminal::window_size() {
            Ok(size) => Self::from_window(size.columns, size.rows, size.width, size.height)
                .unwrap_or_default(),
            Err(e) => {
                tracing::debug!("window size query failed, using default cell size: {}", e);
                Self::default()
            }
        }
    }

    /// Pixel size to whole cells (truncating).
    pub fn to_cells(self, width_px: u32, height_px: u32) -> (u16, u16) {
        let cols = width_px / u32::from(self.width_px);
        let rows = height_px / u32::from(self.height_px);
        (clamp_u16(cols), clamp_u16(rows))
    }

    /// Cell area to pixels.
    pub fn to_pixels(self, cols: u16, rows: u16) -> (u32, u32) {
        (
            u32::from(cols) * u32::from(self.width_px),
            u32::from(rows) * u32::from(self.height_px),
        )
    }

    /// Number of cells needed to cover a pixel size (rounding up).
    pub fn cells_covering(self, width_px: u32, height_px: u32) -> (u16, u16) {
        let cols = width_px.div_ceil(u32::from(self.width_px));
        let rows = height_px.div_ceil(u32::from(self.height_px));
        (clamp_u16(cols), clamp_u16(rows))
    }
}

fn clamp_u16(value: u32) -> u16 {
    value.min(u32::from(u16::MAX)) as u16
}

/// Largest size with the source aspect ratio that fits inside `max`.
///
/// Never returns a zero dimension unless `max` has one.
pub fn fit_dimensions(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if max_w == 0 || max_h == 0 {
        return (0, 0);
    }
    if src_w == 0 || src_h == 0 {
        return (max_w, max_h);
    }

    let scale_w = max_w as f64 / src_w as f64;
    let scale_h = max_h as f64 / src_h as f64;
    let scale = scale_w.min(scale_h);

    let w = ((src_w as f64 * scale).round() as u32).clamp(1, max_w);
    let h = ((src_h as f64 * scale).round() as u32).clamp(1, max_h);
    (w, h)
}
