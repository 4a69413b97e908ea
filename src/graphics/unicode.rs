//! Unicode renderer: one shaded block glyph per cell.

use image::RgbImage;
use ratatui::{buffer::Buffer, layout::Rect, style::Color};

/// Block glyphs ordered from darkest to brightest.
pub const SHADE_RAMP: [&str; 5] = [" ", "░", "▒", "▓", "█"];

/// Pick the ramp glyph for a pixel by its perceived luminance.
fn shade_for(r: u8, g: u8, b: u8) -> &'static str {
    let luminance = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    let idx = (luminance / 255.0 * (SHADE_RAMP.len() - 1) as f64).round() as usize;
    SHADE_RAMP[idx.min(SHADE_RAMP.len() - 1)]
}

/// Draw an image that is already sized to `cols x rows` pixels.
pub fn render_unicode(img: &RgbImage, area: Rect, buf: &mut Buffer) {
    let cols = area.width.min(img.width().min(u32::from(u16::MAX)) as u16);
    let rows = area.height.min(img.height().min(u32::from(u16::MAX)) as u16);

    for row in 0..rows {
        for col in 0..cols {
            let p = img.get_pixel(u32::from(col), u32::from(row));
            if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                cell.set_symbol(shade_for(p[0], p[1], p[2]))
                    .set_fg(Color::Rgb(p[0], p[1], p[2]));
            }
        }
    }
}
