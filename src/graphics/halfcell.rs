//! Half-cell renderer: two vertically stacked pixels per terminal cell.

use image::RgbImage;
use ratatui::{buffer::Buffer, layout::Rect, style::Color};

/// Upper half block; fg paints the upper pixel, bg the lower one.
const UPPER_HALF: &str = "▀";

/// Draw an image that is already sized to `cols x 2*rows` pixels.
///
/// Pixels outside `area` are clipped. An odd last pixel row leaves the
/// lower half of its cells at the default background.
pub fn render_halfcell(img: &RgbImage, area: Rect, buf: &mut Buffer) {
    let cols = area.width.min(img.width().min(u32::from(u16::MAX)) as u16);
    let rows = area.height.min(img.height().div_ceil(2).min(u32::from(u16::MAX)) as u16);

    for row in 0..rows {
        let upper_y = u32::from(row) * 2;
        let lower_y = upper_y + 1;
        for col in 0..cols {
            let x = u32::from(col);
            let upper = img.get_pixel(x, upper_y);
            let lower = (lower_y < img.height()).then(|| img.get_pixel(x, lower_y));

            if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                cell.set_symbol(UPPER_HALF)
                    .set_fg(Color::Rgb(upper[0], upper[1], upper[2]))
                    .set_bg(lower.map_or(Color::Reset, |p| Color::Rgb(p[0], p[1], p[2])));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn each_cell_carries_upper_and_lower_pixel() {
        let mut img = RgbImage::new(1, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(0, 1, Rgb([0, 0, 255]));

        let area = Rect::new(0, 0, 1, 1);
        let mut buf = Buffer::empty(area);
        render_halfcell(&img, area, &mut buf);

        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
        assert_eq!(cell.bg, Color::Rgb(0, 0, 255));
    }

    #[test]
    fn odd_height_leaves_lower_half_default() {
        let img = RgbImage::from_pixel(2, 3, Rgb([10, 20, 30]));
        let area = Rect::new(0, 0, 2, 2);
        let mut buf = Buffer::empty(area);
        render_halfcell(&img, area, &mut buf);

        assert_eq!(buf[(1, 0)].bg, Color::Rgb(10, 20, 30));
        assert_eq!(buf[(1, 1)].fg, Color::Rgb(10, 20, 30));
        assert_eq!(buf[(1, 1)].bg, Color::Reset);
    }

    #[test]
    fn clips_to_area_and_respects_offset() {
        let img = RgbImage::from_pixel(10, 10, Rgb([1, 1, 1]));
        let full = Rect::new(0, 0, 6, 4);
        let area = Rect::new(2, 1, 3, 2);
        let mut buf = Buffer::empty(full);
        render_halfcell(&img, area, &mut buf);

        assert_eq!(buf[(2, 1)].symbol(), "▀");
        assert_eq!(buf[(4, 2)].symbol(), "▀");
        // outside the area untouched
        assert_eq!(buf[(5, 1)].symbol(), " ");
        assert_eq!(buf[(2, 3)].symbol(), " ");
        assert_eq!(buf[(1, 1)].symbol(), " ");
    }
}
