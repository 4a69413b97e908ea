//! Ratatui widget that displays one RGB image with a chosen backend.

use std::sync::atomic::{AtomicU32, Ordering};

use image::imageops::{self, FilterType};
use image::RgbImage;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::cells::{fit_dimensions, CellSize};
use super::halfcell::render_halfcell;
use super::kitty::encode_kitty;
use super::sixel::encode_sixel;
use super::unicode::render_unicode;
use super::ImageType;

/// Kitty image ids are global to the terminal; hand out a fresh one per widget.
static NEXT_IMAGE_ID: AtomicU32 = AtomicU32::new(1);

/// Output of encoding the image for one particular area.
#[derive(Debug, Clone)]
enum Encoded {
    /// A pixel protocol escape sequence covering `cols x rows` cells.
    Escape {
        sequence: String,
        cols: u16,
        rows: u16,
    },
    /// Pixels already resized to the cell grid of the backend.
    Cells(RgbImage),
}

/// An image widget.
///
/// Encoding is the expensive part of drawing a frame, so the result is
/// cached for the last area it was drawn into. Replacing the image with
/// [`TerminalImage::set_image`] drops the cache; the widget itself (and its
/// kitty image id) stays the same.
#[derive(Debug)]
pub struct TerminalImage {
    image_type: ImageType,
    cell_size: CellSize,
    image: Option<RgbImage>,
    image_id: u32,
    cache: Option<(Rect, Encoded)>,
}

impl TerminalImage {
    /// Create an empty image widget.
    pub fn new(image_type: ImageType) -> Self {
        Self {
            image_type,
            cell_size: CellSize::default(),
            image: None,
            image_id: NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed),
            cache: None,
        }
    }

    /// Create an image widget showing `image`.
    pub fn with_image(image_type: ImageType, image: RgbImage) -> Self {
        let mut widget = Self::new(image_type);
        widget.image = Some(image);
        widget
    }

    pub fn with_cell_size(mut self, cell_size: CellSize) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Reuse a kitty image id from an earlier widget, so the new placement
    /// replaces the old one instead of stacking on top of it.
    pub fn with_image_id(mut self, image_id: u32) -> Self {
        self.image_id = image_id;
        self
    }

    pub fn image_type(&self) -> ImageType {
        self.image_type
    }

    pub fn image_id(&self) -> u32 {
        self.image_id
    }

    pub fn image(&self) -> Option<&RgbImage> {
        self.image.as_ref()
    }

    /// Replace the displayed pixels in place.
    pub fn set_image(&mut self, image: RgbImage) {
        self.image = Some(image);
        self.cache = None;
    }

    /// Whether an encoding for `area` is ready to be drawn without work.
    pub fn is_encoded_for(&self, area: Rect) -> bool {
        matches!(&self.cache, Some((cached, _)) if *cached == area)
    }

    fn encode(&self, image: &RgbImage, area: Rect) -> Encoded {
        let (src_w, src_h) = image.dimensions();
        match self.image_type {
            ImageType::Sixel | ImageType::Tgp => {
                let (max_w, max_h) = self.cell_size.to_pixels(area.width, area.height);
                let (w, h) = fit_dimensions(src_w, src_h, max_w, max_h);
                let resized = resize(image, w, h);
                let (cols, rows) = self.cell_size.cells_covering(w, h);
                let (cols, rows) = (cols.min(area.width), rows.min(area.height));
                let sequence = if self.image_type == ImageType::Sixel {
                    encode_sixel(&resized)
                } else {
                    encode_kitty(&resized, self.image_id, cols, rows)
                };
                Encoded::Escape {
                    sequence,
                    cols,
                    rows,
                }
            }
            ImageType::Halfcell => {
                // a half cell is cell_w x cell_h/2 pixels
                let src_h =
                    scale_height(src_h, 2 * self.cell_size.width_px, self.cell_size.height_px);
                let (w, h) = fit_dimensions(
                    src_w,
                    src_h,
                    u32::from(area.width),
                    u32::from(area.height) * 2,
                );
                Encoded::Cells(resize(image, w, h))
            }
            ImageType::Unicode => {
                let src_h = scale_height(src_h, self.cell_size.width_px, self.cell_size.height_px);
                let (w, h) =
                    fit_dimensions(src_w, src_h, u32::from(area.width), u32::from(area.height));
                Encoded::Cells(resize(image, w, h))
            }
        }
    }
}

/// Scale a pixel height by `num / den`, keeping it at least one pixel.
fn scale_height(height: u32, num: u16, den: u16) -> u32 {
    let scaled = u64::from(height) * u64::from(num) / u64::from(den.max(1));
    (scaled as u32).max(1)
}

fn resize(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    imageops::resize(image, width, height, FilterType::Triangle)
}

impl Widget for &mut TerminalImage {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let Some(image) = self.image.as_ref() else {
            return;
        };

        if !self.is_encoded_for(area) {
            let encoded = self.encode(image, area);
            tracing::trace!(
                image_type = %self.image_type,
                width = area.width,
                height = area.height,
                "encoded frame"
            );
            self.cache = Some((area, encoded));
        }
        let Some((_, encoded)) = self.cache.as_ref() else {
            return;
        };

        match encoded {
            Encoded::Escape {
                sequence,
                cols,
                rows,
            } => {
                if sequence.is_empty() {
                    return;
                }
                // The whole graphic is emitted from the top-left cell; the
                // cells underneath must not be redrawn by the diff.
                for row in 0..*rows {
                    for col in 0..*cols {
                        if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                            if row == 0 && col == 0 {
                                cell.set_symbol(sequence).set_skip(false);
                            } else {
                                cell.set_skip(true);
                            }
                        }
                    }
                }
            }
            Encoded::Cells(pixels) => match self.image_type {
                ImageType::Halfcell => render_halfcell(pixels, area, buf),
                _ => render_unicode(pixels, area, buf),
            },
        }
    }
}
