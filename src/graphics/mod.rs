//! Terminal graphics encodings for video frames.
//!
//! A frame reaches the screen through one of four backends:
//!
//! - `sixel`: DEC sixel bitmap graphics (slow, widest pixel support)
//! - `kitty`: the kitty terminal graphics protocol, "TGP" (mid)
//! - `halfcell`: `▀` cells with fg/bg colors, two pixels per cell (fast)
//! - `unicode`: one shaded block glyph per cell (fastest)
//!
//! [`TerminalImage`] is the ratatui widget that picks the encoder for its
//! [`ImageType`] and caches the encoded output between draws.

mod cells;
mod halfcell;
mod kitty;
mod sixel;
mod terminal_image;
mod unicode;

pub use cells::{fit_dimensions, CellSize};
pub use halfcell::render_halfcell;
pub use kitty::{delete_kitty_image, encode_kitty, KITTY_CHUNK_SIZE};
pub use sixel::{encode_sixel, palette_index};
pub use terminal_image::TerminalImage;
pub use unicode::{render_unicode, SHADE_RAMP};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Image rendering backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    /// Sixel bitmap graphics (slow)
    #[default]
    Sixel,
    /// Kitty terminal graphics protocol (mid)
    #[serde(alias = "kitty")]
    #[value(alias = "kitty")]
    Tgp,
    /// Half-block cells, two pixels per cell (fast)
    Halfcell,
    /// Shaded block glyphs, one pixel per cell (fastest)
    Unicode,
}

impl ImageType {
    pub const ALL: [ImageType; 4] = [
        ImageType::Sixel,
        ImageType::Tgp,
        ImageType::Halfcell,
        ImageType::Unicode,
    ];

    /// Measured seconds it takes to render one frame with this backend.
    pub fn render_delay(self) -> f64 {
        match self {
            ImageType::Sixel => 0.0373,
            ImageType::Halfcell => 0.01065,
            ImageType::Unicode => 0.00116,
            ImageType::Tgp => 0.00288,
        }
    }

    /// Highest frame rate this backend can sustain, from [`Self::render_delay`].
    pub fn max_fps(self) -> f64 {
        1.0 / self.render_delay()
    }

    /// Whether frames are emitted as an escape sequence carrying real pixels,
    /// as opposed to colored text cells.
    pub fn is_pixel_protocol(self) -> bool {
        matches!(self, ImageType::Sixel | ImageType::Tgp)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImageType::Sixel => "sixel",
            ImageType::Tgp => "tgp",
            ImageType::Halfcell => "halfcell",
            ImageType::Unicode => "unicode",
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
