//! Kitty terminal graphics protocol encoder.
//!
//! Frames are sent as raw 24-bit RGB (`f=24`), base64 encoded and split in
//! chunks. Every widget owns one image id; transmitting a new frame first
//! deletes the previous image with that id so the terminal does not keep
//! stale frames in memory.

use std::fmt::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::RgbImage;

/// Maximum payload bytes per escape sequence.
pub const KITTY_CHUNK_SIZE: usize = 4096;

/// Escape sequence that deletes an image and frees its data.
pub fn delete_kitty_image(image_id: u32) -> String {
    format!("\x1b_Ga=d,d=I,i={},q=2\x1b\\", image_id)
}

/// Encode an image for display over `cols` x `rows` cells.
///
/// The cursor is not moved (`C=1`) and terminal replies are suppressed
/// (`q=2`). Returns an empty string for an empty image.
pub fn encode_kitty(img: &RgbImage, image_id: u32, cols: u16, rows: u16) -> String {
    if img.width() == 0 || img.height() == 0 {
        return String::new();
    }

    let payload = STANDARD.encode(img.as_raw());
    let chunks: Vec<&[u8]> = payload.as_bytes().chunks(KITTY_CHUNK_SIZE).collect();

    let mut out = delete_kitty_image(image_id);
    out.reserve(payload.len() + chunks.len() * 16 + 64);

    for (i, chunk) in chunks.iter().enumerate() {
        let more = u8::from(i + 1 < chunks.len());
        if i == 0 {
            let _ = write!(
                out,
                "\x1b_Ga=T,f=24,s={},v={},i={},c={},r={},C=1,q=2,m={};",
                img.width(),
                img.height(),
                image_id,
                cols,
                rows,
                more
            );
        } else {
            let _ = write!(out, "\x1b_Gm={};", more);
        }
        out.push_str(&String::from_utf8_lossy(chunk));
        out.push_str("\x1b\\");
    }
    out
}
