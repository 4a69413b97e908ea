//! Decoded video frames.

use image::RgbImage;

/// One decoded frame on its way from a source to the screen.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// Index of the frame in the source stream (0-based)
    pub index: u64,
    /// Presentation time in seconds
    pub timestamp: f64,
    /// RGB pixels
    pub image: RgbImage,
}

impl VideoFrame {
    pub fn new(index: u64, timestamp: f64, image: RgbImage) -> Self {
        Self {
            index,
            timestamp,
            image,
        }
    }

    /// Take the pixels, dropping the frame bookkeeping.
    pub fn into_image(self) -> RgbImage {
        self.image
    }
}
