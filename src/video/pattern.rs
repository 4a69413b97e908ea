//! Generated test pattern, a decoder-free frame source.
//!
//! Draws seven vertical color bars with a white bar sweeping across them,
//! one column step per frame. Used by `tuivid demo` and by tests.

use image::{Rgb, RgbImage};

use crate::error::VideoError;

use super::{FrameSource, VideoFrame, VideoMetadata};

/// Classic 75% color bars, left to right.
const BARS: [[u8; 3]; 7] = [
    [191, 191, 191],
    [191, 191, 0],
    [0, 191, 191],
    [0, 191, 0],
    [191, 0, 191],
    [191, 0, 0],
    [0, 0, 191],
];

/// Frame source that synthesizes a fixed number of frames.
#[derive(Debug, Clone)]
pub struct TestPattern {
    metadata: VideoMetadata,
    next_index: u64,
}

impl TestPattern {
    /// Create a pattern of `frames` frames at `fps`.
    pub fn new(width: u32, height: u32, fps: f64, frames: u64) -> Self {
        let duration = if fps > 0.0 { frames as f64 / fps } else { 0.0 };
        Self {
            metadata: VideoMetadata {
                width,
                height,
                fps,
                duration,
                frame_count: frames,
                codec: "testsrc".to_string(),
            },
            next_index: 0,
        }
    }

    /// Render frame `index` of the pattern.
    pub fn frame_image(&self, index: u64) -> RgbImage {
        let (width, height) = (self.metadata.width, self.metadata.height);
        let sweep_x = if width > 0 {
            (index % u64::from(width)) as u32
        } else {
            0
        };

        RgbImage::from_fn(width, height, |x, _| {
            if x == sweep_x {
                return Rgb([255, 255, 255]);
            }
            let bar = (x as usize * BARS.len()) / width.max(1) as usize;
            Rgb(BARS[bar.min(BARS.len() - 1)])
        })
    }
}

impl FrameSource for TestPattern {
    fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    fn next_frame(&mut self) -> Result<Option<VideoFrame>, VideoError> {
        if self.next_index >= self.metadata.frame_count {
            return Ok(None);
        }
        let index = self.next_index;
        self.next_index += 1;
        let timestamp = self.metadata.frame_time(index);
        Ok(Some(VideoFrame::new(index, timestamp, self.frame_image(index))))
    }
}
