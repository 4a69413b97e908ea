//! Video stream metadata.

use serde::Serialize;

use crate::graphics::CellSize;

/// Properties of a video stream as reported by its source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoMetadata {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Native frames per second
    pub fps: f64,
    /// Total duration in seconds (0 if unknown)
    pub duration: f64,
    /// Number of frames (estimated from duration when the container does not say)
    pub frame_count: u64,
    /// Codec name, empty if unknown
    pub codec: String,
}

impl VideoMetadata {
    /// Seconds between two consecutive frames at native speed.
    pub fn delay_between_frames(&self) -> f64 {
        if self.fps > 0.0 {
            1.0 / self.fps
        } else {
            0.0
        }
    }

    /// Metadata for the stream with only every `factor`-th frame kept.
    ///
    /// The duration is unchanged; frame rate and count shrink by `factor`.
    /// A factor of 0 is treated as 1.
    pub fn decrease_fps(&self, factor: u32) -> Self {
        let factor = factor.max(1);
        Self {
            fps: self.fps / f64::from(factor),
            frame_count: self.frame_count.div_ceil(u64::from(factor)),
            ..self.clone()
        }
    }

    /// Video size in terminal cells.
    pub fn cell_size(&self, cell: CellSize) -> (u16, u16) {
        cell.to_cells(self.width, self.height)
    }

    /// Timestamp in seconds of a native frame index.
    pub fn frame_time(&self, frame_index: u64) -> f64 {
        frame_index as f64 * self.delay_between_frames()
    }
}
