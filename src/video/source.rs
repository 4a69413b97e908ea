//! The frame source seam between the player and a decoder.

use crate::error::VideoError;

use super::{VideoFrame, VideoMetadata};

/// A stream of decoded frames.
///
/// Implementations are pulled synchronously from the player's event loop,
/// one call per displayed frame.
pub trait FrameSource {
    /// Stream metadata, available as soon as the source is open.
    fn metadata(&self) -> &VideoMetadata;

    /// Decode the next frame. `Ok(None)` signals end of stream.
    fn next_frame(&mut self) -> Result<Option<VideoFrame>, VideoError>;

    /// Pull up to `count` frames and return the last one.
    ///
    /// Used for frame-rate decimation: the intermediate frames still have to
    /// be decoded, but only the last is handed on. Returns `Ok(None)` only if
    /// the stream was already exhausted.
    fn next_frame_skipping(&mut self, count: u32) -> Result<Option<VideoFrame>, VideoError> {
        let mut last = None;
        for _ in 0..count.max(1) {
            match self.next_frame()? {
                Some(frame) => last = Some(frame),
                None => break,
            }
        }
        Ok(last)
    }
}
