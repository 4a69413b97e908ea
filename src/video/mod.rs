//! Video sources for the player.
//!
//! - `source`: the [`FrameSource`] trait the player pulls frames through
//! - `ffmpeg`: [`FfmpegDecoder`], decodes real files (feature `ffmpeg`)
//! - `pattern`: [`TestPattern`], generated color bars for demos and tests
//! - `metadata` / `frame`: the data handed from a source to the player

#[cfg(feature = "ffmpeg")]
mod ffmpeg;
mod frame;
mod metadata;
mod pattern;
mod source;

#[cfg(feature = "ffmpeg")]
pub use ffmpeg::FfmpegDecoder;
pub use frame::VideoFrame;
pub use metadata::VideoMetadata;
pub use pattern::TestPattern;
pub use source::FrameSource;

use std::path::Path;

use crate::error::VideoError;

/// Open a video file with the decoder compiled into this build.
pub fn open_file(path: &Path) -> Result<Box<dyn FrameSource>, VideoError> {
    #[cfg(feature = "ffmpeg")]
    {
        Ok(Box::new(FfmpegDecoder::open(path)?))
    }
    #[cfg(not(feature = "ffmpeg"))]
    {
        if !path.exists() {
            return Err(VideoError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(VideoError::DecoderUnavailable)
    }
}

/// Read the metadata of a video file without keeping the decoder open.
pub fn probe_file(path: &Path) -> Result<VideoMetadata, VideoError> {
    open_file(path).map(|source| source.metadata().clone())
}
