//! Error types for video playback.

use std::path::PathBuf;

use crate::graphics::ImageType;
use crate::player::UpdateStrategy;

/// Errors that can occur while opening, decoding or presenting a video.
#[derive(Debug, thiserror::Error)]
pub enum VideoError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("No video stream found in {path}")]
    NoVideoStream { path: PathBuf },

    #[error("Unsupported codec: {0}")]
    UnsupportedCodec(String),

    #[error("Decoding failed: {0}")]
    Decode(String),

    #[error("Invalid frame rate reported by source: {0}")]
    InvalidFrameRate(f64),

    #[error("Playback speed must be a positive number, got {0}")]
    InvalidSpeed(f64),

    #[error("fps decrease factor must be at least 1, got {0}")]
    InvalidFpsDecreaseFactor(u32),

    #[error("Update strategy '{strategy}' only supports sixel images, got '{image_type}'")]
    UnsupportedImageType {
        strategy: UpdateStrategy,
        image_type: ImageType,
    },

    #[error("Video decoding is not available (built without the `ffmpeg` feature)")]
    DecoderUnavailable,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "ffmpeg")]
    #[error("FFmpeg error: {0}")]
    Ffmpeg(#[from] ffmpeg_next::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_image_type_names_both_choices() {
        let err = VideoError::UnsupportedImageType {
            strategy: UpdateStrategy::SetImage,
            image_type: ImageType::Halfcell,
        };
        let message = err.to_string();
        assert!(message.contains("set-image"), "{}", message);
        assert!(message.contains("halfcell"), "{}", message);
    }

    #[test]
    fn file_not_found_shows_path() {
        let err = VideoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.mp4"),
        };
        assert_eq!(err.to_string(), "File not found: /tmp/missing.mp4");
    }
}
