//! Player state management
//!
//! Contains the `PlaybackSession` struct that describes where a mounted
//! player is in its stream, as well as shared result types used by the
//! player and its host loop.

use std::path::{Path, PathBuf};

use crate::video::{VideoFrame, VideoMetadata};

/// Result of processing an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue normal playback/rendering
    Continue,
    /// Exit the player
    Quit,
}

/// What a call to [`crate::player::VideoPlayer::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not due yet, paused, or not running.
    Idle,
    /// A new frame was handed to the view.
    Advanced,
    /// The stream ended on this tick. Reported exactly once per mount.
    Finished,
}

/// Playback position and settings of a mounted player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSession {
    /// File being played (empty for generated sources)
    pub path: PathBuf,
    /// Playback speed multiplier (1.0 = native)
    pub speed: f64,
    /// Native index of the frame on screen
    pub frame_index: u64,
    /// Stream timestamp of the frame on screen, in seconds
    pub position: f64,
    /// Number of frames handed to the view so far
    pub frames_shown: u64,
    /// Stream duration in seconds (0 if unknown)
    pub duration: f64,
    /// Native frame count of the stream
    pub frame_count: u64,
    /// Native frames per second
    pub fps: f64,
    pub paused: bool,
    /// Whether end of stream has been reached
    pub finished: bool,
}

impl PlaybackSession {
    /// Speed bounds for interactive speed changes.
    pub const MIN_SPEED: f64 = 0.1;
    pub const MAX_SPEED: f64 = 16.0;

    pub fn new(path: &Path, speed: f64, metadata: &VideoMetadata) -> Self {
        Self {
            path: path.to_path_buf(),
            speed,
            frame_index: 0,
            position: 0.0,
            frames_shown: 0,
            duration: metadata.duration,
            frame_count: metadata.frame_count,
            fps: metadata.fps,
            paused: false,
            finished: false,
        }
    }

    /// Record that `frame` is now on screen.
    pub fn record_frame(&mut self, frame: &VideoFrame) {
        self.frame_index = frame.index;
        self.position = frame.timestamp;
        self.frames_shown += 1;
    }

    /// Fraction of the stream played, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.finished {
            return 1.0;
        }
        if self.frame_count > 1 {
            (self.frame_index as f64 / (self.frame_count - 1) as f64).clamp(0.0, 1.0)
        } else if self.duration > 0.0 {
            (self.position / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Next faster speed step (x1.5, capped). Never slower than now.
    pub fn faster(&self) -> f64 {
        (self.speed * 1.5).min(Self::MAX_SPEED.max(self.speed))
    }

    /// Next slower speed step (/1.5, floored). Never faster than now.
    pub fn slower(&self) -> f64 {
        (self.speed / 1.5).max(Self::MIN_SPEED.min(self.speed))
    }

    /// File name for status messages.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "test pattern".to_string())
    }
}
