//! Construction options for [`super::VideoPlayer`].

use std::path::{Path, PathBuf};

use crate::error::VideoError;
use crate::graphics::ImageType;

use super::pacing::{validate_fps_decrease_factor, validate_speed};
use super::strategy::UpdateStrategy;

/// Everything a player needs to know before it is mounted.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerOptions {
    pub path: PathBuf,
    pub image_type: ImageType,
    /// Playback speed multiplier, must be positive
    pub speed: f64,
    pub update_strategy: UpdateStrategy,
    /// Show only every n-th frame, must be at least 1
    pub fps_decrease_factor: u32,
}

impl PlayerOptions {
    /// Options with defaults: sixel, speed 1, reactive, every frame.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            image_type: ImageType::default(),
            speed: 1.0,
            update_strategy: UpdateStrategy::default(),
            fps_decrease_factor: 1,
        }
    }

    pub fn with_image_type(mut self, image_type: ImageType) -> Self {
        self.image_type = image_type;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_update_strategy(mut self, update_strategy: UpdateStrategy) -> Self {
        self.update_strategy = update_strategy;
        self
    }

    pub fn with_fps_decrease_factor(mut self, factor: u32) -> Self {
        self.fps_decrease_factor = factor;
        self
    }

    /// Check the option combination without touching the file.
    pub fn validate(&self) -> Result<(), VideoError> {
        validate_speed(self.speed)?;
        validate_fps_decrease_factor(self.fps_decrease_factor)?;
        self.update_strategy.check(self.image_type)
    }
}
