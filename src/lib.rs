//! tuivid - play videos inside terminal UIs
//!
//! The library provides [`VideoPlayer`], a ratatui widget that decodes a
//! video file and shows it as sixel, kitty, half-block or unicode graphics,
//! plus the pieces it is built from:
//!
//! - [`video`]: frame sources (FFmpeg decoder, generated test pattern)
//! - [`graphics`]: image encoders and the [`TerminalImage`] widget
//! - [`player`]: pacing, update strategies, controls, host loop
//! - [`config`], [`logging`], [`cli`], [`tui`]: support for the binary

pub mod cli;
pub mod config;
pub mod error;
pub mod graphics;
pub mod logging;
pub mod player;
pub mod tui;
pub mod video;

pub use config::Config;
pub use error::VideoError;
pub use graphics::{ImageType, TerminalImage};
pub use player::{
    DefaultControls, PlayerControls, PlayerOptions, TimeDisplayMode, UpdateStrategy, VideoPlayer,
};
