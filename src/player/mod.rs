//! The video player widget and its host loop.
//!
//! # Architecture
//!
//! - `widget`: [`VideoPlayer`], mount / tick / unmount lifecycle and drawing
//! - `options`: [`PlayerOptions`] and their validation
//! - `pacing`: tick interval math and the [`Ticker`] deadline
//! - `strategy`: [`UpdateStrategy`] and the frame presenters behind it
//! - `controls`: the [`PlayerControls`] seam and [`DefaultControls`]
//! - `time`: [`TimeDisplayMode`] and clock formatting
//! - `state`: [`PlaybackSession`] and shared result types
//! - `input`: keyboard handling
//! - `host`: full-screen event loop around one player
//!
//! # Usage
//!
//! ```no_run
//! use tuivid::player::{run_player, HostOptions, PlaybackResult, PlayerOptions, VideoPlayer};
//! use tuivid::graphics::ImageType;
//! use tuivid::video;
//! use std::path::Path;
//!
//! let path = Path::new("clip.mp4");
//! let player = VideoPlayer::with_options(
//!     PlayerOptions::new(path).with_image_type(ImageType::Halfcell),
//! )?;
//! let source = video::open_file(path)?;
//! match run_player(player, source, HostOptions::default())? {
//!     PlaybackResult::Finished(name) => println!("Finished: {}", name),
//!     PlaybackResult::Interrupted => println!("Stopped by user"),
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod controls;
mod host;
pub(crate) mod input;
mod options;
pub mod pacing;
pub mod state;
pub mod strategy;
pub mod time;
mod widget;

pub use controls::{DefaultControls, PlayerControls};
pub use host::{render_screen, run_player, HostOptions, PlaybackResult};
pub use options::PlayerOptions;
pub use pacing::{tick_interval, Ticker};
pub use state::{InputResult, PlaybackSession, TickOutcome};
pub use strategy::{presenter_for, FramePresenter, UpdateStrategy};
pub use time::{format_clock, format_time, TimeDisplayMode};
pub use widget::VideoPlayer;
