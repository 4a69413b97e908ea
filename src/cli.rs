//! Command line definition.
//!
//! Lives in the library so that `xtask` can render the man page from the
//! same definition the binary parses.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::graphics::ImageType;
use crate::player::{TimeDisplayMode, UpdateStrategy};

#[cfg(not(feature = "release"))]
const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ", built ",
    env!("TUIVID_BUILD_DATE"),
    ")"
);

#[cfg(feature = "release")]
const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("TUIVID_BUILD_DATE"),
    ")"
);

/// Play videos in the terminal as sixel, kitty, half-block or unicode graphics
#[derive(Debug, Parser)]
#[command(name = "tuivid", version, long_version = LONG_VERSION, about)]
pub struct Cli {
    /// Log to stderr (commands that do not take over the terminal)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Play a video file
    Play {
        /// Video file to play
        file: PathBuf,

        #[command(flatten)]
        playback: PlaybackArgs,
    },

    /// Play a generated color bar test pattern (no decoder needed)
    Demo {
        /// Number of frames to generate
        #[arg(long, default_value_t = 150)]
        frames: u64,

        /// Frame rate of the pattern
        #[arg(long, default_value_t = 30.0)]
        fps: f64,

        /// Pattern width in pixels
        #[arg(long, default_value_t = 320)]
        width: u32,

        /// Pattern height in pixels
        #[arg(long, default_value_t = 180)]
        height: u32,

        #[command(flatten)]
        playback: PlaybackArgs,
    },

    /// Show metadata of a video file
    Info {
        /// Video file to inspect
        file: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Playback flags; each one overrides the config file for this run.
#[derive(Debug, Clone, Default, Args)]
pub struct PlaybackArgs {
    /// Rendering backend
    #[arg(short, long, value_enum)]
    pub image_type: Option<ImageType>,

    /// Playback speed multiplier
    #[arg(short, long)]
    pub speed: Option<f64>,

    /// How frames are pushed to the image widget
    #[arg(short = 'u', long, value_enum)]
    pub update_strategy: Option<UpdateStrategy>,

    /// Show only every n-th frame
    #[arg(short = 'f', long)]
    pub fps_decrease_factor: Option<u32>,

    /// Time label format in the controls
    #[arg(long, value_enum)]
    pub time_display: Option<TimeDisplayMode>,

    /// Hide the playback controls
    #[arg(long)]
    pub no_controls: bool,

    /// Quit when the video ends
    #[arg(long)]
    pub exit_on_finish: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn play_parses_overrides() {
        let cli = Cli::try_parse_from([
            "tuivid",
            "play",
            "clip.mp4",
            "--image-type",
            "kitty",
            "--speed",
            "1.5",
            "-u",
            "replace-widget",
            "-f",
            "2",
            "--exit-on-finish",
        ])
        .unwrap();

        let Commands::Play { file, playback } = cli.command else {
            panic!("expected play");
        };
        assert_eq!(file, PathBuf::from("clip.mp4"));
        assert_eq!(playback.image_type, Some(ImageType::Tgp));
        assert_eq!(playback.speed, Some(1.5));
        assert_eq!(playback.update_strategy, Some(UpdateStrategy::Remount));
        assert_eq!(playback.fps_decrease_factor, Some(2));
        assert!(playback.exit_on_finish);
        assert!(!playback.no_controls);
    }

    #[test]
    fn play_requires_file() {
        assert!(Cli::try_parse_from(["tuivid", "play"]).is_err());
    }

    #[test]
    fn unknown_image_type_is_rejected() {
        assert!(Cli::try_parse_from(["tuivid", "play", "a.mp4", "-i", "ascii"]).is_err());
    }

    #[test]
    fn demo_has_defaults() {
        let cli = Cli::try_parse_from(["tuivid", "demo"]).unwrap();
        let Commands::Demo {
            frames,
            fps,
            width,
            height,
            ..
        } = cli.command
        else {
            panic!("expected demo");
        };
        assert_eq!((frames, width, height), (150, 320, 180));
        assert_eq!(fps, 30.0);
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["tuivid", "config", "show", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }
}
