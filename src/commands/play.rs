//! `play` and `demo` handlers

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use tuivid::cli::PlaybackArgs;
use tuivid::config::PlayerConfig;
use tuivid::player::{
    run_player, tick_interval, DefaultControls, HostOptions, PlaybackResult, UpdateStrategy,
};
use tuivid::tui::current_theme;
use tuivid::video::{self, FrameSource, TestPattern};
use tuivid::{Config, VideoPlayer};

/// Size and rate of the generated demo pattern.
#[derive(Debug, Clone, Copy)]
pub struct DemoSpec {
    pub frames: u64,
    pub fps: f64,
    pub width: u32,
    pub height: u32,
}

/// Play a video file.
#[cfg(not(tarpaulin_include))]
pub fn handle_play(file: &Path, args: &PlaybackArgs) -> Result<()> {
    let config = Config::load()?;
    let settings = apply_overrides(&config.player, args);

    // everything that can fail on bad input fails before the terminal is taken
    let player = build_player(file, &settings)?;
    let source = video::open_file(file)?;

    start_file_logging(&config);
    run(player, source, &settings)
}

/// Play the generated test pattern.
#[cfg(not(tarpaulin_include))]
pub fn handle_demo(spec: DemoSpec, args: &PlaybackArgs) -> Result<()> {
    if spec.width == 0 || spec.height == 0 {
        bail!("Pattern size must be at least 1x1, got {}x{}", spec.width, spec.height);
    }
    let config = Config::load()?;
    let settings = apply_overrides(&config.player, args);

    let player = build_player(&PathBuf::new(), &settings)?;
    tick_interval(spec.fps, settings.fps_decrease_factor, settings.speed)?;
    let source = Box::new(TestPattern::new(spec.width, spec.height, spec.fps, spec.frames));

    start_file_logging(&config);
    run(player, source, &settings)
}

/// Config values with command line flags laid over them.
pub fn apply_overrides(base: &PlayerConfig, args: &PlaybackArgs) -> PlayerConfig {
    let mut settings = base.clone();
    if let Some(image_type) = args.image_type {
        settings.image_type = image_type;
    }
    if let Some(speed) = args.speed {
        settings.speed = speed;
    }
    if let Some(strategy) = args.update_strategy {
        settings.update_strategy = strategy;
    }
    if let Some(factor) = args.fps_decrease_factor {
        settings.fps_decrease_factor = factor;
    }
    if let Some(time_display) = args.time_display {
        settings.time_display = time_display;
    }
    if args.no_controls {
        settings.show_controls = false;
    }
    if args.exit_on_finish {
        settings.exit_on_finish = true;
    }
    settings
}

/// A validated, unmounted player for `path`.
pub fn build_player(path: &Path, settings: &PlayerConfig) -> Result<VideoPlayer> {
    let player = VideoPlayer::with_options(settings.to_options(path))?;
    if !settings.show_controls {
        return Ok(player);
    }
    // reactive redraws the whole player per frame anyway
    let controls = DefaultControls::new(settings.time_display)
        .with_refresh(settings.update_strategy != UpdateStrategy::Reactive);
    Ok(player.with_controls(controls))
}

#[cfg(not(tarpaulin_include))]
fn start_file_logging(config: &Config) {
    let theme = current_theme();
    let result = config
        .log_path()
        .and_then(|path| tuivid::logging::init_file(&path, &config.log.level));
    if let Err(e) = result {
        eprintln!("{}", theme.error_text(&format!("Logging disabled: {:#}", e)));
    }
}

#[cfg(not(tarpaulin_include))]
fn run(player: VideoPlayer, source: Box<dyn FrameSource>, settings: &PlayerConfig) -> Result<()> {
    let options = HostOptions {
        exit_on_finish: settings.exit_on_finish,
        ..HostOptions::default()
    };
    let theme = current_theme();
    match run_player(player, source, options)? {
        PlaybackResult::Finished(name) => {
            println!("{}", theme.success_text(&format!("Finished: {}", name)));
        }
        PlaybackResult::Interrupted => {
            println!("{}", theme.secondary_text("Playback stopped."));
        }
    }
    Ok(())
}
