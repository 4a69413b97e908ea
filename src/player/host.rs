//! Full-screen host for a single [`VideoPlayer`].
//!
//! Owns the terminal for the duration of playback and drives the player
//! from one event loop: draw when something changed, block on input until
//! the next tick deadline, then tick.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};

use crate::graphics::{delete_kitty_image, CellSize, ImageType};
use crate::tui::footer::render_footer;
use crate::tui::ui::centered_area;
use crate::tui::TuiApp;
use crate::video::FrameSource;

use super::input::{handle_event, KEY_HINTS};
use super::state::{InputResult, TickOutcome};
use super::widget::VideoPlayer;

/// Longest the loop blocks on input while nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Result of a playback run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackResult {
    /// The video played to the end (carries the display name)
    Finished(String),
    /// The user quit before the end
    Interrupted,
}

/// How the host behaves around the player.
#[derive(Debug, Clone, Copy)]
pub struct HostOptions {
    /// Leave as soon as the stream ends instead of waiting for `q`
    pub exit_on_finish: bool,
    /// Show key hints on the last line
    pub show_footer: bool,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            exit_on_finish: false,
            show_footer: true,
        }
    }
}

/// Play `source` full screen until it ends or the user quits.
pub fn run_player(
    mut player: VideoPlayer,
    source: Box<dyn FrameSource>,
    options: HostOptions,
) -> Result<PlaybackResult> {
    let mut app = TuiApp::new()?;
    player.set_cell_size(CellSize::detect());
    player.mount_source(source, Instant::now())?;

    let result = event_loop(&mut app, &mut player, options);

    if player.options().image_type == ImageType::Tgp {
        if let Some(image) = player.presenter().and_then(|p| p.image()) {
            app.write_raw(&delete_kitty_image(image.image_id()))?;
        }
    }
    player.unmount();
    result
}

fn event_loop(
    app: &mut TuiApp,
    player: &mut VideoPlayer,
    options: HostOptions,
) -> Result<PlaybackResult> {
    let name = player
        .session()
        .map(|s| s.display_name())
        .unwrap_or_default();

    loop {
        if player.needs_render() {
            app.draw(|frame| render_screen(frame, player, options.show_footer))?;
        }

        let now = Instant::now();
        let timeout = player
            .next_deadline()
            .map_or(IDLE_POLL, |deadline| deadline.saturating_duration_since(now))
            .min(IDLE_POLL);

        if event::poll(timeout)? {
            let event = event::read()?;
            if matches!(event, Event::Resize(..)) && player.options().image_type.is_pixel_protocol()
            {
                // stale pixel graphics are not covered by the cell diff
                app.clear()?;
            }
            if handle_event(event, player, Instant::now()) == InputResult::Quit {
                return Ok(if player.is_finished() {
                    PlaybackResult::Finished(name)
                } else {
                    PlaybackResult::Interrupted
                });
            }
        }

        if player.tick(Instant::now())? == TickOutcome::Finished && options.exit_on_finish {
            return Ok(PlaybackResult::Finished(name));
        }
    }
}

/// Lay out the player centered above an optional footer.
pub fn render_screen(frame: &mut Frame, player: &mut VideoPlayer, show_footer: bool) {
    let footer_height = u16::from(show_footer);
    let [main_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(footer_height)])
            .areas(frame.area());

    let target = match player.preferred_size() {
        Some((cols, rows)) => centered_area(cols, rows, main_area),
        None => main_area,
    };
    frame.render_widget(&mut *player, target);

    if show_footer {
        if player.is_finished() {
            render_footer(frame, footer_area, &[("finished", "end of video"), ("q", "quit")]);
        } else {
            render_footer(frame, footer_area, KEY_HINTS);
        }
    }
}
