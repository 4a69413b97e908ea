//! Playback controls shown under the video.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::tui::current_theme;
use crate::video::VideoMetadata;

use super::state::PlaybackSession;
use super::time::{format_time, TimeDisplayMode};

/// A controls bar attached to a [`super::VideoPlayer`].
///
/// The player reports metadata once per mount and every frame change;
/// `render` is called with the rest of the player's area below the video.
pub trait PlayerControls {
    /// Called when a stream is mounted.
    fn set_metadata(&mut self, metadata: &VideoMetadata);

    /// Called with the native index of every frame put on screen.
    ///
    /// Returns whether the controls want to be redrawn for it.
    fn set_frame(&mut self, frame_index: u64) -> bool;

    /// Rows taken from the bottom of the player's area.
    fn height(&self) -> u16 {
        1
    }

    fn render(&self, area: Rect, buf: &mut Buffer, session: &PlaybackSession);
}

/// One-line controls: play state, time, progress bar and speed.
#[derive(Debug, Clone)]
pub struct DefaultControls {
    time_display: TimeDisplayMode,
    should_refresh: bool,
    metadata: Option<VideoMetadata>,
    frame_index: u64,
}

impl Default for DefaultControls {
    fn default() -> Self {
        Self::new(TimeDisplayMode::default())
    }
}

impl DefaultControls {
    pub fn new(time_display: TimeDisplayMode) -> Self {
        Self {
            time_display,
            should_refresh: true,
            metadata: None,
            frame_index: 0,
        }
    }

    /// Whether frame changes alone should request a redraw.
    ///
    /// Turn this off when the whole player is redrawn for every frame
    /// anyway, as with the reactive strategy.
    pub fn with_refresh(mut self, should_refresh: bool) -> Self {
        self.should_refresh = should_refresh;
        self
    }

    pub fn time_display(&self) -> TimeDisplayMode {
        self.time_display
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    fn time_label(&self) -> String {
        match &self.metadata {
            Some(meta) => format_time(self.time_display, self.frame_index, meta.fps, meta.duration),
            None => format_time(self.time_display, 0, 0.0, 0.0),
        }
    }
}

impl PlayerControls for DefaultControls {
    fn set_metadata(&mut self, metadata: &VideoMetadata) {
        self.metadata = Some(metadata.clone());
        self.frame_index = 0;
    }

    fn set_frame(&mut self, frame_index: u64) -> bool {
        let changed = self.frame_index != frame_index;
        self.frame_index = frame_index;
        changed && self.should_refresh
    }

    fn render(&self, area: Rect, buf: &mut Buffer, session: &PlaybackSession) {
        if area.is_empty() {
            return;
        }
        let theme = current_theme();

        let icon = if session.finished {
            " ■ "
        } else if session.paused {
            " ‖ "
        } else {
            " ▶ "
        };
        let time = format!("{} ", self.time_label());
        let speed = format!(" {:.1}x ", session.speed);

        let used = icon.width() + time.width() + speed.width();
        let bar_width = (area.width as usize).saturating_sub(used);
        let (bar, filled) = build_progress_bar_chars(bar_width, session.progress());

        let mut spans = vec![
            Span::styled(icon, theme.accent_bold_style()),
            Span::styled(time, theme.text_style()),
        ];
        let played: String = bar[..filled].iter().collect();
        let rest: String = bar[filled..].iter().collect();
        spans.push(Span::styled(played, theme.accent_style()));
        spans.push(Span::styled(rest, theme.text_secondary_style()));
        spans.push(Span::styled(speed, theme.text_style()));

        Line::from(spans)
            .style(Style::default())
            .render(Rect::new(area.x, area.y, area.width, 1), buf);
    }
}

/// Build the progress bar character array.
///
/// Returns `(bar, filled)`: positions before `filled` are played (`━`),
/// the playhead `⏺` sits at `filled` and the rest is `─`.
pub fn build_progress_bar_chars(bar_width: usize, progress: f64) -> (Vec<char>, usize) {
    let progress = if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = ((bar_width as f64 * progress) as usize).min(bar_width);

    let mut bar = vec!['─'; bar_width];
    for c in bar.iter_mut().take(filled) {
        *c = '━';
    }
    if filled < bar_width {
        bar[filled] = '⏺';
    }
    (bar, filled)
}
