//! The video player widget.

use std::path::Path;
use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::Widget,
};

use crate::error::VideoError;
use crate::graphics::CellSize;
use crate::video::{self, FrameSource, VideoFrame, VideoMetadata};

use super::controls::PlayerControls;
use super::options::PlayerOptions;
use super::pacing::{tick_interval, validate_speed, Ticker};
use super::state::{PlaybackSession, TickOutcome};
use super::strategy::{presenter_for, render_loading, FramePresenter};

/// Plays one video file inside a ratatui layout.
///
/// Lifecycle: construct (cheap, nothing is opened), [`mount`](Self::mount)
/// to open the source and show the first frame, call
/// [`tick`](Self::tick) from the event loop, [`unmount`](Self::unmount)
/// to stop and release the decoder. Rendering is done by drawing
/// `&mut VideoPlayer` as a widget.
pub struct VideoPlayer {
    options: PlayerOptions,
    cell_size: CellSize,
    controls: Option<Box<dyn PlayerControls>>,
    source: Option<Box<dyn FrameSource>>,
    metadata: Option<VideoMetadata>,
    session: Option<PlaybackSession>,
    presenter: Option<Box<dyn FramePresenter>>,
    ticker: Option<Ticker>,
    needs_render: bool,
}

impl std::fmt::Debug for VideoPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoPlayer")
            .field("options", &self.options)
            .field("session", &self.session)
            .field("running", &self.ticker.is_some())
            .finish_non_exhaustive()
    }
}

impl VideoPlayer {
    /// A player for `path` with default options.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::from_valid_options(PlayerOptions::new(path))
    }

    /// A player with explicit options.
    ///
    /// Fails fast on invalid combinations, such as the set-image strategy
    /// with a non-sixel image type.
    pub fn with_options(options: PlayerOptions) -> Result<Self, VideoError> {
        options.validate()?;
        Ok(Self::from_valid_options(options))
    }

    fn from_valid_options(options: PlayerOptions) -> Self {
        Self {
            options,
            cell_size: CellSize::default(),
            controls: None,
            source: None,
            metadata: None,
            session: None,
            presenter: None,
            ticker: None,
            needs_render: true,
        }
    }

    /// Attach a controls bar.
    pub fn with_controls(mut self, controls: impl PlayerControls + 'static) -> Self {
        self.controls = Some(Box::new(controls));
        self
    }

    /// Pixel size of one terminal cell, used to size pixel graphics.
    pub fn with_cell_size(mut self, cell_size: CellSize) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn set_cell_size(&mut self, cell_size: CellSize) {
        self.cell_size = cell_size;
    }

    pub fn options(&self) -> &PlayerOptions {
        &self.options
    }

    pub fn metadata(&self) -> Option<&VideoMetadata> {
        self.metadata.as_ref()
    }

    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    pub fn presenter(&self) -> Option<&dyn FramePresenter> {
        self.presenter.as_deref()
    }

    pub fn is_mounted(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the pacing timer is active.
    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.finished)
    }

    /// Open the configured file and start playback.
    pub fn mount(&mut self, now: Instant) -> Result<(), VideoError> {
        let source = video::open_file(&self.options.path)?;
        self.mount_source(source, now)
    }

    /// Start playback from an already open source.
    ///
    /// The first frame is pulled and shown right away; the next one is due
    /// one tick interval after `now`. Mounting a mounted player restarts it.
    pub fn mount_source(
        &mut self,
        mut source: Box<dyn FrameSource>,
        now: Instant,
    ) -> Result<(), VideoError> {
        if self.is_mounted() {
            self.unmount();
        }

        let metadata = source.metadata().clone();
        let interval = tick_interval(
            metadata.fps,
            self.options.fps_decrease_factor,
            self.options.speed,
        )?;
        let presenter = presenter_for(
            self.options.update_strategy,
            self.options.image_type,
            self.cell_size,
        )?;

        tracing::info!(
            path = %self.options.path.display(),
            image_type = %self.options.image_type,
            strategy = %self.options.update_strategy,
            speed = self.options.speed,
            fps_decrease_factor = self.options.fps_decrease_factor,
            interval_ms = interval.as_secs_f64() * 1000.0,
            "mounting video player"
        );
        if interval.as_secs_f64() < self.options.image_type.render_delay() {
            tracing::warn!(
                image_type = %self.options.image_type,
                max_fps = self.options.image_type.max_fps(),
                "backend is slower than the tick rate, frames will lag"
            );
        }

        let first = source.next_frame()?;

        if let Some(controls) = self.controls.as_mut() {
            controls.set_metadata(&metadata);
        }
        self.session = Some(PlaybackSession::new(
            &self.options.path,
            self.options.speed,
            &metadata,
        ));
        self.presenter = Some(presenter);
        self.metadata = Some(metadata);

        if let Some(frame) = first {
            self.show(frame);
        }
        self.source = Some(source);
        self.ticker = Some(Ticker::start(interval, now));
        self.needs_render = true;
        Ok(())
    }

    /// Advance playback if a tick is due at `now`.
    ///
    /// On a due tick, `fps_decrease_factor` frames are pulled and the last
    /// one is shown. When the stream runs out the timer stops, the decoder
    /// is released and [`TickOutcome::Finished`] is returned; later calls
    /// return [`TickOutcome::Idle`]. Decode errors are passed through.
    pub fn tick(&mut self, now: Instant) -> Result<TickOutcome, VideoError> {
        let paused = self.session.as_ref().map_or(true, |s| s.paused);
        let Some(ticker) = self.ticker.as_mut() else {
            return Ok(TickOutcome::Idle);
        };
        if paused || !ticker.is_due(now) {
            return Ok(TickOutcome::Idle);
        }
        ticker.advance(now);

        let Some(source) = self.source.as_mut() else {
            return Ok(TickOutcome::Idle);
        };
        match source.next_frame_skipping(self.options.fps_decrease_factor)? {
            Some(frame) => {
                self.show(frame);
                Ok(TickOutcome::Advanced)
            }
            None => {
                self.finish();
                Ok(TickOutcome::Finished)
            }
        }
    }

    fn show(&mut self, frame: VideoFrame) {
        if let Some(session) = self.session.as_mut() {
            session.record_frame(&frame);
        }
        if let Some(controls) = self.controls.as_mut() {
            if controls.set_frame(frame.index) {
                self.needs_render = true;
            }
        }
        if let Some(presenter) = self.presenter.as_mut() {
            presenter.present(frame);
            self.needs_render = true;
        }
    }

    fn finish(&mut self) {
        self.ticker = None;
        self.source = None;
        if let Some(session) = self.session.as_mut() {
            session.finished = true;
            tracing::info!(frames_shown = session.frames_shown, "video finished");
        }
        self.needs_render = true;
    }

    /// Stop playback and release the decoder. Safe to call at any time,
    /// any number of times.
    pub fn unmount(&mut self) {
        if self.session.is_some() {
            tracing::debug!(path = %self.options.path.display(), "unmounting video player");
        }
        self.ticker = None;
        self.source = None;
        self.presenter = None;
        self.session = None;
        self.metadata = None;
        self.needs_render = true;
    }

    /// Pause or resume. Returns whether the player is now paused.
    pub fn toggle_pause(&mut self, now: Instant) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.finished {
            return session.paused;
        }
        session.paused = !session.paused;
        if !session.paused {
            if let Some(ticker) = self.ticker.as_mut() {
                ticker.resume(now);
            }
        }
        tracing::debug!(paused = session.paused, "toggled pause");
        self.needs_render = true;
        session.paused
    }

    /// Change the playback speed of a running player.
    pub fn set_speed(&mut self, speed: f64, now: Instant) -> Result<(), VideoError> {
        validate_speed(speed)?;
        if let (Some(metadata), Some(ticker)) = (self.metadata.as_ref(), self.ticker.as_mut()) {
            let interval = tick_interval(metadata.fps, self.options.fps_decrease_factor, speed)?;
            *ticker = Ticker::start(interval, now);
        }
        self.options.speed = speed;
        if let Some(session) = self.session.as_mut() {
            session.speed = speed;
        }
        self.needs_render = true;
        Ok(())
    }

    /// Current time between ticks, while running.
    pub fn tick_interval(&self) -> Option<Duration> {
        self.ticker.as_ref().map(Ticker::interval)
    }

    /// When the next tick is due; `None` when paused or stopped.
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.session.as_ref().map_or(true, |s| s.paused) {
            return None;
        }
        self.ticker.as_ref().map(Ticker::next_deadline)
    }

    /// Whether something changed since the last draw.
    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    /// Force a redraw on the next frame, e.g. after a resize.
    pub fn request_render(&mut self) {
        self.needs_render = true;
    }

    /// Natural size of the player in cells (video plus controls), once
    /// mounted.
    pub fn preferred_size(&self) -> Option<(u16, u16)> {
        let metadata = self.metadata.as_ref()?;
        let (cols, rows) = metadata.cell_size(self.cell_size);
        let (cols, rows) = (cols.max(1), rows.max(1));
        let controls = self.controls.as_ref().map_or(0, |c| c.height());
        Some((cols, rows.saturating_add(controls)))
    }
}

impl Widget for &mut VideoPlayer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.needs_render = false;
        if area.is_empty() {
            return;
        }

        let controls_height = self
            .controls
            .as_ref()
            .map_or(0, |c| c.height())
            .min(area.height);
        let [video_area, controls_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(controls_height)])
                .areas(area);

        match self.presenter.as_mut() {
            Some(presenter) => presenter.render(video_area, buf),
            None => render_loading(video_area, buf),
        }
        if let (Some(controls), Some(session)) = (self.controls.as_ref(), self.session.as_ref()) {
            controls.render(controls_area, buf, session);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::ImageType;
    use crate::player::{DefaultControls, UpdateStrategy};
    use crate::video::TestPattern;

    fn pattern(frames: u64) -> Box<dyn FrameSource> {
        Box::new(TestPattern::new(32, 18, 10.0, frames))
    }

    fn options() -> PlayerOptions {
        PlayerOptions::new("pattern.mp4").with_image_type(ImageType::Halfcell)
    }

    /// Tick until the stream ends, counting each outcome.
    fn run_to_end(player: &mut VideoPlayer, start: Instant) -> (u32, u32) {
        let step = player.tick_interval().unwrap_or(Duration::from_millis(100));
        let (mut advanced, mut finished) = (0, 0);
        let mut now = start;
        for _ in 0..1000 {
            now += step;
            match player.tick(now).unwrap() {
                TickOutcome::Advanced => advanced += 1,
                TickOutcome::Finished => finished += 1,
                TickOutcome::Idle => {}
            }
        }
        (advanced, finished)
    }

    #[test]
    fn new_uses_defaults_and_opens_nothing() {
        let player = VideoPlayer::new("/nonexistent/clip.mp4");
        assert_eq!(player.options().image_type, ImageType::Sixel);
        assert_eq!(player.options().update_strategy, UpdateStrategy::Reactive);
        assert!(!player.is_mounted());
        assert!(!player.is_running());
        assert!(player.metadata().is_none());
    }

    #[test]
    fn with_options_rejects_set_image_with_halfcell() {
        let err = VideoPlayer::with_options(
            options().with_update_strategy(UpdateStrategy::SetImage),
        )
        .unwrap_err();
        assert!(matches!(err, VideoError::UnsupportedImageType { .. }));
    }

    #[test]
    fn mount_missing_file_fails() {
        let mut player = VideoPlayer::new("/nonexistent/clip.mp4");
        let err = player.mount(Instant::now()).unwrap_err();
        assert!(matches!(err, VideoError::FileNotFound { .. }));
        assert!(!player.is_mounted());
    }

    /// Opens fine, then fails on the first decode.
    struct BrokenSource(VideoMetadata);

    impl FrameSource for BrokenSource {
        fn metadata(&self) -> &VideoMetadata {
            &self.0
        }

        fn next_frame(&mut self) -> Result<Option<VideoFrame>, VideoError> {
            Err(VideoError::Decode("corrupt packet".to_string()))
        }
    }

    #[test]
    fn failed_first_decode_leaves_player_unmounted() {
        let start = Instant::now();
        let metadata = TestPattern::new(32, 18, 10.0, 5).metadata().clone();
        let mut player = VideoPlayer::with_options(options()).unwrap();

        let err = player
            .mount_source(Box::new(BrokenSource(metadata)), start)
            .unwrap_err();
        assert!(matches!(err, VideoError::Decode(_)));
        assert!(!player.is_mounted());
        assert!(player.session().is_none());
        assert!(player.metadata().is_none());

        // a retry with a working source starts cleanly
        player.mount_source(pattern(5), start).unwrap();
        assert!(player.is_running());
        assert_eq!(player.session().unwrap().frames_shown, 1);
    }

    #[test]
    fn failed_remount_drops_previous_session() {
        let start = Instant::now();
        let mut player = VideoPlayer::with_options(options()).unwrap();
        player.mount_source(pattern(5), start).unwrap();

        let metadata = TestPattern::new(32, 18, 10.0, 5).metadata().clone();
        assert!(player
            .mount_source(Box::new(BrokenSource(metadata)), start)
            .is_err());
        assert!(!player.is_mounted());
        assert_eq!(player.tick(start + Duration::from_secs(1)).unwrap(), TickOutcome::Idle);
    }

    #[test]
    fn mount_shows_first_frame_immediately() {
        let mut player = VideoPlayer::with_options(options()).unwrap();
        player.mount_source(pattern(5), Instant::now()).unwrap();

        let session = player.session().unwrap();
        assert_eq!(session.frames_shown, 1);
        assert_eq!(session.frame_index, 0);
        assert!(player.is_running());
        assert!(player.needs_render());
    }

    #[test]
    fn tick_waits_for_interval() {
        let start = Instant::now();
        let mut player = VideoPlayer::with_options(options()).unwrap();
        player.mount_source(pattern(5), start).unwrap();

        assert_eq!(player.tick(start).unwrap(), TickOutcome::Idle);
        assert_eq!(
            player.tick(start + Duration::from_millis(100)).unwrap(),
            TickOutcome::Advanced
        );
        assert_eq!(player.session().unwrap().frame_index, 1);
    }

    #[test]
    fn finished_is_reported_exactly_once() {
        let start = Instant::now();
        let mut player = VideoPlayer::with_options(options()).unwrap();
        player.mount_source(pattern(5), start).unwrap();

        let (advanced, finished) = run_to_end(&mut player, start);
        assert_eq!(advanced, 4);
        assert_eq!(finished, 1);
        assert!(player.is_finished());
        assert!(!player.is_running());
        assert_eq!(player.next_deadline(), None);
    }

    #[test]
    fn empty_stream_finishes_on_first_tick() {
        let start = Instant::now();
        let mut player = VideoPlayer::with_options(options()).unwrap();
        player.mount_source(pattern(0), start).unwrap();
        assert_eq!(player.session().unwrap().frames_shown, 0);

        let (advanced, finished) = run_to_end(&mut player, start);
        assert_eq!((advanced, finished), (0, 1));
    }

    #[test]
    fn decimation_skips_frames() {
        let start = Instant::now();
        let mut player =
            VideoPlayer::with_options(options().with_fps_decrease_factor(3)).unwrap();
        player.mount_source(pattern(10), start).unwrap();
        assert_eq!(player.tick_interval(), Some(Duration::from_millis(300)));

        let mut shown = vec![player.session().unwrap().frame_index];
        let mut now = start;
        loop {
            now += Duration::from_millis(300);
            match player.tick(now).unwrap() {
                TickOutcome::Advanced => shown.push(player.session().unwrap().frame_index),
                TickOutcome::Finished => break,
                TickOutcome::Idle => {}
            }
        }
        // frames 1..=9 in groups of three; the last group is complete
        assert_eq!(shown, vec![0, 3, 6, 9]);
    }

    #[test]
    fn unmount_is_idempotent() {
        let start = Instant::now();
        let mut player = VideoPlayer::with_options(options()).unwrap();
        player.unmount();

        player.mount_source(pattern(3), start).unwrap();
        run_to_end(&mut player, start);
        player.unmount();
        player.unmount();
        assert!(!player.is_mounted());
        assert_eq!(player.tick(start + Duration::from_secs(60)).unwrap(), TickOutcome::Idle);
    }

    #[test]
    fn unmount_mid_playback_stops_ticks() {
        let start = Instant::now();
        let mut player = VideoPlayer::with_options(options()).unwrap();
        player.mount_source(pattern(50), start).unwrap();
        player.unmount();
        let (advanced, finished) = run_to_end(&mut player, start);
        assert_eq!((advanced, finished), (0, 0));
    }

    #[test]
    fn paused_player_stays_idle() {
        let start = Instant::now();
        let mut player = VideoPlayer::with_options(options()).unwrap();
        player.mount_source(pattern(5), start).unwrap();

        assert!(player.toggle_pause(start));
        assert_eq!(player.next_deadline(), None);
        assert_eq!(
            player.tick(start + Duration::from_secs(10)).unwrap(),
            TickOutcome::Idle
        );

        let resumed = start + Duration::from_secs(10);
        assert!(!player.toggle_pause(resumed));
        assert_eq!(
            player.next_deadline(),
            Some(resumed + Duration::from_millis(100))
        );
    }

    #[test]
    fn speed_change_rescales_interval() {
        let start = Instant::now();
        let mut player = VideoPlayer::with_options(options()).unwrap();
        player.mount_source(pattern(5), start).unwrap();

        player.set_speed(2.0, start).unwrap();
        assert_eq!(player.tick_interval(), Some(Duration::from_millis(50)));
        assert_eq!(player.session().unwrap().speed, 2.0);
        assert!(player.set_speed(0.0, start).is_err());
        assert_eq!(player.options().speed, 2.0);
    }

    #[test]
    fn remount_restarts_from_first_frame() {
        let start = Instant::now();
        let mut player = VideoPlayer::with_options(options()).unwrap();
        player.mount_source(pattern(5), start).unwrap();
        run_to_end(&mut player, start);

        player.mount_source(pattern(5), start).unwrap();
        assert!(!player.is_finished());
        assert_eq!(player.session().unwrap().frames_shown, 1);
    }

    #[test]
    fn preferred_size_includes_controls() {
        let mut player = VideoPlayer::with_options(options())
            .unwrap()
            .with_controls(DefaultControls::default());
        assert_eq!(player.preferred_size(), None);

        let source = Box::new(TestPattern::new(320, 180, 10.0, 1));
        player.mount_source(source, Instant::now()).unwrap();
        // 320x180 px at 10x20 px per cell, plus one controls row
        assert_eq!(player.preferred_size(), Some((32, 10)));
    }

    #[test]
    fn render_draws_video_and_controls() {
        let mut player = VideoPlayer::with_options(options())
            .unwrap()
            .with_controls(DefaultControls::default());
        player.mount_source(pattern(5), Instant::now()).unwrap();

        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        (&mut player).render(area, &mut buf);

        assert!(!player.needs_render());
        assert_eq!(buf[(0, 0)].symbol(), "▀");
        let controls: String = (0..40).map(|x| buf[(x, 5)].symbol().to_string()).collect();
        assert!(controls.contains("0:00 / 0:00"), "{}", controls);
    }

    #[test]
    fn unmounted_reactive_player_shows_loading() {
        let mut player = VideoPlayer::new("clip.mp4");
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        (&mut player).render(area, &mut buf);
        let middle: String = (0..20).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(middle.contains("loading"));
    }
}
