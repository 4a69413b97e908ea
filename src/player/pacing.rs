//! Frame pacing: how often the player advances, and when the next advance
//! is due.
//!
//! There is no timer thread. The host event loop asks the [`Ticker`] how
//! long it may block waiting for input, and checks whether a tick is due
//! after every wake-up.

use std::time::{Duration, Instant};

use crate::error::VideoError;

/// Reject speeds that are not finite and strictly positive.
pub fn validate_speed(speed: f64) -> Result<(), VideoError> {
    if speed.is_finite() && speed > 0.0 {
        Ok(())
    } else {
        Err(VideoError::InvalidSpeed(speed))
    }
}

/// Reject a decimation factor of zero.
pub fn validate_fps_decrease_factor(factor: u32) -> Result<(), VideoError> {
    if factor >= 1 {
        Ok(())
    } else {
        Err(VideoError::InvalidFpsDecreaseFactor(factor))
    }
}

/// Wall-clock time between two ticks:
/// `(1 / native_fps) * fps_decrease_factor / speed`.
///
/// Always strictly positive; absurdly high speeds bottom out at one
/// nanosecond.
pub fn tick_interval(
    native_fps: f64,
    fps_decrease_factor: u32,
    speed: f64,
) -> Result<Duration, VideoError> {
    if !(native_fps.is_finite() && native_fps > 0.0) {
        return Err(VideoError::InvalidFrameRate(native_fps));
    }
    validate_speed(speed)?;
    validate_fps_decrease_factor(fps_decrease_factor)?;

    let secs = f64::from(fps_decrease_factor) / native_fps / speed;
    let interval = Duration::try_from_secs_f64(secs).map_err(|_| VideoError::InvalidSpeed(speed))?;
    Ok(interval.max(Duration::from_nanos(1)))
}

/// A periodic deadline.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next: Instant,
}

impl Ticker {
    /// Start ticking; the first tick is due one interval after `now`.
    pub fn start(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next: now + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_deadline(&self) -> Instant {
        self.next
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next
    }

    /// How long the event loop may sleep before the next tick.
    pub fn time_until(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    /// Move to the next deadline after a tick was handled.
    ///
    /// Deadlines stay on the original grid while the loop keeps up. If it
    /// fell more than one interval behind, the grid is re-anchored at `now`
    /// so missed ticks are dropped rather than replayed in a burst.
    pub fn advance(&mut self, now: Instant) {
        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
    }

    /// Restart the grid at `now`, e.g. after a pause.
    pub fn resume(&mut self, now: Instant) {
        self.next = now + self.interval;
    }
}
