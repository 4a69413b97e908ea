//! Playback time formatting.

use serde::{Deserialize, Serialize};

/// How the controls show the playback position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TimeDisplayMode {
    /// `elapsed / total`, like web video players
    #[default]
    Youtube,
    /// Elapsed time only
    Elapsed,
    /// Time left, prefixed with `-`
    Remaining,
    /// `frame/total frames`
    Frames,
}

/// Format seconds as `m:ss`, or `h:mm:ss` from one hour on.
///
/// Fractions are truncated and negative values are treated as zero.
pub fn format_clock(seconds: f64) -> String {
    let total_secs = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

/// Format the position of native frame `frame` in a stream of `duration`
/// seconds at `fps`.
pub fn format_time(mode: TimeDisplayMode, frame: u64, fps: f64, duration: f64) -> String {
    let current = if fps > 0.0 { frame as f64 / fps } else { 0.0 };
    match mode {
        TimeDisplayMode::Youtube => {
            format!("{} / {}", format_clock(current), format_clock(duration))
        }
        TimeDisplayMode::Elapsed => format_clock(current),
        TimeDisplayMode::Remaining => format!("-{}", format_clock(duration - current)),
        TimeDisplayMode::Frames => {
            let total = (duration * fps).round().max(0.0) as u64;
            format!("{}/{}", frame, total)
        }
    }
}
