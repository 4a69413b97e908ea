//! `info` handler

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use humansize::{format_size, DECIMAL};
use serde::Serialize;

use tuivid::graphics::{CellSize, ImageType};
use tuivid::player::format_clock;
use tuivid::tui::current_theme;
use tuivid::video::{self, VideoMetadata};

/// What `info` reports about a file.
#[derive(Debug, Serialize)]
pub struct InfoReport {
    pub path: PathBuf,
    pub file_size: u64,
    #[serde(flatten)]
    pub metadata: VideoMetadata,
    /// Size in cells at the default cell size
    pub cells: (u16, u16),
    pub backends: Vec<BackendReport>,
}

/// How one rendering backend copes with this video.
#[derive(Debug, Serialize)]
pub struct BackendReport {
    pub image_type: ImageType,
    pub max_fps: f64,
    /// Smallest fps decrease factor that keeps up at speed 1
    pub suggested_fps_decrease_factor: u32,
    /// Frame rate shown with the suggested factor
    pub effective_fps: f64,
    /// Frames shown with the suggested factor
    pub effective_frame_count: u64,
}

impl BackendReport {
    fn new(image_type: ImageType, metadata: &VideoMetadata) -> Self {
        let factor = suggested_factor(metadata.fps, image_type);
        let decimated = metadata.decrease_fps(factor);
        Self {
            image_type,
            max_fps: image_type.max_fps(),
            suggested_fps_decrease_factor: factor,
            effective_fps: decimated.fps,
            effective_frame_count: decimated.frame_count,
        }
    }
}

impl InfoReport {
    pub fn new(path: &Path, file_size: u64, metadata: VideoMetadata) -> Self {
        let cells = metadata.cell_size(CellSize::default());
        let backends = ImageType::ALL
            .into_iter()
            .map(|image_type| BackendReport::new(image_type, &metadata))
            .collect();
        Self {
            path: path.to_path_buf(),
            file_size,
            metadata,
            cells,
            backends,
        }
    }
}

/// Smallest decimation factor at which `image_type` renders in time.
pub fn suggested_factor(fps: f64, image_type: ImageType) -> u32 {
    if fps <= 0.0 {
        return 1;
    }
    (fps / image_type.max_fps()).ceil().max(1.0) as u32
}

/// Print metadata of a video file.
#[cfg(not(tarpaulin_include))]
pub fn handle_info(file: &Path, json: bool) -> Result<()> {
    let metadata = video::probe_file(file)?;
    let file_size = fs::metadata(file)
        .with_context(|| format!("Failed to stat {}", file.display()))?
        .len();
    let report = InfoReport::new(file, file_size, metadata);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_report(&report));
    }
    Ok(())
}

/// Human readable report.
pub fn format_report(report: &InfoReport) -> String {
    let theme = current_theme();
    let meta = &report.metadata;
    let mut out = String::new();

    let mut row = |label: &str, value: String| {
        out.push_str(&format!(
            "{} {}\n",
            theme.secondary_text(&format!("{:<10}", label)),
            theme.primary_text(&value)
        ));
    };
    row("File", report.path.display().to_string());
    row("Size", format_size(report.file_size, DECIMAL));
    row("Codec", if meta.codec.is_empty() { "unknown".to_string() } else { meta.codec.clone() });
    row("Frames", format!("{}x{} px", meta.width, meta.height));
    row("Cells", format!("{}x{}", report.cells.0, report.cells.1));
    row("Rate", format!("{:.2} fps", meta.fps));
    row("Duration", format_clock(meta.duration));
    row("Count", meta.frame_count.to_string());

    out.push('\n');
    out.push_str(&theme.accent_text("Backends"));
    out.push('\n');
    for backend in &report.backends {
        let hint = if backend.suggested_fps_decrease_factor > 1 {
            theme.error_text(&format!(
                "use --fps-decrease-factor {} ({:.1} fps, {} frames)",
                backend.suggested_fps_decrease_factor,
                backend.effective_fps,
                backend.effective_frame_count
            ))
        } else {
            theme.success_text("keeps up")
        };
        out.push_str(&format!(
            "  {:<10} {:>7.1} fps max  {}\n",
            backend.image_type.as_str(),
            backend.max_fps,
            hint
        ));
    }
    out
}
