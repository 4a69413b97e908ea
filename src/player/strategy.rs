//! How a new frame reaches the image widget.
//!
//! The three strategies trade redraw cost against flicker:
//!
//! - `remount`: throw the image widget away and build a new one per frame
//! - `reactive`: store the frame and rebuild the image view on next draw
//! - `set-image`: keep one widget and swap its pixels in place (sixel only)

use std::fmt;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    widgets::{Clear, Paragraph, Widget},
};
use serde::{Deserialize, Serialize};

use crate::error::VideoError;
use crate::graphics::{CellSize, ImageType, TerminalImage};
use crate::tui::current_theme;
use crate::video::VideoFrame;

/// Frame update strategy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateStrategy {
    /// Recreate the image widget for every frame
    #[serde(alias = "replace-widget")]
    #[value(alias = "replace-widget")]
    Remount,
    /// Rebuild the image view from the latest stored frame
    #[default]
    #[serde(alias = "update-image")]
    #[value(alias = "update-image")]
    Reactive,
    /// Replace the pixels of a persistent widget (sixel only)
    SetImage,
}

impl UpdateStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateStrategy::Remount => "remount",
            UpdateStrategy::Reactive => "reactive",
            UpdateStrategy::SetImage => "set-image",
        }
    }

    /// Check that this strategy can drive `image_type`.
    pub fn check(self, image_type: ImageType) -> Result<(), VideoError> {
        if self == UpdateStrategy::SetImage && image_type != ImageType::Sixel {
            return Err(VideoError::UnsupportedImageType {
                strategy: self,
                image_type,
            });
        }
        Ok(())
    }
}

impl fmt::Display for UpdateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hands frames to the image widget according to one [`UpdateStrategy`].
pub trait FramePresenter {
    fn strategy(&self) -> UpdateStrategy;

    /// Take ownership of the frame to show next.
    fn present(&mut self, frame: VideoFrame);

    /// Draw the current view into `area`.
    fn render(&mut self, area: Rect, buf: &mut Buffer);

    /// The image widget currently displayed, if any.
    fn image(&self) -> Option<&TerminalImage>;
}

/// Build the presenter for a validated strategy and image type pair.
pub fn presenter_for(
    strategy: UpdateStrategy,
    image_type: ImageType,
    cell_size: CellSize,
) -> Result<Box<dyn FramePresenter>, VideoError> {
    strategy.check(image_type)?;
    Ok(match strategy {
        UpdateStrategy::Remount => Box::new(RemountPresenter::new(image_type, cell_size)),
        UpdateStrategy::Reactive => Box::new(ReactivePresenter::new(image_type, cell_size)),
        UpdateStrategy::SetImage => Box::new(SetImagePresenter::new(image_type, cell_size)),
    })
}

/// Placeholder shown before the first frame arrives.
pub(crate) fn render_loading(area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
        return;
    }
    let theme = current_theme();
    let y = area.y + area.height / 2;
    Paragraph::new("loading")
        .style(theme.text_secondary_style())
        .alignment(Alignment::Center)
        .render(Rect::new(area.x, y, area.width, 1), buf);
}

/// Replaces the whole image widget on every frame.
#[derive(Debug)]
pub struct RemountPresenter {
    image_type: ImageType,
    cell_size: CellSize,
    child: Option<TerminalImage>,
    remounted: bool,
    mounts: u64,
}

impl RemountPresenter {
    pub fn new(image_type: ImageType, cell_size: CellSize) -> Self {
        Self {
            image_type,
            cell_size,
            child: None,
            remounted: false,
            mounts: 0,
        }
    }

    /// Number of image widgets created so far.
    pub fn mounts(&self) -> u64 {
        self.mounts
    }
}

impl FramePresenter for RemountPresenter {
    fn strategy(&self) -> UpdateStrategy {
        UpdateStrategy::Remount
    }

    fn present(&mut self, frame: VideoFrame) {
        let previous_id = self.child.take().map(|child| child.image_id());
        let mut child =
            TerminalImage::with_image(self.image_type, frame.into_image()).with_cell_size(self.cell_size);
        if let Some(id) = previous_id {
            child = child.with_image_id(id);
        }
        self.child = Some(child);
        self.remounted = true;
        self.mounts += 1;
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        if self.remounted {
            Clear.render(area, buf);
            self.remounted = false;
        }
        match self.child.as_mut() {
            Some(child) => child.render(area, buf),
            None => render_loading(area, buf),
        }
    }

    fn image(&self) -> Option<&TerminalImage> {
        self.child.as_ref()
    }
}

/// Stores the latest frame and rebuilds the image view when drawing.
#[derive(Debug)]
pub struct ReactivePresenter {
    image_type: ImageType,
    cell_size: CellSize,
    pending: Option<VideoFrame>,
    view: Option<TerminalImage>,
}

impl ReactivePresenter {
    pub fn new(image_type: ImageType, cell_size: CellSize) -> Self {
        Self {
            image_type,
            cell_size,
            pending: None,
            view: None,
        }
    }

    /// Whether a stored frame is waiting for the next draw.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl FramePresenter for ReactivePresenter {
    fn strategy(&self) -> UpdateStrategy {
        UpdateStrategy::Reactive
    }

    fn present(&mut self, frame: VideoFrame) {
        // an undrawn frame is simply superseded
        self.pending = Some(frame);
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        if let Some(frame) = self.pending.take() {
            let previous_id = self.view.as_ref().map(TerminalImage::image_id);
            let mut view = TerminalImage::with_image(self.image_type, frame.into_image())
                .with_cell_size(self.cell_size);
            if let Some(id) = previous_id {
                view = view.with_image_id(id);
            }
            self.view = Some(view);
        }
        match self.view.as_mut() {
            Some(view) => view.render(area, buf),
            None => render_loading(area, buf),
        }
    }

    fn image(&self) -> Option<&TerminalImage> {
        self.view.as_ref()
    }
}

/// Keeps one sixel widget and replaces its pixels.
#[derive(Debug)]
pub struct SetImagePresenter {
    image: TerminalImage,
}

impl SetImagePresenter {
    pub fn new(image_type: ImageType, cell_size: CellSize) -> Self {
        Self {
            image: TerminalImage::new(image_type).with_cell_size(cell_size),
        }
    }
}

impl FramePresenter for SetImagePresenter {
    fn strategy(&self) -> UpdateStrategy {
        UpdateStrategy::SetImage
    }

    fn present(&mut self, frame: VideoFrame) {
        self.image.set_image(frame.into_image());
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        (&mut self.image).render(area, buf);
    }

    fn image(&self) -> Option<&TerminalImage> {
        Some(&self.image)
    }
}
