//! Captured frames and the bounding box they are taken from.

use anyhow::Result;
use image::{Rgb, RgbImage};

use crate::reading::ReadError;

/// One snapshot of the bounding box.
///
/// Only the first three rows are sampled: see [`TOP_ROW`], [`MIDDLE_ROW`]
/// and [`BOTTOM_ROW`].
pub type Frame = RgbImage;

/// Row above the track. Dark around the widget, pure green under the bar.
pub const TOP_ROW: u32 = 0;
/// Row through the track. Pure green inside the target zone.
pub const MIDDLE_ROW: u32 = 1;
/// Row along the widget's lower border. Red background, recoloured on result.
pub const BOTTOM_ROW: u32 = 2;

const MIN_WIDTH: u32 = 2;
const MIN_HEIGHT: u32 = 3;

/// Anything that can produce frames of the widget strip on demand.
///
/// Each call blocks until a frame is available. A frame is only valid for
/// the call that produced it.
pub trait FrameSource {
    fn grab(&mut self) -> Result<Frame>;
}

impl<T: FrameSource + ?Sized> FrameSource for &mut T {
    fn grab(&mut self) -> Result<Frame> {
        (**self).grab()
    }
}

/// Captures a frame and rejects frames too small to sample.
pub fn grab_checked<S: FrameSource + ?Sized>(source: &mut S) -> Result<Frame> {
    let frame = source.grab()?;
    check_dimensions(&frame)?;
    Ok(frame)
}

/// Verifies that a frame has the three sampled rows and two distinct edge columns.
pub fn check_dimensions(frame: &Frame) -> Result<(), ReadError> {
    let (width, height) = frame.dimensions();
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        return Err(ReadError::FrameTooSmall { width, height });
    }
    Ok(())
}

/// Index of the rightmost column.
pub fn right_edge(frame: &Frame) -> u32 {
    frame.width().saturating_sub(1)
}

/// Samples one pixel of a frame.
#[inline]
pub fn sample(frame: &Frame, x: u32, y: u32) -> Rgb<u8> {
    *frame.get_pixel(x, y)
}

/// Screen rectangle captured on every poll, in screen coordinates.
///
/// `right` and `bottom` are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BoundingBox {
    /// Builds the three-row strip around the configured widget row.
    ///
    /// The strip spans `x_left..=x_right` horizontally and the rows
    /// `y_top - 2 ..= y_top` vertically.
    pub fn from_widget_row(x_left: i32, x_right: i32, y_top: i32) -> Self {
        Self {
            left: x_left,
            top: y_top - 2,
            right: x_right + 1,
            bottom: y_top + 1,
        }
    }

    pub fn width(&self) -> u32 {
        (self.right - self.left).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bottom - self.top).max(0) as u32
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}
