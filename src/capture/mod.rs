//! Frame capture for the Action Test strip.
//!
//! This module provides:
//! - The frame type and the `FrameSource` trait the reader pulls from
//! - Bounding box construction from the configured widget row
//! - Screen region capture (`ScreenSource`, Windows only)

pub mod frame;
#[cfg(windows)]
pub mod screen;
#[cfg(test)]
pub mod scripted;

pub use frame::{grab_checked, BoundingBox, Frame, FrameSource};
#[cfg(windows)]
pub use screen::ScreenSource;
