//! Zone location within a single frame.
//!
//! Each column is classified as GREEN (target), WHITE (track) or RED
//! (background/border). The scan yields the first green column, the bounds of
//! the white run and the anomalies seen on the way.

use crate::capture::frame::{sample, Frame, BOTTOM_ROW, MIDDLE_ROW, TOP_ROW};
use crate::reading::colour::{has_pure_green, is_mostly_red, is_quite_dark, is_quite_green};
use crate::reading::diagnostics::Anomaly;

/// Horizontal zone a column belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zone {
    White,
    Green,
    Red,
}

/// Result of scanning one frame for zones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionScan {
    /// First column classified GREEN.
    pub green_position: Option<u32>,
    /// Inclusive bounds of the white run, `start <= end`.
    pub white_positions: Option<(u32, u32)>,
    /// Anomalies in the order first seen. Each kind appears at most once.
    pub anomalies: Vec<Anomaly>,
}

impl SectionScan {
    fn flag(&mut self, anomaly: Anomaly) {
        if !self.anomalies.contains(&anomaly) {
            self.anomalies.push(anomaly);
        }
    }
}

/// Classifies one column of the frame.
///
/// The second value is set when a green-looking column was rejected because
/// of a light pixel above it.
pub fn classify_column(frame: &Frame, x: u32) -> (Zone, Option<Anomaly>) {
    let middle = sample(frame, x, MIDDLE_ROW);
    if is_quite_green(middle) && has_pure_green(middle) {
        // Target zone sits under a dark top row; the bar does not
        if !is_quite_dark(sample(frame, x, TOP_ROW)) {
            return (Zone::White, Some(Anomaly::LightPixelAboveGreen));
        }
        return (Zone::Green, None);
    }

    if is_mostly_red(sample(frame, x, BOTTOM_ROW)) {
        return (Zone::Red, None);
    }

    // Looks white, unless the bar lights up the top row
    if is_quite_dark(sample(frame, x, TOP_ROW)) {
        (Zone::White, None)
    } else {
        (Zone::Red, None)
    }
}

/// Scans the frame left to right and locates the green and white zones.
///
/// A GREEN column does not close the white run: the target lies inside the
/// track. The run closes on the first RED column after it opened, or at the
/// right edge if the frame ends while still white.
pub fn locate_sections(frame: &Frame) -> SectionScan {
    let mut scan = SectionScan::default();
    let mut white_start: Option<u32> = None;
    let mut white_end: Option<u32> = None;

    for x in 0..frame.width() {
        let (zone, anomaly) = classify_column(frame, x);
        if let Some(anomaly) = anomaly {
            scan.flag(anomaly);
        }

        match zone {
            Zone::Green => {
                if white_end.is_some() {
                    scan.flag(Anomaly::WhiteEndsBeforeGreen);
                }
                if scan.green_position.is_none() {
                    scan.green_position = Some(x);
                }
            }
            Zone::White => {
                if white_end.is_some() {
                    scan.flag(Anomaly::WhiteStartsAfterEnding);
                }
                if white_start.is_none() {
                    white_start = Some(x);
                }
            }
            Zone::Red => {
                if white_start.is_some() && white_end.is_none() {
                    white_end = Some(x - 1);
                }
            }
        }
    }

    if let Some(start) = white_start {
        let end = white_end.unwrap_or_else(|| frame.width() - 1);
        scan.white_positions = Some((start, end));
    }

    if scan.green_position.is_none() {
        scan.flag(Anomaly::GreenNotFound);
    }
    if scan.white_positions.is_none() {
        scan.flag(Anomaly::WhiteNotFound);
    }

    scan
}
