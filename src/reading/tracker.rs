//! Bar tracking across frames.

use anyhow::Result;
use std::time::{Duration, Instant};

use crate::capture::frame::{grab_checked, sample, Frame, FrameSource, TOP_ROW};
use crate::reading::colour::has_pure_green;

/// Movement history of the bar over one tracking run.
#[derive(Clone, Debug, PartialEq)]
pub struct BarTrack {
    /// Column of the bar each time it moved, in order.
    pub positions: Vec<u32>,
    /// Frames in which the bar had not moved since the previous frame.
    pub still_frames: u32,
    /// Wall-clock time spent tracking.
    pub elapsed: Duration,
    /// Observed frames per second, rounded to two decimals.
    pub captures_per_second: f64,
}

impl BarTrack {
    /// Frames observed, including the final one without a bar.
    pub fn observed_frames(&self) -> u32 {
        self.positions.len() as u32 + self.still_frames + 1
    }
}

/// Returns the first column at or right of `min_x` where the top row shows
/// the bar.
pub fn find_bar(frame: &Frame, min_x: u32) -> Option<u32> {
    (min_x..frame.width()).find(|&x| has_pure_green(sample(frame, x, TOP_ROW)))
}

/// Rate of `frames` over `elapsed`, rounded to two decimals.
///
/// Returns 0.0 when no time has elapsed.
pub fn captures_per_second(frames: u32, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return 0.0;
    }
    (frames as f64 / secs * 100.0).round() / 100.0
}

/// Follows the bar until it leaves the strip.
///
/// The bar only moves right, so each frame is searched from the last known
/// column. There is no time limit: tracking ends only when a frame shows no
/// bar.
pub fn track_bar<S: FrameSource + ?Sized>(source: &mut S) -> Result<BarTrack> {
    let start = Instant::now();
    let mut last_x = 0;
    let mut still_frames = 0;
    let mut positions = Vec::new();

    loop {
        let frame = grab_checked(source)?;
        let Some(x) = find_bar(&frame, last_x) else {
            break;
        };
        if x == last_x {
            still_frames += 1;
            continue;
        }
        last_x = x;
        positions.push(x);
    }

    let elapsed = start.elapsed();
    let frames = positions.len() as u32 + still_frames + 1;
    Ok(BarTrack {
        positions,
        still_frames,
        elapsed,
        captures_per_second: captures_per_second(frames, elapsed),
    })
}
