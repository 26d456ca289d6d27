//! Synthetic frames and a scripted frame source for tests.

use anyhow::{anyhow, Result};
use image::Rgb;
use std::collections::VecDeque;

use super::frame::{Frame, FrameSource, BOTTOM_ROW, MIDDLE_ROW, TOP_ROW};
use crate::reading::Zone;

pub const DARK: Rgb<u8> = Rgb([20, 20, 20]);
pub const LIGHT: Rgb<u8> = Rgb([230, 230, 230]);
pub const PURE_GREEN: Rgb<u8> = Rgb([0, 255, 0]);
pub const BORDER_RED: Rgb<u8> = Rgb([200, 20, 20]);
pub const VERY_RED: Rgb<u8> = Rgb([240, 10, 10]);
pub const RESULT_GREEN: Rgb<u8> = Rgb([30, 230, 30]);
pub const TRACK_WHITE: Rgb<u8> = Rgb([220, 220, 220]);

/// Plays back a fixed list of frames, then fails.
pub struct ScriptedSource {
    frames: VecDeque<Frame>,
    pub grabs: usize,
}

impl ScriptedSource {
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            grabs: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for ScriptedSource {
    fn grab(&mut self) -> Result<Frame> {
        self.grabs += 1;
        self.frames
            .pop_front()
            .ok_or_else(|| anyhow!("script exhausted after {} grabs", self.grabs - 1))
    }
}

/// Builds a strip from explicit (top, middle, bottom) samples per column.
pub fn strip_from_columns(columns: &[[Rgb<u8>; 3]]) -> Frame {
    let mut frame = Frame::new(columns.len() as u32, 3);
    for (x, column) in columns.iter().enumerate() {
        frame.put_pixel(x as u32, TOP_ROW, column[0]);
        frame.put_pixel(x as u32, MIDDLE_ROW, column[1]);
        frame.put_pixel(x as u32, BOTTOM_ROW, column[2]);
    }
    frame
}

/// Samples that the section scan classifies as the given zone.
pub fn zone_column(zone: Zone) -> [Rgb<u8>; 3] {
    match zone {
        Zone::Red => [DARK, BORDER_RED, BORDER_RED],
        Zone::White => [DARK, TRACK_WHITE, TRACK_WHITE],
        Zone::Green => [DARK, PURE_GREEN, TRACK_WHITE],
    }
}

/// Builds a strip from runs of zones, left to right.
pub fn zone_strip(runs: &[(Zone, u32)]) -> Frame {
    let columns: Vec<[Rgb<u8>; 3]> = runs
        .iter()
        .flat_map(|&(zone, count)| std::iter::repeat_n(zone_column(zone), count as usize))
        .collect();
    strip_from_columns(&columns)
}

/// A white track with the bar drawn in the top row at `bar`, if any.
pub fn bar_strip(width: u32, bar: Option<u32>) -> Frame {
    let columns: Vec<[Rgb<u8>; 3]> = (0..width)
        .map(|x| {
            let top = if Some(x) == bar { PURE_GREEN } else { DARK };
            [top, TRACK_WHITE, TRACK_WHITE]
        })
        .collect();
    strip_from_columns(&columns)
}

/// A strip that shows the widget: dark top corners, red lower border.
pub fn appeared_strip(width: u32) -> Frame {
    let columns: Vec<[Rgb<u8>; 3]> = (0..width)
        .map(|_| [DARK, TRACK_WHITE, BORDER_RED])
        .collect();
    strip_from_columns(&columns)
}

/// A strip with no widget on screen.
pub fn empty_strip(width: u32) -> Frame {
    strip_from_columns(&vec![[LIGHT, LIGHT, LIGHT]; width as usize])
}

/// A strip whose lower border has been recoloured to `colour`.
pub fn result_strip(width: u32, colour: Rgb<u8>) -> Frame {
    strip_from_columns(&vec![[DARK, TRACK_WHITE, colour]; width as usize])
}
