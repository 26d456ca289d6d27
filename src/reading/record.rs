//! The record of one Action Test.

use std::fmt;

use crate::reading::sections::SectionScan;
use crate::reading::tracker::BarTrack;
use crate::reading::ReadError;

/// Final colour of the widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Cancelled, timed out or unreadable.
    White,
    Green,
    Red,
}

impl Outcome {
    pub fn name(&self) -> &'static str {
        match self {
            Outcome::White => "white",
            Outcome::Green => "green",
            Outcome::Red => "red",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How the bar's last position relates to the green zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timing {
    Ok,
    Early,
    Late,
    Unknown,
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Timing::Ok => "ok",
            Timing::Early => "early",
            Timing::Late => "late",
            Timing::Unknown => "?",
        };
        write!(f, "{}", s)
    }
}

/// Everything observed during one detection cycle.
///
/// Built fresh for every cycle. Sections are set once after locating, the bar
/// history once after tracking, and the result once after evaluation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionTest {
    green_position: Option<u32>,
    white_positions: Option<(u32, u32)>,
    bar_positions: Vec<u32>,
    still_frames: u32,
    captures_per_second: f64,
    result: Option<Outcome>,
}

impl ActionTest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_sections(&mut self, scan: &SectionScan) {
        self.green_position = scan.green_position;
        self.white_positions = scan.white_positions;
    }

    pub fn set_bar_track(&mut self, track: BarTrack) {
        self.bar_positions = track.positions;
        self.still_frames = track.still_frames;
        self.captures_per_second = track.captures_per_second;
    }

    /// Sets the outcome. A record's outcome can't be replaced.
    pub fn set_result(&mut self, outcome: Outcome) -> Result<(), ReadError> {
        if self.result.is_some() {
            return Err(ReadError::ResultAlreadySet);
        }
        self.result = Some(outcome);
        Ok(())
    }

    pub fn green_position(&self) -> Option<u32> {
        self.green_position
    }

    pub fn white_positions(&self) -> Option<(u32, u32)> {
        self.white_positions
    }

    pub fn bar_positions(&self) -> &[u32] {
        &self.bar_positions
    }

    pub fn still_frames(&self) -> u32 {
        self.still_frames
    }

    pub fn captures_per_second(&self) -> f64 {
        self.captures_per_second
    }

    pub fn result(&self) -> Option<Outcome> {
        self.result
    }

    pub fn is_green(&self) -> bool {
        self.result == Some(Outcome::Green)
    }

    pub fn timing(&self) -> Timing {
        if self.is_green() {
            return Timing::Ok;
        }
        match (self.bar_positions.last(), self.green_position) {
            (Some(&last), Some(green)) if last > green => Timing::Late,
            (Some(_), Some(_)) => Timing::Early,
            _ => Timing::Unknown,
        }
    }

    /// Single-line summary for the result log.
    ///
    /// Fields: result, green position, white run, bar, still frames, captures
    /// per second. The short form reports only the bar's last position, the
    /// long form its whole history.
    pub fn log_line(&self, short: bool) -> String {
        let bar = if short {
            self.bar_positions
                .last()
                .map(|x| x.to_string())
                .unwrap_or_else(|| "?".to_string())
        } else {
            format!("{:?}", self.bar_positions)
        };

        format!(
            "{} {} {} {} {} {}",
            self.result_name(),
            opt(self.green_position),
            self.white_run(),
            bar,
            self.still_frames,
            self.captures_per_second
        )
    }

    fn result_name(&self) -> &'static str {
        self.result.map(|r| r.name()).unwrap_or("None")
    }

    fn white_run(&self) -> String {
        match self.white_positions {
            Some((start, end)) => format!("{}-{}", start, end),
            None => "None-None".to_string(),
        }
    }
}

fn opt(value: Option<u32>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "None".to_string())
}

impl fmt::Display for ActionTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tail_start = self.bar_positions.len().saturating_sub(4);
        writeln!(
            f,
            "{} ({}): {} {} ...{:?}",
            self.result_name().to_uppercase(),
            self.timing(),
            opt(self.green_position),
            self.white_run(),
            &self.bar_positions[tail_start..]
        )?;
        writeln!(f, "  still frames: {}", self.still_frames)?;
        write!(f, "  captures/s:   {}", self.captures_per_second)
    }
}
