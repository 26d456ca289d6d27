//! Reader state machine for one Action Test.
//!
//! The state machine sequences through: Wait → Locate → Track → Evaluate → Done.
//! Every cycle builds a fresh `ActionTest` and hands it to the caller.

use anyhow::{anyhow, Result};
use std::time::Duration;

use crate::capture::frame::{
    grab_checked, right_edge, sample, Frame, FrameSource, BOTTOM_ROW, TOP_ROW,
};
use crate::reading::colour::{is_colour_red, is_dark};
use crate::reading::diagnostics::DiagnosticSink;
use crate::reading::evaluator::read_result;
use crate::reading::record::ActionTest;
use crate::reading::sections::locate_sections;
use crate::reading::tracker::track_bar;

/// Pause after the widget appears so the bar's start colour settles.
pub const APPEAR_SETTLE_DELAY: Duration = Duration::from_micros(27_500);

/// Reader state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    /// Polling until the widget shows up
    WaitingForAppearance,
    /// Finding the green and white zones
    LocatingSections,
    /// Following the bar until it disappears
    TrackingBar,
    /// Reading the final colour
    EvaluatingResult,
    /// Cycle complete, record ready
    Done,
}

impl std::fmt::Display for ReaderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReaderState::WaitingForAppearance => write!(f, "Waiting for action test"),
            ReaderState::LocatingSections => write!(f, "Locating sections"),
            ReaderState::TrackingBar => write!(f, "Tracking bar"),
            ReaderState::EvaluatingResult => write!(f, "Evaluating result"),
            ReaderState::Done => write!(f, "Done"),
        }
    }
}

/// Checks whether a frame shows the widget.
///
/// The lower border must be red next to either end (one column in, the
/// border itself can render darker) and both top corners must be dark.
pub fn contains_action_test(frame: &Frame) -> bool {
    let right_x = right_edge(frame);
    let left_red = is_colour_red(sample(frame, 1, BOTTOM_ROW));
    let right_red = is_colour_red(sample(frame, right_x - 1, BOTTOM_ROW));
    let top_dark = is_dark(sample(frame, 0, TOP_ROW)) && is_dark(sample(frame, right_x, TOP_ROW));
    (left_red || right_red) && top_dark
}

/// Runs detection cycles against a frame source.
pub struct ActionTestReader<S, D> {
    source: S,
    diagnostics: D,
    state: ReaderState,
    current: Option<ActionTest>,
}

impl<S: FrameSource, D: DiagnosticSink> ActionTestReader<S, D> {
    pub fn new(source: S, diagnostics: D) -> Self {
        Self {
            source,
            diagnostics,
            state: ReaderState::Done,
            current: None,
        }
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// Runs one full cycle and returns the completed record.
    ///
    /// Blocks until the widget appears; there is no timeout. On error the
    /// partial record is discarded.
    pub fn read_action_test(&mut self) -> Result<ActionTest> {
        self.state = ReaderState::WaitingForAppearance;
        self.current = None;

        loop {
            match self.step() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    self.current = None;
                    self.state = ReaderState::Done;
                    return Err(e);
                }
            }
        }

        self.current
            .take()
            .ok_or_else(|| anyhow!("Reading cycle ended without an action test"))
    }

    /// Advances the state machine by one step.
    ///
    /// Returns `Ok(true)` while the cycle continues, `Ok(false)` once done.
    pub fn step(&mut self) -> Result<bool> {
        match self.state {
            ReaderState::WaitingForAppearance => {
                let polls = self.wait_for_appearance()?;
                crate::log(&format!("Action test appeared after {} polls", polls));
                std::thread::sleep(APPEAR_SETTLE_DELAY);
                self.state = ReaderState::LocatingSections;
                Ok(true)
            }

            ReaderState::LocatingSections => {
                let frame = grab_checked(&mut self.source)?;
                let scan = locate_sections(&frame);
                for anomaly in &scan.anomalies {
                    self.diagnostics.report(*anomaly, &frame);
                }

                crate::log(&format!(
                    "Sections: green {:?}, white {:?}",
                    scan.green_position, scan.white_positions
                ));

                let mut action_test = ActionTest::new();
                action_test.set_sections(&scan);
                self.current = Some(action_test);
                self.state = ReaderState::TrackingBar;
                Ok(true)
            }

            ReaderState::TrackingBar => {
                let track = track_bar(&mut self.source)?;
                crate::log(&format!(
                    "Bar gone after {} frames ({} captures/s)",
                    track.observed_frames(),
                    track.captures_per_second
                ));
                self.current_mut()?.set_bar_track(track);
                self.state = ReaderState::EvaluatingResult;
                Ok(true)
            }

            ReaderState::EvaluatingResult => {
                let outcome = read_result(&mut self.source, &mut self.diagnostics)?;
                crate::log(&format!("Result: {}", outcome));
                self.current_mut()?.set_result(outcome)?;
                self.state = ReaderState::Done;
                Ok(true)
            }

            ReaderState::Done => Ok(false),
        }
    }

    /// Polls until a frame contains the widget. Returns the number of misses.
    fn wait_for_appearance(&mut self) -> Result<u64> {
        let mut polls = 0;
        loop {
            let frame = grab_checked(&mut self.source)?;
            if contains_action_test(&frame) {
                return Ok(polls);
            }
            polls += 1;
        }
    }

    fn current_mut(&mut self) -> Result<&mut ActionTest> {
        let state = self.state;
        self.current
            .as_mut()
            .ok_or_else(|| anyhow!("No action test in progress while {}", state))
    }
}
