//! Final result classification.

use anyhow::Result;
use std::time::Duration;

use crate::capture::frame::{grab_checked, right_edge, sample, Frame, FrameSource, BOTTOM_ROW};
use crate::reading::colour::{is_colour_green, is_very_red};
use crate::reading::diagnostics::DiagnosticSink;
use crate::reading::record::Outcome;
use crate::reading::ReadError;

/// Pause before sampling so the result colour has fully rendered.
pub const RESULT_SETTLE_DELAY: Duration = Duration::from_millis(20);

/// Classifies the outcome from the lower border's two end columns.
///
/// Both ends must agree for RED or GREEN. Anything else reads as WHITE.
/// Both RED and GREEN at once is a contradiction and fails.
pub fn classify_result(frame: &Frame) -> Result<Outcome, ReadError> {
    let left = sample(frame, 0, BOTTOM_ROW);
    let right = sample(frame, right_edge(frame), BOTTOM_ROW);

    let is_red = is_very_red(left) && is_very_red(right);
    let is_green = is_colour_green(left) && is_colour_green(right);
    outcome_from_signals(is_red, is_green)
}

/// Combines the red and green end checks into an outcome.
pub fn outcome_from_signals(is_red: bool, is_green: bool) -> Result<Outcome, ReadError> {
    match (is_red, is_green) {
        (true, true) => Err(ReadError::ContradictoryResult),
        (true, false) => Ok(Outcome::Red),
        (false, true) => Ok(Outcome::Green),
        (false, false) => Ok(Outcome::White),
    }
}

/// Waits for the result to settle, then reads it from a fresh frame.
pub fn read_result<S, D>(source: &mut S, sink: &mut D) -> Result<Outcome>
where
    S: FrameSource + ?Sized,
    D: DiagnosticSink + ?Sized,
{
    std::thread::sleep(RESULT_SETTLE_DELAY);
    let frame = grab_checked(source)?;
    sink.final_frame(&frame);
    Ok(classify_result(&frame)?)
}
