//! Action Test reading.
//!
//! This module provides:
//! - Colour predicates over single samples
//! - Zone location (green target, white track) in one frame
//! - Bar tracking across frames with capture rate measurement
//! - Result classification from the final frame
//! - The reader state machine that runs one full detection cycle

pub mod colour;
pub mod diagnostics;
pub mod evaluator;
pub mod reader;
pub mod record;
pub mod sections;
pub mod tracker;

use thiserror::Error;

pub use diagnostics::{Anomaly, DiagnosticSink, PngDiagnostics};
pub use reader::{ActionTestReader, ReaderState};
pub use record::{ActionTest, Outcome, Timing};
pub use sections::{locate_sections, SectionScan, Zone};
pub use tracker::{track_bar, BarTrack};

/// Conditions that abort a reading cycle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// The final frame is both red and green at its ends. Points at a
    /// calibration or environment problem.
    #[error("Result is red and green at the same time")]
    ContradictoryResult,
    #[error("Frame is {width}x{height}, need at least 2x3 to sample")]
    FrameTooSmall { width: u32, height: u32 },
    #[error("Result was already set for this action test")]
    ResultAlreadySet,
}
