//! Named anomalies and the side channel that keeps the frames behind them.

use std::path::PathBuf;

use crate::capture::Frame;

/// Non-fatal irregularity seen while locating sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anomaly {
    /// A green-looking column had a light pixel above it.
    LightPixelAboveGreen,
    /// A green column appeared after the white run had closed.
    WhiteEndsBeforeGreen,
    /// A white column appeared after the white run had closed.
    WhiteStartsAfterEnding,
    GreenNotFound,
    WhiteNotFound,
}

impl Anomaly {
    /// Tag used for the saved artifact.
    pub fn name(&self) -> &'static str {
        match self {
            Anomaly::LightPixelAboveGreen => "lightPixelAboveGreen",
            Anomaly::WhiteEndsBeforeGreen => "whiteEndsBeforeGreen",
            Anomaly::WhiteStartsAfterEnding => "whiteStartsAfterEnding",
            Anomaly::GreenNotFound => "greenNotFound",
            Anomaly::WhiteNotFound => "whiteNotFound",
        }
    }
}

impl std::fmt::Display for Anomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Receives anomalies together with the frame that triggered them.
///
/// Implementations must not fail the reading cycle.
pub trait DiagnosticSink {
    fn report(&mut self, anomaly: Anomaly, frame: &Frame);

    /// Called with the frame the result was read from.
    fn final_frame(&mut self, _frame: &Frame) {}
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &mut T {
    fn report(&mut self, anomaly: Anomaly, frame: &Frame) {
        (**self).report(anomaly, frame)
    }

    fn final_frame(&mut self, frame: &Frame) {
        (**self).final_frame(frame)
    }
}

/// Saves anomaly frames as `<name>.png` and the last result frame as
/// `lastResult.png`. Later frames overwrite earlier ones.
pub struct PngDiagnostics {
    dir: PathBuf,
}

impl PngDiagnostics {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn save(&self, filename: &str, frame: &Frame) {
        let path = self.dir.join(filename);
        if let Err(e) = frame.save(&path) {
            crate::log(&format!("Failed to save {}: {}", path.display(), e));
        }
    }
}

impl DiagnosticSink for PngDiagnostics {
    fn report(&mut self, anomaly: Anomaly, frame: &Frame) {
        let filename = format!("{}.png", anomaly.name());
        crate::log(&format!("Problem: {}", filename));
        self.save(&filename, frame);
    }

    fn final_frame(&mut self, frame: &Frame) {
        self.save("lastResult.png", frame);
    }
}

/// Keeps anomaly names in memory. Used by tests.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingSink {
    pub reported: Vec<Anomaly>,
    pub final_frames: usize,
}

#[cfg(test)]
impl DiagnosticSink for RecordingSink {
    fn report(&mut self, anomaly: Anomaly, _frame: &Frame) {
        self.reported.push(anomaly);
    }

    fn final_frame(&mut self, _frame: &Frame) {
        self.final_frames += 1;
    }
}
