//! Append-only log of completed action tests.
//!
//! One line per action test, plus a header line at the start of every session.

use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::capture::BoundingBox;
use crate::reading::ActionTest;

/// Log format version written into session headers.
pub const LOG_VERSION: &str = "1.2";

pub struct ResultLog {
    file: File,
    short: bool,
}

impl ResultLog {
    /// Opens the log for appending, creating it if needed.
    pub fn open(path: &Path, short: bool) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open result log {}", path.display()))?;
        Ok(Self {
            file,
            short,
        })
    }

    /// Writes the session header.
    pub fn log_new_session(&mut self, bbox: &BoundingBox) -> Result<()> {
        let date = Local::now().format("%d. %m. %Y %H:%M");
        self.write_line(&format!(
            "---New Session (v{}) ({}) ({} pixels wide)",
            LOG_VERSION,
            date,
            bbox.width()
        ))
    }

    pub fn log(&mut self, action_test: &ActionTest) -> Result<()> {
        self.write_line(&action_test.log_line(self.short))
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.file, "{}", line).context("Failed to write result log line")?;
        self.file.flush().context("Failed to flush result log")?;
        Ok(())
    }
}
