//! Human-readable status file, rewritten after every action test.

use std::fs;
use std::path::{Path, PathBuf};

use super::stats::{AllTimeStats, Batch, SessionStats};

/// Formats `portion / total` as a percentage.
///
/// Returns `"None"` for an empty total. Zero decimals prints a whole number.
pub fn in_percent(portion: u32, total: u32, decimals: usize) -> String {
    if total == 0 {
        return "None".to_string();
    }
    let percentage = portion as f64 / total as f64 * 100.0;
    format!("{:.*}", decimals, percentage)
}

pub struct InfoText {
    path: PathBuf,
    batches_to_show: usize,
}

impl InfoText {
    pub fn new(path: PathBuf, batches_to_show: usize) -> Self {
        Self {
            path,
            batches_to_show,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrites the status file. Failures are logged, not returned.
    pub fn update(&self, all_time: &AllTimeStats, session: &SessionStats) {
        let text = self.render(all_time, session);
        if let Err(e) = fs::write(&self.path, text) {
            crate::log(&format!(
                "Failed to write {}: {}",
                self.path.display(),
                e
            ));
        }
    }

    pub fn render(&self, all_time: &AllTimeStats, session: &SessionStats) -> String {
        [
            all_time_section(all_time),
            session_section(session),
            self.batches_section(&session.batches),
        ]
        .join("\n\n")
    }

    fn batches_section(&self, batches: &[Batch]) -> String {
        let first = batches.len().saturating_sub(self.batches_to_show);
        let mut lines = vec!["---BATCHES---".to_string()];
        for (index, batch) in batches.iter().enumerate().skip(first) {
            lines.push(format!(
                "{}) {}/{} ({}%)",
                index + 1,
                batch.greens,
                batch.total,
                in_percent(batch.greens, batch.total, 0)
            ));
        }
        lines.join("\n")
    }
}

fn all_time_section(stats: &AllTimeStats) -> String {
    format!(
        "---ALL TIME---\nAction tests: {}\nGreens: {} ({}%)\nBest streak: {}",
        stats.total,
        stats.greens,
        in_percent(stats.greens, stats.total, 1),
        stats.best_chain
    )
}

fn session_section(stats: &SessionStats) -> String {
    format!(
        "---SESSION---\nAction tests: {}\nGreens: {} ({}%)\nBest streak: {}\nCurrent streak: {}",
        stats.total,
        stats.greens,
        in_percent(stats.greens, stats.total, 1),
        stats.best_chain,
        stats.chain
    )
}
