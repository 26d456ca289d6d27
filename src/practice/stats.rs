//! Success counters for the current session and across all sessions.

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::reading::Outcome;

/// Greens out of total for one batch of results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Batch {
    pub greens: u32,
    pub total: u32,
}

/// Counters for the running session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionStats {
    batch_size: u32,
    pub total: u32,
    pub greens: u32,
    /// Consecutive greens up to the latest result
    pub chain: u32,
    pub best_chain: u32,
    pub batches: Vec<Batch>,
}

impl SessionStats {
    pub fn new(batch_size: u32) -> Self {
        Self {
            batch_size: batch_size.max(1),
            total: 0,
            greens: 0,
            chain: 0,
            best_chain: 0,
            batches: Vec::new(),
        }
    }

    pub fn add(&mut self, outcome: Outcome) {
        if self.total % self.batch_size == 0 {
            self.batches.push(Batch::default());
        }
        self.total += 1;
        let is_green = outcome == Outcome::Green;
        if let Some(batch) = self.batches.last_mut() {
            batch.total += 1;
            if is_green {
                batch.greens += 1;
            }
        }

        if is_green {
            self.greens += 1;
            self.chain += 1;
            self.best_chain = self.best_chain.max(self.chain);
        } else {
            // Anything but green breaks the streak
            self.chain = 0;
        }
    }
}

/// Totals persisted across sessions as `greens;total;bestChain`.
#[derive(Debug)]
pub struct AllTimeStats {
    path: PathBuf,
    pub greens: u32,
    pub total: u32,
    pub best_chain: u32,
}

impl AllTimeStats {
    /// Loads the totals, creating the file with zeros if it doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let stats = Self {
                path: path.to_path_buf(),
                greens: 0,
                total: 0,
                best_chain: 0,
            };
            fs::write(path, stats.serialize())
                .with_context(|| format!("Failed to create {}", path.display()))?;
            return Ok(stats);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let values: Vec<u32> = contents
            .trim()
            .split(';')
            .map(|v| v.trim().parse::<u32>())
            .collect::<std::result::Result<_, _>>()
            .with_context(|| format!("Invalid number in {}", path.display()))?;

        let [greens, total, best_chain] = values[..] else {
            return Err(anyhow!(
                "Expected 3 values in {}, found {}",
                path.display(),
                values.len()
            ));
        };

        Ok(Self {
            path: path.to_path_buf(),
            greens,
            total,
            best_chain,
        })
    }

    /// Counts one result and saves. `session_chain` is the current session streak.
    pub fn add(&mut self, outcome: Outcome, session_chain: u32) {
        self.total += 1;
        if outcome == Outcome::Green {
            self.greens += 1;
        }
        self.best_chain = self.best_chain.max(session_chain);
        self.save();
    }

    /// Best-effort save; a failed write is logged and the totals kept in memory.
    pub fn save(&self) {
        if let Err(e) = fs::write(&self.path, self.serialize()) {
            crate::log(&format!(
                "Failed to save all-time stats to {}: {}",
                self.path.display(),
                e
            ));
        }
    }

    fn serialize(&self) -> String {
        format!("{};{};{}", self.greens, self.total, self.best_chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_session_counts_and_chain() {
        let mut session = SessionStats::new(10);
        for outcome in [
            Outcome::Green,
            Outcome::Green,
            Outcome::Red,
            Outcome::Green,
            Outcome::White,
        ] {
            session.add(outcome);
        }

        assert_eq!(session.total, 5);
        assert_eq!(session.greens, 3);
        assert_eq!(session.chain, 0);
        assert_eq!(session.best_chain, 2);
    }

    #[test]
    fn test_session_batches() {
        let mut session = SessionStats::new(3);
        let outcomes = [
            Outcome::Green,
            Outcome::Red,
            Outcome::Green,
            Outcome::Green,
            Outcome::White,
            Outcome::Red,
            Outcome::Green,
        ];
        for outcome in outcomes {
            session.add(outcome);
        }

        assert_eq!(
            session.batches,
            vec![
                Batch { greens: 2, total: 3 },
                Batch { greens: 1, total: 3 },
                Batch { greens: 1, total: 1 },
            ]
        );
        assert_eq!(session.chain, 1);
    }

    #[test]
    fn test_all_time_created_with_zeros() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("allTimeData.txt");

        let stats = AllTimeStats::load(&path).unwrap();
        assert_eq!((stats.greens, stats.total, stats.best_chain), (0, 0, 0));
        assert_eq!(fs::read_to_string(&path).unwrap(), "0;0;0");
    }

    #[test]
    fn test_all_time_add_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("allTimeData.txt");
        fs::write(&path, "4;10;3").unwrap();

        let mut stats = AllTimeStats::load(&path).unwrap();
        stats.add(Outcome::Green, 5);
        stats.add(Outcome::Red, 0);

        assert_eq!(fs::read_to_string(&path).unwrap(), "5;12;5");
        let reloaded = AllTimeStats::load(&path).unwrap();
        assert_eq!(
            (reloaded.greens, reloaded.total, reloaded.best_chain),
            (5, 12, 5)
        );
    }

    #[test]
    fn test_all_time_keeps_better_best_chain() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("allTimeData.txt");
        fs::write(&path, "4;10;8").unwrap();

        let mut stats = AllTimeStats::load(&path).unwrap();
        stats.add(Outcome::Green, 2);
        assert_eq!(stats.best_chain, 8);
    }

    #[test]
    fn test_all_time_rejects_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("allTimeData.txt");

        fs::write(&path, "1;2").unwrap();
        assert!(AllTimeStats::load(&path).is_err());

        fs::write(&path, "1;x;2").unwrap();
        assert!(AllTimeStats::load(&path).is_err());
    }
}
