//! Practice loop - reads action tests back to back and records them.

use anyhow::Result;
use std::path::Path;
use std::time::Duration;

use crate::capture::FrameSource;
use crate::practice::config::PracticeConfig;
use crate::practice::info_text::InfoText;
use crate::practice::result_log::ResultLog;
use crate::practice::stats::{AllTimeStats, SessionStats};
use crate::reading::{ActionTest, ActionTestReader, DiagnosticSink, Outcome};

/// Pause between cycles so the previous result has cleared.
pub const CYCLE_PAUSE: Duration = Duration::from_millis(100);

/// File name of the all-time totals inside the data directory.
pub const ALL_TIME_FILENAME: &str = "allTimeData.txt";

/// A practice session: one reader plus everything that records its results.
pub struct Practice<S, D> {
    reader: ActionTestReader<S, D>,
    result_log: ResultLog,
    all_time: AllTimeStats,
    session: SessionStats,
    info: InfoText,
}

impl<S: FrameSource, D: DiagnosticSink> Practice<S, D> {
    /// Opens the result log and all-time totals in `data_dir` and writes the
    /// initial info text to `info_path`.
    pub fn new(
        config: &PracticeConfig,
        reader: ActionTestReader<S, D>,
        data_dir: &Path,
        info_path: &Path,
    ) -> Result<Self> {
        let result_log = ResultLog::open(&data_dir.join(&config.log_filename), config.log_short)?;
        let all_time = AllTimeStats::load(&data_dir.join(ALL_TIME_FILENAME))?;
        let session = SessionStats::new(config.batch_size);
        let info = InfoText::new(info_path.to_path_buf(), config.batches_to_show);
        info.update(&all_time, &session);

        Ok(Self {
            reader,
            result_log,
            all_time,
            session,
            info,
        })
    }

    pub fn session(&self) -> &SessionStats {
        &self.session
    }

    pub fn all_time(&self) -> &AllTimeStats {
        &self.all_time
    }

    /// Runs cycles until reading fails. Never returns `Ok`.
    pub fn run(&mut self, config: &PracticeConfig) -> Result<()> {
        crate::log("Session started.");
        self.result_log.log_new_session(&config.bounding_box())?;
        loop {
            self.run_once()?;
            std::thread::sleep(CYCLE_PAUSE);
        }
    }

    /// Reads one action test and records it.
    pub fn run_once(&mut self) -> Result<ActionTest> {
        let action_test = self.reader.read_action_test()?;
        self.record(&action_test)?;
        Ok(action_test)
    }

    /// Logs the action test and updates all counters.
    pub fn record(&mut self, action_test: &ActionTest) -> Result<()> {
        crate::log(&action_test.to_string());
        self.result_log.log(action_test)?;

        let outcome = action_test.result().unwrap_or(Outcome::White);
        self.session.add(outcome);
        self.all_time.add(outcome, self.session.chain);
        self.info.update(&self.all_time, &self.session);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::scripted::{
        appeared_strip, bar_strip, result_strip, zone_strip, ScriptedSource, RESULT_GREEN,
        VERY_RED,
    };
    use crate::capture::Frame;
    use crate::reading::diagnostics::RecordingSink;
    use crate::reading::Zone;
    use std::fs;
    use tempfile::tempdir;

    fn cycle(result: image::Rgb<u8>) -> Vec<Frame> {
        vec![
            appeared_strip(40),
            zone_strip(&[(Zone::Red, 10), (Zone::White, 10), (Zone::Green, 2), (Zone::Red, 18)]),
            bar_strip(40, Some(6)),
            bar_strip(40, Some(11)),
            bar_strip(40, None),
            result_strip(40, result),
        ]
    }

    #[test]
    fn test_run_once_records_everywhere() {
        let dir = tempdir().unwrap();
        let info_path = dir.path().join("sessionInfo.txt");
        let config = PracticeConfig {
            log_short: false,
            ..Default::default()
        };

        let mut frames = cycle(RESULT_GREEN);
        frames.extend(cycle(VERY_RED));
        let reader = ActionTestReader::new(ScriptedSource::new(frames), RecordingSink::default());
        let mut practice = Practice::new(&config, reader, dir.path(), &info_path).unwrap();

        let first = practice.run_once().unwrap();
        let second = practice.run_once().unwrap();
        assert_eq!(first.result(), Some(Outcome::Green));
        assert_eq!(second.result(), Some(Outcome::Red));

        assert_eq!(practice.session().total, 2);
        assert_eq!(practice.session().greens, 1);
        assert_eq!(practice.session().chain, 0);
        assert_eq!(practice.all_time().best_chain, 1);

        let log = fs::read_to_string(dir.path().join("ATs.log")).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("green 20 10-21 [6, 11] 0 "));
        assert!(lines[1].starts_with("red 20 10-21 [6, 11] 0 "));

        assert_eq!(
            fs::read_to_string(dir.path().join(ALL_TIME_FILENAME)).unwrap(),
            "1;2;1"
        );
        let info = fs::read_to_string(&info_path).unwrap();
        assert!(info.contains("Greens: 1 (50.0%)"));
    }

    #[test]
    fn test_run_stops_on_reader_error() {
        let dir = tempdir().unwrap();
        let config = PracticeConfig::default();
        let reader = ActionTestReader::new(ScriptedSource::new(cycle(RESULT_GREEN)), RecordingSink::default());
        let mut practice =
            Practice::new(&config, reader, dir.path(), &dir.path().join("sessionInfo.txt")).unwrap();

        // One full cycle, then the script runs dry while waiting
        assert!(practice.run(&config).is_err());
        assert_eq!(practice.session().total, 1);

        let log = fs::read_to_string(dir.path().join("ATs.log")).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert!(lines[0].starts_with("---New Session"));
        assert!(lines[1].starts_with("green 20 10-21 11 0 "));
    }
}
