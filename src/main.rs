//! Action Test Practice
//!
//! Watches a fixed strip of the screen for the Action Test widget, follows the
//! bar until the test resolves, and records whether it ended green, red or
//! white. Results go to an append-only log, running statistics and a status
//! file.

mod capture;
mod paths;
mod practice;
mod reading;

use anyhow::Result;
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;

/// Logs a message to both console and log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    print!("{}", line);
    let log_path = paths::get_logs_dir().join("at_practice.log");
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        let _ = file.write_all(line.as_bytes());
    }
}

fn main() -> Result<()> {
    // Set up panic hook to log panics
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = if let Some(loc) = panic_info.location() {
            format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column())
        } else {
            String::new()
        };
        let log_msg = format!("[PANIC]{} {}\n", location, msg);
        eprintln!("{}", log_msg);
        let log_path = paths::get_logs_dir().join("at_practice.log");
        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
        {
            let _ = file.write_all(log_msg.as_bytes());
        }
    }));

    // Ensure output directories exist
    paths::ensure_directories()?;

    let config = practice::load_config(&paths::get_config_path());
    config.validate()?;

    let result = run(config);
    if let Err(e) = &result {
        log(&format!("Practice stopped: {:#}", e));
    }
    result
}

#[cfg(windows)]
fn run(config: practice::PracticeConfig) -> Result<()> {
    let bbox = config.bounding_box();
    let source = capture::ScreenSource::new(bbox)?;
    let diagnostics = reading::PngDiagnostics::new(paths::get_diagnostics_dir());
    let reader = reading::ActionTestReader::new(source, diagnostics);

    let mut practice = practice::Practice::new(
        &config,
        reader,
        &paths::get_data_dir(),
        &paths::get_info_text_path(),
    )?;
    log(&format!("Watching {} for action tests", bbox));
    practice.run(&config)
}

#[cfg(not(windows))]
fn run(config: practice::PracticeConfig) -> Result<()> {
    Err(anyhow::anyhow!(
        "Screen capture is only supported on Windows (bounding box {})",
        config.bounding_box()
    ))
}
