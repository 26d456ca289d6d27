//! Configuration for practice sessions.
//!
//! Loaded from config.json next to the executable at startup. Provides the
//! widget position, batch sizes and result log settings.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::capture::BoundingBox;

/// Complete practice configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PracticeConfig {
    /// Screen X of the widget's left end
    #[serde(default = "default_x_left")]
    pub x_left: i32,
    /// Screen X of the widget's right end
    #[serde(default = "default_x_right")]
    pub x_right: i32,
    /// Screen Y of the widget's lower border row
    #[serde(default = "default_y_top")]
    pub y_top: i32,
    /// Results per batch in the session overview
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
    /// Number of most recent batches shown in the info text
    #[serde(default = "default_batches_to_show")]
    pub batches_to_show: usize,
    /// Log only the bar's last position instead of its full history
    #[serde(default = "default_log_short")]
    pub log_short: bool,
    /// File name of the result log inside the data directory
    #[serde(default = "default_log_filename")]
    pub log_filename: String,
}

fn default_x_left() -> i32 {
    835
}

fn default_x_right() -> i32 {
    1084
}

fn default_y_top() -> i32 {
    895
}

fn default_batch_size() -> u32 {
    100
}

fn default_batches_to_show() -> usize {
    5
}

fn default_log_short() -> bool {
    true
}

fn default_log_filename() -> String {
    "ATs.log".to_string()
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            x_left: default_x_left(),
            x_right: default_x_right(),
            y_top: default_y_top(),
            batch_size: default_batch_size(),
            batches_to_show: default_batches_to_show(),
            log_short: default_log_short(),
            log_filename: default_log_filename(),
        }
    }
}

impl PracticeConfig {
    /// Rejects settings the reader can't work with.
    pub fn validate(&self) -> Result<()> {
        if self.x_right <= self.x_left {
            return Err(anyhow!(
                "x_right ({}) must be greater than x_left ({})",
                self.x_right,
                self.x_left
            ));
        }
        if self.batch_size == 0 {
            return Err(anyhow!("batch_size must be at least 1"));
        }
        if self.log_filename.trim().is_empty() {
            return Err(anyhow!("log_filename must not be empty"));
        }
        Ok(())
    }

    /// Capture region around the configured widget row.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_widget_row(self.x_left, self.x_right, self.y_top)
    }
}

/// Loads configuration from `path`, or returns defaults.
///
/// A missing file is created with the defaults so it can be edited. A file
/// that can't be read or parsed is left untouched and defaults are used.
pub fn load_config(path: &Path) -> PracticeConfig {
    crate::log(&format!("Looking for config at: {}", path.display()));

    if !path.exists() {
        crate::log("config.json not found. Writing default config.");
        let config = PracticeConfig::default();
        if let Err(e) = save_config(path, &config) {
            crate::log(&format!("Failed to write default config: {}", e));
        }
        return config;
    }

    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(config) => {
                crate::log("Config loaded from config.json");
                config
            }
            Err(e) => {
                crate::log(&format!(
                    "Failed to parse config.json: {}. Using defaults.",
                    e
                ));
                PracticeConfig::default()
            }
        },
        Err(e) => {
            crate::log(&format!(
                "Failed to read config.json: {}. Using defaults.",
                e
            ));
            PracticeConfig::default()
        }
    }
}

/// Writes the configuration as pretty-printed JSON.
pub fn save_config(path: &Path, config: &PracticeConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
