//! Practice session bookkeeping.
//!
//! This module provides:
//! - Configuration loading from config.json
//! - The append-only result log
//! - Session and all-time success statistics
//! - The human-readable status file
//! - The practice loop tying the reader to all of the above

pub mod config;
pub mod info_text;
pub mod result_log;
pub mod runner;
pub mod stats;

pub use config::{load_config, PracticeConfig};
pub use runner::Practice;
