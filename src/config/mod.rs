//! Configuration module for moverscan.
//!
//! This module provides structured configuration loading from environment
//! variables and TOML profile files. Both paths produce raw values that are
//! handed to the validated domain constructors; invalid thresholds or
//! weights are rejected here, before a scan touches any record.

mod profile;
mod screen_env;

pub use profile::{ScanProfile, ScoreSection, ScreenSection};
pub use screen_env::ScreenEnvConfig;
