//! Reporting utilities for scan results.
//!
//! Provides formatted console output and JSON export capabilities.

use anyhow::{Context, Result};
use std::path::Path;

use crate::domain::market::ScoredRecord;
use crate::domain::screen::score_profile::ScoreCriterion;
use crate::domain::screen::{ScoreProfile, ScreenConfig, ScreenMode};

/// Reporter for screening output.
#[derive(Default)]
pub struct ScanReporter;

impl ScanReporter {
    pub fn new() -> Self {
        Self
    }

    /// Prints the active criteria block for the configured mode.
    pub fn print_criteria(&self, mode: &ScreenMode) {
        match mode {
            ScreenMode::Filter(config) => self.print_filter_criteria(config),
            ScreenMode::Score(profile) => self.print_score_criteria(profile),
        }
    }

    fn print_filter_criteria(&self, config: &ScreenConfig) {
        println!("\nScanner criteria (all must hold):");
        println!("  Relative volume:  >= {:.1}x", config.min_volume_ratio);
        println!("  Change:           >= {:.1}%", config.min_change_percent);
        println!(
            "  Price band:       ${:.2} - ${:.2}",
            config.price_min, config.price_max
        );
        println!("  Float:            <= {:.0} shares", config.max_float_shares);
        println!(
            "  Unknown float:    {}",
            if config.treat_unknown_float_as_pass {
                "passes"
            } else {
                "excluded"
            }
        );
    }

    fn print_score_criteria(&self, profile: &ScoreProfile) {
        println!("\nScoring criteria (weighted blend):");
        for weighted in profile.criteria() {
            let description = match weighted.criterion {
                ScoreCriterion::ChangePercent { target } => {
                    format!("change percent ramp, target {:.1}%", target)
                }
                ScoreCriterion::VolumeRatio { target } => {
                    format!("relative volume ramp, target {:.1}x", target)
                }
                ScoreCriterion::Volume { target } => {
                    format!("volume ramp, target {:.0}", target)
                }
                ScoreCriterion::PriceInRange { min, max } => {
                    format!("price in ${:.2} - ${:.2}", min, max)
                }
                ScoreCriterion::FloatBelow { max_shares } => {
                    format!("float below {:.0} shares", max_shares)
                }
                ScoreCriterion::NewsCatalyst => "news catalyst present".to_string(),
            };
            println!("  {:>5.1}%  {}", weighted.weight * 100.0, description);
        }
    }

    /// Prints a formatted table of scan results.
    pub fn print_results_table(&self, results: &[ScoredRecord]) {
        if results.is_empty() {
            println!("\nNo symbols currently meet criteria.");
            return;
        }

        println!("\n{}", "=".repeat(78));
        println!(
            "{:<8} | {:>8} | {:>8} | {:>9} | {:>12} | {:>7}",
            "Symbol", "Price", "Change%", "VolRatio", "Float", "Match%"
        );
        println!("{}", "-".repeat(78));

        for result in results {
            let match_col = match result.match_percent {
                Some(pct) => format!("{:.1}", pct),
                None => "-".to_string(),
            };
            println!(
                "{:<8} | {:>8.2} | {:>8.2} | {:>9.2} | {:>12.0} | {:>7}",
                result.record.symbol,
                result.record.price,
                result.record.change_percent,
                result.volume_ratio,
                result.record.float_shares,
                match_col
            );
        }

        println!("{}\n", "=".repeat(78));
    }

    /// Exports the full result list to a JSON file.
    pub fn export_json(&self, results: &[ScoredRecord], path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(results).context("Failed to serialize results")?;
        std::fs::write(path, json)
            .context(format!("Failed to write results to {}", path.display()))?;
        Ok(())
    }
}
