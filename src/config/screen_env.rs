//! Screen configuration parsing from environment variables.
//!
//! Defaults are the classic low-float momentum screen: 5x relative volume,
//! up 30% on the day, $3-$20 price band, float under five million shares.

use anyhow::{Context, Result};
use std::env;

use crate::domain::screen::ScreenConfig;

/// Screening environment configuration
#[derive(Debug, Clone)]
pub struct ScreenEnvConfig {
    pub min_volume_ratio: f64,
    pub min_change_percent: f64,
    pub price_min: f64,
    pub price_max: f64,
    pub max_float_shares: f64,
    pub treat_unknown_float_as_pass: bool,

    // Watch mode
    pub scan_interval_seconds: u64,
    pub top_n: Option<usize>,
}

impl ScreenEnvConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            min_volume_ratio: Self::parse_f64("SCREEN_MIN_VOLUME_RATIO", 5.0)?,
            min_change_percent: Self::parse_f64("SCREEN_MIN_CHANGE_PERCENT", 30.0)?,
            price_min: Self::parse_f64("SCREEN_PRICE_MIN", 3.0)?,
            price_max: Self::parse_f64("SCREEN_PRICE_MAX", 20.0)?,
            max_float_shares: Self::parse_f64("SCREEN_MAX_FLOAT_SHARES", 5_000_000.0)?,
            treat_unknown_float_as_pass: Self::parse_bool("SCREEN_UNKNOWN_FLOAT_PASSES", true),
            scan_interval_seconds: Self::parse_u64("SCAN_INTERVAL_SECONDS", 60)?,
            top_n: env::var("SCAN_TOP_N")
                .ok()
                .and_then(|s| s.parse::<usize>().ok()),
        })
    }

    /// Create a validated ScreenConfig domain value object from this config
    pub fn to_screen_config(&self) -> Result<ScreenConfig> {
        ScreenConfig::new(
            self.min_volume_ratio,
            self.min_change_percent,
            self.price_min,
            self.price_max,
            self.max_float_shares,
            self.treat_unknown_float_as_pass,
        )
        .map_err(|e| anyhow::anyhow!("Invalid screen config: {}", e))
    }

    fn parse_f64(key: &str, default: f64) -> Result<f64> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<f64>()
            .context(format!("Failed to parse {}", key))
    }

    fn parse_u64(key: &str, default: u64) -> Result<u64> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<u64>()
            .context(format!("Failed to parse {}", key))
    }

    fn parse_bool(key: &str, default: bool) -> bool {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<bool>()
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_the_momentum_screen() {
        let config = ScreenEnvConfig::from_env().expect("Should parse with defaults");
        assert_eq!(config.min_volume_ratio, 5.0);
        assert_eq!(config.min_change_percent, 30.0);
        assert_eq!(config.price_min, 3.0);
        assert_eq!(config.price_max, 20.0);
        assert_eq!(config.max_float_shares, 5_000_000.0);
        assert!(config.treat_unknown_float_as_pass);
        assert_eq!(config.scan_interval_seconds, 60);
    }

    #[test]
    fn test_defaults_build_a_valid_domain_config() {
        let config = ScreenEnvConfig::from_env().unwrap();
        let screen = config.to_screen_config().unwrap();
        assert_eq!(screen.min_volume_ratio, 5.0);
    }
}
