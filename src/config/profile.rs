//! TOML scan profiles.
//!
//! A profile file carries a `[screen]` section (hard-filter thresholds), a
//! `[score]` section (weighted criteria), or both, so scoring variants are
//! configuration files rather than code changes:
//!
//! ```toml
//! [screen]
//! min_volume_ratio = 5.0
//! min_change_percent = 30.0
//! price_min = 3.0
//! price_max = 20.0
//! max_float_shares = 5000000.0
//!
//! [score]
//! catalyst_threshold = 0.3
//!
//! [[score.criteria]]
//! kind = "change_percent"
//! target = 10.0
//! weight = 0.6
//!
//! [[score.criteria]]
//! kind = "volume_ratio"
//! target = 5.0
//! weight = 0.4
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::domain::screen::catalyst::DEFAULT_CATALYST_THRESHOLD;
use crate::domain::screen::{ScoreProfile, ScreenConfig, WeightedCriterion};

/// Raw `[screen]` section, defaults matching the momentum screen.
#[derive(Debug, Deserialize)]
pub struct ScreenSection {
    #[serde(default = "default_min_volume_ratio")]
    pub min_volume_ratio: f64,
    #[serde(default = "default_min_change_percent")]
    pub min_change_percent: f64,
    #[serde(default = "default_price_min")]
    pub price_min: f64,
    #[serde(default = "default_price_max")]
    pub price_max: f64,
    #[serde(default = "default_max_float_shares")]
    pub max_float_shares: f64,
    #[serde(default = "default_true")]
    pub treat_unknown_float_as_pass: bool,
}

/// Raw `[score]` section.
#[derive(Debug, Deserialize)]
pub struct ScoreSection {
    pub criteria: Vec<WeightedCriterion>,
    #[serde(default = "default_true")]
    pub treat_unknown_float_as_pass: bool,
    #[serde(default = "default_catalyst_threshold")]
    pub catalyst_threshold: f64,
}

/// A parsed profile file. Raw values only; validation happens when the
/// domain value objects are constructed.
#[derive(Debug, Default, Deserialize)]
pub struct ScanProfile {
    pub screen: Option<ScreenSection>,
    pub score: Option<ScoreSection>,
}

impl ScanProfile {
    /// Loads a scan profile from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read profile file: {}", path.display()))?;
        let profile: ScanProfile = toml::from_str(&content)
            .context(format!("Failed to parse profile TOML: {}", path.display()))?;
        Ok(profile)
    }

    /// Build the validated hard-filter config, if the profile has one.
    pub fn screen_config(&self) -> Result<Option<ScreenConfig>> {
        let Some(section) = &self.screen else {
            return Ok(None);
        };

        let config = ScreenConfig::new(
            section.min_volume_ratio,
            section.min_change_percent,
            section.price_min,
            section.price_max,
            section.max_float_shares,
            section.treat_unknown_float_as_pass,
        )
        .map_err(|e| anyhow::anyhow!("Invalid [screen] section: {}", e))?;

        Ok(Some(config))
    }

    /// Build the validated scoring profile, if the profile has one.
    pub fn score_profile(&self) -> Result<Option<ScoreProfile>> {
        let Some(section) = &self.score else {
            return Ok(None);
        };

        let profile = ScoreProfile::new(
            section.criteria.clone(),
            section.treat_unknown_float_as_pass,
        )
        .map_err(|e| anyhow::anyhow!("Invalid [score] section: {}", e))?;

        Ok(Some(profile))
    }

    /// Catalyst threshold for the scoring engine's news criterion.
    pub fn catalyst_threshold(&self) -> f64 {
        self.score
            .as_ref()
            .map(|s| s.catalyst_threshold)
            .unwrap_or(DEFAULT_CATALYST_THRESHOLD)
    }
}

fn default_min_volume_ratio() -> f64 {
    5.0
}

fn default_min_change_percent() -> f64 {
    30.0
}

fn default_price_min() -> f64 {
    3.0
}

fn default_price_max() -> f64 {
    20.0
}

fn default_max_float_shares() -> f64 {
    5_000_000.0
}

fn default_true() -> bool {
    true
}

fn default_catalyst_threshold() -> f64 {
    DEFAULT_CATALYST_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::screen::ScoreCriterion;

    #[test]
    fn test_parse_full_profile() {
        let profile: ScanProfile = toml::from_str(
            r#"
            [screen]
            min_volume_ratio = 4.0
            price_max = 25.0

            [score]
            catalyst_threshold = 0.5

            [[score.criteria]]
            kind = "change_percent"
            target = 10.0
            weight = 0.6

            [[score.criteria]]
            kind = "news_catalyst"
            weight = 0.4
            "#,
        )
        .unwrap();

        let screen = profile.screen_config().unwrap().expect("screen section");
        assert_eq!(screen.min_volume_ratio, 4.0);
        assert_eq!(screen.price_max, 25.0);
        // Unset fields take the momentum defaults
        assert_eq!(screen.min_change_percent, 30.0);

        let score = profile.score_profile().unwrap().expect("score section");
        assert_eq!(score.criteria().len(), 2);
        assert_eq!(
            score.criteria()[1].criterion,
            ScoreCriterion::NewsCatalyst
        );
        assert_eq!(profile.catalyst_threshold(), 0.5);
    }

    #[test]
    fn test_missing_sections_are_none() {
        let profile: ScanProfile = toml::from_str("").unwrap();
        assert!(profile.screen_config().unwrap().is_none());
        assert!(profile.score_profile().unwrap().is_none());
        assert_eq!(profile.catalyst_threshold(), DEFAULT_CATALYST_THRESHOLD);
    }

    #[test]
    fn test_invalid_screen_section_is_rejected() {
        let profile: ScanProfile = toml::from_str(
            r#"
            [screen]
            price_min = 20.0
            price_max = 3.0
            "#,
        )
        .unwrap();
        assert!(profile.screen_config().is_err());
    }

    #[test]
    fn test_invalid_weights_are_rejected() {
        let profile: ScanProfile = toml::from_str(
            r#"
            [[score.criteria]]
            kind = "change_percent"
            target = 10.0
            weight = 0.9
            "#,
        )
        .unwrap();
        assert!(profile.score_profile().is_err());
    }
}
