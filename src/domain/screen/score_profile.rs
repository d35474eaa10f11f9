//! Weighted scoring profile value object.
//!
//! A profile maps criteria to normalization targets and weights. The engine
//! turns each criterion into a [0, 1] sub-score and blends them into a 0-100
//! match percent, so new scoring variants are configuration rather than new
//! code.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tolerance for the weight-sum invariant. Weights must sum to 1.0 within
/// this epsilon.
pub const WEIGHT_EPSILON: f64 = 1e-6;

/// Error type for ScoreProfile validation
#[derive(Debug, Error, PartialEq)]
pub enum ScoreProfileError {
    #[error("Score profile has no criteria")]
    EmptyProfile,

    #[error("Invalid weight at criterion {index}: {weight}. Must be in [0.0, 1.0]")]
    WeightOutOfRange { index: usize, weight: f64 },

    #[error("Criterion weights sum to {sum}, expected 1.0 within {WEIGHT_EPSILON}")]
    WeightSumMismatch { sum: f64 },

    #[error("Invalid target at criterion {index}: {target}. Must be > 0")]
    NonPositiveTarget { index: usize, target: f64 },

    #[error("Inverted price range at criterion {index}: min {min} > max {max}")]
    InvertedPriceRange { index: usize, min: f64, max: f64 },

    #[error("Negative float cap at criterion {index}: {max_shares}")]
    NegativeFloatCap { index: usize, max_shares: f64 },
}

/// One scoring criterion.
///
/// Ramp criteria (`ChangePercent`, `VolumeRatio`, `Volume`) map the raw
/// metric to `min(value / target, 1.0)`, clamped at zero. Threshold criteria
/// (`PriceInRange`, `FloatBelow`, `NewsCatalyst`) yield a binary 0/1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreCriterion {
    ChangePercent { target: f64 },
    VolumeRatio { target: f64 },
    Volume { target: f64 },
    PriceInRange { min: f64, max: f64 },
    FloatBelow { max_shares: f64 },
    NewsCatalyst,
}

/// A criterion paired with its blend weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedCriterion {
    #[serde(flatten)]
    pub criterion: ScoreCriterion,
    pub weight: f64,
}

impl WeightedCriterion {
    pub fn new(criterion: ScoreCriterion, weight: f64) -> Self {
        Self { criterion, weight }
    }
}

/// Validated scoring configuration for one scan invocation.
///
/// # Invariants
///
/// - At least one criterion
/// - Every weight in [0.0, 1.0], summing to 1.0 within `WEIGHT_EPSILON`
/// - Ramp targets strictly positive
/// - Price ranges not inverted, float caps non-negative
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreProfile {
    criteria: Vec<WeightedCriterion>,
    treat_unknown_float_as_pass: bool,
}

impl ScoreProfile {
    /// Create a new ScoreProfile with validation
    ///
    /// # Errors
    ///
    /// Returns `ScoreProfileError` if any criterion or weight violates
    /// invariants. Validation happens here, once, so scoring itself can
    /// never fail.
    pub fn new(
        criteria: Vec<WeightedCriterion>,
        treat_unknown_float_as_pass: bool,
    ) -> Result<Self, ScoreProfileError> {
        let profile = Self {
            criteria,
            treat_unknown_float_as_pass,
        };

        profile.validate()?;
        Ok(profile)
    }

    fn validate(&self) -> Result<(), ScoreProfileError> {
        if self.criteria.is_empty() {
            return Err(ScoreProfileError::EmptyProfile);
        }

        for (index, weighted) in self.criteria.iter().enumerate() {
            if !weighted.weight.is_finite() || !(0.0..=1.0).contains(&weighted.weight) {
                return Err(ScoreProfileError::WeightOutOfRange {
                    index,
                    weight: weighted.weight,
                });
            }

            match weighted.criterion {
                ScoreCriterion::ChangePercent { target }
                | ScoreCriterion::VolumeRatio { target }
                | ScoreCriterion::Volume { target } => {
                    if !target.is_finite() || target <= 0.0 {
                        return Err(ScoreProfileError::NonPositiveTarget { index, target });
                    }
                }
                ScoreCriterion::PriceInRange { min, max } => {
                    if min > max {
                        return Err(ScoreProfileError::InvertedPriceRange { index, min, max });
                    }
                }
                ScoreCriterion::FloatBelow { max_shares } => {
                    if !max_shares.is_finite() || max_shares < 0.0 {
                        return Err(ScoreProfileError::NegativeFloatCap { index, max_shares });
                    }
                }
                ScoreCriterion::NewsCatalyst => {}
            }
        }

        let sum: f64 = self.criteria.iter().map(|c| c.weight).sum();
        if (sum - 1.0).abs() > WEIGHT_EPSILON {
            return Err(ScoreProfileError::WeightSumMismatch { sum });
        }

        Ok(())
    }

    pub fn criteria(&self) -> &[WeightedCriterion] {
        &self.criteria
    }

    /// Unknown-float policy shared with the hard-filter mode.
    pub fn treat_unknown_float_as_pass(&self) -> bool {
        self.treat_unknown_float_as_pass
    }
}

impl Default for ScoreProfile {
    /// The common dashboard blend: change percent against a 10% target and
    /// relative volume against a 5x target, 60/40.
    fn default() -> Self {
        Self {
            criteria: vec![
                WeightedCriterion::new(ScoreCriterion::ChangePercent { target: 10.0 }, 0.6),
                WeightedCriterion::new(ScoreCriterion::VolumeRatio { target: 5.0 }, 0.4),
            ],
            treat_unknown_float_as_pass: true,
        }
    }
}
