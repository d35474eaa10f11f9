//! Hard-filter screen configuration value object.
//!
//! Thresholds are validated on construction: a structurally invalid config
//! (inverted price range, negative threshold) is a programmer/config error
//! and is rejected before any record is processed, unlike per-record data
//! quality issues which are coerced and tolerated.

use thiserror::Error;

use crate::domain::market::record::MarketRecord;

/// Error type for ScreenConfig validation
#[derive(Debug, Error, PartialEq)]
pub enum ScreenConfigError {
    #[error("Inverted price range: price_min {min} > price_max {max}")]
    InvertedPriceRange { min: f64, max: f64 },

    #[error("Negative threshold: {field} = {value}. Must be >= 0")]
    NegativeThreshold { field: String, value: f64 },

    #[error("Non-finite threshold: {field} = {value}")]
    NonFiniteThreshold { field: String, value: f64 },
}

/// Hard-filter thresholds for one scan invocation.
///
/// # Invariants
///
/// - All thresholds are finite and non-negative
/// - `price_min <= price_max`
///
/// A record passes iff ALL four predicates hold: relative volume, change
/// percent, price band, and float cap. Records with unknown float (0) are
/// resolved by `treat_unknown_float_as_pass`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenConfig {
    /// Minimum relative volume (e.g. 5.0 = five times the baseline).
    pub min_volume_ratio: f64,

    /// Minimum percentage change over the reference period.
    pub min_change_percent: f64,

    /// Lower bound of the qualifying price band.
    pub price_min: f64,

    /// Upper bound of the qualifying price band.
    pub price_max: f64,

    /// Maximum float share count (supply-side cap).
    pub max_float_shares: f64,

    /// Whether a record with unknown float (0 shares) passes the float cap.
    pub treat_unknown_float_as_pass: bool,
}

impl ScreenConfig {
    /// Create a new ScreenConfig with validation
    ///
    /// # Errors
    ///
    /// Returns `ScreenConfigError` if any parameter violates invariants
    pub fn new(
        min_volume_ratio: f64,
        min_change_percent: f64,
        price_min: f64,
        price_max: f64,
        max_float_shares: f64,
        treat_unknown_float_as_pass: bool,
    ) -> Result<Self, ScreenConfigError> {
        let config = Self {
            min_volume_ratio,
            min_change_percent,
            price_min,
            price_max,
            max_float_shares,
            treat_unknown_float_as_pass,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ScreenConfigError> {
        self.validate_threshold("min_volume_ratio", self.min_volume_ratio)?;
        self.validate_threshold("min_change_percent", self.min_change_percent)?;
        self.validate_threshold("price_min", self.price_min)?;
        self.validate_threshold("price_max", self.price_max)?;
        self.validate_threshold("max_float_shares", self.max_float_shares)?;

        if self.price_min > self.price_max {
            return Err(ScreenConfigError::InvertedPriceRange {
                min: self.price_min,
                max: self.price_max,
            });
        }

        Ok(())
    }

    fn validate_threshold(&self, field: &str, value: f64) -> Result<(), ScreenConfigError> {
        if !value.is_finite() {
            return Err(ScreenConfigError::NonFiniteThreshold {
                field: field.to_string(),
                value,
            });
        }
        if value < 0.0 {
            return Err(ScreenConfigError::NegativeThreshold {
                field: field.to_string(),
                value,
            });
        }
        Ok(())
    }

    /// Evaluate the full predicate conjunction for a single record.
    pub fn record_passes(&self, record: &MarketRecord) -> bool {
        self.volume_ratio_passes(record)
            && self.change_passes(record)
            && self.price_passes(record)
            && self.float_passes(record)
    }

    pub fn volume_ratio_passes(&self, record: &MarketRecord) -> bool {
        record.volume_ratio() >= self.min_volume_ratio
    }

    pub fn change_passes(&self, record: &MarketRecord) -> bool {
        record.change_percent >= self.min_change_percent
    }

    pub fn price_passes(&self, record: &MarketRecord) -> bool {
        record.price >= self.price_min && record.price <= self.price_max
    }

    pub fn float_passes(&self, record: &MarketRecord) -> bool {
        if !record.has_known_float() {
            return self.treat_unknown_float_as_pass;
        }
        record.float_shares <= self.max_float_shares
    }
}

impl Default for ScreenConfig {
    /// The classic low-float momentum screen: 5x relative volume, up 30%
    /// on the day, $3-$20 price band, float under 5M shares.
    fn default() -> Self {
        Self {
            min_volume_ratio: 5.0,
            min_change_percent: 30.0,
            price_min: 3.0,
            price_max: 20.0,
            max_float_shares: 5_000_000.0,
            treat_unknown_float_as_pass: true,
        }
    }
}
