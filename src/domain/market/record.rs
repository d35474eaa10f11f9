//! Normalized market data value objects.
//!
//! A `MarketRecord` is one symbol's snapshot for a single scan cycle. Records
//! are constructed fresh from upstream responses every cycle and carry no
//! persisted identity. Construction normalizes every numeric field once, so
//! the screening logic downstream always operates on fully-populated values.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// One symbol's market snapshot, as handed to the screening engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    /// Ticker or pair identifier.
    pub symbol: String,
    /// Last traded price in account currency.
    #[serde(default)]
    pub price: f64,
    /// Signed percentage change over the reference period.
    #[serde(default)]
    pub change_percent: f64,
    /// Traded volume in the current period.
    #[serde(default)]
    pub volume: f64,
    /// Baseline volume the upstream computed (prior day, N-day average, ...).
    /// Opaque here; 0 means the baseline is unknown.
    #[serde(default)]
    pub reference_volume: f64,
    /// Freely tradable share count. 0 means unknown.
    #[serde(default)]
    pub float_shares: f64,
    /// Headlines associated with the symbol, for catalyst matching.
    #[serde(default)]
    pub news_titles: Vec<String>,
}

impl MarketRecord {
    /// Create a record, coercing bad numeric input to safe defaults.
    ///
    /// Non-finite values and negative magnitudes become 0.0 (a data quality
    /// issue, not an error); `change_percent` keeps its sign but still
    /// coerces non-finite input. A single bad field never aborts a scan.
    pub fn new(
        symbol: impl Into<String>,
        price: f64,
        change_percent: f64,
        volume: f64,
        reference_volume: f64,
        float_shares: f64,
    ) -> Self {
        let symbol = symbol.into();
        Self {
            price: coerce_magnitude(&symbol, "price", price),
            change_percent: coerce_signed(&symbol, "change_percent", change_percent),
            volume: coerce_magnitude(&symbol, "volume", volume),
            reference_volume: coerce_magnitude(&symbol, "reference_volume", reference_volume),
            float_shares: coerce_magnitude(&symbol, "float_shares", float_shares),
            news_titles: Vec::new(),
            symbol,
        }
    }

    /// Attach headlines to the record.
    pub fn with_news_titles(mut self, news_titles: Vec<String>) -> Self {
        self.news_titles = news_titles;
        self
    }

    /// Re-apply field coercion to a record that bypassed `new` (e.g. one
    /// deserialized straight from a file).
    pub fn normalized(self) -> Self {
        Self::new(
            self.symbol,
            self.price,
            self.change_percent,
            self.volume,
            self.reference_volume,
            self.float_shares,
        )
        .with_news_titles(self.news_titles)
    }

    /// Relative volume: current volume over the upstream baseline.
    ///
    /// Returns 0.0 when the baseline is unknown (zero). Never divides by
    /// zero, never negative.
    pub fn volume_ratio(&self) -> f64 {
        if self.reference_volume > 0.0 {
            self.volume / self.reference_volume
        } else {
            0.0
        }
    }

    /// Whether the float field carries real data (0 means unknown).
    pub fn has_known_float(&self) -> bool {
        self.float_shares > 0.0
    }
}

/// Screening output: the input record decorated with its computed volume
/// ratio and the verdict of whichever mode produced it.
///
/// Exactly one of `passes` (hard-filter mode) or `match_percent` (scoring
/// mode) is set, depending on how the record was evaluated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: MarketRecord,
    pub volume_ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_percent: Option<f64>,
}

impl ScoredRecord {
    /// Decorate a record with a hard-filter verdict.
    pub fn from_filter(record: MarketRecord, passes: bool) -> Self {
        Self {
            volume_ratio: record.volume_ratio(),
            record,
            passes: Some(passes),
            match_percent: None,
        }
    }

    /// Decorate a record with a weighted match score.
    pub fn from_score(record: MarketRecord, match_percent: f64) -> Self {
        Self {
            volume_ratio: record.volume_ratio(),
            record,
            passes: None,
            match_percent: Some(match_percent),
        }
    }

    /// Match percent, treating hard-filter output as unscored (0.0).
    pub fn score(&self) -> f64 {
        self.match_percent.unwrap_or(0.0)
    }
}

fn coerce_magnitude(symbol: &str, field: &str, value: f64) -> f64 {
    if !value.is_finite() || value < 0.0 {
        warn!(
            "Data quality: {} has invalid {}: {}. Coercing to 0.0",
            symbol, field, value
        );
        0.0
    } else {
        value
    }
}

fn coerce_signed(symbol: &str, field: &str, value: f64) -> f64 {
    if !value.is_finite() {
        warn!(
            "Data quality: {} has non-finite {}: {}. Coercing to 0.0",
            symbol, field, value
        );
        0.0
    } else {
        value
    }
}
