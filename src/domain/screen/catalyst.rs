//! News catalyst detection for screening criteria.
//!
//! The scoring engine's `NewsCatalyst` criterion needs a binary answer: is
//! any headline attached to a symbol a bullish catalyst? Detection combines
//! VADER sentiment with a financial keyword boost, since VADER's general
//! lexicon misses market jargon ("breakout", "low float", "squeeze").

use vader_sentiment::SentimentIntensityAnalyzer;

/// Bullish market jargon and its boost weight. Applied on top of the VADER
/// compound score before thresholding.
const BULLISH_KEYWORDS: &[(&str, f64)] = &[
    ("surge", 0.4),
    ("surges", 0.4),
    ("rally", 0.4),
    ("rallies", 0.4),
    ("soar", 0.5),
    ("soars", 0.5),
    ("skyrocket", 0.6),
    ("skyrockets", 0.6),
    ("breakout", 0.3),
    ("all-time high", 0.5),
    ("record high", 0.4),
    ("52-week high", 0.4),
    ("squeeze", 0.3),
    ("low float", 0.2),
    ("fda approval", 0.5),
    ("approval", 0.3),
    ("upgrade", 0.3),
    ("upgraded", 0.3),
    ("beats estimates", 0.4),
    ("beats expectations", 0.4),
    ("partnership", 0.2),
    ("acquisition", 0.3),
    ("buyout", 0.4),
    ("contract win", 0.4),
    ("breakthrough", 0.4),
];

/// Default combined-score threshold above which a headline counts as a
/// catalyst.
pub const DEFAULT_CATALYST_THRESHOLD: f64 = 0.3;

/// Detects bullish news catalysts in a symbol's headlines.
///
/// Deterministic for a fixed headline list: the same titles always yield the
/// same verdict, which the engine's idempotence contract relies on.
pub struct CatalystDetector {
    analyzer: SentimentIntensityAnalyzer<'static>,
    threshold: f64,
}

impl CatalystDetector {
    /// Create a detector with the default threshold.
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_CATALYST_THRESHOLD)
    }

    /// Create a detector that fires at the given combined score.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
            threshold,
        }
    }

    /// Keyword boost for the given headline.
    fn keyword_boost(&self, text: &str) -> f64 {
        let text_lower = text.to_lowercase();
        let mut boost = 0.0;

        for (keyword, score) in BULLISH_KEYWORDS {
            if text_lower.contains(keyword) {
                boost += score;
            }
        }

        boost
    }

    /// Score a single headline in [-1.0, 1.0].
    ///
    /// Combines VADER's compound score with the keyword boost, clamped.
    pub fn headline_score(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }

        let scores = self.analyzer.polarity_scores(text);
        let vader_score = scores["compound"];
        let boost = self.keyword_boost(text);

        (vader_score + boost * 0.5).clamp(-1.0, 1.0)
    }

    /// Whether any headline clears the catalyst threshold.
    ///
    /// An empty title list means no catalyst.
    pub fn has_catalyst(&self, titles: &[String]) -> bool {
        titles
            .iter()
            .any(|title| self.headline_score(title) >= self.threshold)
    }
}

impl Default for CatalystDetector {
    fn default() -> Self {
        Self::new()
    }
}
