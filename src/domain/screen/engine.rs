//! The screening engine.
//!
//! A pure, synchronous transform: (records, configuration) -> output
//! records. No I/O, no shared state, no suspension. Calling it twice with
//! the same input yields bit-identical output, and every sort it performs is
//! stable, so equal keys keep their input order.

use crate::domain::market::record::{MarketRecord, ScoredRecord};
use crate::domain::screen::catalyst::CatalystDetector;
use crate::domain::screen::score_profile::{ScoreCriterion, ScoreProfile};
use crate::domain::screen::screen_config::ScreenConfig;

/// Which of the two interchangeable screening modes a scan runs.
pub enum ScreenMode {
    /// Hard filter: boolean criteria, AND-combined.
    Filter(ScreenConfig),
    /// Weighted continuous score: 0-100 match percent.
    Score(ScoreProfile),
}

impl ScreenMode {
    /// Short label for logs and alert payloads.
    pub fn label(&self) -> &'static str {
        match self {
            ScreenMode::Filter(_) => "filter",
            ScreenMode::Score(_) => "score",
        }
    }
}

/// Stateless screening engine over normalized market records.
///
/// Holds only immutable configuration; each invocation is independent, so
/// the host may run any number of scans in parallel with separate engines.
pub struct ScreeningEngine {
    mode: ScreenMode,
    catalyst: CatalystDetector,
}

impl ScreeningEngine {
    /// Create an engine with the default catalyst detector.
    pub fn new(mode: ScreenMode) -> Self {
        Self {
            mode,
            catalyst: CatalystDetector::new(),
        }
    }

    /// Create an engine with a custom-threshold catalyst detector.
    pub fn with_catalyst_detector(mode: ScreenMode, catalyst: CatalystDetector) -> Self {
        Self { mode, catalyst }
    }

    pub fn mode(&self) -> &ScreenMode {
        &self.mode
    }

    /// Run the configured mode over a record sequence.
    ///
    /// Filter mode returns the passing sub-sequence in input order. Score
    /// mode returns every record annotated with its match percent, still in
    /// input order; ranking is a separate, explicit step. Empty input is a
    /// normal outcome and yields empty output.
    pub fn screen(&self, records: &[MarketRecord]) -> Vec<ScoredRecord> {
        match &self.mode {
            ScreenMode::Filter(config) => records
                .iter()
                .filter(|record| config.record_passes(record))
                .map(|record| ScoredRecord::from_filter(record.clone(), true))
                .collect(),
            ScreenMode::Score(profile) => records
                .iter()
                .map(|record| {
                    ScoredRecord::from_score(record.clone(), self.match_percent(profile, record))
                })
                .collect(),
        }
    }

    /// Run the configured mode and rank the output for presentation.
    ///
    /// Score mode sorts descending by match percent (stable: ties keep input
    /// order); filter mode keeps input order. `top_n` then truncates.
    pub fn screen_ranked(&self, records: &[MarketRecord], top_n: Option<usize>) -> Vec<ScoredRecord> {
        let mut output = self.screen(records);

        if matches!(self.mode, ScreenMode::Score(_)) {
            output.sort_by(|a, b| b.score().total_cmp(&a.score()));
        }

        if let Some(n) = top_n {
            output.truncate(n);
        }

        output
    }

    /// Weighted 0-100 match percent for a single record.
    pub fn match_percent(&self, profile: &ScoreProfile, record: &MarketRecord) -> f64 {
        let blended: f64 = profile
            .criteria()
            .iter()
            .map(|weighted| weighted.weight * self.sub_score(profile, &weighted.criterion, record))
            .sum();

        100.0 * blended
    }

    /// Sub-score in [0, 1] for one criterion.
    fn sub_score(
        &self,
        profile: &ScoreProfile,
        criterion: &ScoreCriterion,
        record: &MarketRecord,
    ) -> f64 {
        match *criterion {
            ScoreCriterion::ChangePercent { target } => ramp(record.change_percent, target),
            ScoreCriterion::VolumeRatio { target } => ramp(record.volume_ratio(), target),
            ScoreCriterion::Volume { target } => ramp(record.volume, target),
            ScoreCriterion::PriceInRange { min, max } => {
                binary(record.price >= min && record.price <= max)
            }
            ScoreCriterion::FloatBelow { max_shares } => {
                let passes = if record.has_known_float() {
                    record.float_shares <= max_shares
                } else {
                    profile.treat_unknown_float_as_pass()
                };
                binary(passes)
            }
            ScoreCriterion::NewsCatalyst => binary(self.catalyst.has_catalyst(&record.news_titles)),
        }
    }
}

/// Linear ramp saturating at 1.0, floored at 0.0 so a negative raw value
/// (a down day against a change target) cannot drag the blend below zero.
fn ramp(value: f64, target: f64) -> f64 {
    (value / target).clamp(0.0, 1.0)
}

fn binary(condition: bool) -> f64 {
    if condition { 1.0 } else { 0.0 }
}
