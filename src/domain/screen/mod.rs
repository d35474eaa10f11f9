// News catalyst detection
pub mod catalyst;

// The filter/score engine
pub mod engine;

// Weighted scoring profile
pub mod score_profile;

// Hard-filter thresholds
pub mod screen_config;

pub use catalyst::CatalystDetector;
pub use engine::{ScreenMode, ScreeningEngine};
pub use score_profile::{ScoreCriterion, ScoreProfile, ScoreProfileError, WeightedCriterion};
pub use screen_config::{ScreenConfig, ScreenConfigError};
