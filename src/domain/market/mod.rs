// Normalized market data records
pub mod record;

pub use record::{MarketRecord, ScoredRecord};
