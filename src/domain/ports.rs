use crate::domain::market::{MarketRecord, ScoredRecord};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Supplies the candidate records for one scan cycle.
///
/// Implementations own everything upstream of the engine: provider calls,
/// rate limits, caching, fallback sources. The engine only ever sees
/// best-effort normalized records; provider outages must be translated into
/// an error (or an empty batch) before the engine is invoked.
#[async_trait]
pub trait MarketRecordSource: Send + Sync {
    /// Source name for logging and diagnostics.
    fn name(&self) -> &str;

    /// Fetch a fresh batch of normalized records.
    async fn fetch_records(&self) -> Result<Vec<MarketRecord>>;
}

/// Alert payload produced when a scan cycle finds matches.
#[derive(Debug, Clone, Serialize)]
pub struct ScanAlert {
    pub triggered_at: DateTime<Utc>,
    /// Which engine mode produced the matches ("filter" or "score").
    pub mode: &'static str,
    /// Engine output, unchanged.
    pub matches: Vec<ScoredRecord>,
}

/// Consumes qualifying records from a scan cycle.
///
/// Delivery transport (log line, message relay, ...) is the implementation's
/// concern; sinks receive the engine's output unchanged.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn dispatch(&self, alert: &ScanAlert) -> Result<()>;
}
