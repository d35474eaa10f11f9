//! Scan orchestration around the screening engine.
//!
//! The service owns the collaborator seams: it pulls a record batch from the
//! source, runs the pure engine over it, and hands matches to the alert
//! sink. All I/O and timing live here; the engine itself stays synchronous
//! and stateless.

use std::sync::Arc;

use chrono::Utc;
use tokio::time::{self, Duration};
use tracing::{error, info, warn};

use crate::domain::market::ScoredRecord;
use crate::domain::ports::{AlertSink, MarketRecordSource, ScanAlert};
use crate::domain::screen::ScreeningEngine;

pub struct ScanService {
    source: Arc<dyn MarketRecordSource>,
    sink: Arc<dyn AlertSink>,
    engine: ScreeningEngine,
    scan_interval: Duration,
    top_n: Option<usize>,
}

impl ScanService {
    pub fn new(
        source: Arc<dyn MarketRecordSource>,
        sink: Arc<dyn AlertSink>,
        engine: ScreeningEngine,
        scan_interval: Duration,
        top_n: Option<usize>,
    ) -> Self {
        Self {
            source,
            sink,
            engine,
            scan_interval,
            top_n,
        }
    }

    /// Run a single scan cycle and return the ranked matches.
    ///
    /// An upstream failure is logged and yields an empty cycle; the engine
    /// never observes provider errors. An empty result is a normal outcome
    /// ("no symbols currently meet criteria"), not a failure.
    pub async fn scan_once(&self) -> Vec<ScoredRecord> {
        let records = match self.source.fetch_records().await {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "ScanService: upstream source '{}' unavailable: {}. Treating cycle as empty.",
                    self.source.name(),
                    e
                );
                Vec::new()
            }
        };

        let matches = self.engine.screen_ranked(&records, self.top_n);
        info!(
            "ScanService: {} mode scanned {} candidates, {} match",
            self.engine.mode().label(),
            records.len(),
            matches.len()
        );

        matches
    }

    /// Watch mode: scan on an interval and dispatch alerts for matches.
    pub async fn run(&self) {
        info!(
            "ScanService started. Source: {}, interval: {:?}",
            self.source.name(),
            self.scan_interval
        );

        let mut interval = time::interval(self.scan_interval);
        // The first tick completes immediately
        interval.tick().await;

        loop {
            let matches = self.scan_once().await;

            if matches.is_empty() {
                info!("ScanService: no symbols currently meet criteria");
            } else {
                let alert = ScanAlert {
                    triggered_at: Utc::now(),
                    mode: self.engine.mode().label(),
                    matches,
                };
                if let Err(e) = self.sink.dispatch(&alert).await {
                    error!("ScanService: failed to dispatch alert: {}", e);
                }
            }

            interval.tick().await;
        }
    }
}
