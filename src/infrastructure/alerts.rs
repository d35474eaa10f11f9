//! Alert sinks.
//!
//! The scan service hands qualifying records to an `AlertSink` unchanged;
//! the sink owns composition and delivery. The log sink here renders a
//! compact per-symbol summary and emits it through `tracing`, which is the
//! delivery channel this binary ships with (a mail or chat relay would be
//! another implementation of the same port).

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{AlertSink, ScanAlert};

#[derive(Debug, Default)]
pub struct LogAlertSink;

impl LogAlertSink {
    pub fn new() -> Self {
        Self
    }

    fn compose(alert: &ScanAlert) -> String {
        let mut lines = Vec::with_capacity(alert.matches.len() + 1);
        lines.push(format!(
            "{} symbols matched ({} mode) at {}",
            alert.matches.len(),
            alert.mode,
            alert.triggered_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        for result in &alert.matches {
            let mut line = format!(
                "{}: ${:.2} ({:+.1}%), {:.1}x relative volume",
                result.record.symbol,
                result.record.price,
                result.record.change_percent,
                result.volume_ratio
            );
            if result.record.has_known_float() {
                line.push_str(&format!(", float {:.0}", result.record.float_shares));
            }
            if let Some(pct) = result.match_percent {
                line.push_str(&format!(", match {:.1}%", pct));
            }
            lines.push(line);
        }

        lines.join("\n  ")
    }
}

#[async_trait]
impl AlertSink for LogAlertSink {
    async fn dispatch(&self, alert: &ScanAlert) -> Result<()> {
        info!("Scan alert: {}", Self::compose(alert));
        Ok(())
    }
}
