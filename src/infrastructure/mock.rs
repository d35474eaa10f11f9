//! Mock record source for demos and tests.
//!
//! Generates a plausible mover universe without any provider dependency.
//! Seeded, so a fixed seed reproduces the same sequence of scan batches.

use anyhow::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::market::MarketRecord;
use crate::domain::ports::MarketRecordSource;

const MOCK_HEADLINES: &[&str] = &[
    "Shares surge after FDA approval announcement",
    "Low float breakout draws heavy volume",
    "Company schedules investor day next month",
    "Stock rallies to 52-week high on contract win",
    "Quarterly filing submitted to regulators",
];

pub struct MockRecordSource {
    universe: Vec<String>,
    seed: u64,
    cycle: AtomicU64,
}

impl MockRecordSource {
    pub fn new(universe: Vec<String>, seed: u64) -> Self {
        Self {
            universe,
            seed,
            cycle: AtomicU64::new(0),
        }
    }

    /// A small default universe of fake tickers.
    pub fn with_default_universe(seed: u64) -> Self {
        let universe = ["MOCK", "DEMO", "TEST", "FAKE", "SMPL", "PROB", "TRIA", "QUOT"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        Self::new(universe, seed)
    }
}

#[async_trait]
impl MarketRecordSource for MockRecordSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_records(&self) -> Result<Vec<MarketRecord>> {
        let cycle = self.cycle.fetch_add(1, Ordering::Relaxed);
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(cycle));

        let records = self
            .universe
            .iter()
            .map(|symbol| {
                let price = rng.random_range(1.0..30.0);
                let change_percent = rng.random_range(-20.0..80.0);
                let reference_volume = rng.random_range(20_000.0..500_000.0);
                let volume = reference_volume * rng.random_range(0.2..15.0);
                let float_shares = if rng.random_bool(0.2) {
                    // Unknown float for some symbols, as real providers do
                    0.0
                } else {
                    rng.random_range(1_000_000.0..50_000_000.0)
                };

                let news_titles = if rng.random_bool(0.4) {
                    vec![MOCK_HEADLINES[rng.random_range(0..MOCK_HEADLINES.len())].to_string()]
                } else {
                    Vec::new()
                };

                MarketRecord::new(
                    symbol.clone(),
                    price,
                    change_percent,
                    volume,
                    reference_volume,
                    float_shares,
                )
                .with_news_titles(news_titles)
            })
            .collect();

        Ok(records)
    }
}
