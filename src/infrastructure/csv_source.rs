//! CSV-backed record source.
//!
//! Loads a scan universe from a CSV file with the columns:
//! `symbol,price,change_percent,volume,reference_volume,float_shares,news_titles`
//! where `news_titles` is optional and `|`-separated. The baseline in
//! `reference_volume` is whatever the upstream producer chose (prior day,
//! N-day average); it is not recomputed here.
//!
//! Row tolerance follows the scan-wide data quality policy: a non-numeric or
//! missing cell coerces to 0.0 with a warning, and only a row without a
//! symbol is skipped. A bad row never aborts the scan; a missing or
//! unreadable file is an upstream error and does.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::domain::market::MarketRecord;
use crate::domain::ports::MarketRecordSource;

/// Raw CSV row. Numeric cells are read as strings so malformed values can
/// coerce instead of failing deserialization.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    price: String,
    #[serde(default)]
    change_percent: String,
    #[serde(default)]
    volume: String,
    #[serde(default)]
    reference_volume: String,
    #[serde(default)]
    float_shares: String,
    #[serde(default)]
    news_titles: String,
}

pub struct CsvRecordSource {
    path: PathBuf,
}

impl CsvRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<MarketRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .context(format!(
                "Failed to open universe file: {}",
                self.path.display()
            ))?;

        let mut records = Vec::new();
        for (line, row) in reader.deserialize::<CsvRow>().enumerate() {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    warn!("CsvRecordSource: skipping unreadable row {}: {}", line + 1, e);
                    continue;
                }
            };

            if row.symbol.is_empty() {
                warn!("CsvRecordSource: skipping row {} with empty symbol", line + 1);
                continue;
            }

            let news_titles: Vec<String> = row
                .news_titles
                .split('|')
                .map(str::trim)
                .filter(|title| !title.is_empty())
                .map(str::to_string)
                .collect();

            let record = MarketRecord::new(
                row.symbol.clone(),
                parse_cell(&row.symbol, "price", &row.price),
                parse_cell(&row.symbol, "change_percent", &row.change_percent),
                parse_cell(&row.symbol, "volume", &row.volume),
                parse_cell(&row.symbol, "reference_volume", &row.reference_volume),
                parse_cell(&row.symbol, "float_shares", &row.float_shares),
            )
            .with_news_titles(news_titles);

            records.push(record);
        }

        Ok(records)
    }
}

#[async_trait]
impl MarketRecordSource for CsvRecordSource {
    fn name(&self) -> &str {
        "csv"
    }

    async fn fetch_records(&self) -> Result<Vec<MarketRecord>> {
        self.load()
    }
}

/// Parse a numeric cell, coercing empty or malformed values to 0.0.
fn parse_cell(symbol: &str, field: &str, cell: &str) -> f64 {
    if cell.is_empty() {
        return 0.0;
    }
    match cell.parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            warn!(
                "CsvRecordSource: {} has non-numeric {}: '{}'. Coercing to 0.0",
                symbol, field, cell
            );
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("moverscan_csv_tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[tokio::test]
    async fn test_loads_well_formed_rows() {
        let path = write_fixture(
            "well_formed.csv",
            "symbol,price,change_percent,volume,reference_volume,float_shares,news_titles\n\
             XYZ,10.0,45.0,500000,50000,2000000,Shares surge on approval|Volume spikes\n\
             ABC,4.5,12.0,100000,80000,9000000,\n",
        );

        let source = CsvRecordSource::new(&path);
        let records = source.fetch_records().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].symbol, "XYZ");
        assert_eq!(records[0].volume_ratio(), 10.0);
        assert_eq!(records[0].news_titles.len(), 2);
        assert!(records[1].news_titles.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_cells_coerce_to_zero() {
        let path = write_fixture(
            "malformed.csv",
            "symbol,price,change_percent,volume,reference_volume,float_shares,news_titles\n\
             BAD,not_a_number,45.0,,50000,n/a,\n",
        );

        let source = CsvRecordSource::new(&path);
        let records = source.fetch_records().await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price, 0.0);
        assert_eq!(records[0].change_percent, 45.0);
        assert_eq!(records[0].volume, 0.0);
        assert_eq!(records[0].float_shares, 0.0);
    }

    #[tokio::test]
    async fn test_empty_symbol_rows_are_skipped() {
        let path = write_fixture(
            "empty_symbol.csv",
            "symbol,price,change_percent,volume,reference_volume,float_shares,news_titles\n\
             ,10.0,45.0,500000,50000,2000000,\n\
             OK,10.0,45.0,500000,50000,2000000,\n",
        );

        let source = CsvRecordSource::new(&path);
        let records = source.fetch_records().await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].symbol, "OK");
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let source = CsvRecordSource::new("/nonexistent/universe.csv");
        assert!(source.fetch_records().await.is_err());
    }
}
