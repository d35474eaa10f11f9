//! moverscan CLI
//!
//! A market screener over normalized record universes: hard-filter scans,
//! weighted match scoring, and a periodic watch mode with alerting.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;

use moverscan::application::{ScanReporter, ScanService};
use moverscan::config::{ScanProfile, ScreenEnvConfig};
use moverscan::domain::ports::MarketRecordSource;
use moverscan::domain::screen::{CatalystDetector, ScreenMode, ScreeningEngine};
use moverscan::infrastructure::{CsvRecordSource, LogAlertSink, MockRecordSource};

#[derive(Parser)]
#[command(author, version, about = "Momentum market screener", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hard-filter scan of a universe file
    Scan {
        /// CSV universe file (symbol,price,change_percent,volume,reference_volume,float_shares,news_titles)
        #[arg(short, long)]
        input: String,

        /// TOML profile with a [screen] section (env/defaults otherwise)
        #[arg(long)]
        profile: Option<String>,

        /// Keep only the first N matches
        #[arg(short, long)]
        top_n: Option<usize>,

        /// Output JSON file for the full result list
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Weighted 0-100 match scoring of a universe file
    Rank {
        /// CSV universe file
        #[arg(short, long)]
        input: String,

        /// TOML profile with a [score] section (default 60/40 change/volume blend otherwise)
        #[arg(long)]
        profile: Option<String>,

        /// Number of top results to display
        #[arg(short, long, default_value = "10")]
        top_n: usize,

        /// Output JSON file for the full result list
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Periodic scan loop with alert dispatch
    Watch {
        /// CSV universe file, re-read every cycle; mock data when omitted
        #[arg(short, long)]
        input: Option<String>,

        /// TOML profile (screen or score section)
        #[arg(long)]
        profile: Option<String>,

        /// Seconds between scan cycles
        #[arg(long)]
        interval: Option<u64>,

        /// Keep only the first N matches per cycle
        #[arg(short, long)]
        top_n: Option<usize>,
    },
    /// Print the active criteria and exit
    Criteria {
        /// TOML profile to describe (env/defaults otherwise)
        #[arg(long)]
        profile: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let reporter = ScanReporter::new();

    match cli.command {
        Commands::Scan {
            input,
            profile,
            top_n,
            output,
        } => {
            let engine = build_filter_engine(profile.as_deref())?;
            let source = CsvRecordSource::new(&input);

            reporter.print_criteria(engine.mode());

            let records = source.fetch_records().await?;
            info!("Scanned {} candidates from {}", records.len(), input);

            let results = engine.screen_ranked(&records, top_n);
            reporter.print_results_table(&results);

            if let Some(path) = output {
                reporter.export_json(&results, &path)?;
                info!("Results written to {}", path);
            }
        }
        Commands::Rank {
            input,
            profile,
            top_n,
            output,
        } => {
            let engine = build_score_engine(profile.as_deref())?;
            let source = CsvRecordSource::new(&input);

            reporter.print_criteria(engine.mode());

            let records = source.fetch_records().await?;
            info!("Scoring {} candidates from {}", records.len(), input);

            let ranked = engine.screen_ranked(&records, Some(top_n));
            reporter.print_results_table(&ranked);

            if let Some(path) = output {
                // Export the full scored list, not just the displayed slice
                let all = engine.screen_ranked(&records, None);
                reporter.export_json(&all, &path)?;
                info!("Results written to {}", path);
            }
        }
        Commands::Watch {
            input,
            profile,
            interval,
            top_n,
        } => {
            let env_config = ScreenEnvConfig::from_env()?;
            let engine = match load_profile(profile.as_deref())? {
                Some(p) if p.score.is_some() => build_score_engine_from(&p)?,
                Some(p) => build_filter_engine_from(&p, &env_config)?,
                None => ScreeningEngine::new(ScreenMode::Filter(env_config.to_screen_config()?)),
            };

            let source: Arc<dyn MarketRecordSource> = match input {
                Some(path) => Arc::new(CsvRecordSource::new(path)),
                None => Arc::new(MockRecordSource::with_default_universe(0)),
            };

            let interval_seconds = interval.unwrap_or(env_config.scan_interval_seconds);
            let top_n = top_n.or(env_config.top_n);

            reporter.print_criteria(engine.mode());

            let service = ScanService::new(
                source,
                Arc::new(LogAlertSink::new()),
                engine,
                std::time::Duration::from_secs(interval_seconds),
                top_n,
            );
            service.run().await;
        }
        Commands::Criteria { profile } => {
            let engine = match load_profile(profile.as_deref())? {
                Some(p) if p.score.is_some() => build_score_engine_from(&p)?,
                _ => build_filter_engine(profile.as_deref())?,
            };
            reporter.print_criteria(engine.mode());
        }
    }

    Ok(())
}

fn load_profile(path: Option<&str>) -> Result<Option<ScanProfile>> {
    path.map(ScanProfile::load).transpose()
}

/// Filter engine from a profile's [screen] section, falling back to env.
fn build_filter_engine(profile_path: Option<&str>) -> Result<ScreeningEngine> {
    let env_config = ScreenEnvConfig::from_env()?;
    match load_profile(profile_path)? {
        Some(profile) => build_filter_engine_from(&profile, &env_config),
        None => Ok(ScreeningEngine::new(ScreenMode::Filter(
            env_config.to_screen_config()?,
        ))),
    }
}

fn build_filter_engine_from(
    profile: &ScanProfile,
    env_config: &ScreenEnvConfig,
) -> Result<ScreeningEngine> {
    let config = match profile.screen_config()? {
        Some(config) => config,
        None => env_config.to_screen_config()?,
    };
    Ok(ScreeningEngine::new(ScreenMode::Filter(config)))
}

/// Score engine from a profile's [score] section, falling back to the
/// default 60/40 change/volume blend.
fn build_score_engine(profile_path: Option<&str>) -> Result<ScreeningEngine> {
    match load_profile(profile_path)? {
        Some(profile) => build_score_engine_from(&profile),
        None => Ok(ScreeningEngine::new(ScreenMode::Score(Default::default()))),
    }
}

fn build_score_engine_from(profile: &ScanProfile) -> Result<ScreeningEngine> {
    let score_profile = profile
        .score_profile()?
        .unwrap_or_default();
    let detector = CatalystDetector::with_threshold(profile.catalyst_threshold());
    Ok(ScreeningEngine::with_catalyst_detector(
        ScreenMode::Score(score_profile),
        detector,
    ))
}
