//! PatternLab CLI — fetch a ticker's daily history, classify its last 11 weeks,
//! and print the verification report.
//!
//! With no arguments it checks CVNA from 2019-01-01 against `6-4-D`. Every
//! setting can come from a TOML file (`--config`) and be overridden by flags.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Weekday};
use clap::Parser;
use patternlab_core::data::{CsvProvider, DataProvider, YahooProvider};
use patternlab_core::pattern::Pattern;
use patternlab_core::report::{render_banner, render_report};
use patternlab_core::{analyze, PatternConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Default)]
#[command(
    name = "patternlab",
    about = "PatternLab — weekly up/down pattern check for a single ticker"
)]
struct Cli {
    /// Path to a TOML config file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ticker symbol (default CVNA).
    #[arg(long)]
    ticker: Option<String>,

    /// Start date (YYYY-MM-DD). Defaults to 2019-01-01.
    #[arg(long)]
    start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Expected reference pattern, e.g. 6-4-D.
    #[arg(long)]
    expected: Option<Pattern>,

    /// Read daily bars from a CSV file instead of Yahoo Finance.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Weekday that closes each week (default Fri).
    #[arg(long)]
    anchor: Option<Weekday>,

    /// Use raw prices instead of dividend/split adjusted prices.
    #[arg(long, default_value_t = false)]
    unadjusted: bool,

    /// HTTP request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl Cli {
    /// Layer flag values over the base config and re-validate.
    fn apply_overrides(&self, mut config: PatternConfig) -> Result<PatternConfig> {
        if let Some(ticker) = &self.ticker {
            config.ticker = ticker.clone();
        }
        if let Some(start) = self.start {
            config.start_date = start;
        }
        if let Some(end) = self.end {
            config.end_date = Some(end);
        }
        if let Some(expected) = self.expected {
            config.expected_pattern = expected;
        }
        if let Some(csv) = &self.csv {
            config.csv_path = Some(csv.clone());
        }
        if let Some(anchor) = self.anchor {
            config.week_anchor = anchor;
        }
        if self.unadjusted {
            config.adjust_prices = false;
        }
        if let Some(timeout) = self.timeout_secs {
            config.timeout_secs = timeout;
        }
        config.validate()?;
        Ok(config)
    }

    fn resolve_config(&self) -> Result<PatternConfig> {
        let base = match &self.config {
            Some(path) => PatternConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => PatternConfig::default(),
        };
        self.apply_overrides(base)
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "patternlab=info,patternlab_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn build_provider(config: &PatternConfig) -> Result<Box<dyn DataProvider>> {
    let provider: Box<dyn DataProvider> = match &config.csv_path {
        Some(path) => Box::new(CsvProvider::new(path)),
        None => Box::new(YahooProvider::new(Duration::from_secs(config.timeout_secs))?),
    };
    Ok(provider)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    debug!(?config, "resolved config");

    let provider = build_provider(&config)?;

    print!("{}", render_banner("WEEKLY PATTERN CHECK"));
    match &config.csv_path {
        Some(path) => println!(
            "Reading daily data for {} from {} (since {})...",
            config.ticker,
            path.display(),
            config.start_date
        ),
        None => println!(
            "Downloading daily data for {} from {}...",
            config.ticker,
            config.start_date.format("%B %-d, %Y")
        ),
    }

    let today = chrono::Local::now().date_naive();
    let analysis = analyze(&config, provider.as_ref(), today)
        .with_context(|| format!("pattern check failed for {}", config.ticker))?;

    print!("{}", render_report(&analysis, &config.expected_pattern));
    Ok(())
}
