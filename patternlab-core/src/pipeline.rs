//! Fetch → resample → classify for one ticker.

use crate::config::PatternConfig;
use crate::data::{load_weekly, DataError, DataProvider, DataSource, FetchRequest, WeeklyResampler};
use crate::domain::WeeklyBar;
use crate::pattern::{classify, trailing_window, Classification, PatternError};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

/// Errors from a pipeline run. Both are fatal for the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("data error: {0}")]
    Data(#[from] DataError),
    #[error("pattern error: {0}")]
    Pattern(#[from] PatternError),
}

/// Everything the reports need from one run.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub symbol: String,
    pub source: DataSource,
    pub daily_rows: usize,
    pub total_weeks: usize,
    pub first_week: NaiveDate,
    pub last_week: NaiveDate,
    /// The classified window, earliest week first.
    pub window: Vec<WeeklyBar>,
    pub classification: Classification,
}

/// Run the full pipeline for the configured ticker.
///
/// `today` closes the date range when the config leaves `end_date` open.
pub fn analyze(
    config: &PatternConfig,
    provider: &dyn DataProvider,
    today: NaiveDate,
) -> Result<Analysis, PipelineError> {
    let request = FetchRequest::daily(
        config.ticker.clone(),
        config.start_date,
        config.end_date.unwrap_or(today),
    );
    let resampler = WeeklyResampler::new(config.week_anchor);

    info!(
        symbol = %request.symbol,
        provider = provider.name(),
        start = %request.start,
        end = %request.end,
        "fetching daily bars"
    );
    let series = load_weekly(provider, &request, &resampler, config.adjust_prices)?;

    let classification = classify(&series.weeks)?;
    let window = trailing_window(&series.weeks)?.to_vec();

    // classify succeeded, so there are at least WINDOW_WEEKS bars.
    let first_week = series.weeks[0].week_end;
    let last_week = series.weeks[series.weeks.len() - 1].week_end;

    Ok(Analysis {
        symbol: series.symbol,
        source: series.source,
        daily_rows: series.daily_rows,
        total_weeks: series.weeks.len(),
        first_week,
        last_week,
        window,
        classification,
    })
}
