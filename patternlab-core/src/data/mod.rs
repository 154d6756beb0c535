//! Data loading: providers, CSV import, and weekly resampling.

pub mod csv_import;
pub mod provider;
pub mod resample;
pub mod yahoo;

pub use csv_import::CsvProvider;
pub use provider::{
    DataError, DataProvider, DataSource, FetchRequest, FetchResult, Interval, RawBar,
};
pub use resample::WeeklyResampler;
pub use yahoo::YahooProvider;

use crate::domain::{adjust_series, Bar, WeeklyBar};
use tracing::info;

/// Weekly bars produced by [`load_weekly`], with provenance.
#[derive(Debug, Clone)]
pub struct WeeklySeries {
    pub symbol: String,
    pub source: DataSource,
    pub daily_rows: usize,
    pub weeks: Vec<WeeklyBar>,
}

/// Fetch daily bars and resample them into weekly bars, earliest first.
///
/// With `adjust` set, prices are moved onto the adjusted-close basis before
/// aggregation. Fails with [`DataError::DataUnavailable`] when nothing
/// usable comes back.
pub fn load_weekly(
    provider: &dyn DataProvider,
    request: &FetchRequest,
    resampler: &WeeklyResampler,
    adjust: bool,
) -> Result<WeeklySeries, DataError> {
    let fetched = provider.fetch(request)?;
    let daily_rows = fetched.bars.len();

    let bars: Vec<Bar> = fetched
        .bars
        .into_iter()
        .map(|raw| raw.into_bar(&fetched.symbol))
        .collect();
    let bars = if adjust { adjust_series(bars) } else { bars };

    let weeks = resampler.resample(&bars);
    if weeks.is_empty() {
        return Err(request.unavailable());
    }

    info!(
        symbol = %fetched.symbol,
        source = %fetched.source,
        daily_rows,
        weeks = weeks.len(),
        "loaded weekly bars"
    );

    Ok(WeeklySeries {
        symbol: fetched.symbol,
        source: fetched.source,
        daily_rows,
        weeks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct FixedProvider(Vec<RawBar>);

    impl DataProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        fn fetch(&self, request: &FetchRequest) -> Result<FetchResult, DataError> {
            if self.0.is_empty() {
                return Err(request.unavailable());
            }
            Ok(FetchResult {
                symbol: request.symbol.clone(),
                bars: self.0.clone(),
                source: DataSource::Synthetic,
            })
        }
    }

    fn raw(day: u32, close: f64, adj_close: f64) -> RawBar {
        RawBar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 10,
            adj_close,
        }
    }

    fn request() -> FetchRequest {
        FetchRequest::daily(
            "TEST",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
    }

    #[test]
    fn adjusts_before_resampling() {
        let provider = FixedProvider(vec![raw(2, 10.0, 5.0), raw(9, 20.0, 10.0)]);
        let resampler = WeeklyResampler::friday();

        let adjusted = load_weekly(&provider, &request(), &resampler, true).unwrap();
        assert_eq!(adjusted.weeks.len(), 2);
        assert_eq!(adjusted.weeks[1].close, 10.0);
        assert_eq!(adjusted.daily_rows, 2);

        let raw_prices = load_weekly(&provider, &request(), &resampler, false).unwrap();
        assert_eq!(raw_prices.weeks[1].close, 20.0);
    }

    #[test]
    fn empty_provider_is_data_unavailable() {
        let provider = FixedProvider(vec![]);
        let err = load_weekly(&provider, &request(), &WeeklyResampler::friday(), true).unwrap_err();
        assert!(matches!(err, DataError::DataUnavailable { .. }));
    }

    #[test]
    fn all_void_rows_is_data_unavailable() {
        let provider = FixedProvider(vec![raw(2, f64::NAN, f64::NAN)]);
        let err = load_weekly(&provider, &request(), &WeeklyResampler::friday(), false).unwrap_err();
        assert!(matches!(err, DataError::DataUnavailable { .. }));
    }

    #[test]
    fn partial_adjusted_close_keeps_one_price_basis() {
        // Raw closes rise 10%, adjusted closes are half the raw price; the
        // middle week lacks an adjusted close.
        let provider = FixedProvider(vec![
            raw(5, 100.0, 50.0),
            raw(12, 110.0, f64::NAN),
            raw(19, 121.0, 60.5),
        ]);
        let series = load_weekly(&provider, &request(), &WeeklyResampler::friday(), true).unwrap();
        let closes: Vec<f64> = series.weeks.iter().map(|w| w.close).collect();
        assert_eq!(closes, vec![50.0, 55.0, 60.5]);
    }
}
