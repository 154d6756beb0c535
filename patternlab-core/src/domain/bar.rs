//! Bar — daily market data and its weekly aggregate.

use super::Symbol;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// OHLCV bar for a single symbol on a single trading day.
///
/// Prices are as reported by the provider. `adj_close` carries the
/// dividend/split adjusted close; see [`adjust_series`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub symbol: Symbol,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub adj_close: f64,
}

impl Bar {
    /// `adj_close / close`, when both are present and the close is non-zero.
    pub fn adjustment_ratio(&self) -> Option<f64> {
        if !self.adj_close.is_finite() || !self.close.is_finite() || self.close == 0.0 {
            return None;
        }
        Some(self.adj_close / self.close)
    }

    /// Scale OHLC by `ratio`.
    pub fn scaled(&self, ratio: f64) -> Bar {
        Bar {
            open: self.open * ratio,
            high: self.high * ratio,
            low: self.low * ratio,
            close: self.close * ratio,
            ..self.clone()
        }
    }
}

/// Move a daily series onto the adjusted-close basis, in date order.
///
/// A bar with its own adjusted close is scaled by `adj_close / close` and
/// takes `adj_close` exactly. A bar without one borrows the ratio of the
/// nearest earlier bar (or the first known ratio, for leading bars) so the
/// series never mixes raw and adjusted prices. With no adjusted close at
/// all, the series is returned on the raw basis.
pub fn adjust_series(mut bars: Vec<Bar>) -> Vec<Bar> {
    bars.sort_by_key(|b| b.date);
    let Some(first_ratio) = bars.iter().find_map(Bar::adjustment_ratio) else {
        return bars;
    };

    let mut ratio = first_ratio;
    bars.iter()
        .map(|bar| match bar.adjustment_ratio() {
            Some(own) => {
                ratio = own;
                Bar {
                    close: bar.adj_close,
                    ..bar.scaled(own)
                }
            }
            None => bar.scaled(ratio),
        })
        .collect()
}

/// Aggregated OHLCV values for one calendar week.
///
/// `week_end` is the anchor weekday closing the week (Friday by default),
/// even when the market was shut on that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyBar {
    pub week_end: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> Bar {
        Bar {
            symbol: "CVNA".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            open: 100.0,
            high: 105.0,
            low: 98.0,
            close: 103.0,
            volume: 50_000,
            adj_close: 51.5,
        }
    }

    fn on(day: u32, close: f64, adj_close: f64) -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            adj_close,
            ..sample_bar()
        }
    }

    #[test]
    fn adjusted_scales_ohlc_and_uses_adj_close() {
        let adj = adjust_series(vec![sample_bar()]).remove(0);
        assert_eq!(adj.close, 51.5);
        assert!((adj.open - 50.0).abs() < 1e-12);
        assert!((adj.high - 52.5).abs() < 1e-12);
        assert!((adj.low - 49.0).abs() < 1e-12);
        assert_eq!(adj.volume, 50_000);
    }

    #[test]
    fn ratio_requires_usable_prices() {
        assert_eq!(on(2, 10.0, 5.0).adjustment_ratio(), Some(0.5));
        assert_eq!(on(2, 10.0, f64::NAN).adjustment_ratio(), None);
        assert_eq!(on(2, 0.0, 5.0).adjustment_ratio(), None);
    }

    #[test]
    fn missing_adj_close_borrows_previous_ratio() {
        // Flat raw closes: on a single basis there is no move at all.
        let bars = vec![on(3, 20.0, 10.0), on(4, 20.0, f64::NAN), on(5, 20.0, 10.0)];
        let closes: Vec<f64> = adjust_series(bars).iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![10.0, 10.0, 10.0]);
    }

    #[test]
    fn leading_bars_take_first_known_ratio() {
        let bars = vec![on(5, 20.0, 10.0), on(2, 30.0, f64::NAN)];
        let adjusted = adjust_series(bars);
        assert_eq!(adjusted[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(adjusted[0].close, 15.0);
        assert_eq!(adjusted[1].close, 10.0);
    }

    #[test]
    fn series_without_adj_close_stays_raw() {
        let bars = vec![on(2, 20.0, f64::NAN), on(3, 21.0, f64::NAN)];
        let closes: Vec<f64> = adjust_series(bars).iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![20.0, 21.0]);
    }

    #[test]
    fn weekly_bar_serialization_roundtrip() {
        let week = WeeklyBar {
            week_end: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close: 1.5,
            volume: 10,
        };
        let json = serde_json::to_string(&week).unwrap();
        let deser: WeeklyBar = serde_json::from_str(&json).unwrap();
        assert_eq!(week, deser);
    }
}
