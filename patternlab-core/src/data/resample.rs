//! Weekly resampling of daily bars.
//!
//! Each daily bar belongs to the week closing on the next anchor weekday
//! (inclusive). Open = first, high = max, low = min, close = last,
//! volume = sum, each skipping NaN values. Weeks left without a complete
//! OHLC produce no output.

use crate::domain::{Bar, WeeklyBar};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::BTreeMap;

/// Groups daily bars into calendar weeks ending on a fixed weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyResampler {
    anchor: Weekday,
}

impl Default for WeeklyResampler {
    fn default() -> Self {
        Self::friday()
    }
}

impl WeeklyResampler {
    pub fn new(anchor: Weekday) -> Self {
        Self { anchor }
    }

    /// Friday-ending weeks.
    pub fn friday() -> Self {
        Self::new(Weekday::Fri)
    }

    pub fn anchor(&self) -> Weekday {
        self.anchor
    }

    /// The week-end label for a date: the anchor weekday on or after it.
    pub fn week_end(&self, date: NaiveDate) -> NaiveDate {
        let from = date.weekday().num_days_from_monday() as i64;
        let to = self.anchor.num_days_from_monday() as i64;
        date + Duration::days((to - from).rem_euclid(7))
    }

    /// Aggregate daily bars into weekly bars, earliest week first.
    ///
    /// Input order does not matter; bars are taken in date order within each
    /// week. NaN prices are skipped column by column, so a session with only
    /// a close still sets the week's close. Volume is summed over every
    /// session. A week missing any of open/high/low/close is dropped.
    pub fn resample(&self, bars: &[Bar]) -> Vec<WeeklyBar> {
        let mut ordered: Vec<&Bar> = bars.iter().collect();
        ordered.sort_by_key(|b| b.date);

        let mut weeks: BTreeMap<NaiveDate, WeekAccumulator> = BTreeMap::new();
        for bar in ordered {
            weeks
                .entry(self.week_end(bar.date))
                .or_default()
                .push(bar);
        }

        weeks
            .into_iter()
            .filter_map(|(week_end, acc)| acc.finish(week_end))
            .collect()
    }
}

/// Running per-column aggregate for one week.
#[derive(Debug, Default)]
struct WeekAccumulator {
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: Option<f64>,
    volume: u64,
}

impl WeekAccumulator {
    fn push(&mut self, bar: &Bar) {
        if self.open.is_none() {
            self.open = present(bar.open);
        }
        self.high = merge(self.high, bar.high, f64::max);
        self.low = merge(self.low, bar.low, f64::min);
        if let Some(close) = present(bar.close) {
            self.close = Some(close);
        }
        self.volume += bar.volume;
    }

    fn finish(self, week_end: NaiveDate) -> Option<WeeklyBar> {
        Some(WeeklyBar {
            week_end,
            open: self.open?,
            high: self.high?,
            low: self.low?,
            close: self.close?,
            volume: self.volume,
        })
    }
}

fn present(value: f64) -> Option<f64> {
    (!value.is_nan()).then_some(value)
}

fn merge(acc: Option<f64>, value: f64, pick: fn(f64, f64) -> f64) -> Option<f64> {
    match (acc, present(value)) {
        (Some(a), Some(v)) => Some(pick(a, v)),
        (a, v) => a.or(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn bar(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Bar {
        Bar {
            symbol: "TEST".into(),
            date,
            open,
            high,
            low,
            close,
            volume,
            adj_close: close,
        }
    }

    #[test]
    fn week_end_is_next_friday_inclusive() {
        let r = WeeklyResampler::friday();
        // 2024-01-01 is a Monday
        assert_eq!(r.week_end(d(2024, 1, 1)), d(2024, 1, 5));
        assert_eq!(r.week_end(d(2024, 1, 5)), d(2024, 1, 5));
        assert_eq!(r.week_end(d(2024, 1, 6)), d(2024, 1, 12));
        assert_eq!(r.week_end(d(2024, 1, 7)), d(2024, 1, 12));
    }

    #[test]
    fn week_end_other_anchor() {
        let r = WeeklyResampler::new(Weekday::Wed);
        assert_eq!(r.week_end(d(2024, 1, 4)), d(2024, 1, 10));
        assert_eq!(r.week_end(d(2024, 1, 3)), d(2024, 1, 3));
    }

    #[test]
    fn aggregates_ohlcv() {
        let bars = vec![
            bar(d(2024, 1, 2), 10.0, 12.0, 9.0, 11.0, 100),
            bar(d(2024, 1, 3), 11.0, 15.0, 10.0, 14.0, 200),
            bar(d(2024, 1, 5), 14.0, 14.5, 8.0, 13.0, 300),
            bar(d(2024, 1, 8), 13.0, 13.5, 12.0, 12.5, 400),
        ];
        let weeks = WeeklyResampler::friday().resample(&bars);
        assert_eq!(weeks.len(), 2);

        let w = &weeks[0];
        assert_eq!(w.week_end, d(2024, 1, 5));
        assert_eq!(w.open, 10.0);
        assert_eq!(w.high, 15.0);
        assert_eq!(w.low, 8.0);
        assert_eq!(w.close, 13.0);
        assert_eq!(w.volume, 600);

        assert_eq!(weeks[1].week_end, d(2024, 1, 12));
        assert_eq!(weeks[1].close, 12.5);
    }

    #[test]
    fn unsorted_input_uses_date_order() {
        let bars = vec![
            bar(d(2024, 1, 4), 3.0, 3.0, 3.0, 3.0, 1),
            bar(d(2024, 1, 2), 1.0, 1.0, 1.0, 1.0, 1),
            bar(d(2024, 1, 3), 2.0, 2.0, 2.0, 2.0, 1),
        ];
        let weeks = WeeklyResampler::friday().resample(&bars);
        assert_eq!(weeks[0].open, 1.0);
        assert_eq!(weeks[0].close, 3.0);
    }

    #[test]
    fn holiday_friday_keeps_friday_label() {
        // 2024-03-29 was Good Friday; the week's last session is Thursday.
        let bars = vec![
            bar(d(2024, 3, 27), 1.0, 1.0, 1.0, 1.0, 1),
            bar(d(2024, 3, 28), 2.0, 2.0, 2.0, 2.0, 1),
        ];
        let weeks = WeeklyResampler::friday().resample(&bars);
        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].week_end, d(2024, 3, 29));
        assert_eq!(weeks[0].close, 2.0);
    }

    #[test]
    fn weeks_without_a_close_are_dropped() {
        let mut void = bar(d(2024, 1, 10), 0.0, 0.0, 0.0, 0.0, 5);
        void.close = f64::NAN;
        let bars = vec![
            bar(d(2024, 1, 2), 1.0, 1.0, 1.0, 1.0, 1),
            void,
            bar(d(2024, 1, 23), 2.0, 2.0, 2.0, 2.0, 1),
        ];
        let weeks = WeeklyResampler::friday().resample(&bars);
        let labels: Vec<NaiveDate> = weeks.iter().map(|w| w.week_end).collect();
        assert_eq!(labels, vec![d(2024, 1, 5), d(2024, 1, 26)]);
    }

    #[test]
    fn partial_session_still_sets_close_and_volume() {
        let thursday = bar(d(2024, 1, 4), 40.0, 40.0, 40.0, 40.0, 10);
        let mut friday = bar(d(2024, 1, 5), 50.0, 51.0, 49.0, 50.0, 10);
        friday.open = f64::NAN;
        let weeks = WeeklyResampler::friday().resample(&[thursday, friday]);

        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].open, 40.0);
        assert_eq!(weeks[0].high, 51.0);
        assert_eq!(weeks[0].low, 40.0);
        assert_eq!(weeks[0].close, 50.0);
        assert_eq!(weeks[0].volume, 20);
    }

    #[test]
    fn first_open_skips_nan_and_nan_close_keeps_earlier_close() {
        let mut monday = bar(d(2024, 1, 8), 0.0, 12.0, 9.0, 11.0, 5);
        monday.open = f64::NAN;
        let tuesday = bar(d(2024, 1, 9), 11.5, 13.0, 11.0, 12.5, 5);
        let mut wednesday = bar(d(2024, 1, 10), 12.0, 12.0, 12.0, 0.0, 5);
        wednesday.close = f64::NAN;
        let weeks = WeeklyResampler::friday().resample(&[monday, tuesday, wednesday]);

        assert_eq!(weeks[0].open, 11.5);
        assert_eq!(weeks[0].high, 13.0);
        assert_eq!(weeks[0].low, 9.0);
        assert_eq!(weeks[0].close, 12.5);
        assert_eq!(weeks[0].volume, 15);
    }

    #[test]
    fn week_without_any_open_is_dropped() {
        let mut only = bar(d(2024, 1, 3), 0.0, 2.0, 1.0, 1.5, 7);
        only.open = f64::NAN;
        assert!(WeeklyResampler::friday().resample(&[only]).is_empty());
    }
}
