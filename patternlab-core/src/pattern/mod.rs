//! Pattern classification over the trailing weekly window.
//!
//! A window is the last [`WINDOW_WEEKS`] weekly bars. The first bar is the
//! baseline; each of the remaining [`COMPARISONS`] bars is an up week when it
//! closed strictly above the prior week, otherwise a down week. The trajectory
//! is the sign of an OLS line fitted through the window's closes.

pub mod classify;
pub mod regression;
pub mod types;

pub use classify::{classify, is_up_week, trailing_window, Classification};
pub use regression::{fit_against_index, LinearFit};
pub use types::{Pattern, Trajectory};

use thiserror::Error;

/// Weekly bars in a classification window.
pub const WINDOW_WEEKS: usize = 11;

/// Week-over-week comparisons in a window.
pub const COMPARISONS: usize = WINDOW_WEEKS - 1;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("insufficient data: need {required} weekly bars, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("invalid pattern counts: {up} up + {down} down must sum to 10")]
    InvalidCounts { up: u8, down: u8 },

    #[error("malformed pattern '{0}' (expected e.g. \"6-4-D\")")]
    Parse(String),
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::WeeklyBar;
    use chrono::{Duration, NaiveDate};

    /// Consecutive Friday-ending weekly bars with the given closes.
    pub fn weeks_from_closes(closes: &[f64]) -> Vec<WeeklyBar> {
        let first_friday = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| WeeklyBar {
                week_end: first_friday + Duration::weeks(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1_000,
            })
            .collect()
    }
}
