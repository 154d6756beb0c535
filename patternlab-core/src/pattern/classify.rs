//! Window classification: up/down counts, trajectory and entry price.

use super::regression::fit_against_index;
use super::{Pattern, PatternError, Trajectory, COMPARISONS, WINDOW_WEEKS};
use crate::domain::WeeklyBar;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Result of classifying one 11-week window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub pattern: Pattern,
    /// OLS slope of close against week index (price per week).
    pub slope: f64,
    pub intercept: f64,
    /// Close of the most recent week in the window.
    pub entry_price: f64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

/// The trailing [`WINDOW_WEEKS`] bars of a series.
pub fn trailing_window(weeks: &[WeeklyBar]) -> Result<&[WeeklyBar], PatternError> {
    if weeks.len() < WINDOW_WEEKS {
        return Err(PatternError::InsufficientData {
            required: WINDOW_WEEKS,
            available: weeks.len(),
        });
    }
    Ok(&weeks[weeks.len() - WINDOW_WEEKS..])
}

/// True when a week closed strictly above the previous week.
///
/// A zero change counts as a down week.
pub fn is_up_week(prev_close: f64, close: f64) -> bool {
    close - prev_close > 0.0
}

/// Classify the trailing window of `weeks`.
///
/// Only the last [`WINDOW_WEEKS`] bars are read. Dates are not validated.
pub fn classify(weeks: &[WeeklyBar]) -> Result<Classification, PatternError> {
    let window = trailing_window(weeks)?;
    let closes: Vec<f64> = window.iter().map(|w| w.close).collect();

    let up = closes
        .windows(2)
        .filter(|pair| is_up_week(pair[0], pair[1]))
        .count();
    debug_assert!(up <= COMPARISONS);

    let fit = fit_against_index(&closes);
    let pattern = Pattern::new(up as u8, Trajectory::from_slope(fit.slope))?;

    let first = &window[0];
    let last = &window[WINDOW_WEEKS - 1];

    Ok(Classification {
        pattern,
        slope: fit.slope,
        intercept: fit.intercept,
        entry_price: last.close,
        period_start: first.week_end,
        period_end: last.week_end,
    })
}
