//! Week-by-week breakdown and the independent manual recount.
//!
//! The recount walks the window one week at a time rather than reusing the
//! classifier, so a disagreement between the two flags a counting bug.

use crate::domain::WeeklyBar;
use crate::pattern::Pattern;
use chrono::NaiveDate;

/// Direction of one row in the verification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// First week of the window; nothing to compare against.
    Baseline,
    Up,
    Down,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::Baseline => "BASELINE",
            Direction::Up => "UP ▲",
            Direction::Down => "DOWN ▼",
        }
    }
}

/// One week of the verification table.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekRow {
    /// 1-based position in the window.
    pub week: usize,
    pub date: NaiveDate,
    pub close: f64,
    pub change: Option<f64>,
    pub change_pct: Option<f64>,
    pub direction: Direction,
}

/// Build verification rows for a window, baseline first.
pub fn week_rows(window: &[WeeklyBar]) -> Vec<WeekRow> {
    let mut rows = Vec::with_capacity(window.len());
    let mut prev_close: Option<f64> = None;

    for (i, week) in window.iter().enumerate() {
        let row = match prev_close {
            None => WeekRow {
                week: i + 1,
                date: week.week_end,
                close: week.close,
                change: None,
                change_pct: None,
                direction: Direction::Baseline,
            },
            Some(prev) => {
                let change = week.close - prev;
                WeekRow {
                    week: i + 1,
                    date: week.week_end,
                    close: week.close,
                    change: Some(change),
                    change_pct: Some(change / prev * 100.0),
                    direction: if change > 0.0 {
                        Direction::Up
                    } else {
                        Direction::Down
                    },
                }
            }
        };
        prev_close = Some(week.close);
        rows.push(row);
    }

    rows
}

/// Up/down totals from walking the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ManualCount {
    pub up: usize,
    pub down: usize,
}

impl ManualCount {
    pub fn from_rows(rows: &[WeekRow]) -> Self {
        let mut count = ManualCount::default();
        for row in rows {
            match row.direction {
                Direction::Up => count.up += 1,
                Direction::Down => count.down += 1,
                Direction::Baseline => {}
            }
        }
        count
    }

    pub fn total(&self) -> usize {
        self.up + self.down
    }

    /// True when this recount reproduces the pattern's up and down counts.
    pub fn agrees_with(&self, pattern: &Pattern) -> bool {
        self.up == usize::from(pattern.up_count()) && self.down == usize::from(pattern.down_count())
    }
}
