//! Pattern — the up/down/trajectory triple for one window.

use super::{PatternError, COMPARISONS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Overall linear trend direction across the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trajectory {
    Up,
    Down,
}

impl Trajectory {
    /// Up for a strictly positive slope; zero and NaN are Down.
    pub fn from_slope(slope: f64) -> Self {
        if slope > 0.0 {
            Trajectory::Up
        } else {
            Trajectory::Down
        }
    }

    pub fn code(self) -> char {
        match self {
            Trajectory::Up => 'U',
            Trajectory::Down => 'D',
        }
    }

    /// Lowercase direction word used in report prose.
    pub fn word(self) -> &'static str {
        match self {
            Trajectory::Up => "upward",
            Trajectory::Down => "downward",
        }
    }
}

impl fmt::Display for Trajectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Up-week count, down-week count and trajectory of a window.
///
/// `up_count + down_count` is always [`COMPARISONS`]; the only constructors
/// are [`Pattern::new`] and string parsing, which both enforce it.
/// Serialized as `"U-D-T"`, e.g. `"6-4-D"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pattern {
    up_count: u8,
    down_count: u8,
    trajectory: Trajectory,
}

impl Pattern {
    /// Reference pattern checked when none is configured.
    pub const DEFAULT_REFERENCE: Pattern = Pattern {
        up_count: 6,
        down_count: 4,
        trajectory: Trajectory::Down,
    };

    /// Build a pattern from its up-week count; the down count is the remainder.
    pub fn new(up_count: u8, trajectory: Trajectory) -> Result<Self, PatternError> {
        if usize::from(up_count) > COMPARISONS {
            return Err(PatternError::InvalidCounts {
                up: up_count,
                down: 0,
            });
        }
        Ok(Self {
            up_count,
            down_count: COMPARISONS as u8 - up_count,
            trajectory,
        })
    }

    pub fn up_count(&self) -> u8 {
        self.up_count
    }

    pub fn down_count(&self) -> u8 {
        self.down_count
    }

    pub fn trajectory(&self) -> Trajectory {
        self.trajectory
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.up_count, self.down_count, self.trajectory)
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = || PatternError::Parse(s.to_string());

        let mut parts = s.trim().split('-');
        let (Some(up), Some(down), Some(traj), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(parse_err());
        };

        let up: u8 = up.parse().map_err(|_| parse_err())?;
        let down: u8 = down.parse().map_err(|_| parse_err())?;
        let trajectory = match traj {
            "U" | "u" => Trajectory::Up,
            "D" | "d" => Trajectory::Down,
            _ => return Err(parse_err()),
        };

        if usize::from(up) + usize::from(down) != COMPARISONS {
            return Err(PatternError::InvalidCounts { up, down });
        }
        Pattern::new(up, trajectory)
    }
}

impl TryFrom<String> for Pattern {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Pattern> for String {
    fn from(p: Pattern) -> Self {
        p.to_string()
    }
}
