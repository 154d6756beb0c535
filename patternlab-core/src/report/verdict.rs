//! Comparison of a computed pattern with the expected reference pattern.

use crate::pattern::{Pattern, Trajectory};

/// Outcome of comparing the calculated pattern with the expected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Match,
    /// Trajectories agree, up/down counts do not.
    CountsDiffer { expected: Pattern, actual: Pattern },
    /// Trajectories disagree (counts may or may not).
    TrajectoryDiffers {
        expected: Trajectory,
        actual: Trajectory,
    },
}

impl Verdict {
    pub fn evaluate(expected: &Pattern, actual: &Pattern) -> Self {
        if expected == actual {
            Verdict::Match
        } else if expected.trajectory() == actual.trajectory() {
            Verdict::CountsDiffer {
                expected: *expected,
                actual: *actual,
            }
        } else {
            Verdict::TrajectoryDiffers {
                expected: expected.trajectory(),
                actual: actual.trajectory(),
            }
        }
    }
}
