//! Text reports for a pattern check.
//!
//! Everything here is pure formatting over an [`Analysis`](crate::pipeline::Analysis):
//! the CLI prints the strings and nothing reads them back.

pub mod render;
pub mod table;
pub mod verdict;

pub use render::{
    render_banner, render_consistency, render_overview, render_report, render_summary,
    render_validation, render_verification,
};
pub use table::{week_rows, Direction, ManualCount, WeekRow};
pub use verdict::Verdict;
