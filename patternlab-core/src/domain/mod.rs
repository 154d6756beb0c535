//! Domain types for PatternLab

pub mod bar;

pub use bar::{adjust_series, Bar, WeeklyBar};

/// Symbol type alias
pub type Symbol = String;
