//! PatternLab Core — weekly bars, pattern classification, verification reports.
//!
//! This crate contains the whole weekly-pattern pipeline:
//! - Domain types (daily bars, weekly bars)
//! - Data providers (Yahoo Finance chart API, CSV import) and weekly resampling
//! - Up/down + trajectory classification over the trailing 11-week window
//! - Text reports that re-derive the counts independently and compare
//!   against an expected reference pattern

pub mod config;
pub mod data;
pub mod domain;
pub mod pattern;
pub mod pipeline;
pub mod report;

pub use config::{ConfigError, PatternConfig};
pub use pipeline::{analyze, Analysis, PipelineError};
