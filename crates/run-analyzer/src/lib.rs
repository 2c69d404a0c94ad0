//! Running Activity Analysis Library
//!
//! Summary statistics, trends and best efforts computed from a running-activity
//! CSV export (Garmin Connect layout), built with Rust and Polars.
//!
//! # Overview
//!
//! One uploaded export is parsed into a normalized table once; every view is then a
//! pure function of that table:
//!
//! - **Descriptive matrix**: count, mean, std, quartiles per field plus the mean pace
//! - **Weekday paces**: mean pace per day of the week
//! - **Totals**: total calories and total distance
//! - **Yearly statistics**: mean/std/min/max per year for each field
//! - **Histograms**: equal-width bins for distribution charts
//! - **Moving averages**: 30-run trailing averages of heart rate and pace
//! - **Best performances**: the three fastest runs at each race distance
//!
//! The assembled report is sanitized before serialization so the JSON output never
//! contains NaN or infinities.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use run_analyzer::{AnalysisConfig, Analyzer};
//!
//! let config = AnalysisConfig::builder()
//!     .target_distances(vec![5.0, 10.0, 21.1])
//!     .build()?;
//!
//! let report = Analyzer::new(config)?.analyze_file("Activities.csv")?;
//! println!("{}", report.to_json_pretty()?);
//! ```
//!
//! # Errors
//!
//! Structural problems (a bad timestamp, a column a view strictly needs) fail the
//! whole analysis with an [`AnalysisError`] carrying a stable
//! [`error_code`](AnalysisError::error_code). Optional per-field views (yearly
//! statistics, histograms) instead report `{"error": "<label> not found in dataset"}`
//! for the offending label only.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod ingest;
pub mod metrics;
pub mod report;
pub mod series;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-exports for convenient access
pub use analyzer::{Analyzer, analyze};
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError};
pub use error::{AnalysisError, Result as AnalysisResult, ResultExt};
pub use ingest::{load_raw, load_table, normalize, parse_timestamp};
pub use metrics::{
    avg_pace_by_weekday, best_performances, descriptive_matrix, totals, yearly_stats,
};
pub use report::{AnalysisReport, Value, contains_non_finite, sanitize};
pub use series::{histogram, rolling_mean, series_with_moving_average};
pub use types::{
    BestPerformances, DescriptiveMatrix, DescriptiveRow, Field, FieldOutcome, Histogram,
    MovingAverageSeries, NormalizedRecord, NormalizedTable, PerformanceRecord, RawDataset,
    RawRecord, TimeSeriesData, Totals, WeekdayPace, YearlyTable,
};
pub use utils::{format_duration, parse_duration};
