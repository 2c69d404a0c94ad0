//! Chart-ready transforms: histograms and moving-average time series.

mod histogram;
mod moving_average;

pub use histogram::{histogram, histogram_values};
pub use moving_average::{SERIES_DATE_FORMAT, rolling_mean, series_with_moving_average};

/// Number of rows in the trailing moving-average window.
pub const MOVING_AVERAGE_WINDOW: usize = 30;
