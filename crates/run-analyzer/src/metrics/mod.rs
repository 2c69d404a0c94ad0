//! Aggregate views over the normalized table.
//!
//! Every view is a pure function of the table (and, where relevant, the
//! configured field labels or targets).

mod best;
mod descriptive;
mod stats;
mod totals;
mod weekday;
mod yearly;

pub use best::{TOP_RUNS, best_performances};
pub use descriptive::{MEAN_PACE_LABEL, describe, descriptive_matrix};
pub use stats::{StatsAccumulator, percentile, sorted};
pub use totals::totals;
pub use weekday::{WEEKDAY_NAMES, avg_pace_by_weekday};
pub use yearly::yearly_stats;
