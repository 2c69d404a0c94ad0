//! The analysis report and its serialization.
//!
//! Views are kept strongly typed in [`AnalysisReport`]; [`AnalysisReport::into_value`]
//! lowers them to a [`Value`] tree (unknown numbers become NaN) and sanitizes it,
//! so the emitted JSON never contains NaN or infinities.

mod sanitize;
mod sections;
mod value;

pub use sanitize::{contains_non_finite, sanitize};
pub use sections::{ISO_DATE_FORMAT, best_value, per_field_value, weekday_value};
pub use value::Value;

use crate::error::Result;
use crate::types::{
    BestPerformances, DescriptiveMatrix, Histogram, PerField, TimeSeriesData, Totals,
    WeekdayPace, YearlyTable,
};
use serde::Serialize;

/// Every view computed for one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub desc_matrix: DescriptiveMatrix,
    pub avg_pace_day_week: Vec<WeekdayPace>,
    pub totals: Totals,
    pub yearly_statistics: PerField<YearlyTable>,
    pub histogram_data: PerField<Histogram>,
    pub time_series_data: TimeSeriesData,
    pub best_perf: Vec<BestPerformances>,
}

impl AnalysisReport {
    /// The report tree before sanitization; unknown numbers are NaN.
    pub fn to_value(&self) -> Value {
        Value::map([
            ("desc_matrix", Value::from(&self.desc_matrix)),
            ("avg_pace_day_week", weekday_value(&self.avg_pace_day_week)),
            ("totals", Value::from(&self.totals)),
            (
                "yearly_statistics",
                per_field_value(&self.yearly_statistics, |table| Value::from(table)),
            ),
            (
                "histogram_data",
                per_field_value(&self.histogram_data, |hist| Value::from(hist)),
            ),
            ("time_series_data", Value::from(&self.time_series_data)),
            ("best_perf", best_value(&self.best_perf)),
        ])
    }

    /// The sanitized report tree.
    pub fn into_value(self) -> Value {
        sanitize(self.to_value())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&sanitize(self.to_value()))?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&sanitize(self.to_value()))?)
    }
}

impl Serialize for AnalysisReport {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        sanitize(self.to_value()).serialize(serializer)
    }
}
