//! Conversion of computed views into their report shapes.

use super::value::Value;
use crate::metrics::MEAN_PACE_LABEL;
use crate::types::{
    BestPerformances, DescriptiveMatrix, FieldOutcome, Histogram, MovingAverageSeries,
    PerformanceRecord, PerField, TimeSeriesData, Totals, WeekdayPace, YearlyTable,
};
use crate::utils::float_key;

/// Timestamp rendering of best-performance dates.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Column-oriented matrix: one array per statistic, rows aligned with `index`.
impl From<&DescriptiveMatrix> for Value {
    fn from(matrix: &DescriptiveMatrix) -> Self {
        let rows = &matrix.rows;
        let column = |stat: fn(&crate::types::DescriptiveRow) -> Option<f64>| -> Vec<Value> {
            rows.iter().map(|r| Value::from(stat(r))).collect()
        };

        let mut index: Vec<Value> = rows.iter().map(|r| Value::from(r.label.as_str())).collect();
        let mut count: Vec<Value> = rows.iter().map(|r| Value::from(r.count)).collect();
        let mut mean = column(|r| r.mean);
        let mut others = [
            ("std", column(|r| r.std)),
            ("min", column(|r| r.min)),
            ("25%", column(|r| r.p25)),
            ("50%", column(|r| r.p50)),
            ("75%", column(|r| r.p75)),
            ("max", column(|r| r.max)),
        ];

        if let Some(pace) = &matrix.mean_pace {
            index.push(Value::from(MEAN_PACE_LABEL));
            count.push(Value::from(""));
            mean.push(Value::from(pace.as_str()));
            for (_, values) in others.iter_mut() {
                values.push(Value::from(""));
            }
        }

        let mut entries = vec![
            ("index".to_string(), Value::Seq(index)),
            ("count".to_string(), Value::Seq(count)),
            ("mean".to_string(), Value::Seq(mean)),
        ];
        entries.extend(
            others
                .into_iter()
                .map(|(name, values)| (name.to_string(), Value::Seq(values))),
        );
        Value::Map(entries)
    }
}

/// Weekday name to formatted mean pace.
pub fn weekday_value(paces: &[WeekdayPace]) -> Value {
    Value::map(paces.iter().map(|w| (w.day.clone(), w.mean_pace.clone())))
}

impl From<&Totals> for Value {
    fn from(totals: &Totals) -> Self {
        Value::map([
            ("total_calories", Value::Int(totals.total_calories)),
            ("total_distance", Value::Float(totals.total_distance)),
        ])
    }
}

impl From<&YearlyTable> for Value {
    fn from(table: &YearlyTable) -> Self {
        Value::map([
            ("Year", Value::from(table.years.clone())),
            ("mean", Value::from(table.mean.clone())),
            ("std", Value::from(table.std.clone())),
            ("min", Value::from(table.min.clone())),
            ("max", Value::from(table.max.clone())),
        ])
    }
}

impl From<&Histogram> for Value {
    fn from(hist: &Histogram) -> Self {
        Value::map([
            ("bins", Value::from(hist.bins.clone())),
            ("counts", Value::from(hist.counts.clone())),
        ])
    }
}

fn outcome_value<T>(outcome: &FieldOutcome<T>, to_value: fn(&T) -> Value) -> Value {
    match outcome {
        FieldOutcome::Computed(v) => to_value(v),
        FieldOutcome::NotFound { error } => Value::map([("error", error.as_str())]),
    }
}

/// Label to computed table or inline error marker, in request order.
pub fn per_field_value<T>(outcomes: &PerField<T>, to_value: fn(&T) -> Value) -> Value {
    Value::map(
        outcomes
            .iter()
            .map(|(label, outcome)| (label.clone(), outcome_value(outcome, to_value))),
    )
}

impl From<&MovingAverageSeries> for Value {
    fn from(series: &MovingAverageSeries) -> Self {
        Value::map([
            ("dates", Value::from(series.dates.clone())),
            ("values", Value::from(series.values.clone())),
            ("moving_average", Value::from(series.moving_average.clone())),
        ])
    }
}

impl From<&TimeSeriesData> for Value {
    fn from(data: &TimeSeriesData) -> Self {
        Value::map([
            ("Avg HR", Value::from(&data.avg_hr)),
            ("Avg Pace", Value::from(&data.avg_pace)),
        ])
    }
}

impl From<&PerformanceRecord> for Value {
    fn from(record: &PerformanceRecord) -> Self {
        Value::map([
            (
                "Date",
                Value::from(record.date.format(ISO_DATE_FORMAT).to_string()),
            ),
            ("Distance", Value::Float(record.distance)),
            ("Time", Value::from(record.time.clone())),
            ("Avg Pace", Value::from(record.avg_pace.clone())),
        ])
    }
}

/// Target distance (shortest decimal rendering) to its fastest runs.
pub fn best_value(best: &[BestPerformances]) -> Value {
    Value::map(best.iter().map(|b| {
        let runs: Vec<Value> = b.runs.iter().map(Value::from).collect();
        (float_key(b.distance), Value::Seq(runs))
    }))
}
