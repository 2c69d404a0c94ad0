use crate::error::{AnalysisError, Result};
use crate::types::{Field, MovingAverageSeries, NormalizedTable, TimeSeriesData};

/// Timestamp rendering used for series dates.
pub const SERIES_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Trailing mean over `window` rows in input order, current row included.
///
/// A position is unknown when fewer than `window` rows precede it (itself
/// included) or when any value inside its window is unknown.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    values
        .iter()
        .enumerate()
        .map(|(idx, _)| {
            if idx + 1 < window {
                return None;
            }
            let mut sum = 0.0;
            for value in &values[idx + 1 - window..=idx] {
                sum += (*value)?;
            }
            Some(sum / window as f64)
        })
        .collect()
}

/// Heart-rate and pace series with their 30-row moving averages.
///
/// # Errors
///
/// `MissingField` naming every field the table cannot provide.
pub fn series_with_moving_average(table: &NormalizedTable) -> Result<TimeSeriesData> {
    let mut missing = Vec::new();
    if !table.has_column("Date") {
        missing.push("Date".to_string());
    }
    for field in [Field::AvgHr, Field::HrMa30, Field::AvgPaceSecs, Field::PaceMa30] {
        if !table.has_field(field) {
            missing.push(field.label().to_string());
        }
    }
    if !missing.is_empty() {
        return Err(AnalysisError::MissingField(missing));
    }

    let dates: Vec<String> = table
        .records()
        .iter()
        .map(|r| r.timestamp.format(SERIES_DATE_FORMAT).to_string())
        .collect();

    Ok(TimeSeriesData {
        avg_hr: MovingAverageSeries {
            dates: dates.clone(),
            values: table.values(Field::AvgHr).collect(),
            moving_average: table.values(Field::HrMa30).collect(),
        },
        avg_pace: MovingAverageSeries {
            dates,
            values: table.values(Field::AvgPaceSecs).collect(),
            moving_average: table.values(Field::PaceMa30).collect(),
        },
    })
}
