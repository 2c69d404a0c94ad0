//! Derivation of calendar, unit and pace features.

use super::datetime::parse_timestamp;
use crate::error::{AnalysisError, Result};
use crate::series::{MOVING_AVERAGE_WINDOW, rolling_mean};
use crate::types::{
    KM_PER_MILE, NormalizedRecord, NormalizedTable, REQUIRED_COLUMNS, RawDataset, RawRecord,
};
use crate::utils::parse_duration;
use chrono::{Datelike, Timelike};
use tracing::debug;

/// Turn raw records into the normalized table.
///
/// # Errors
///
/// `DataFormat` when a required column is absent or any row's timestamp cannot
/// be parsed. No partial table is ever returned.
pub fn normalize(raw: RawDataset) -> Result<NormalizedTable> {
    let RawDataset { records, columns } = raw;

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !columns.contains(*c))
        .collect();
    if !missing.is_empty() {
        return Err(AnalysisError::DataFormat(format!(
            "Missing required columns: {}",
            missing.join(", ")
        )));
    }

    let mut normalized = records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| normalize_record(idx, record))
        .collect::<Result<Vec<_>>>()?;

    let paces: Vec<Option<f64>> = normalized.iter().map(|r| r.avg_pace_secs).collect();
    let heart_rates: Vec<Option<f64>> = normalized.iter().map(|r| r.raw.avg_hr).collect();
    let pace_ma = rolling_mean(&paces, MOVING_AVERAGE_WINDOW);
    let hr_ma = rolling_mean(&heart_rates, MOVING_AVERAGE_WINDOW);

    for ((record, pace), hr) in normalized.iter_mut().zip(pace_ma).zip(hr_ma) {
        record.pace_ma_30 = pace;
        record.hr_ma_30 = hr;
    }

    debug!(
        "Normalized {} rows ({} export columns present)",
        normalized.len(),
        columns.len()
    );

    Ok(NormalizedTable::new(normalized, columns))
}

fn normalize_record(idx: usize, raw: RawRecord) -> Result<NormalizedRecord> {
    let timestamp = raw
        .date
        .as_deref()
        .and_then(parse_timestamp)
        .ok_or_else(|| {
            AnalysisError::DataFormat(format!(
                "Invalid or missing value in the 'Date' column at row {}: {:?}",
                idx + 1,
                raw.date.as_deref().unwrap_or("")
            ))
        })?;

    let distance_miles = raw.distance.map(|km| km / KM_PER_MILE);
    let time_secs = raw.time.as_deref().and_then(parse_duration);
    let avg_pace_secs = raw.avg_pace.as_deref().and_then(parse_duration);
    let best_pace_secs = raw.best_pace.as_deref().and_then(parse_duration);

    Ok(NormalizedRecord {
        timestamp,
        short_date: timestamp.date(),
        distance_miles,
        time_secs,
        avg_pace_secs,
        best_pace_secs,
        hour_of_day: timestamp.hour(),
        day_of_week: timestamp.weekday().num_days_from_monday(),
        month: timestamp.month(),
        month_year: timestamp.format("%Y-%m").to_string(),
        year: timestamp.year(),
        pace_ma_30: None,
        hr_ma_30: None,
        raw,
    })
}
