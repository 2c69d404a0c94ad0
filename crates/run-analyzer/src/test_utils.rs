//! Table builders for unit tests.

use crate::ingest::normalize;
use crate::types::{NormalizedTable, RawDataset, RawRecord, SOURCE_COLUMNS};

/// A run with the fields most metrics look at; everything else unknown.
pub(crate) fn run(date: &str, distance: f64, pace: &str) -> RawRecord {
    RawRecord {
        date: Some(date.to_string()),
        title: Some("Run".to_string()),
        distance: Some(distance),
        time: Some("00:30:00".to_string()),
        avg_pace: Some(pace.to_string()),
        ..Default::default()
    }
}

/// Normalize rows as if every export column had been present.
pub(crate) fn table(rows: Vec<RawRecord>) -> NormalizedTable {
    table_with_columns(rows, &SOURCE_COLUMNS)
}

/// Normalize rows with only the given export columns present.
pub(crate) fn table_with_columns(rows: Vec<RawRecord>, columns: &[&str]) -> NormalizedTable {
    let raw = RawDataset {
        records: rows,
        columns: columns.iter().map(|s| s.to_string()).collect(),
    };
    normalize(raw).expect("test rows should normalize")
}
