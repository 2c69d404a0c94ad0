//! CSV loading into typed raw records.
//!
//! Every column is read as text so that one malformed cell cannot change the
//! dtype of a whole column; cells are typed individually afterwards.

use crate::error::{Result, ResultExt};
use crate::types::{RawDataset, RawRecord, SOURCE_COLUMNS};
use crate::utils::parse_numeric_string;
use polars::io::csv::read::{CsvParseOptions, CsvReadOptions};
use polars::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::io::Cursor;
use tracing::debug;

/// Parse CSV content into raw records.
///
/// Columns outside the export's fixed set are ignored. Absent columns are not an
/// error here; [`normalize`](super::normalize) decides which ones are required.
pub fn load_raw(content: &str) -> Result<RawDataset> {
    let df = read_csv(content)?;
    debug!("CSV parsed: {:?}", df.shape());

    let columns: BTreeSet<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .filter(|name| SOURCE_COLUMNS.contains(&name.as_str()))
        .collect();

    let mut cells = CellGrid::default();
    for name in &columns {
        cells.insert(name, text_column(&df, name)?);
    }

    let records = (0..df.height()).map(|row| cells.record(row)).collect();

    Ok(RawDataset { records, columns })
}

fn read_csv(content: &str) -> Result<DataFrame> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let cursor = Cursor::new(content.as_bytes().to_vec());

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .into_reader_with_file_handle(cursor)
        .finish()
        .context("Failed to parse CSV content")
}

/// Read one column as trimmed text, mapping empty cells to `None`.
fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df
        .column(name)
        .context(format!("Failed to read column '{name}'"))?;
    let series = column.as_materialized_series();
    let series = if series.dtype() == &DataType::String {
        series.clone()
    } else {
        series.cast(&DataType::String)?
    };

    let values = series
        .str()?
        .into_iter()
        .map(|v| v.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string))
        .collect();
    Ok(values)
}

/// Text cells by column name, row-addressable.
#[derive(Default)]
struct CellGrid {
    columns: HashMap<String, Vec<Option<String>>>,
}

impl CellGrid {
    fn insert(&mut self, name: &str, values: Vec<Option<String>>) {
        self.columns.insert(name.to_string(), values);
    }

    fn text(&self, name: &str, row: usize) -> Option<String> {
        self.columns.get(name)?.get(row)?.clone()
    }

    fn number(&self, name: &str, row: usize) -> Option<f64> {
        let columns = self.columns.get(name)?;
        columns.get(row)?.as_deref().and_then(parse_numeric_string)
    }

    fn record(&self, row: usize) -> RawRecord {
        RawRecord {
            date: self.text("Date", row),
            title: self.text("Title", row),
            distance: self.number("Distance", row),
            calories: self.number("Calories", row),
            time: self.text("Time", row),
            avg_hr: self.number("Avg HR", row),
            max_hr: self.number("Max HR", row),
            avg_run_cadence: self.number("Avg Run Cadence", row),
            max_run_cadence: self.number("Max Run Cadence", row),
            avg_pace: self.text("Avg Pace", row),
            best_pace: self.text("Best Pace", row),
            total_ascent: self.number("Total Ascent", row),
            total_descent: self.number("Total Descent", row),
            avg_stride_length: self.number("Avg Stride Length", row),
            best_lap_time: self.text("Best Lap Time", row),
            moving_time: self.text("Moving Time", row),
            elapsed_time: self.text("Elapsed Time", row),
            min_elevation: self.number("Min Elevation", row),
            max_elevation: self.number("Max Elevation", row),
        }
    }
}
