//! Ingestion and normalization of activity exports.
//!
//! This module turns CSV text into a [`NormalizedTable`]:
//! - polars parses the CSV with every column read as text
//! - cells are typed one by one; bad cells become unknown instead of failing
//! - timestamps are parsed strictly; one bad timestamp rejects the dataset
//! - calendar features, unit conversions and 30-row moving averages are derived

mod datetime;
mod loader;
mod normalize;

pub use datetime::parse_timestamp;
pub use loader::load_raw;
pub use normalize::normalize;

use crate::error::Result;
use crate::types::NormalizedTable;
use tracing::info;

/// Load and normalize CSV content in one step.
pub fn load_table(content: &str) -> Result<NormalizedTable> {
    let raw = load_raw(content)?;
    info!("Loaded {} activity rows", raw.records.len());
    normalize(raw)
}
