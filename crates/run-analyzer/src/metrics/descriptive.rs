use super::stats::{StatsAccumulator, percentile, sorted};
use crate::error::{AnalysisError, Result};
use crate::types::{DescriptiveMatrix, DescriptiveRow, Field, NormalizedTable};
use crate::utils::format_duration;

/// Label of the synthetic row carrying the formatted mean pace.
pub const MEAN_PACE_LABEL: &str = "Average Pace (HH:MM:SS.ss)";

/// Count, mean, sample std, min, quartiles and max for each requested field,
/// followed by the formatted mean pace.
///
/// # Errors
///
/// `MissingField` listing every requested label the table cannot provide.
pub fn descriptive_matrix(table: &NormalizedTable, columns: &[String]) -> Result<DescriptiveMatrix> {
    let mut fields = Vec::with_capacity(columns.len());
    let mut missing = Vec::new();
    for label in columns {
        match table.resolve(label) {
            Some(field) => fields.push((label, field)),
            None => missing.push(label.clone()),
        }
    }
    if !missing.is_empty() {
        return Err(AnalysisError::MissingField(missing));
    }

    let rows = fields
        .into_iter()
        .map(|(label, field)| describe(label, &table.known_values(field)))
        .collect();

    let mean_pace = if table.has_field(Field::AvgPaceSecs) {
        let pace: StatsAccumulator = table.known_values(Field::AvgPaceSecs).into_iter().collect();
        match pace.mean() {
            Some(mean) => Some(format_duration(mean)?),
            None => Some(String::new()),
        }
    } else {
        None
    };

    Ok(DescriptiveMatrix { rows, mean_pace })
}

/// Summarise the known values of one field.
pub fn describe(label: &str, values: &[f64]) -> DescriptiveRow {
    let acc: StatsAccumulator = values.iter().copied().collect();
    let sorted = sorted(values);

    DescriptiveRow {
        label: label.to_string(),
        count: acc.count(),
        mean: acc.mean(),
        std: acc.std(),
        min: acc.min(),
        p25: percentile(&sorted, 25.0),
        p50: percentile(&sorted, 50.0),
        p75: percentile(&sorted, 75.0),
        max: acc.max(),
    }
}
