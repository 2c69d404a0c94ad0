use super::stats::StatsAccumulator;
use crate::error::{AnalysisError, Result};
use crate::types::{Field, NormalizedTable, Totals};
use crate::utils::round_to;

/// Total calories (truncated to an integer) and total distance (one decimal).
///
/// # Errors
///
/// `MissingField` when the export has no Calories or no Distance column.
pub fn totals(table: &NormalizedTable) -> Result<Totals> {
    let missing: Vec<String> = [Field::Calories, Field::Distance]
        .into_iter()
        .filter(|f| !table.has_field(*f))
        .map(|f| f.label().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(AnalysisError::MissingField(missing));
    }

    let calories: StatsAccumulator = table.known_values(Field::Calories).into_iter().collect();
    let distance: StatsAccumulator = table.known_values(Field::Distance).into_iter().collect();

    Ok(Totals {
        total_calories: calories.sum().trunc() as i64,
        total_distance: round_to(distance.sum(), 1),
    })
}
