use super::stats::StatsAccumulator;
use crate::types::{FieldOutcome, NormalizedTable, PerField, YearlyTable};
use std::collections::BTreeMap;
use tracing::warn;

/// Per-year mean, std, min and max for each requested field.
///
/// Labels the table cannot provide yield a `NotFound` entry instead of failing
/// the whole view. Every year present in the data gets a row, even when the
/// field has no known value in that year.
pub fn yearly_stats(table: &NormalizedTable, columns: &[String]) -> PerField<YearlyTable> {
    columns
        .iter()
        .map(|label| {
            let outcome = match table.resolve(label) {
                Some(field) => {
                    let mut groups: BTreeMap<i32, StatsAccumulator> = BTreeMap::new();
                    for record in table.records() {
                        groups
                            .entry(record.year)
                            .or_default()
                            .push_opt(record.value(field));
                    }
                    FieldOutcome::Computed(yearly_table(groups))
                }
                None => {
                    warn!("Yearly statistics skipped: {label} not found in dataset");
                    FieldOutcome::not_found(label)
                }
            };
            (label.clone(), outcome)
        })
        .collect()
}

fn yearly_table(groups: BTreeMap<i32, StatsAccumulator>) -> YearlyTable {
    let mut table = YearlyTable::default();
    for (year, acc) in groups {
        table.years.push(year);
        table.mean.push(acc.mean());
        table.std.push(acc.std());
        table.min.push(acc.min());
        table.max.push(acc.max());
    }
    table
}
