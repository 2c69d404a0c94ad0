use crate::types::{BestPerformances, NormalizedRecord, NormalizedTable, PerformanceRecord};
use std::cmp::Ordering;

/// How many runs are kept per target distance.
pub const TOP_RUNS: usize = 3;

/// The fastest runs (by average pace) whose distance lies within `tolerance`
/// of each target, bounds inclusive.
///
/// Runs with an unknown pace sort after every known pace; ties keep file order.
/// A target listed twice is reported once.
pub fn best_performances(
    table: &NormalizedTable,
    targets: &[f64],
    tolerance: f64,
) -> Vec<BestPerformances> {
    let mut result: Vec<BestPerformances> = Vec::with_capacity(targets.len());
    for &target in targets {
        if result.iter().any(|b| b.distance == target) {
            continue;
        }

        let mut candidates: Vec<&NormalizedRecord> = table
            .records()
            .iter()
            .filter(|r| {
                r.raw
                    .distance
                    .is_some_and(|d| d >= target - tolerance && d <= target + tolerance)
            })
            .collect();
        candidates.sort_by(|a, b| compare_pace(a.avg_pace_secs, b.avg_pace_secs));

        let runs = candidates
            .into_iter()
            .take(TOP_RUNS)
            .filter_map(performance_record)
            .collect();
        result.push(BestPerformances {
            distance: target,
            runs,
        });
    }
    result
}

fn compare_pace(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn performance_record(record: &NormalizedRecord) -> Option<PerformanceRecord> {
    Some(PerformanceRecord {
        date: record.timestamp,
        distance: record.raw.distance?,
        time: record.raw.time.clone(),
        avg_pace: record.raw.avg_pace.clone(),
    })
}
