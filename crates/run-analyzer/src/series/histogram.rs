use crate::types::{FieldOutcome, Histogram, NormalizedTable, PerField};
use tracing::warn;

/// Equal-width histograms of the known values of each requested field.
pub fn histogram(table: &NormalizedTable, columns: &[String], bins: usize) -> PerField<Histogram> {
    columns
        .iter()
        .map(|label| {
            let outcome = match table.resolve(label) {
                Some(field) => {
                    FieldOutcome::Computed(histogram_values(&table.known_values(field), bins))
                }
                None => {
                    warn!("Histogram skipped: {label} not found in dataset");
                    FieldOutcome::not_found(label)
                }
            };
            (label.clone(), outcome)
        })
        .collect()
}

/// Partition `values` into `bins` equal-width bins spanning `[min, max]`.
///
/// The last bin is closed on the right. An empty input spans `[0, 1]`; a
/// constant input spans `[v - 0.5, v + 0.5]`. Bins are reported as midpoints.
pub fn histogram_values(values: &[f64], bins: usize) -> Histogram {
    if bins == 0 {
        return Histogram::default();
    }

    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if values.is_empty() {
        lo = 0.0;
        hi = 1.0;
    } else if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins)
        .map(|i| if i == bins { hi } else { lo + width * i as f64 })
        .collect();

    let mut counts = vec![0u64; bins];
    for &v in values {
        counts[bin_index(v, lo, hi, &edges)] += 1;
    }

    let bins = edges.windows(2).map(|e| (e[0] + e[1]) / 2.0).collect();
    Histogram { bins, counts }
}

fn bin_index(value: f64, lo: f64, hi: f64, edges: &[f64]) -> usize {
    let bins = edges.len() - 1;
    let mut idx = (((value - lo) / (hi - lo)) * bins as f64) as usize;
    if idx >= bins {
        idx = bins - 1;
    }
    // rounding in the scaled index can land one bin off the computed edges
    if idx > 0 && value < edges[idx] {
        idx -= 1;
    } else if idx + 1 < bins && value >= edges[idx + 1] {
        idx += 1;
    }
    idx
}
