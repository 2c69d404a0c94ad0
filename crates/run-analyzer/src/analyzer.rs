//! End-to-end analysis of one activity export.

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result, ResultExt};
use crate::ingest::load_table;
use crate::metrics::{
    avg_pace_by_weekday, best_performances, descriptive_matrix, totals, yearly_stats,
};
use crate::report::{AnalysisReport, Value};
use crate::series::{histogram, series_with_moving_average};
use crate::types::NormalizedTable;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Runs every view over a dataset with one validated configuration.
///
/// The analyzer holds no per-dataset state; one instance may serve any number
/// of datasets, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

static_assertions::assert_impl_all!(Analyzer: Send, Sync);

impl Analyzer {
    /// Create an analyzer after validating `config`.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Parse CSV content and compute the full report.
    ///
    /// # Errors
    ///
    /// Fails on unreadable CSV, an absent required column, an unparseable
    /// timestamp, or a view whose required columns are missing.
    pub fn analyze(&self, content: &str) -> Result<AnalysisReport> {
        let start = Instant::now();
        info!("Loading activity data...");
        let table = match load_table(content) {
            Ok(table) => table,
            Err(e) => {
                error!("Analysis error: {}", e);
                return Err(e);
            }
        };
        debug!("Loaded in {:?}", start.elapsed());

        let result = self.analyze_table(&table);
        match &result {
            Ok(_) => info!(
                "Analysis of {} rows completed in {:?}",
                table.len(),
                start.elapsed()
            ),
            Err(e) => error!("Analysis error: {}", e),
        }
        result
    }

    /// Read a CSV file and analyze it.
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<AnalysisReport> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(AnalysisError::from)
            .context(format!("Failed to read {}", path.display()))?;
        self.analyze(&content)
    }

    /// Compute every view over an already normalized table.
    pub fn analyze_table(&self, table: &NormalizedTable) -> Result<AnalysisReport> {
        let config = &self.config;
        if table.is_empty() {
            warn!("Export has no activity rows; views will be empty");
        }

        let stage = Instant::now();
        info!("Step 1: Computing descriptive matrix...");
        let desc_matrix = descriptive_matrix(table, &config.desc_matrix_columns)
            .context("Error computing descriptive matrix")?;
        debug!("{} rows in {:?}", desc_matrix.rows.len(), stage.elapsed());

        info!("Step 2: Averaging pace by weekday...");
        let avg_pace_day_week =
            avg_pace_by_weekday(table).context("Error computing weekday paces")?;

        info!("Step 3: Computing totals...");
        let totals = totals(table).context("Error computing totals")?;

        let stage = Instant::now();
        info!("Step 4: Computing yearly statistics...");
        let yearly_statistics = yearly_stats(table, &config.yearly_stats_columns);
        debug!("{} fields in {:?}", yearly_statistics.len(), stage.elapsed());

        info!("Step 5: Building histograms...");
        let histogram_data = histogram(table, &config.histogram_columns, config.histogram_bins);

        info!("Step 6: Building moving-average series...");
        let time_series_data =
            series_with_moving_average(table).context("Error generating moving average data")?;

        info!("Step 7: Ranking best performances...");
        let best_perf =
            best_performances(table, &config.target_distances, config.distance_tolerance);

        Ok(AnalysisReport {
            desc_matrix,
            avg_pace_day_week,
            totals,
            yearly_statistics,
            histogram_data,
            time_series_data,
            best_perf,
        })
    }
}

/// Analyze CSV content with `config` and return the sanitized report tree.
pub fn analyze(content: &str, config: &AnalysisConfig) -> Result<Value> {
    let analyzer = Analyzer::new(config.clone())?;
    Ok(analyzer.analyze(content)?.into_value())
}
