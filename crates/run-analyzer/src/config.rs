//! Configuration for the activity analyzer.
//!
//! The column lists and target distances are static configuration supplied by the
//! caller, never user input. Defaults match the fields a Garmin Connect running
//! export carries.

use serde::{Deserialize, Serialize};

/// Field labels summarised in the descriptive matrix by default.
pub const DEFAULT_DESC_MATRIX_COLUMNS: [&str; 12] = [
    "Distance",
    "Avg HR",
    "Total Descent",
    "Max HR",
    "Avg Run Cadence",
    "Max Run Cadence",
    "Avg Stride Length",
    "Time_in_secs",
    "Avg_pace_secs",
    "Hour_of_day",
    "Calories",
    "Best_pace_secs",
];

/// Field labels broken down per year by default.
pub const DEFAULT_YEARLY_STATS_COLUMNS: [&str; 8] = [
    "Distance",
    "Calories",
    "Avg HR",
    "Max HR",
    "Avg Run Cadence",
    "Max Run Cadence",
    "Avg_pace_secs",
    "Best_pace_secs",
];

/// Field labels histogrammed by default.
pub const DEFAULT_HISTOGRAM_COLUMNS: [&str; 3] = ["Distance", "Avg HR", "Avg_pace_secs"];

/// Race distances in km: 1k, 2mi, 3mi, 5k, 4mi, 5mi, 10k, half marathon.
pub const DEFAULT_TARGET_DISTANCES: [f64; 8] = [1.0, 3.22, 4.83, 5.0, 6.44, 8.05, 10.0, 21.1];

pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

/// GPS watches rarely log a round 5.00 km; +/- 20 m still counts as a 5k.
pub const DEFAULT_DISTANCE_TOLERANCE: f64 = 0.02;

/// Configuration for one analysis run.
///
/// Use [`AnalysisConfig::builder()`] for a validated configuration, or deserialize
/// one from JSON with [`AnalysisConfig::from_json`]; omitted keys take defaults.
///
/// # Example
///
/// ```rust,ignore
/// use run_analyzer::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .histogram_bins(20)
///     .target_distances(vec![5.0, 10.0])
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Field labels summarised in the descriptive matrix.
    pub desc_matrix_columns: Vec<String>,

    /// Field labels broken down per year.
    pub yearly_stats_columns: Vec<String>,

    /// Field labels histogrammed.
    pub histogram_columns: Vec<String>,

    /// Number of equal-width histogram bins.
    /// Default: 10
    pub histogram_bins: usize,

    /// Target distances (km) for the best-performance ranking.
    pub target_distances: Vec<f64>,

    /// Half-width (km) of the window admitting a run as a target-distance effort.
    /// Default: 0.02
    pub distance_tolerance: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            desc_matrix_columns: to_strings(&DEFAULT_DESC_MATRIX_COLUMNS),
            yearly_stats_columns: to_strings(&DEFAULT_YEARLY_STATS_COLUMNS),
            histogram_columns: to_strings(&DEFAULT_HISTOGRAM_COLUMNS),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            target_distances: DEFAULT_TARGET_DISTANCES.to_vec(),
            distance_tolerance: DEFAULT_DISTANCE_TOLERANCE,
        }
    }
}

fn to_strings(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Deserialize a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let config: AnalysisConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.histogram_bins == 0 {
            return Err(ConfigValidationError::InvalidBinCount(self.histogram_bins));
        }

        if !self.distance_tolerance.is_finite() || self.distance_tolerance < 0.0 {
            return Err(ConfigValidationError::InvalidTolerance(
                self.distance_tolerance,
            ));
        }

        if let Some(&bad) = self
            .target_distances
            .iter()
            .find(|d| !d.is_finite() || **d <= 0.0)
        {
            return Err(ConfigValidationError::InvalidTargetDistance(bad));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid histogram bin count: {0} (must be at least 1)")]
    InvalidBinCount(usize),

    #[error("Invalid distance tolerance: {0} (must be finite and non-negative)")]
    InvalidTolerance(f64),

    #[error("Invalid target distance: {0} (must be finite and positive)")]
    InvalidTargetDistance(f64),
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    desc_matrix_columns: Option<Vec<String>>,
    yearly_stats_columns: Option<Vec<String>>,
    histogram_columns: Option<Vec<String>>,
    histogram_bins: Option<usize>,
    target_distances: Option<Vec<f64>>,
    distance_tolerance: Option<f64>,
}

impl AnalysisConfigBuilder {
    /// Set the fields summarised in the descriptive matrix.
    pub fn desc_matrix_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.desc_matrix_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the fields broken down per year.
    pub fn yearly_stats_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.yearly_stats_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the fields histogrammed.
    pub fn histogram_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.histogram_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the number of histogram bins.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Set the target distances (km) for best performances.
    pub fn target_distances(mut self, distances: Vec<f64>) -> Self {
        self.target_distances = Some(distances);
        self
    }

    /// Set the tolerance (km) around each target distance.
    pub fn distance_tolerance(mut self, tolerance: f64) -> Self {
        self.distance_tolerance = Some(tolerance);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let defaults = AnalysisConfig::default();
        let config = AnalysisConfig {
            desc_matrix_columns: self
                .desc_matrix_columns
                .unwrap_or(defaults.desc_matrix_columns),
            yearly_stats_columns: self
                .yearly_stats_columns
                .unwrap_or(defaults.yearly_stats_columns),
            histogram_columns: self.histogram_columns.unwrap_or(defaults.histogram_columns),
            histogram_bins: self.histogram_bins.unwrap_or(defaults.histogram_bins),
            target_distances: self.target_distances.unwrap_or(defaults.target_distances),
            distance_tolerance: self
                .distance_tolerance
                .unwrap_or(defaults.distance_tolerance),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.desc_matrix_columns.len(), 12);
        assert_eq!(config.histogram_bins, 10);
        assert_eq!(config.distance_tolerance, 0.02);
        assert_eq!(config.target_distances[3], 5.0);
    }

    #[test]
    fn test_builder_defaults() {
        let config = AnalysisConfig::builder().build().unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = AnalysisConfig::builder()
            .histogram_columns(["Calories"])
            .histogram_bins(4)
            .target_distances(vec![5.0, 10.0])
            .distance_tolerance(0.05)
            .build()
            .unwrap();

        assert_eq!(config.histogram_columns, vec!["Calories".to_string()]);
        assert_eq!(config.histogram_bins, 4);
        assert_eq!(config.target_distances, vec![5.0, 10.0]);
        assert_eq!(config.distance_tolerance, 0.05);
    }

    #[test]
    fn test_validation_zero_bins() {
        let result = AnalysisConfig::builder().histogram_bins(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidBinCount(0)
        ));
    }

    #[test]
    fn test_validation_negative_tolerance() {
        let result = AnalysisConfig::builder().distance_tolerance(-0.1).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidTolerance(_)
        ));
    }

    #[test]
    fn test_validation_bad_distance() {
        let result = AnalysisConfig::builder()
            .target_distances(vec![5.0, f64::NAN])
            .build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidTargetDistance(_)
        ));
    }

    #[test]
    fn test_partial_config_from_json() {
        let config = AnalysisConfig::from_json(r#"{"histogram_bins": 5}"#).unwrap();
        assert_eq!(config.histogram_bins, 5);
        assert_eq!(config.yearly_stats_columns.len(), 8);
    }

    #[test]
    fn test_invalid_config_from_json() {
        let err = AnalysisConfig::from_json(r#"{"distance_tolerance": -1.0}"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }
}
