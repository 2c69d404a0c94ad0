//! Error types for the activity analysis pipeline.
//!
//! Structurally required inputs fail fast with one of these variants; optional
//! per-field computations (yearly statistics, histograms) never produce an error
//! and degrade to an inline marker instead.
//!
//! Errors serialize as `{"code", "message"}` so a calling service can forward
//! them to a client unchanged.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

use crate::config::ConfigValidationError;

/// The main error type for the analyzer.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A required field could not be parsed, or a required source column is absent.
    #[error("Invalid data format: {0}")]
    DataFormat(String),

    /// Columns a computation strictly requires are absent from the table.
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingField(Vec<String>),

    /// A value outside the domain of an operation (e.g. a negative duration).
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigValidationError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<AnalysisError>,
    },
}

impl AnalysisError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        AnalysisError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code for callers that branch on the failure kind.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DataFormat(_) => "DATA_FORMAT_ERROR",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::InvalidValue(_) => "INVALID_VALUE",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// True when the failure is caused by the uploaded data rather than by the
    /// environment or configuration.
    pub fn is_data_error(&self) -> bool {
        match self {
            Self::DataFormat(_) | Self::MissingField(_) | Self::InvalidValue(_) => true,
            Self::Polars(_) => true,
            Self::WithContext { source, .. } => source.is_data_error(),
            _ => false,
        }
    }
}

impl Serialize for AnalysisError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("AnalysisError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| AnalysisError::Polars(e).with_context(context))
    }
}
