//! Error types for dataset description.
//!
//! Errors are serializable so they can be handed to a frontend or printed
//! as JSON alongside a report.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for describing a dataset.
#[derive(Error, Debug)]
pub enum DescribeError {
    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// The metadata table does not have the expected shape.
    #[error("Malformed metadata table: {0}")]
    MalformedMetadata(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] crate::config::ConfigValidationError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<DescribeError>,
    },
}

impl DescribeError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        DescribeError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get a stable error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::MalformedMetadata(_) => "MALFORMED_METADATA",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if the error comes from the caller's input rather than the engine.
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::ColumnNotFound(_) | Self::MalformedMetadata(_) | Self::InvalidConfig(_) => true,
            Self::WithContext { source, .. } => source.is_input_error(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for DescribeError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("DescribeError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for describe operations.
pub type Result<T> = std::result::Result<T, DescribeError>;

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
        self.map_err(|e| DescribeError::Polars(e).with_context(context))
    }
}
