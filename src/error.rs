//! Error types for the validation pipeline.
//!
//! All library operations return [`ValidationError`], built with `thiserror`.
//! Each variant carries an error code and a coarse [`ErrorKind`]
//! classification so callers can decide whether a failure is a
//! misconfiguration, a schema mismatch, or an environment problem.

use serde::ser::SerializeStruct;
use serde::Serialize;
use thiserror::Error;

/// Coarse classification of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Malformed or conflicting pipeline configuration.
    Configuration,
    /// Referenced column(s) absent from the table.
    Schema,
    /// Input file format not recognized by the loader.
    Format,
    /// File missing or unreadable.
    Io,
    /// Failure inside the underlying data engine or parser.
    Data,
}

/// The main error type for the validation pipeline.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A column list was provided but contains no entries.
    #[error("Column list must not be empty")]
    EmptyColumnList,

    /// A column is marked both as primary key and for removal.
    #[error("Cannot remove column '{column}': it is assigned as a primary key")]
    ColumnConflict { column: String },

    /// A data-dependent stage was invoked before any table was loaded.
    #[error("No data loaded")]
    NoDataLoaded,

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Requested columns are absent from the table.
    #[error("Columns {missing:?} not found in table. Available columns: {available:?}")]
    MissingColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },

    /// File extension not recognized by the loader.
    #[error("Format '{extension}' not recognized (expected csv, json, xls or xlsx)")]
    UnsupportedFormat { extension: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Excel workbook error wrapper.
    #[error("Excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ValidationError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable string code for structured log output.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyColumnList => "EMPTY_COLUMN_LIST",
            Self::ColumnConflict { .. } => "COLUMN_CONFLICT",
            Self::NoDataLoaded => "NO_DATA_LOADED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::MissingColumns { .. } => "MISSING_COLUMNS",
            Self::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Excel(_) => "EXCEL_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Classify the error into a coarse [`ErrorKind`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyColumnList
            | Self::ColumnConflict { .. }
            | Self::NoDataLoaded
            | Self::InvalidConfig(_) => ErrorKind::Configuration,
            Self::MissingColumns { .. } => ErrorKind::Schema,
            Self::UnsupportedFormat { .. } => ErrorKind::Format,
            Self::Io(_) => ErrorKind::Io,
            Self::Polars(_) | Self::Excel(_) => ErrorKind::Data,
            Self::WithContext { source, .. } => source.kind(),
        }
    }

    /// Check if this error stems from pipeline configuration rather than data.
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }
}

/// Errors are serialized as `{code, message}` for structured consumers.
impl Serialize for ValidationError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ValidationError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for validation operations.
pub type Result<T> = std::result::Result<T, ValidationError>;

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
        self.map_err(|e| ValidationError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            ValidationError::EmptyColumnList.error_code(),
            "EMPTY_COLUMN_LIST"
        );
        assert_eq!(
            ValidationError::MissingColumns {
                missing: vec!["a".to_string()],
                available: vec!["b".to_string()],
            }
            .error_code(),
            "MISSING_COLUMNS"
        );
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            ValidationError::EmptyColumnList.kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            ValidationError::ColumnConflict {
                column: "id".to_string()
            }
            .kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            ValidationError::MissingColumns {
                missing: vec![],
                available: vec![],
            }
            .kind(),
            ErrorKind::Schema
        );
        assert_eq!(
            ValidationError::UnsupportedFormat {
                extension: "txt".to_string()
            }
            .kind(),
            ErrorKind::Format
        );
        assert_eq!(
            ValidationError::Polars(polars::error::PolarsError::NoData("empty".into())).kind(),
            ErrorKind::Data
        );
    }

    #[test]
    fn test_error_serialization() {
        let error = ValidationError::UnsupportedFormat {
            extension: "parquet".to_string(),
        };
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("UNSUPPORTED_FORMAT"));
        assert!(json.contains("parquet"));
    }

    #[test]
    fn test_with_context() {
        let error = ValidationError::NoDataLoaded.with_context("During exploration");
        assert!(error.to_string().contains("During exploration"));
        assert_eq!(error.error_code(), "NO_DATA_LOADED"); // Preserves original code
        assert_eq!(error.kind(), ErrorKind::Configuration);
    }
}
