//! Configuration types for the validation pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Policy for errors raised inside [`ValidationPipeline::run`].
///
/// The historical behavior of this tool was to catch every stage failure,
/// log it and carry on; that left operators with a silently partial table.
/// Propagation is therefore the default, with swallow-and-log as an
/// explicit opt-in for legacy callers.
///
/// [`ValidationPipeline::run`]: crate::pipeline::ValidationPipeline::run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ErrorPolicy {
    /// Return the typed error from `run()`.
    #[default]
    Propagate,
    /// Log the error and return `Ok(())`; the table keeps the state the
    /// last successful stage produced.
    SwallowAndLog,
}

/// Fill values used by the opt-in missing-value stage, one per dtype
/// category.
///
/// Defaults match the values the operator scripts historically passed:
/// empty string for text, `-9999` / `-9999.0` for integer and decimal
/// columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDefaults {
    /// Fill value for text columns.
    pub text: String,
    /// Fill value for integer columns.
    pub integer: i64,
    /// Fill value for decimal (floating point) columns.
    pub decimal: f64,
}

impl Default for TypeDefaults {
    fn default() -> Self {
        Self {
            text: String::new(),
            integer: -9999,
            decimal: -9999.0,
        }
    }
}

/// Configuration for the validation pipeline.
///
/// Use [`PipelineConfig::builder()`] to create a new configuration with a
/// fluent API. The configuration is immutable after `build()`; column
/// membership against the loaded table is validated lazily, when the stage
/// that consumes the column list actually runs.
///
/// # Example
///
/// ```rust,ignore
/// use table_validation::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .df_path("exports/speed_allveh.csv")
///     .pk_columns(["tmc_code", "observation_count"])
///     .columns_to_remove(["direction"])
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Path to the input data file.
    pub df_path: PathBuf,
    /// Columns whose combined values identify a logically unique row.
    pub pk_columns: Vec<String>,
    /// Columns dropped by the final stage. May be empty (stage is skipped).
    pub columns_to_remove: Vec<String>,
    /// Fill values for the opt-in missing-value stage.
    pub type_defaults: TypeDefaults,
    /// What `run()` does with a stage failure.
    pub error_policy: ErrorPolicy,
    /// Report the dtype of every column during exploration.
    pub include_dtypes: bool,
    /// Report count/min/max for numeric columns during exploration.
    pub include_summary: bool,
    /// Log per-column duplicate counts during deduplication and name the
    /// columns being dropped.
    pub verbose: bool,
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

/// Errors raised while building a [`PipelineConfig`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// No input path was provided.
    #[error("Input path is required")]
    MissingPath,

    /// No primary-key columns were provided.
    #[error("At least one primary-key column is required")]
    MissingPkColumns,

    /// The same column name appears twice in a column list.
    #[error("Duplicate column name '{0}' in column list")]
    DuplicateColumnName(String),
}

/// Builder for [`PipelineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    df_path: Option<PathBuf>,
    pk_columns: Vec<String>,
    columns_to_remove: Vec<String>,
    type_defaults: Option<TypeDefaults>,
    error_policy: Option<ErrorPolicy>,
    include_dtypes: Option<bool>,
    include_summary: Option<bool>,
    verbose: Option<bool>,
}

impl PipelineConfigBuilder {
    /// Set the path to the input data file.
    pub fn df_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.df_path = Some(path.into());
        self
    }

    /// Set the primary-key columns.
    pub fn pk_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pk_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the columns to drop at the end of the pipeline.
    pub fn columns_to_remove<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns_to_remove = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the fill values for the opt-in missing-value stage.
    pub fn type_defaults(mut self, defaults: TypeDefaults) -> Self {
        self.type_defaults = Some(defaults);
        self
    }

    /// Set what `run()` does with a stage failure.
    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = Some(policy);
        self
    }

    /// Report the dtype of every column during exploration.
    pub fn include_dtypes(mut self, include: bool) -> Self {
        self.include_dtypes = Some(include);
        self
    }

    /// Report count/min/max for numeric columns during exploration.
    pub fn include_summary(mut self, include: bool) -> Self {
        self.include_summary = Some(include);
        self
    }

    /// Enable or disable per-column diagnostic logging in the cleaning
    /// stages.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `PipelineConfig` or an error if validation fails.
    /// Column membership against the table is deliberately not checked here;
    /// that happens when a stage runs against loaded data.
    pub fn build(self) -> Result<PipelineConfig, ConfigValidationError> {
        let df_path = self.df_path.ok_or(ConfigValidationError::MissingPath)?;
        if self.pk_columns.is_empty() {
            return Err(ConfigValidationError::MissingPkColumns);
        }
        for list in [&self.pk_columns, &self.columns_to_remove] {
            for (i, name) in list.iter().enumerate() {
                if list[..i].contains(name) {
                    return Err(ConfigValidationError::DuplicateColumnName(name.clone()));
                }
            }
        }

        Ok(PipelineConfig {
            df_path,
            pk_columns: self.pk_columns,
            columns_to_remove: self.columns_to_remove,
            type_defaults: self.type_defaults.unwrap_or_default(),
            error_policy: self.error_policy.unwrap_or_default(),
            include_dtypes: self.include_dtypes.unwrap_or(false),
            include_summary: self.include_summary.unwrap_or(false),
            verbose: self.verbose.unwrap_or(true),
        })
    }
}
