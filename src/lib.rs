//! Tabular-Data Validation Pipeline
//!
//! A small ingestion and validation pipeline built on Polars, for
//! preparing exported datasets (e.g. traffic-sensor exports) before they
//! are loaded into a database.
//!
//! # Overview
//!
//! The pipeline sequences four stages over a single in-memory table:
//!
//! - **Load**: read a `.csv`, `.json`, `.xls` or `.xlsx` file into a
//!   `DataFrame`, dispatched on the file extension
//! - **Explore**: report data-quality diagnostics: missing values,
//!   duplicate primary-key values, optional dtype and numeric summaries
//! - **Deduplicate**: remove rows whose combined primary-key tuple
//!   repeats an earlier row, keeping the first occurrence
//! - **Drop columns**: remove unwanted columns
//!
//! Every stage is also exposed as a free function taking a `&DataFrame`
//! and returning a new one, so each is testable in isolation.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use table_validation::{PipelineConfig, ValidationPipeline};
//!
//! let config = PipelineConfig::builder()
//!     .df_path("exports/speed_allveh.csv")
//!     .pk_columns(["tmc_code", "observation_count"])
//!     .columns_to_remove(["direction"])
//!     .build()?;
//!
//! let mut pipeline = ValidationPipeline::new(config);
//! pipeline.run()?;
//!
//! let cleaned = pipeline.take_dataframe().expect("pipeline loaded data");
//! println!("{} rows survived", cleaned.height());
//! ```
//!
//! # Error Policy
//!
//! By default `run()` propagates the first stage failure as a typed
//! [`ValidationError`]. The legacy swallow-and-log behavior is available
//! as an explicit opt-in via
//! [`ErrorPolicy::SwallowAndLog`](config::ErrorPolicy::SwallowAndLog);
//! under it the only failure signal is the log stream and the pipeline's
//! [`PipelineStage::Failed`] state.

pub mod cleaner;
pub mod config;
pub mod error;
pub mod explorer;
pub mod loader;
pub mod pipeline;
pub mod types;
pub mod utils;
pub mod validator;

// Re-exports for convenient access
pub use cleaner::{drop_columns, drop_columns_in_place, remove_duplicates};
pub use config::{
    ConfigValidationError, ErrorPolicy, PipelineConfig, PipelineConfigBuilder, TypeDefaults,
};
pub use error::{ErrorKind, Result, ResultExt, ValidationError};
pub use explorer::{explore_data, ExploreOptions};
pub use loader::read_data;
pub use pipeline::{PipelineStage, ValidationPipeline};
pub use types::{
    ColumnDtype, ExplorationReport, KeyColumnFinding, MissingValueFinding, NumericSummary,
};
pub use validator::validate_columns;
