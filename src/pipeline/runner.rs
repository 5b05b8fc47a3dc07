//! The validation pipeline orchestrator.

use crate::cleaner;
use crate::config::{ErrorPolicy, PipelineConfig};
use crate::error::{Result, ValidationError};
use crate::explorer::{self, ExploreOptions};
use crate::loader;
use crate::pipeline::stage::PipelineStage;
use crate::types::ExplorationReport;
use crate::utils::{
    fill_decimal_nulls, fill_integer_nulls, fill_text_nulls, get_dtype_category, DtypeCategory,
};
use polars::prelude::*;
use tracing::{debug, error, info};

/// Sequences load → explore → deduplicate → drop-columns over a single
/// table.
///
/// The pipeline owns the table exclusively; each stage replaces it rather
/// than mutating shared state, and each stage is also available as a free
/// function for callers who want to thread a `DataFrame` themselves.
///
/// # Example
///
/// ```rust,ignore
/// use table_validation::{PipelineConfig, ValidationPipeline};
///
/// let config = PipelineConfig::builder()
///     .df_path("exports/speed_allveh.csv")
///     .pk_columns(["tmc_code", "observation_count"])
///     .columns_to_remove(["direction"])
///     .build()?;
///
/// let mut pipeline = ValidationPipeline::new(config);
/// pipeline.run()?;
/// let cleaned = pipeline.take_dataframe();
/// ```
pub struct ValidationPipeline {
    config: PipelineConfig,
    df: Option<DataFrame>,
    stage: PipelineStage,
    last_report: Option<ExplorationReport>,
}

impl ValidationPipeline {
    /// Create a pipeline from a validated configuration. No IO happens
    /// until a stage runs.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            df: None,
            stage: PipelineStage::Created,
            last_report: None,
        }
    }

    /// The pipeline's configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Current state of the pipeline.
    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// The current table, if one has been loaded.
    pub fn dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    /// The report produced by the most recent exploration stage, if any.
    pub fn exploration_report(&self) -> Option<&ExplorationReport> {
        self.last_report.as_ref()
    }

    /// Take ownership of the current table, leaving the pipeline empty.
    pub fn take_dataframe(&mut self) -> Option<DataFrame> {
        self.df.take()
    }

    /// Load the configured file into the pipeline's table.
    pub fn read_data(&mut self) -> Result<&DataFrame> {
        let df = loader::read_data(&self.config.df_path)?;
        self.stage = PipelineStage::Loaded;
        Ok(self.df.insert(df))
    }

    /// Compute and log diagnostics over the loaded table.
    pub fn explore_data(&mut self) -> Result<ExplorationReport> {
        let df = self.df.as_ref().ok_or(ValidationError::NoDataLoaded)?;
        let opts = ExploreOptions {
            include_dtypes: self.config.include_dtypes,
            include_summary: self.config.include_summary,
        };
        let report = explorer::explore_data(df, &self.config.pk_columns, opts)?;
        self.stage = PipelineStage::Explored;
        Ok(self.last_report.insert(report).clone())
    }

    /// Remove rows duplicating an earlier row across the primary-key
    /// columns.
    ///
    /// Re-asserts first that no column marked for removal is also a
    /// primary key; a conflict aborts before any mutation.
    pub fn remove_duplicates(&mut self) -> Result<()> {
        self.check_removal_conflicts()?;
        let df = self.df.as_ref().ok_or(ValidationError::NoDataLoaded)?;
        let deduplicated =
            cleaner::remove_duplicates(df, &self.config.pk_columns, self.config.verbose)?;
        self.df = Some(deduplicated);
        self.stage = PipelineStage::Deduplicated;
        Ok(())
    }

    /// Drop the configured columns. A pipeline configured with nothing to
    /// remove skips the stage.
    pub fn drop_columns(&mut self) -> Result<()> {
        let df = self.df.as_ref().ok_or(ValidationError::NoDataLoaded)?;
        if self.config.columns_to_remove.is_empty() {
            debug!("No columns configured for removal, skipping drop stage");
            self.stage = PipelineStage::ColumnsDropped;
            return Ok(());
        }
        let dropped =
            cleaner::drop_columns(df, &self.config.columns_to_remove, self.config.verbose)?;
        self.df = Some(dropped);
        self.stage = PipelineStage::ColumnsDropped;
        Ok(())
    }

    /// Opt-in stage: fill missing values with the configured type defaults
    /// (text, integer and decimal columns each get their own fill value).
    ///
    /// Never invoked by [`run`](Self::run); call it explicitly after the
    /// stages you want it to follow.
    pub fn fill_missing(&mut self) -> Result<()> {
        let defaults = self.config.type_defaults.clone();
        let df = self.df.as_mut().ok_or(ValidationError::NoDataLoaded)?;

        let names: Vec<PlSmallStr> = df.get_column_names().into_iter().cloned().collect();
        let mut filled_columns = 0usize;
        for name in names {
            let series = df.column(&name)?.as_materialized_series();
            if series.null_count() == 0 {
                continue;
            }
            let filled = match get_dtype_category(series.dtype()) {
                DtypeCategory::Text => fill_text_nulls(series, &defaults.text)?,
                DtypeCategory::Integer => fill_integer_nulls(series, defaults.integer)?,
                DtypeCategory::Decimal => fill_decimal_nulls(series, defaults.decimal)?,
                DtypeCategory::Other => continue,
            };
            df.replace(&name, filled)?;
            filled_columns += 1;
        }

        info!("Filled missing values in {filled_columns} columns with type defaults");
        Ok(())
    }

    /// Execute load → explore → deduplicate → drop-columns in that fixed
    /// order.
    ///
    /// Under [`ErrorPolicy::Propagate`] (the default) the first stage
    /// failure is returned as a typed error. Under
    /// [`ErrorPolicy::SwallowAndLog`] the failure is logged, the pipeline
    /// is marked [`PipelineStage::Failed`] and `Ok(())` is returned; the
    /// table keeps whatever state the last successful stage produced.
    pub fn run(&mut self) -> Result<()> {
        info!("Working on {}", self.config.df_path.display());
        match self.run_stages() {
            Ok(()) => {
                info!("Pipeline completed, final stage: {}", self.stage);
                Ok(())
            }
            Err(err) => {
                self.stage = PipelineStage::Failed;
                match self.config.error_policy {
                    ErrorPolicy::Propagate => Err(err),
                    ErrorPolicy::SwallowAndLog => {
                        error!("Something went wrong: {err} (code {})", err.error_code());
                        Ok(())
                    }
                }
            }
        }
    }

    fn run_stages(&mut self) -> Result<()> {
        self.read_data()?;
        self.explore_data()?;
        self.remove_duplicates()?;
        self.drop_columns()?;
        Ok(())
    }

    fn check_removal_conflicts(&self) -> Result<()> {
        for col in &self.config.columns_to_remove {
            if self.config.pk_columns.contains(col) {
                return Err(ValidationError::ColumnConflict {
                    column: col.clone(),
                });
            }
        }
        Ok(())
    }
}
