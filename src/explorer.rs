//! Data exploration: diagnostics over a loaded table.
//!
//! Findings are logged as they are computed (info for shape, warn for
//! missing values, error for dirty key columns) and collected into an
//! [`ExplorationReport`]. Data-quality findings are observational only;
//! the stage fails solely on its column-validation precondition.

use crate::error::Result;
use crate::types::{
    ColumnDtype, ExplorationReport, KeyColumnFinding, MissingValueFinding, NumericSummary,
};
use crate::utils::{is_numeric_dtype, single_column_duplicates};
use crate::validator::validate_columns;
use chrono::Utc;
use polars::prelude::*;
use tracing::{error, info, warn};

/// Optional sections of the exploration report.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExploreOptions {
    /// Report the dtype of every column.
    pub include_dtypes: bool,
    /// Report count/min/max for every numeric column.
    pub include_summary: bool,
}

/// Compute and log diagnostics for a table given its primary-key columns.
///
/// # Errors
///
/// Fails only when `pk_columns` does not validate against the table, or on
/// an internal engine error. Missing values and duplicate keys are
/// reported, never raised.
pub fn explore_data(
    df: &DataFrame,
    pk_columns: &[String],
    opts: ExploreOptions,
) -> Result<ExplorationReport> {
    validate_columns(df, pk_columns)?;

    let rows = df.height();
    let columns = df.width();
    info!("Table has {rows} rows and {columns} columns");

    // 1. Missing values per column
    let mut missing = Vec::new();
    for column in df.get_columns() {
        let count = column.null_count();
        if count > 0 {
            let percentage = round2(count as f64 / rows as f64 * 100.0);
            warn!(
                "Column [{}] has {} ({:.2}%) missing observations",
                column.name(),
                count,
                percentage
            );
            missing.push(MissingValueFinding {
                column: column.name().to_string(),
                count,
                percentage,
            });
        }
    }

    // 2. Missing values and duplicates in the key columns
    let mut key_findings = Vec::with_capacity(pk_columns.len());
    for col in pk_columns {
        let series = df.column(col)?.as_materialized_series();
        let missing_count = series.null_count();
        let duplicate_count = single_column_duplicates(series)?;
        if missing_count > 0 {
            error!("Primary key column [{col}] has missing values -> {missing_count}");
        }
        if duplicate_count > 0 {
            error!("Primary key column [{col}] has {duplicate_count} duplicated values");
        }
        key_findings.push(KeyColumnFinding {
            column: col.clone(),
            missing_count,
            duplicate_count,
        });
    }

    // 3. Column dtypes
    let mut dtypes = Vec::new();
    if opts.include_dtypes {
        for column in df.get_columns() {
            let dtype = column.dtype().to_string();
            info!("Column {} has data type {}", column.name(), dtype);
            dtypes.push(ColumnDtype {
                column: column.name().to_string(),
                dtype,
            });
        }
    }

    // 4. Basic stats for numeric columns
    let mut summaries = Vec::new();
    if opts.include_summary {
        for column in df.get_columns() {
            if !is_numeric_dtype(column.dtype()) {
                continue;
            }
            let series = column.as_materialized_series();
            let summary = summarize_numeric(series)?;
            info!(
                "Statistics for column {}: count: {}; minimum: {:?}; maximum: {:?}",
                summary.column, summary.count, summary.min, summary.max
            );
            summaries.push(summary);
        }
    }

    Ok(ExplorationReport {
        rows,
        columns,
        missing,
        key_findings,
        dtypes,
        summaries,
        generated_at: Utc::now(),
    })
}

fn summarize_numeric(series: &Series) -> Result<NumericSummary> {
    let floats = series.cast(&DataType::Float64)?;
    let ca = floats.f64()?;
    Ok(NumericSummary {
        column: series.name().to_string(),
        count: series.len() - series.null_count(),
        min: ca.min(),
        max: ca.max(),
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
