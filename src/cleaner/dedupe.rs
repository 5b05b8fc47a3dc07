//! Duplicate-row removal keyed on a column subset.

use crate::error::Result;
use crate::utils::single_column_duplicates;
use crate::validator::validate_columns;
use polars::prelude::*;
use tracing::info;

/// Remove rows whose combined value tuple across `columns` has appeared in
/// an earlier row. The first occurrence is kept; row order and all columns
/// are preserved. Returns a new frame.
///
/// With `verbose`, also logs how many rows duplicate an earlier value in
/// each individual column alone. That per-column count is a diagnostic
/// metric only; the removal decision always uses the combined tuple.
///
/// # Errors
///
/// Fails when `columns` does not validate against the table.
pub fn remove_duplicates(df: &DataFrame, columns: &[String], verbose: bool) -> Result<DataFrame> {
    validate_columns(df, columns)?;

    if verbose {
        for col in columns {
            let dups = single_column_duplicates(df.column(col)?.as_materialized_series())?;
            info!("Column [{col}] has {dups} single-column duplicates");
        }
    }

    let deduplicated = df.unique_stable(Some(columns), UniqueKeepStrategy::First, None)?;
    let removed = df.height() - deduplicated.height();
    info!(
        "Removed {removed} duplicate rows based on {columns:?} ({} rows remain)",
        deduplicated.height()
    );

    Ok(deduplicated)
}
