//! Column dropping.

use crate::error::Result;
use crate::validator::validate_columns;
use polars::prelude::*;
use tracing::info;

/// Return a new frame without the named columns, preserving the relative
/// order of the remaining columns and all rows.
///
/// # Errors
///
/// Fails when `columns` is empty or names a column absent from the table.
pub fn drop_columns(df: &DataFrame, columns: &[String], verbose: bool) -> Result<DataFrame> {
    validate_columns(df, columns)?;

    if verbose {
        info!("Removing columns {columns:?}...");
    }

    let remaining: Vec<PlSmallStr> = df
        .get_column_names()
        .into_iter()
        .filter(|name| !columns.iter().any(|c| c.as_str() == name.as_str()))
        .cloned()
        .collect();

    Ok(df.select(remaining)?)
}

/// Drop the named columns from the given frame directly.
///
/// This is the mutating counterpart of [`drop_columns`]; the caller's
/// frame reflects the removal.
pub fn drop_columns_in_place(df: &mut DataFrame, columns: &[String], verbose: bool) -> Result<()> {
    validate_columns(df, columns)?;

    if verbose {
        info!("Removing columns {columns:?}...");
    }

    for col in columns {
        let _removed = df.drop_in_place(col)?;
    }
    Ok(())
}
