//! Column-list validation shared by every stage that consumes one.

use crate::error::{Result, ValidationError};
use polars::prelude::*;

/// Check that a requested column list is non-empty and that every name is
/// present in the table.
///
/// The type system already guarantees the list is a sequence of strings,
/// which covers the shape checks the historical contract performed at
/// runtime. Pure check, no side effects.
///
/// # Errors
///
/// - [`ValidationError::EmptyColumnList`] if `columns` is empty.
/// - [`ValidationError::MissingColumns`] listing every name absent from
///   the table, together with the full set of available column names.
pub fn validate_columns(df: &DataFrame, columns: &[String]) -> Result<()> {
    if columns.is_empty() {
        return Err(ValidationError::EmptyColumnList);
    }

    let available: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let missing: Vec<String> = columns
        .iter()
        .filter(|col| !available.contains(col))
        .cloned()
        .collect();

    if !missing.is_empty() {
        return Err(ValidationError::MissingColumns { missing, available });
    }

    Ok(())
}
