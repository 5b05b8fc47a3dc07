//! Shared dtype and series helpers used across the pipeline stages.

use polars::prelude::*;

/// Category of a column's data type, as seen by the fill-value
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtypeCategory {
    /// String/text columns.
    Text,
    /// Integer columns of any width.
    Integer,
    /// Floating point columns.
    Decimal,
    /// Anything else (booleans, dates, nested types).
    Other,
}

/// Check if a DataType is an integer type.
#[inline]
pub fn is_integer_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Check if a DataType is a floating point type.
#[inline]
pub fn is_float_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    is_integer_dtype(dtype) || is_float_dtype(dtype)
}

/// Get the category of a DataType.
pub fn get_dtype_category(dtype: &DataType) -> DtypeCategory {
    if is_integer_dtype(dtype) {
        DtypeCategory::Integer
    } else if is_float_dtype(dtype) {
        DtypeCategory::Decimal
    } else if matches!(dtype, DataType::String | DataType::Categorical(_, _)) {
        DtypeCategory::Text
    } else {
        DtypeCategory::Other
    }
}

/// Count values in a series that duplicate an earlier value in the same
/// series, ignoring every other column. Matches the "occurrences after the
/// first" convention, so `[1, 2, 2, 3]` has one duplicate.
pub fn single_column_duplicates(series: &Series) -> PolarsResult<usize> {
    Ok(series.len() - series.n_unique()?)
}

/// Fill null values in an integer series with a specific value.
pub fn fill_integer_nulls(series: &Series, fill_value: i64) -> PolarsResult<Series> {
    let ca = series.cast(&DataType::Int64)?;
    let ca = ca.i64()?;
    let filled: Vec<i64> = ca.into_iter().map(|v| v.unwrap_or(fill_value)).collect();
    Ok(Series::new(series.name().clone(), filled))
}

/// Fill null values in a float series with a specific value.
pub fn fill_decimal_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let ca = series.cast(&DataType::Float64)?;
    let ca = ca.f64()?;
    let filled: Vec<f64> = ca.into_iter().map(|v| v.unwrap_or(fill_value)).collect();
    Ok(Series::new(series.name().clone(), filled))
}

/// Fill null values in a text series with a specific value.
pub fn fill_text_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let ca = series.cast(&DataType::String)?;
    let ca = ca.str()?;
    let filled: Vec<&str> = ca.into_iter().map(|v| v.unwrap_or(fill_value)).collect();
    Ok(Series::new(series.name().clone(), filled))
}
