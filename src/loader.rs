//! Table loading, dispatched on the input file's extension.
//!
//! `.csv` and `.json` go through the Polars readers with schema inference;
//! `.xls` and `.xlsx` go through calamine and are assembled into a
//! `DataFrame` column by column. An unrecognized extension is a hard
//! [`ValidationError::UnsupportedFormat`] error, never a silently empty
//! result.

use crate::error::{Result, ValidationError};
use calamine::{open_workbook_auto, Data, DataType as _, Reader};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Read a data file into a `DataFrame` based on its extension.
///
/// Extension matching is case-sensitive: `data.CSV` is not recognized.
///
/// # Errors
///
/// - [`ValidationError::Io`] if the file does not exist or cannot be read.
/// - [`ValidationError::UnsupportedFormat`] for an unrecognized or missing
///   extension.
pub fn read_data(path: &Path) -> Result<DataFrame> {
    let extension = path.extension().and_then(|e| e.to_str());

    let df = match extension {
        Some("csv") => {
            // Surface a missing file as an IO error before Polars wraps it.
            std::fs::metadata(path)?;
            debug!("Reading CSV file {}", path.display());
            CsvReadOptions::default()
                .with_has_header(true)
                .try_into_reader_with_file_path(Some(path.to_path_buf()))?
                .finish()?
        }
        Some("json") => {
            debug!("Reading JSON file {}", path.display());
            let file = File::open(path)?;
            JsonReader::new(file)
                .with_json_format(JsonFormat::Json)
                .finish()?
        }
        Some("xls") | Some("xlsx") => {
            std::fs::metadata(path)?;
            debug!("Reading Excel file {}", path.display());
            read_excel(path)?
        }
        Some(other) => {
            return Err(ValidationError::UnsupportedFormat {
                extension: format!(".{other}"),
            });
        }
        None => {
            return Err(ValidationError::UnsupportedFormat {
                extension: "<none>".to_string(),
            });
        }
    };

    info!(
        "Loaded {} ({} rows, {} columns)",
        path.display(),
        df.height(),
        df.width()
    );
    Ok(df)
}

/// Column type decided by scanning the non-empty cells of one Excel column.
#[derive(Clone, Copy, PartialEq, Eq)]
enum ExcelColumnType {
    Integer,
    Float,
    Text,
}

/// Read the first worksheet of an Excel workbook into a `DataFrame`.
///
/// The first row is treated as the header. Cell types are inferred per
/// column: all-integer columns become `i64`, mixed integer/float columns
/// become `f64`, everything else is kept as text. Empty cells become nulls.
fn read_excel(path: &Path) -> Result<DataFrame> {
    let mut workbook = open_workbook_auto(path)?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Ok(DataFrame::empty()),
    };

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(DataFrame::empty());
    };
    let names: Vec<String> = header.iter().map(cell_to_string).collect();
    let body: Vec<&[Data]> = rows.collect();

    let mut columns: Vec<Column> = Vec::with_capacity(names.len());
    for (idx, name) in names.iter().enumerate() {
        let cells: Vec<&Data> = body.iter().map(|row| cell_at(row, idx)).collect();
        columns.push(build_excel_column(name, &cells).into_column());
    }

    Ok(DataFrame::new(columns)?)
}

const EMPTY_CELL: Data = Data::Empty;

/// Calamine trims trailing empty cells from a row; treat anything past the
/// end as empty.
fn cell_at(row: &[Data], idx: usize) -> &Data {
    row.get(idx).unwrap_or(&EMPTY_CELL)
}

fn cell_to_string(cell: &Data) -> String {
    cell.as_string().unwrap_or_else(|| format!("{cell}"))
}

fn build_excel_column(name: &str, cells: &[&Data]) -> Series {
    let mut column_type = ExcelColumnType::Integer;
    let mut saw_value = false;
    for cell in cells {
        match cell {
            Data::Empty => {}
            Data::Int(_) => saw_value = true,
            Data::Float(_) => {
                saw_value = true;
                if column_type == ExcelColumnType::Integer {
                    column_type = ExcelColumnType::Float;
                }
            }
            _ => {
                saw_value = true;
                column_type = ExcelColumnType::Text;
            }
        }
    }
    if !saw_value {
        column_type = ExcelColumnType::Text;
    }

    match column_type {
        ExcelColumnType::Integer => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| match cell {
                    Data::Int(i) => Some(*i),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
        ExcelColumnType::Float => {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|cell| match cell {
                    Data::Int(i) => Some(*i as f64),
                    Data::Float(f) => Some(*f),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
        ExcelColumnType::Text => {
            let values: Vec<Option<String>> = cells
                .iter()
                .map(|cell| match cell {
                    Data::Empty => None,
                    other => Some(cell_to_string(other)),
                })
                .collect();
            Series::new(name.into(), values)
        }
    }
}
