//! Report types shared across the pipeline stages.
//!
//! Everything here is serializable so the CLI (or any embedding
//! application) can emit findings as JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Missing-value finding for a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingValueFinding {
    /// Column name.
    pub column: String,
    /// Number of missing observations.
    pub count: usize,
    /// Share of rows missing, as a percentage rounded to two decimals.
    pub percentage: f64,
}

/// Quality findings for a single primary-key column.
///
/// A key column is expected to have neither missing values nor
/// single-column duplicates; non-zero counts are logged as errors but
/// never raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyColumnFinding {
    /// Column name.
    pub column: String,
    /// Number of missing values in the key column.
    pub missing_count: usize,
    /// Number of values duplicating an earlier value in this column alone.
    pub duplicate_count: usize,
}

/// Inferred dtype of a column, reported when `include_dtypes` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDtype {
    /// Column name.
    pub column: String,
    /// Dtype name as rendered by the data engine (e.g. `i64`, `str`).
    pub dtype: String,
}

/// count/min/max summary for a numeric column, reported when
/// `include_summary` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    /// Column name.
    pub column: String,
    /// Number of non-null observations.
    pub count: usize,
    /// Minimum value, if any non-null value exists.
    pub min: Option<f64>,
    /// Maximum value, if any non-null value exists.
    pub max: Option<f64>,
}

/// Structured result of the exploration stage.
///
/// The exploration stage logs every finding as it is computed; the report
/// exists so callers and tests can consume the same findings without
/// scraping log output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorationReport {
    /// Number of rows in the table.
    pub rows: usize,
    /// Number of columns in the table.
    pub columns: usize,
    /// Columns with at least one missing value.
    pub missing: Vec<MissingValueFinding>,
    /// Findings for every configured primary-key column.
    pub key_findings: Vec<KeyColumnFinding>,
    /// Per-column dtypes (empty unless requested).
    pub dtypes: Vec<ColumnDtype>,
    /// Numeric summaries (empty unless requested).
    pub summaries: Vec<NumericSummary>,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
}

impl ExplorationReport {
    /// Look up the missing-value finding for a column, if it had any.
    pub fn missing_for(&self, column: &str) -> Option<&MissingValueFinding> {
        self.missing.iter().find(|m| m.column == column)
    }

    /// Look up the key finding for a column.
    pub fn key_finding_for(&self, column: &str) -> Option<&KeyColumnFinding> {
        self.key_findings.iter().find(|k| k.column == column)
    }

    /// True when no key column has missing values or duplicates.
    pub fn keys_are_clean(&self) -> bool {
        self.key_findings
            .iter()
            .all(|k| k.missing_count == 0 && k.duplicate_count == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> ExplorationReport {
        ExplorationReport {
            rows: 4,
            columns: 2,
            missing: vec![MissingValueFinding {
                column: "speed".to_string(),
                count: 2,
                percentage: 50.0,
            }],
            key_findings: vec![KeyColumnFinding {
                column: "id".to_string(),
                missing_count: 0,
                duplicate_count: 1,
            }],
            dtypes: Vec::new(),
            summaries: Vec::new(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_report_lookups() {
        let report = sample_report();
        assert_eq!(report.missing_for("speed").unwrap().count, 2);
        assert!(report.missing_for("id").is_none());
        assert_eq!(report.key_finding_for("id").unwrap().duplicate_count, 1);
    }

    #[test]
    fn test_keys_are_clean() {
        let mut report = sample_report();
        assert!(!report.keys_are_clean());
        report.key_findings[0].duplicate_count = 0;
        assert!(report.keys_are_clean());
    }

    #[test]
    fn test_report_serialization() {
        let report = sample_report();
        let json = serde_json::to_string(&report).unwrap();
        let back: ExplorationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }
}
