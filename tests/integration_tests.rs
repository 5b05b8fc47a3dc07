//! Integration tests for the validation pipeline.
//!
//! These tests verify end-to-end behavior of the pipeline against small
//! fixture datasets.

use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use table_validation::{
    explore_data, remove_duplicates, ErrorKind, ErrorPolicy, ExploreOptions, PipelineConfig,
    PipelineStage, ValidationError, ValidationPipeline,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn config_for(fixture: &str, pk: &[&str], remove: &[&str]) -> PipelineConfig {
    PipelineConfig::builder()
        .df_path(fixtures_path().join(fixture))
        .pk_columns(pk.iter().copied())
        .columns_to_remove(remove.iter().copied())
        .build()
        .expect("valid configuration")
}

fn cols(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Loading and Exploration
// ============================================================================

#[test]
fn test_missing_value_percentage_over_csv() {
    // data.csv has 5 rows; speed is missing in 2 of them.
    let mut pipeline = ValidationPipeline::new(config_for("data.csv", &["id"], &[]));
    pipeline.read_data().unwrap();
    let report = pipeline.explore_data().unwrap();

    assert_eq!(report.rows, 5);
    let speed = report.missing_for("speed").unwrap();
    assert_eq!(speed.count, 2);
    assert_eq!(speed.percentage, 40.0);
    assert!(report.keys_are_clean());
}

#[test]
fn test_duplicate_key_detection_and_removal() {
    // dups.csv has id values [1, 2, 2, 3].
    let df = table_validation::read_data(&fixtures_path().join("dups.csv")).unwrap();

    let report = explore_data(&df, &cols(&["id"]), ExploreOptions::default()).unwrap();
    assert_eq!(report.key_finding_for("id").unwrap().duplicate_count, 1);

    let deduplicated = remove_duplicates(&df, &cols(&["id"]), true).unwrap();
    assert_eq!(deduplicated.height(), 3);

    // First occurrence of id=2 retained (speed 60.0, not 61.0)
    let speeds: Vec<f64> = deduplicated
        .column("speed")
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(speeds, vec![55.0, 60.0, 48.5]);
}

#[test]
fn test_json_loading() {
    let df = table_validation::read_data(&fixtures_path().join("data.json")).unwrap();
    assert_eq!(df.height(), 2);
    assert_eq!(df.width(), 2);
}

// ============================================================================
// Full Pipeline Runs
// ============================================================================

#[test]
fn test_full_run_cleans_and_drops() {
    let mut pipeline = ValidationPipeline::new(config_for("dups.csv", &["id"], &["direction"]));
    pipeline.run().unwrap();

    assert_eq!(pipeline.stage(), PipelineStage::ColumnsDropped);
    // The exploration report stays available after the run.
    let report = pipeline.exploration_report().unwrap();
    assert_eq!(report.key_finding_for("id").unwrap().duplicate_count, 1);

    let df = pipeline.take_dataframe().unwrap();
    assert_eq!(df.height(), 3);
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(names, vec!["id", "speed"]);
}

#[test]
fn test_conflicting_configuration_propagates_by_default() {
    // "a" is both primary key and marked for removal.
    let mut pipeline = ValidationPipeline::new(config_for("conflict.csv", &["a"], &["a"]));
    let err = pipeline.run().unwrap_err();

    assert!(matches!(err, ValidationError::ColumnConflict { .. }));
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(pipeline.stage(), PipelineStage::Failed);

    // Aborted before deduplication and before any column was dropped.
    let df = pipeline.dataframe().unwrap();
    assert_eq!(df.height(), 3);
    assert_eq!(df.width(), 2);
}

#[test]
fn test_conflicting_configuration_swallowed_on_request() {
    let config = PipelineConfig::builder()
        .df_path(fixtures_path().join("conflict.csv"))
        .pk_columns(["a"])
        .columns_to_remove(["a"])
        .error_policy(ErrorPolicy::SwallowAndLog)
        .build()
        .unwrap();
    let mut pipeline = ValidationPipeline::new(config);

    // Legacy policy: the failure is only visible in the logs and the stage.
    pipeline.run().unwrap();
    assert_eq!(pipeline.stage(), PipelineStage::Failed);

    // Table keeps the state the last successful stage produced.
    let df = pipeline.dataframe().unwrap();
    assert_eq!(df.width(), 2);
}

#[test]
fn test_unsupported_format_fails_the_run() {
    let mut pipeline = ValidationPipeline::new(config_for("notes.txt", &["id"], &[]));
    let err = pipeline.run().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Format);
    assert_eq!(pipeline.stage(), PipelineStage::Failed);
    assert!(pipeline.dataframe().is_none());
}

#[test]
fn test_missing_file_is_io_error() {
    let mut pipeline = ValidationPipeline::new(config_for("does_not_exist.csv", &["id"], &[]));
    let err = pipeline.run().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_unknown_pk_column_fails_during_exploration() {
    let mut pipeline = ValidationPipeline::new(config_for("data.csv", &["lane"], &[]));
    let err = pipeline.run().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Schema);
    // The load succeeded; the table is whatever the last good stage left.
    assert!(pipeline.dataframe().is_some());
}

// ============================================================================
// Deduplication Properties
// ============================================================================

#[test]
fn test_dedup_is_idempotent_over_fixture() {
    let df = table_validation::read_data(&fixtures_path().join("dups.csv")).unwrap();
    let once = remove_duplicates(&df, &cols(&["id"]), false).unwrap();
    let twice = remove_duplicates(&once, &cols(&["id"]), false).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_combined_key_keeps_distinct_tuples() {
    // conflict.csv rows: (1,x), (1,y), (2,z) — all distinct as (a,b) tuples.
    let df = table_validation::read_data(&fixtures_path().join("conflict.csv")).unwrap();

    let by_pair = remove_duplicates(&df, &cols(&["a", "b"]), false).unwrap();
    assert_eq!(by_pair.height(), 3);

    let by_a = remove_duplicates(&df, &cols(&["a"]), false).unwrap();
    assert_eq!(by_a.height(), 2);
}

// ============================================================================
// Opt-in Missing-Value Fill
// ============================================================================

#[test]
fn test_fill_missing_after_run() {
    let mut pipeline = ValidationPipeline::new(config_for("data.csv", &["id"], &[]));
    pipeline.run().unwrap();
    pipeline.fill_missing().unwrap();

    let df = pipeline.take_dataframe().unwrap();
    assert_eq!(df.column("speed").unwrap().null_count(), 0);

    // Default decimal fill value
    let speeds: Vec<f64> = df
        .column("speed")
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert!(speeds.contains(&-9999.0));
    assert!(speeds.contains(&55.0));
}

#[test]
fn test_run_alone_does_not_fill_missing() {
    let mut pipeline = ValidationPipeline::new(config_for("data.csv", &["id"], &[]));
    pipeline.run().unwrap();

    let df = pipeline.dataframe().unwrap();
    assert_eq!(df.column("speed").unwrap().null_count(), 2);
}
