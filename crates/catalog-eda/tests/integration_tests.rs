//! Integration tests for the catalog analysis pipeline.
//!
//! These tests run the whole pipeline against small catalog fixtures.

use catalog_eda::{
    AnalysisStage, ChartData, ConsoleReport, DropPolicy, EdaError, Pipeline, PipelineConfig,
    ReportGenerator, load_catalog, run,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn sample_config() -> PipelineConfig {
    PipelineConfig::builder()
        .input_path(fixtures_path().join("catalog_sample.csv"))
        .build()
        .unwrap()
}

fn row_index(df: &DataFrame, show_id: &str) -> usize {
    df.column("show_id")
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .position(|v| v == Some(show_id))
        .unwrap()
}

fn float_at(df: &DataFrame, column: &str, row: usize) -> Option<f64> {
    df.column(column)
        .unwrap()
        .as_materialized_series()
        .f64()
        .unwrap()
        .get(row)
}

fn flag_at(df: &DataFrame, row: usize) -> Option<i32> {
    df.column("Is_Recent")
        .unwrap()
        .as_materialized_series()
        .i32()
        .unwrap()
        .get(row)
}

fn string_at(df: &DataFrame, column: &str, row: usize) -> Option<String> {
    df.column(column)
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .get(row)
        .map(str::to_string)
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_sample_fixture() {
    let df = load_catalog(fixtures_path().join("catalog_sample.csv"), Some(100)).unwrap();

    assert_eq!(df.shape(), (10, 11));
    assert_eq!(df.column("release_year").unwrap().dtype(), &DataType::Int64);
    assert_eq!(df.column("director").unwrap().null_count(), 4);
}

#[test]
fn test_load_falls_back_on_doubled_quotes() {
    let df = load_catalog(fixtures_path().join("catalog_doubled_quotes.csv"), Some(100)).unwrap();

    assert_eq!(df.shape(), (2, 10));
    assert_eq!(string_at(&df, "title", 1), Some("Beta, Reloaded".to_string()));
    assert_eq!(string_at(&df, "date_added", 1), Some("September 24, 2021".to_string()));
    assert_eq!(df.column("director").unwrap().null_count(), 1);
}

#[test]
fn test_missing_input_is_recoverable() {
    let config = PipelineConfig::builder()
        .input_path(fixtures_path().join("netflix_titles.csv"))
        .build()
        .unwrap();

    let err = run(&config).unwrap_err();
    assert!(matches!(err, EdaError::InputNotFound(_)));
    assert!(err.is_recoverable());
}

// ============================================================================
// Full Pipeline
// ============================================================================

#[test]
fn test_full_run_cleaning() {
    let outcome = run(&sample_config()).unwrap();
    let result = &outcome.result;

    assert_eq!(result.summary.rows_processed, 10);
    assert_eq!(result.summary.duplicates_dropped, 1);
    assert!(result.data.height() <= result.summary.rows_processed);
    assert_eq!(
        result.summary.rows_processed - result.data.height(),
        result.summary.duplicates_dropped
    );
    assert_eq!(result.profile.shape, (9, 10));
    assert_eq!(result.raw_preview.height(), 10);
    assert_eq!(result.summary.dropped_columns, vec!["description".to_string()]);

    // the first s3 survives
    let s3 = row_index(&result.data, "s3");
    assert_eq!(string_at(&result.data, "title", s3), Some("Gamma".to_string()));
}

#[test]
fn test_full_run_missing_report() {
    let outcome = run(&sample_config()).unwrap();
    let report = &outcome.result.missing_report;

    let order: Vec<(&str, usize)> = report
        .entries
        .iter()
        .map(|e| (e.column.as_str(), e.missing_count))
        .collect();
    assert_eq!(
        order,
        vec![
            ("director", 4),
            ("cast", 2),
            ("country", 2),
            ("date_added", 1),
            ("rating", 1),
            ("duration", 1),
        ]
    );
    assert_eq!(
        format!("{:.2}", report.get("director").unwrap().missing_percent),
        "44.44"
    );
}

#[test]
fn test_full_run_imputation() {
    let outcome = run(&sample_config()).unwrap();
    let result = &outcome.result;

    for name in ["country", "director", "cast", "rating", "duration", "date_added"] {
        assert_eq!(result.data.column(name).unwrap().null_count(), 0, "{name}");
    }

    let s4 = row_index(&result.data, "s4");
    assert_eq!(string_at(&result.data, "rating", s4), Some("TV-MA".to_string()));
    assert_eq!(
        string_at(&result.data, "date_added", s4),
        Some("Missing Date".to_string())
    );

    // every duration appears once, so the smallest value wins
    let s6 = row_index(&result.data, "s6");
    assert_eq!(
        string_at(&result.data, "duration", s6),
        Some("1 Season".to_string())
    );

    let steps: Vec<(&str, usize)> = result
        .imputation_steps
        .iter()
        .map(|s| (s.column.as_str(), s.filled_count))
        .collect();
    assert_eq!(
        steps,
        vec![
            ("country", 2),
            ("director", 4),
            ("cast", 2),
            ("rating", 1),
            ("duration", 1),
            ("date_added", 1),
        ]
    );
}

#[test]
fn test_full_run_features() {
    let outcome = run(&sample_config()).unwrap();
    let df = &outcome.result.data;

    let s1 = row_index(df, "s1");
    assert_eq!(float_at(df, "duration_minutes", s1), Some(90.0));
    assert_eq!(float_at(df, "seasons", s1), None);
    assert_eq!(flag_at(df, s1), Some(1));

    let s2 = row_index(df, "s2");
    assert_eq!(float_at(df, "duration_minutes", s2), None);
    assert_eq!(float_at(df, "seasons", s2), Some(3.0));
    assert_eq!(flag_at(df, s2), Some(0));

    // recency boundary
    assert_eq!(flag_at(df, row_index(df, "s3")), Some(1));
    assert_eq!(flag_at(df, row_index(df, "s4")), Some(0));

    // imputed "1 Season" on a movie does not parse as minutes
    let s6 = row_index(df, "s6");
    assert_eq!(float_at(df, "duration_minutes", s6), None);
    assert_eq!(float_at(df, "seasons", s6), None);

    let stats = outcome.result.summary.duration_features;
    assert_eq!((stats.movies, stats.movies_parsed), (6, 5));
    assert_eq!((stats.tv_shows, stats.tv_shows_parsed), (3, 3));
    assert_eq!(outcome.result.summary.recent_titles, 6);
    assert_eq!(outcome.result.summary.warnings.len(), 1);
}

#[test]
fn test_full_run_chart_data() {
    let outcome = run(&sample_config()).unwrap();
    let charts = &outcome.charts;

    assert_eq!(
        charts.type_counts,
        vec![("Movie".to_string(), 6), ("TV Show".to_string(), 3)]
    );
    assert_eq!(
        charts.top_countries,
        vec![
            ("India".to_string(), 4),
            ("United States".to_string(), 3),
            ("Unknown".to_string(), 2),
            ("United Kingdom".to_string(), 1),
            ("Japan".to_string(), 1),
        ]
    );

    let hist = charts.release_year_histogram.as_ref().unwrap();
    assert_eq!(hist.counts.len(), 30);
    assert_eq!(hist.total(), 9);
    assert_eq!(hist.edges[0], 2010.0);
    assert_eq!(hist.edges[30], 2021.0);

    let by_recency = &charts.movie_duration_by_recency;
    assert_eq!(by_recency.recent.as_ref().unwrap().count, 3);
    assert_eq!(by_recency.older.as_ref().unwrap().count, 2);

    assert_eq!(charts.correlation.get("duration_minutes", "seasons"), None);
}

#[test]
fn test_top_countries_limit() {
    let config = PipelineConfig::builder()
        .input_path(fixtures_path().join("catalog_sample.csv"))
        .top_countries(2)
        .build()
        .unwrap();

    let outcome = run(&config).unwrap();
    assert_eq!(outcome.charts.top_countries.len(), 2);
}

// ============================================================================
// Column Drop Policy
// ============================================================================

#[test]
fn test_strict_drop_missing_column_fails() {
    let config = PipelineConfig::builder()
        .input_path(fixtures_path().join("catalog_no_description.csv"))
        .build()
        .unwrap();

    let err = run(&config).unwrap_err();
    assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    assert!(!err.is_recoverable());
}

#[test]
fn test_lenient_drop_missing_column_continues() {
    let config = PipelineConfig::builder()
        .input_path(fixtures_path().join("catalog_no_description.csv"))
        .drop_policy(DropPolicy::Lenient)
        .build()
        .unwrap();

    let outcome = run(&config).unwrap();
    assert_eq!(outcome.result.data.height(), 2);
    assert!(outcome.result.summary.dropped_columns.is_empty());
}

// ============================================================================
// Progress Reporting
// ============================================================================

#[test]
fn test_run_reports_every_stage() {
    let stages = Arc::new(Mutex::new(Vec::new()));
    let stages_clone = stages.clone();

    Pipeline::builder()
        .config(sample_config())
        .on_progress(move |update| {
            stages_clone.lock().unwrap().push(update.stage);
        })
        .build()
        .unwrap()
        .run()
        .unwrap();

    let stages = stages.lock().unwrap();
    for stage in [
        AnalysisStage::Loading,
        AnalysisStage::Deduplication,
        AnalysisStage::ColumnPruning,
        AnalysisStage::MissingValueAnalysis,
        AnalysisStage::Imputation,
        AnalysisStage::FeatureDerivation,
        AnalysisStage::Reporting,
        AnalysisStage::Complete,
    ] {
        assert!(stages.contains(&stage), "missing {:?}", stage);
    }
    assert_eq!(stages.last(), Some(&AnalysisStage::Complete));
}

#[test]
fn test_failed_run_reports_failure() {
    let stages = Arc::new(Mutex::new(Vec::new()));
    let stages_clone = stages.clone();

    let config = PipelineConfig::builder()
        .input_path(fixtures_path().join("missing.csv"))
        .build()
        .unwrap();

    let result = Pipeline::builder()
        .config(config)
        .on_progress(move |update| {
            stages_clone.lock().unwrap().push(update.stage);
        })
        .build()
        .unwrap()
        .run();

    assert!(result.is_err());
    assert_eq!(stages.lock().unwrap().last(), Some(&AnalysisStage::Failed));
}

// ============================================================================
// Reporting
// ============================================================================

#[test]
fn test_console_report_sections() {
    let config = sample_config();
    let outcome = run(&config).unwrap();
    let text = ConsoleReport::new(&outcome.result, &outcome.charts, &config)
        .unwrap()
        .to_string();

    for section in [
        "1. Preview of the first 10 rows:",
        "2. Rows Processed: 10, Duplicates Dropped: 1",
        "3. Final Dataset Shape after cleaning: (9, 10)",
        "4. Final Data Types & Non-Null Counts:",
        "5. Basic Statistics:",
        "6. Missing Value Summary:",
        "1. Missing Values After Imputation:",
        "2. Preview of New Duration Features:",
        "3. Preview of New Binary Feature (Is_Recent):",
        "1. Count Plot: Content Type Distribution",
        "5. Correlation Heatmap",
    ] {
        assert!(text.contains(section), "missing section: {section}");
    }
    assert!(text.contains("44.44"));
}

#[test]
fn test_report_and_export_written() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::builder()
        .input_path(fixtures_path().join("catalog_sample.csv"))
        .output_dir(dir.path())
        .build()
        .unwrap();

    let mut outcome = run(&config).unwrap();
    let generator = ReportGenerator::new(config.output_dir.clone(), None);

    let csv_path = generator
        .export_dataset(&mut outcome.result.data, "catalog_sample")
        .unwrap();
    let report_path = generator
        .write_report_to_file(&outcome.report, "catalog_sample")
        .unwrap();

    assert_eq!(report_path, dir.path().join("catalog_sample_report.json"));
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(json["summary"]["duplicates_dropped"], 1);
    assert_eq!(json["missing_report"]["entries"][0]["column"], "director");
    assert_eq!(json["charts"]["type_counts"][0][0], "Movie");

    let reloaded = load_catalog(&csv_path, Some(100)).unwrap();
    assert_eq!(reloaded.shape(), (9, 13));
    assert!(reloaded.column("description").is_err());
}

#[test]
fn test_chart_data_matches_run() {
    let outcome = run(&sample_config()).unwrap();
    let recomputed = ChartData::from_frame(&outcome.result.data, 30, 10).unwrap();
    assert_eq!(recomputed, outcome.charts);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let config = PipelineConfig::builder()
        .recent_year_threshold(2019)
        .drop_policy(DropPolicy::Lenient)
        .build()
        .unwrap();
    std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

    let loaded = PipelineConfig::from_json_file(&path).unwrap();
    assert_eq!(loaded.recent_year_threshold, 2019);
    assert_eq!(loaded.drop_policy, DropPolicy::Lenient);
    assert_eq!(loaded.imputation_plan, config.imputation_plan);
}

#[test]
fn test_config_from_invalid_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let config = PipelineConfig {
        histogram_bins: 0,
        ..PipelineConfig::default()
    };
    std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

    let err = PipelineConfig::from_json_file(&path).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_CONFIG");
}
