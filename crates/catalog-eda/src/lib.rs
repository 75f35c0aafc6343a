//! Streaming Catalog EDA Library
//!
//! Exploratory analysis and cleaning of a video-streaming catalog CSV, built
//! with Rust and Polars.
//!
//! # Overview
//!
//! The pipeline is a fixed, single-pass sequence:
//!
//! - **Load**: CSV reading with a cleaned-content fallback
//! - **Deduplicate**: first occurrence of each `show_id` wins
//! - **Drop**: unused columns (`description`) are removed
//! - **Profile**: structure, descriptive statistics and a missing value report
//! - **Impute**: per-column constant or mode fills, in a fixed order
//! - **Derive**: `duration_minutes`, `seasons` and the `Is_Recent` flag
//! - **Report**: console sections, chart data and a JSON report
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use catalog_eda::{ChartData, ConsoleReport, PipelineConfig, run};
//!
//! let config = PipelineConfig::builder()
//!     .input_path("netflix_titles.csv")
//!     .build()?;
//!
//! match run(&config) {
//!     Ok(outcome) => {
//!         let report = ConsoleReport::new(&outcome.result, &outcome.charts, &config)?;
//!         println!("{}", report);
//!     }
//!     Err(e) if e.is_input_not_found() => println!("{}", e),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! # Configuration
//!
//! ```rust,ignore
//! use catalog_eda::config::*;
//! use catalog_eda::imputers::{ImputationPlan, ImputationRule};
//!
//! let config = PipelineConfig::builder()
//!     .drop_policy(DropPolicy::Lenient)           // Skip absent columns
//!     .recent_year_threshold(2018)                // Is_Recent = year >= 2018
//!     .top_countries(5)
//!     .imputation_plan(ImputationPlan::new(vec![
//!         ImputationRule::constant("country", "Unknown"),
//!         ImputationRule::mode("rating"),
//!     ]))
//!     .build()?;
//! ```

pub mod cleaner;
pub mod config;
pub mod error;
pub mod features;
pub mod imputers;
pub mod loader;
pub mod pipeline;
pub mod profiler;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::DataCleaner;
pub use config::{ConfigValidationError, DropPolicy, PipelineConfig, PipelineConfigBuilder};
pub use error::{EdaError, Result as EdaResult, ResultExt};
pub use imputers::{FillPolicy, ImputationPlan, ImputationRule, StatisticalImputer};
pub use loader::{load_catalog, load_catalog_from_str};
pub use pipeline::{
    AnalysisOutcome, AnalysisStage, ClosureProgressReporter, Pipeline, PipelineBuilder,
    ProgressReporter, ProgressUpdate, run,
};
pub use profiler::DataProfiler;
pub use reporting::{ChartData, ComprehensiveReport, ConsoleReport, ReportGenerator};
pub use types::{
    ColumnProfile, ColumnStatistics, ContentType, DatasetProfile, MissingValueEntry,
    MissingValueReport, PipelineResult, PipelineSummary,
};
