//! Main analysis pipeline module.
//!
//! This module provides the core `Pipeline` struct and builder for
//! orchestrating the cleaning and feature workflow.

use crate::cleaner::DataCleaner;
use crate::config::{ConfigValidationError, PipelineConfig};
use crate::error::{EdaError, Result, ResultExt};
use crate::features::{derive_duration_features, derive_recency_flag};
use crate::imputers::StatisticalImputer;
use crate::loader::load_catalog;
use crate::pipeline::progress::{
    AnalysisStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
use crate::profiler::{DataProfiler, compute_missing_report, describe, missing_counts};
use crate::reporting::{ChartData, ComprehensiveReport, ReportGenerator};
use crate::types::{PipelineResult, PipelineSummary};
use polars::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// The catalog analysis pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use catalog_eda::{Pipeline, PipelineConfig};
///
/// let outcome = Pipeline::builder()
///     .config(PipelineConfig::builder().recent_year_threshold(2018).build()?)
///     .on_progress(|update| {
///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
///     })
///     .build()?
///     .run()?;
/// ```
pub struct Pipeline {
    config: PipelineConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    cleaner: DataCleaner,
}

/// Result of a full run: the pipeline output plus the data assembled for reporting.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub result: PipelineResult,
    pub charts: ChartData,
    pub report: ComprehensiveReport,
}

static_assertions::assert_impl_all!(Pipeline: Send);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load the configured input file, process it and assemble the report data.
    ///
    /// # Errors
    ///
    /// Returns `InputNotFound` if the input file does not exist; every other
    /// error comes from a failed stage.
    pub fn run(&self) -> Result<AnalysisOutcome> {
        self.report_progress(ProgressUpdate::new(
            AnalysisStage::Loading,
            0.0,
            format!("Loading {}", self.config.input_path.display()),
        ));

        let df = match load_catalog(&self.config.input_path, self.config.infer_schema_length) {
            Ok(df) => df,
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                return Err(e);
            }
        };

        self.report_progress(ProgressUpdate::new(
            AnalysisStage::Loading,
            1.0,
            format!("Loaded {} rows x {} columns", df.height(), df.width()),
        ));

        let result = self.process_stages(df).and_then(|result| {
            self.report_progress(ProgressUpdate::new(
                AnalysisStage::Reporting,
                0.0,
                "Computing chart data...",
            ));
            let charts = ChartData::from_frame(
                &result.data,
                self.config.histogram_bins,
                self.config.top_countries,
            )
            .context("While computing chart data")?;
            let report = ReportGenerator::build_comprehensive_report(
                &self.config.input_path,
                None,
                &result,
                &charts,
            );
            Ok(AnalysisOutcome {
                result,
                charts,
                report,
            })
        });

        self.finish(result)
    }

    /// Run the cleaning and feature stages on an already loaded table.
    pub fn process(&self, df: DataFrame) -> Result<PipelineResult> {
        self.finish(self.process_stages(df))
    }

    fn finish<T>(&self, outcome: Result<T>) -> Result<T> {
        match outcome {
            Ok(value) => {
                self.report_progress(ProgressUpdate::complete("Pipeline completed successfully"));
                Ok(value)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn process_stages(&self, df: DataFrame) -> Result<PipelineResult> {
        let start_time = Instant::now();
        let config = &self.config;

        info!("Starting analysis pipeline...");

        let mut summary = PipelineSummary::new();
        summary.rows_processed = df.height();
        summary.columns_before = df.width();
        let mut processing_steps: Vec<String> = Vec::new();

        let raw_preview = df.head(Some(config.preview_rows));

        // Step 1: Deduplicate on the identifier
        self.report_progress(ProgressUpdate::new(
            AnalysisStage::Deduplication,
            0.0,
            format!("Removing duplicate '{}' rows...", config.id_column),
        ));
        info!("Step 1: Removing duplicate rows...");

        let (df, removed) = self.cleaner.deduplicate(df, &config.id_column)?;
        summary.duplicates_dropped = removed;
        processing_steps.push(format!(
            "Removed {} rows with duplicate '{}'",
            removed, config.id_column
        ));

        // Step 2: Drop unused columns
        self.report_progress(ProgressUpdate::new(
            AnalysisStage::ColumnPruning,
            0.0,
            "Dropping unused columns...",
        ));
        info!("Step 2: Dropping unused columns...");

        let (df, dropped) = self
            .cleaner
            .drop_columns(df, &config.drop_columns, config.drop_policy)?;
        for name in &config.drop_columns {
            if !dropped.contains(name) {
                summary.add_warning(format!("Column '{}' not present, nothing dropped", name));
            }
        }
        if !dropped.is_empty() {
            processing_steps.push(format!("Dropped columns: {}", dropped.join(", ")));
        }
        summary.dropped_columns = dropped;

        // Step 3: Profile and missing value report, before any imputation
        self.report_progress(ProgressUpdate::new(
            AnalysisStage::MissingValueAnalysis,
            0.0,
            "Profiling dataset...",
        ));
        info!("Step 3: Profiling dataset and counting missing values...");

        let profile = DataProfiler::profile_dataset(&df)
            .map_err(|e| EdaError::ProfilingFailed(e.to_string()))?;
        let statistics = describe(&df).map_err(|e| EdaError::ProfilingFailed(e.to_string()))?;
        let missing_report = compute_missing_report(&df);

        debug!("Shape after cleaning: {:?}", profile.shape);
        for entry in &missing_report.entries {
            debug!(
                "  {}: {} missing ({:.2}%)",
                entry.column, entry.missing_count, entry.missing_percent
            );
        }

        self.report_progress(ProgressUpdate::new(
            AnalysisStage::MissingValueAnalysis,
            1.0,
            format!(
                "{} missing cells across {} columns",
                missing_report.total_missing(),
                missing_report.entries.len()
            ),
        ));

        // Step 4: Impute
        info!("Step 4: Imputing missing values...");
        let total_rules = config.imputation_plan.rules.len();
        let (df, imputation_steps) = StatisticalImputer::apply_plan(
            df,
            &config.imputation_plan,
            &mut processing_steps,
            |i, rule| {
                self.report_progress(ProgressUpdate::with_items(
                    AnalysisStage::Imputation,
                    format!("Column: {}", rule.column),
                    i,
                    total_rules,
                    format!("Imputing '{}' with {}", rule.column, rule.policy),
                ));
            },
        )?;
        summary.cells_imputed = imputation_steps.iter().map(|s| s.filled_count).sum();
        let missing_after_imputation = missing_counts(&df);

        // Step 5: Derived features
        self.report_progress(ProgressUpdate::new(
            AnalysisStage::FeatureDerivation,
            0.0,
            "Deriving duration and recency features...",
        ));
        info!("Step 5: Deriving features...");

        let (df, duration_stats) = derive_duration_features(df)?;
        let unparsed = (duration_stats.movies - duration_stats.movies_parsed)
            + (duration_stats.tv_shows - duration_stats.tv_shows_parsed);
        if unparsed > 0 {
            warn!("{} durations did not match the expected pattern", unparsed);
            summary.add_warning(format!(
                "{} durations did not match the expected pattern",
                unparsed
            ));
        }
        processing_steps.push(format!(
            "Parsed duration into minutes for {} movies and seasons for {} TV shows",
            duration_stats.movies_parsed, duration_stats.tv_shows_parsed
        ));

        let (df, recent) = derive_recency_flag(df, config.recent_year_threshold)?;
        processing_steps.push(format!(
            "Flagged {} titles released in or after {} as recent",
            recent, config.recent_year_threshold
        ));

        summary.duration_features = duration_stats;
        summary.recent_titles = recent;
        summary.rows_after = df.height();
        summary.columns_after = df.width();
        summary.duration_ms = start_time.elapsed().as_millis() as u64;

        info!(
            "Pipeline finished in {} ms: {} rows, {} columns",
            summary.duration_ms, summary.rows_after, summary.columns_after
        );

        Ok(PipelineResult {
            raw_preview,
            profile,
            statistics,
            missing_report,
            imputation_steps,
            missing_after_imputation,
            data: df,
            processing_steps,
            summary,
        })
    }
}

/// Builder for [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<PipelineConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(PipelineBuilder: Send);

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter for receiving updates during processing.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<Pipeline, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(Pipeline {
            config,
            progress_reporter: self.progress_reporter,
            cleaner: DataCleaner,
        })
    }
}

/// Run the full analysis described by `config`.
///
/// `InputNotFound` is the only error callers are expected to recover from.
pub fn run(config: &PipelineConfig) -> Result<AnalysisOutcome> {
    Pipeline::builder()
        .config(config.clone())
        .build()
        .map_err(|e| EdaError::InvalidConfig(e.to_string()))?
        .run()
}
