//! JSON report assembly and file output.

use super::charts::ChartData;
use crate::error::{EdaError, Result, ResultExt};
use crate::types::{
    ColumnStatistics, DatasetProfile, ImputationStep, MissingValueReport, PipelineResult,
    PipelineSummary,
};
use chrono::Local;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

// ============================================================================
// Comprehensive Report Types
// ============================================================================

/// Everything one analysis run produced, for `--json` and `--emit-report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComprehensiveReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    pub input_file: String,
    /// Path of the exported cleaned dataset, if one was written
    pub output_file: Option<String>,

    pub summary: PipelineSummary,
    pub processing_steps: Vec<String>,

    pub missing_report: MissingValueReport,
    pub imputation_steps: Vec<ImputationStep>,
    pub missing_after_imputation: Vec<(String, usize)>,

    /// Structure of the table after deduplication and column drop
    pub dataset_profile: DatasetProfile,
    pub statistics: Vec<ColumnStatistics>,

    pub charts: ChartData,
}

/// Writes reports and the cleaned dataset to an output directory.
pub struct ReportGenerator {
    output_dir: PathBuf,
    output_name: Option<String>,
}

impl ReportGenerator {
    pub fn new(output_dir: PathBuf, output_name: Option<String>) -> Self {
        Self {
            output_dir,
            output_name,
        }
    }

    /// Assemble the report for a finished run.
    pub fn build_comprehensive_report(
        input_file: &Path,
        output_file: Option<&Path>,
        result: &PipelineResult,
        charts: &ChartData,
    ) -> ComprehensiveReport {
        ComprehensiveReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.display().to_string(),
            output_file: output_file.map(|p| p.display().to_string()),
            summary: result.summary.clone(),
            processing_steps: result.processing_steps.clone(),
            missing_report: result.missing_report.clone(),
            imputation_steps: result.imputation_steps.clone(),
            missing_after_imputation: result.missing_after_imputation.clone(),
            dataset_profile: result.profile.clone(),
            statistics: result.statistics.clone(),
            charts: charts.clone(),
        }
    }

    /// Write `report` as pretty JSON to `<output_dir>/<base_name>_report.json`.
    pub fn write_report_to_file(
        &self,
        report: &ComprehensiveReport,
        report_base_name: &str,
    ) -> Result<PathBuf> {
        let json = serde_json::to_string_pretty(report)
            .map_err(|e| EdaError::ReportGenerationFailed(e.to_string()))?;

        fs::create_dir_all(&self.output_dir)?;
        let report_path = self
            .output_dir
            .join(format!("{}_report.json", report_base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(json.as_bytes())?;

        info!("Report saved: {}", report_path.display());
        Ok(report_path)
    }

    /// Write the cleaned table as CSV.
    ///
    /// The file is named after the configured output name, or
    /// `cleaned_<input_stem>.csv` when none is set.
    pub fn export_dataset(&self, df: &mut DataFrame, input_stem: &str) -> Result<PathBuf> {
        let file_name = self
            .output_name
            .clone()
            .unwrap_or_else(|| format!("cleaned_{}", input_stem));

        fs::create_dir_all(&self.output_dir)?;
        let output_path = self.output_dir.join(format!("{}.csv", file_name));
        let mut file = File::create(&output_path)?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .with_quote_char(b'"')
            .finish(df)
            .context(format!("Failed to write {}", output_path.display()))?;

        info!("Dataset saved: {}", output_path.display());
        Ok(output_path)
    }
}

/// File stem of the input path, used to name output files.
pub fn input_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string())
}
