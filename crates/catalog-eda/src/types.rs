//! Core types shared across the analysis pipeline.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Column names of the catalog dataset and of the derived features.
pub mod columns {
    pub const SHOW_ID: &str = "show_id";
    pub const TYPE: &str = "type";
    pub const TITLE: &str = "title";
    pub const DIRECTOR: &str = "director";
    pub const CAST: &str = "cast";
    pub const COUNTRY: &str = "country";
    pub const DATE_ADDED: &str = "date_added";
    pub const RELEASE_YEAR: &str = "release_year";
    pub const RATING: &str = "rating";
    pub const DURATION: &str = "duration";
    pub const DESCRIPTION: &str = "description";

    pub const DURATION_MINUTES: &str = "duration_minutes";
    pub const SEASONS: &str = "seasons";
    pub const IS_RECENT: &str = "Is_Recent";
}

/// Kind of catalog entry, read from the `type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    Movie,
    TvShow,
    Other,
}

impl ContentType {
    /// Map a raw `type` cell to a content type. Matching is exact.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("Movie") => Self::Movie,
            Some("TV Show") => Self::TvShow,
            _ => Self::Other,
        }
    }
}

/// One line of the missing value report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingValueEntry {
    pub column: String,
    pub missing_count: usize,
    /// Percentage of all rows (0.0 - 100.0).
    pub missing_percent: f64,
}

/// Columns with missing entries, most incomplete first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissingValueReport {
    pub total_rows: usize,
    pub entries: Vec<MissingValueEntry>,
}

impl MissingValueReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<&MissingValueEntry> {
        self.entries.iter().find(|entry| entry.column == column)
    }

    /// Total number of missing cells across all reported columns.
    pub fn total_missing(&self) -> usize {
        self.entries.iter().map(|entry| entry.missing_count).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: String,
    pub non_null_count: usize,
    pub null_count: usize,
    pub null_percentage: f64,
    pub unique_count: usize,
}

/// Structural view of a table: shape, per-column dtype and completeness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub shape: (usize, usize),
    pub column_profiles: Vec<ColumnProfile>,
    pub estimated_size_bytes: usize,
}

/// Descriptive statistics for a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub mean: f64,
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Descriptive statistics for a text or categorical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    pub unique: usize,
    pub top: String,
    pub freq: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnSummaryKind {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    pub name: String,
    /// Number of non-missing values.
    pub count: usize,
    pub summary: ColumnSummaryKind,
}

/// Record of one imputation rule applied to the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImputationStep {
    pub column: String,
    pub policy: String,
    pub fill_value: String,
    pub filled_count: usize,
}

/// Outcome of the duration feature derivation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationFeatureStats {
    pub movies: usize,
    pub movies_parsed: usize,
    pub tv_shows: usize,
    pub tv_shows_parsed: usize,
    pub other_rows: usize,
}

/// Counters describing what the pipeline did.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub duration_ms: u64,
    pub rows_processed: usize,
    pub duplicates_dropped: usize,
    pub rows_after: usize,
    pub columns_before: usize,
    pub columns_after: usize,
    pub dropped_columns: Vec<String>,
    pub cells_imputed: usize,
    pub recent_titles: usize,
    pub duration_features: DurationFeatureStats,
    pub warnings: Vec<String>,
}

impl PipelineSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Percentage of input rows removed as duplicates.
    pub fn duplicates_percentage(&self) -> f64 {
        if self.rows_processed == 0 {
            0.0
        } else {
            (self.duplicates_dropped as f64 / self.rows_processed as f64) * 100.0
        }
    }
}

/// Everything the cleaning and feature pipeline produces.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// First rows of the table as loaded, before any cleaning.
    pub raw_preview: DataFrame,
    /// Structure of the table after deduplication and column drop.
    pub profile: DatasetProfile,
    /// Descriptive statistics computed before imputation.
    pub statistics: Vec<ColumnStatistics>,
    /// Missing value report computed before imputation.
    pub missing_report: MissingValueReport,
    pub imputation_steps: Vec<ImputationStep>,
    /// Missing counts for every column right after imputation.
    pub missing_after_imputation: Vec<(String, usize)>,
    /// Final table with derived features.
    pub data: DataFrame,
    pub processing_steps: Vec<String>,
    pub summary: PipelineSummary,
}
