//! Configuration types for the catalog analysis pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup.

use crate::error::{EdaError, Result, ResultExt};
use crate::imputers::ImputationPlan;
use crate::types::columns;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to do when a column scheduled for removal is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DropPolicy {
    /// Fail with `ColumnNotFound`
    #[default]
    Strict,
    /// Log a warning and leave the table unchanged
    Lenient,
}

/// Configuration for the analysis pipeline.
///
/// Use [`PipelineConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use catalog_eda::config::{DropPolicy, PipelineConfig};
///
/// let config = PipelineConfig::builder()
///     .input_path("data/netflix_titles.csv")
///     .drop_policy(DropPolicy::Lenient)
///     .recent_year_threshold(2018)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// CSV file to analyse.
    /// Default: "netflix_titles.csv"
    pub input_path: PathBuf,

    /// Column used as the unique row identifier for deduplication.
    /// Default: "show_id"
    pub id_column: String,

    /// Columns removed right after deduplication.
    /// Default: ["description"]
    pub drop_columns: Vec<String>,

    /// Behavior when a column in `drop_columns` is missing.
    /// Default: Strict
    pub drop_policy: DropPolicy,

    /// Ordered per-column fill rules.
    /// Default: the catalog plan (country, director, cast, rating, duration, date_added)
    pub imputation_plan: ImputationPlan,

    /// Rows released in or after this year are flagged as recent.
    /// Default: 2015
    pub recent_year_threshold: i64,

    /// Number of countries kept in the country ranking.
    /// Default: 10
    pub top_countries: usize,

    /// Number of equal-width bins in the release year histogram.
    /// Default: 30
    pub histogram_bins: usize,

    /// Number of raw rows shown in the preview section.
    /// Default: 10
    pub preview_rows: usize,

    /// Number of randomly sampled rows in the feature previews.
    /// Default: 5
    pub sample_rows: usize,

    /// Seed for the feature preview sampler.
    /// Default: 42
    pub sample_seed: u64,

    /// Rows scanned for CSV schema inference. `None` scans the whole file.
    /// Default: Some(10_000)
    pub infer_schema_length: Option<usize>,

    /// Output directory for reports and exported data.
    /// Default: "./outputs"
    pub output_dir: PathBuf,

    /// Custom name (without extension) for the exported dataset.
    /// If None, uses "cleaned_<input stem>".
    /// Default: None
    pub output_name: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("netflix_titles.csv"),
            id_column: columns::SHOW_ID.to_string(),
            drop_columns: vec![columns::DESCRIPTION.to_string()],
            drop_policy: DropPolicy::default(),
            imputation_plan: ImputationPlan::catalog_default(),
            recent_year_threshold: 2015,
            top_countries: 10,
            histogram_bins: 30,
            preview_rows: 10,
            sample_rows: 5,
            sample_seed: 42,
            infer_schema_length: Some(10_000),
            output_dir: PathBuf::from("./outputs"),
            output_name: None,
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Load a configuration serialized as JSON and validate it.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `Json` if it does not
    /// deserialize, and `InvalidConfig` if validation fails. A missing config
    /// file is never reported as `InputNotFound`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(EdaError::from)
            .context(format!("Failed to read config {}", path.display()))?;
        let config: PipelineConfig = serde_json::from_str(&content)?;
        config
            .validate()
            .map_err(|e| EdaError::InvalidConfig(e.to_string()))?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> std::result::Result<(), ConfigValidationError> {
        if self.id_column.trim().is_empty() {
            return Err(ConfigValidationError::EmptyColumnName(
                "id_column".to_string(),
            ));
        }

        if let Some(rule) = self
            .imputation_plan
            .rules
            .iter()
            .find(|rule| rule.column.trim().is_empty())
        {
            return Err(ConfigValidationError::EmptyColumnName(format!(
                "imputation rule ({})",
                rule.policy
            )));
        }

        for (field, value) in [
            ("top_countries", self.top_countries),
            ("histogram_bins", self.histogram_bins),
            ("preview_rows", self.preview_rows),
        ] {
            if value == 0 {
                return Err(ConfigValidationError::InvalidCount {
                    field: field.to_string(),
                    value,
                });
            }
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Column name for '{0}' must not be empty")]
    EmptyColumnName(String),

    #[error("Invalid value for '{field}': {value} (must be at least 1)")]
    InvalidCount { field: String, value: usize },
}

/// Builder for [`PipelineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    input_path: Option<PathBuf>,
    id_column: Option<String>,
    drop_columns: Option<Vec<String>>,
    drop_policy: Option<DropPolicy>,
    imputation_plan: Option<ImputationPlan>,
    recent_year_threshold: Option<i64>,
    top_countries: Option<usize>,
    histogram_bins: Option<usize>,
    preview_rows: Option<usize>,
    sample_rows: Option<usize>,
    sample_seed: Option<u64>,
    infer_schema_length: Option<Option<usize>>,
    output_dir: Option<PathBuf>,
    output_name: Option<String>,
}

impl PipelineConfigBuilder {
    /// Set the CSV file to analyse.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the identifier column used for deduplication.
    pub fn id_column(mut self, column: impl Into<String>) -> Self {
        self.id_column = Some(column.into());
        self
    }

    /// Replace the list of columns dropped after deduplication.
    pub fn drop_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.drop_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the behavior for dropping absent columns.
    pub fn drop_policy(mut self, policy: DropPolicy) -> Self {
        self.drop_policy = Some(policy);
        self
    }

    /// Replace the imputation plan.
    pub fn imputation_plan(mut self, plan: ImputationPlan) -> Self {
        self.imputation_plan = Some(plan);
        self
    }

    /// Set the first release year counted as recent.
    pub fn recent_year_threshold(mut self, year: i64) -> Self {
        self.recent_year_threshold = Some(year);
        self
    }

    /// Set how many countries the ranking keeps.
    pub fn top_countries(mut self, n: usize) -> Self {
        self.top_countries = Some(n);
        self
    }

    /// Set the number of release year histogram bins.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Set the number of raw preview rows.
    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }

    /// Set the number of sampled rows in feature previews.
    pub fn sample_rows(mut self, rows: usize) -> Self {
        self.sample_rows = Some(rows);
        self
    }

    /// Set the seed used when sampling preview rows.
    pub fn sample_seed(mut self, seed: u64) -> Self {
        self.sample_seed = Some(seed);
        self
    }

    /// Set how many rows CSV schema inference scans (`None` = all).
    pub fn infer_schema_length(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_length = Some(rows);
        self
    }

    /// Set the output directory for reports and exported data.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set a custom name (without extension) for the exported dataset.
    pub fn output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `PipelineConfig` or an error if validation fails.
    pub fn build(self) -> std::result::Result<PipelineConfig, ConfigValidationError> {
        let defaults = PipelineConfig::default();
        let config = PipelineConfig {
            input_path: self.input_path.unwrap_or(defaults.input_path),
            id_column: self.id_column.unwrap_or(defaults.id_column),
            drop_columns: self.drop_columns.unwrap_or(defaults.drop_columns),
            drop_policy: self.drop_policy.unwrap_or_default(),
            imputation_plan: self.imputation_plan.unwrap_or(defaults.imputation_plan),
            recent_year_threshold: self
                .recent_year_threshold
                .unwrap_or(defaults.recent_year_threshold),
            top_countries: self.top_countries.unwrap_or(defaults.top_countries),
            histogram_bins: self.histogram_bins.unwrap_or(defaults.histogram_bins),
            preview_rows: self.preview_rows.unwrap_or(defaults.preview_rows),
            sample_rows: self.sample_rows.unwrap_or(defaults.sample_rows),
            sample_seed: self.sample_seed.unwrap_or(defaults.sample_seed),
            infer_schema_length: self
                .infer_schema_length
                .unwrap_or(defaults.infer_schema_length),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            output_name: self.output_name,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.input_path, PathBuf::from("netflix_titles.csv"));
        assert_eq!(config.id_column, "show_id");
        assert_eq!(config.drop_columns, vec!["description".to_string()]);
        assert_eq!(config.drop_policy, DropPolicy::Strict);
        assert_eq!(config.recent_year_threshold, 2015);
        assert_eq!(config.top_countries, 10);
        assert_eq!(config.histogram_bins, 30);
        assert_eq!(config.imputation_plan.rules.len(), 6);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let config = PipelineConfig::builder().build().unwrap();
        assert_eq!(config.preview_rows, 10);
        assert_eq!(config.sample_rows, 5);
        assert_eq!(config.sample_seed, 42);
        assert_eq!(config.infer_schema_length, Some(10_000));
    }

    #[test]
    fn test_builder_custom_values() {
        let config = PipelineConfig::builder()
            .input_path("data/titles.csv")
            .id_column("id")
            .drop_columns(["description", "title"])
            .drop_policy(DropPolicy::Lenient)
            .recent_year_threshold(2020)
            .top_countries(3)
            .infer_schema_length(None)
            .build()
            .unwrap();

        assert_eq!(config.input_path, PathBuf::from("data/titles.csv"));
        assert_eq!(config.id_column, "id");
        assert_eq!(config.drop_columns.len(), 2);
        assert_eq!(config.drop_policy, DropPolicy::Lenient);
        assert_eq!(config.recent_year_threshold, 2020);
        assert_eq!(config.top_countries, 3);
        assert_eq!(config.infer_schema_length, None);
    }

    #[test]
    fn test_validation_empty_id_column() {
        let result = PipelineConfig::builder().id_column("  ").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyColumnName(_)
        ));
    }

    #[test]
    fn test_validation_zero_counts() {
        let result = PipelineConfig::builder().top_countries(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidCount { value: 0, .. }
        ));

        let result = PipelineConfig::builder().histogram_bins(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"recent_year_threshold": 2018, "drop_policy": "Lenient"}"#)
                .unwrap();

        assert_eq!(config.recent_year_threshold, 2018);
        assert_eq!(config.drop_policy, DropPolicy::Lenient);
        assert_eq!(config.id_column, "show_id");
        assert_eq!(config.imputation_plan, ImputationPlan::catalog_default());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = PipelineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: PipelineConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config.id_column, deserialized.id_column);
        assert_eq!(config.drop_policy, deserialized.drop_policy);
        assert_eq!(
            config.imputation_plan.rules.len(),
            deserialized.imputation_plan.rules.len()
        );
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = PipelineConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(!err.is_input_not_found());
        assert!(!err.is_recoverable());
        assert_eq!(err.error_code(), "IO_ERROR");
        assert!(err.to_string().contains("here.json"));
    }
}
