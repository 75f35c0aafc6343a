//! Data profiling module for dataset analysis.
//!
//! This module provides functionality for profiling datasets, including:
//! - Structure overview (dtype, completeness, cardinality per column)
//! - Missing value reporting
//! - Descriptive statistics

mod missing;
mod statistics;

use crate::types::{ColumnProfile, DatasetProfile};
use anyhow::Result;
use polars::prelude::*;

pub use missing::{compute_missing_report, missing_counts};
pub use statistics::{describe, linear_quantile, pearson_correlation, sample_std};

/// Data profiler for analyzing dataset structure.
pub struct DataProfiler;

impl DataProfiler {
    /// Profile an entire dataset: shape, memory estimate and one
    /// [`ColumnProfile`] per column in table order.
    pub fn profile_dataset(df: &DataFrame) -> Result<DatasetProfile> {
        let column_profiles = df
            .get_columns()
            .iter()
            .map(|col| Self::profile_column(col, df.height()))
            .collect::<Result<Vec<_>>>()?;

        Ok(DatasetProfile {
            shape: df.shape(),
            column_profiles,
            estimated_size_bytes: df.estimated_size(),
        })
    }

    fn profile_column(col: &Column, total_rows: usize) -> Result<ColumnProfile> {
        let series = col.as_materialized_series();
        let null_count = series.null_count();
        let null_percentage = if total_rows > 0 {
            (null_count as f64 / total_rows as f64) * 100.0
        } else {
            0.0
        };
        // n_unique counts null as a value; report distinct non-null values
        let unique_count = series.drop_nulls().n_unique()?;

        Ok(ColumnProfile {
            name: series.name().to_string(),
            dtype: series.dtype().to_string(),
            non_null_count: total_rows - null_count,
            null_count,
            null_percentage,
            unique_count,
        })
    }
}
