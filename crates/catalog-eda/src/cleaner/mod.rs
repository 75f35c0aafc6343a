//! Data cleaning module for catalog datasets.
//!
//! This module provides functionality for:
//! - Removing rows with a duplicate identifier (first occurrence wins)
//! - Dropping columns that the analysis does not use

use crate::config::DropPolicy;
use crate::error::{EdaError, Result};
use polars::prelude::*;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Data cleaner for the structural cleaning stages.
pub struct DataCleaner;

impl DataCleaner {
    /// Remove every row whose `key_column` value was already seen.
    ///
    /// Survivors keep their original order. Missing keys count as one shared
    /// value. Returns the deduplicated table and the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns `ColumnNotFound` if `key_column` is absent.
    pub fn deduplicate(&self, df: DataFrame, key_column: &str) -> Result<(DataFrame, usize)> {
        let key = df
            .column(key_column)
            .map_err(|_| EdaError::ColumnNotFound(key_column.to_string()))?
            .as_materialized_series()
            .cast(&DataType::String)?;

        let mut seen: HashSet<Option<&str>> = HashSet::with_capacity(df.height());
        let keep: Vec<bool> = key.str()?.into_iter().map(|k| seen.insert(k)).collect();

        let before = df.height();
        let mask = BooleanChunked::from_slice("keep".into(), &keep);
        let deduped = df.filter(&mask)?;
        let removed = before - deduped.height();

        if removed > 0 {
            info!(
                "Removed {} rows with duplicate '{}' ({:.1}%)",
                removed,
                key_column,
                (removed as f64 / before as f64) * 100.0
            );
        } else {
            debug!("No duplicate '{}' values found", key_column);
        }

        Ok((deduped, removed))
    }

    /// Remove the named columns in order.
    ///
    /// Returns the table and the names that were actually dropped.
    ///
    /// # Errors
    ///
    /// With [`DropPolicy::Strict`], returns `ColumnNotFound` for the first
    /// absent column. With [`DropPolicy::Lenient`], absent columns are skipped.
    pub fn drop_columns(
        &self,
        mut df: DataFrame,
        columns: &[String],
        policy: DropPolicy,
    ) -> Result<(DataFrame, Vec<String>)> {
        let mut dropped = Vec::with_capacity(columns.len());

        for name in columns {
            if df.column(name).is_err() {
                match policy {
                    DropPolicy::Strict => return Err(EdaError::ColumnNotFound(name.clone())),
                    DropPolicy::Lenient => {
                        warn!("Column '{}' not present, nothing to drop", name);
                        continue;
                    }
                }
            }

            df = df.drop(name)?;
            debug!("Dropped column '{}'", name);
            dropped.push(name.clone());
        }

        Ok((df, dropped))
    }
}
