//! Release-year recency flag.

use crate::error::{EdaError, Result};
use crate::types::columns;
use crate::utils::int_values;
use polars::prelude::*;

/// Add the `Is_Recent` flag (Int32): 1 when `release_year >= threshold`,
/// otherwise 0. A missing release year counts as not recent.
///
/// Returns the table and the number of recent rows.
pub fn derive_recency_flag(mut df: DataFrame, threshold: i64) -> Result<(DataFrame, usize)> {
    let years = int_values(
        df.column(columns::RELEASE_YEAR)
            .map_err(|_| EdaError::ColumnNotFound(columns::RELEASE_YEAR.to_string()))?
            .as_materialized_series(),
    )?;

    let flags: Vec<i32> = years
        .iter()
        .map(|year| i32::from(year.is_some_and(|y| y >= threshold)))
        .collect();
    let recent = flags.iter().filter(|&&flag| flag == 1).count();

    df.with_column(Series::new(columns::IS_RECENT.into(), flags))?;
    Ok((df, recent))
}
