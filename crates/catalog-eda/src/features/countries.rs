//! Country mention counting for the country ranking.

use crate::error::{EdaError, Result};
use crate::types::columns;
use crate::utils::{ordered_value_counts, string_values};
use polars::prelude::*;

/// Split a comma separated country cell into trimmed, non-empty names.
pub fn split_countries(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(',').map(str::trim).filter(|name| !name.is_empty())
}

/// Rank country mentions across all rows and keep the `n` most frequent.
///
/// A row listing several countries counts once for each. Equal counts are
/// ordered by first appearance. The table is not modified.
pub fn top_countries(df: &DataFrame, n: usize) -> Result<Vec<(String, usize)>> {
    let cells = string_values(
        df.column(columns::COUNTRY)
            .map_err(|_| EdaError::ColumnNotFound(columns::COUNTRY.to_string()))?
            .as_materialized_series(),
    )?;

    let mentions = cells.iter().flatten().flat_map(|cell| split_countries(cell));
    let mut counts = ordered_value_counts(mentions);
    counts.truncate(n);
    Ok(counts)
}
