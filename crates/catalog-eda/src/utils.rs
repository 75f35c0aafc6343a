//! Shared utilities for the catalog analysis pipeline.
//!
//! This module contains common helper functions used across multiple modules
//! to reduce code duplication and ensure consistency.

use polars::prelude::*;
use rand::prelude::*;
use std::collections::{BTreeMap, HashMap};

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

// =============================================================================
// Series Access Utilities
// =============================================================================

/// Read a Series as optional strings, casting non-string dtypes.
pub fn string_values(series: &Series) -> PolarsResult<Vec<Option<String>>> {
    let str_series = series.cast(&DataType::String)?;
    let values = str_series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect();
    Ok(values)
}

/// Read a Series as optional floats, casting non-float dtypes.
///
/// Values that cannot be represented as a float become `None`.
pub fn float_values(series: &Series) -> PolarsResult<Vec<Option<f64>>> {
    let float_series = series.cast(&DataType::Float64)?;
    Ok(float_series.f64()?.into_iter().collect())
}

/// Read a Series as optional 64-bit integers, casting non-integer dtypes.
pub fn int_values(series: &Series) -> PolarsResult<Vec<Option<i64>>> {
    let int_series = series.cast(&DataType::Int64)?;
    Ok(int_series.i64()?.into_iter().collect())
}

// =============================================================================
// Series Statistics Utilities
// =============================================================================

/// Calculate the mode (most frequent value) of a Series as a string.
///
/// Ties resolve to the lexicographically smallest value. Returns `None` when
/// the Series has no non-null values.
pub fn string_mode(series: &Series) -> Option<String> {
    let str_series = series.cast(&DataType::String).ok()?;
    let str_chunked = str_series.str().ok()?;

    let mut value_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for val in str_chunked.into_iter().flatten() {
        *value_counts.entry(val).or_insert(0) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for (val, count) in value_counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((val, count));
        }
    }

    best.map(|(val, _)| val.to_string())
}

/// Count occurrences of each value, most frequent first.
///
/// Ties keep the order in which values were first seen.
pub fn ordered_value_counts<I, S>(values: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for value in values {
        let value = value.as_ref();
        match first_seen.get(value) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                first_seen.insert(value.to_string(), counts.len());
                counts.push((value.to_string(), 1));
            }
        }
    }

    // stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Fill null values in a Series with a string, producing a String Series.
///
/// Non-null values are kept (cast to their string form).
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let str_series = series.cast(&DataType::String)?;
    let filled: StringChunked = str_series
        .str()?
        .into_iter()
        .map(|v| Some(v.unwrap_or(fill_value)))
        .collect();

    Ok(filled.with_name(series.name().clone()).into_series())
}

// =============================================================================
// Sampling Utilities
// =============================================================================

/// Pick up to `n` distinct row indices from `0..height`, returned in ascending order.
///
/// The same seed always yields the same rows.
pub fn sample_row_indices(height: usize, n: usize, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let indices: Vec<usize> = (0..height).collect();
    let mut sampled: Vec<usize> = indices
        .choose_multiple(&mut rng, n.min(height))
        .copied()
        .collect();
    sampled.sort_unstable();
    sampled
}

/// Select the given rows of a DataFrame.
pub fn take_rows(df: &DataFrame, indices: &[usize]) -> PolarsResult<DataFrame> {
    let idx: Vec<IdxSize> = indices.iter().map(|&i| i as IdxSize).collect();
    let idx = IdxCa::from_vec("idx".into(), idx);
    df.take(&idx)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_string_mode() {
        let series = Series::new("test".into(), &["a", "b", "a", "c", "a"]);
        assert_eq!(string_mode(&series), Some("a".to_string()));
    }

    #[test]
    fn test_string_mode_tie_takes_smallest() {
        let series = Series::new("rating".into(), &["TV-MA", "PG", "TV-MA", "PG", "R"]);
        assert_eq!(string_mode(&series), Some("PG".to_string()));
    }

    #[test]
    fn test_string_mode_ignores_nulls() {
        let series = Series::new("test".into(), &[None, None, Some("x"), None]);
        assert_eq!(string_mode(&series), Some("x".to_string()));

        let empty = Series::new("test".into(), &[Option::<&str>::None, None]);
        assert_eq!(string_mode(&empty), None);
    }

    #[test]
    fn test_ordered_value_counts() {
        let counts = ordered_value_counts(["b", "a", "b", "c", "a", "d"]);
        assert_eq!(
            counts,
            vec![
                ("b".to_string(), 2),
                ("a".to_string(), 2),
                ("c".to_string(), 1),
                ("d".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_fill_string_nulls() {
        let series = Series::new("country".into(), &[Some("India"), None, Some("Japan")]);
        let filled = fill_string_nulls(&series, "Unknown").unwrap();
        let values: Vec<Option<&str>> = filled.str().unwrap().into_iter().collect();

        assert_eq!(values, vec![Some("India"), Some("Unknown"), Some("Japan")]);
        assert_eq!(filled.name().as_str(), "country");
    }

    #[test]
    fn test_sample_row_indices_deterministic() {
        let a = sample_row_indices(100, 5, 42);
        let b = sample_row_indices(100, 5, 42);
        assert_eq!(a, b);
        assert_eq!(a.len(), 5);
        assert!(a.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(sample_row_indices(3, 5, 1).len(), 3);
    }

    #[test]
    fn test_take_rows() {
        let df = df![
            "id" => ["s1", "s2", "s3"],
        ]
        .unwrap();
        let taken = take_rows(&df, &[0, 2]).unwrap();
        let ids: Vec<Option<&str>> = taken
            .column("id")
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(ids, vec![Some("s1"), Some("s3")]);
    }
}
