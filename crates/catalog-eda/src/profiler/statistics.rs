//! Descriptive statistics for column profiling.

use crate::types::{CategoricalSummary, ColumnStatistics, ColumnSummaryKind, NumericSummary};
use crate::utils::{float_values, is_numeric_dtype, ordered_value_counts, string_values};
use anyhow::Result;
use polars::prelude::*;

/// Describe every column of a table, in table order.
///
/// Numeric columns get count, mean, sample standard deviation, min,
/// quartiles and max. All other columns get count, number of distinct
/// values, the most frequent value and its frequency.
pub fn describe(df: &DataFrame) -> Result<Vec<ColumnStatistics>> {
    df.get_columns()
        .iter()
        .map(|col| describe_series(col.as_materialized_series()))
        .collect()
}

fn describe_series(series: &Series) -> Result<ColumnStatistics> {
    let name = series.name().to_string();

    if is_numeric_dtype(series.dtype()) {
        let mut values: Vec<f64> = float_values(series)?
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect();
        let count = values.len();
        if count == 0 {
            return Ok(ColumnStatistics {
                name,
                count,
                summary: ColumnSummaryKind::Empty,
            });
        }

        values.sort_by(|a, b| a.total_cmp(b));
        let mean = values.iter().sum::<f64>() / count as f64;

        return Ok(ColumnStatistics {
            name,
            count,
            summary: ColumnSummaryKind::Numeric(NumericSummary {
                mean,
                std: sample_std(&values),
                min: values[0],
                q25: linear_quantile(&values, 0.25),
                median: linear_quantile(&values, 0.5),
                q75: linear_quantile(&values, 0.75),
                max: values[count - 1],
            }),
        });
    }

    let values: Vec<String> = string_values(series)?.into_iter().flatten().collect();
    let count = values.len();
    let counts = ordered_value_counts(&values);

    let summary = match counts.first() {
        Some((top, freq)) => ColumnSummaryKind::Categorical(CategoricalSummary {
            unique: counts.len(),
            top: top.clone(),
            freq: *freq,
        }),
        None => ColumnSummaryKind::Empty,
    };

    Ok(ColumnStatistics {
        name,
        count,
        summary,
    })
}

/// Quantile of already sorted values using linear interpolation between
/// the two closest ranks. Returns NaN for an empty slice.
pub fn linear_quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

/// Sample standard deviation (n - 1 denominator).
///
/// `None` for fewer than two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);

    Some(variance.sqrt())
}

/// Pearson correlation over the positions where both values are present.
///
/// `None` when fewer than two complete pairs exist or either side has zero
/// variance over those pairs.
pub fn pearson_correlation(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) if !a.is_nan() && !b.is_nan() => Some((*a, *b)),
            _ => None,
        })
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}
