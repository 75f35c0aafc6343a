//! Data behind the five summary figures.
//!
//! Nothing here draws anything; each struct carries exactly what a renderer
//! needs (counts, bin edges, quartiles, correlation coefficients).

use crate::error::{EdaError, Result};
use crate::features::top_countries;
use crate::profiler::{linear_quantile, pearson_correlation};
use crate::types::{ContentType, columns};
use crate::utils::{float_values, ordered_value_counts, string_values};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Columns of the correlation heatmap, in display order.
pub const CORRELATION_COLUMNS: [&str; 4] = [
    columns::RELEASE_YEAR,
    columns::DURATION_MINUTES,
    columns::SEASONS,
    columns::IS_RECENT,
];

/// Equal-width histogram. `edges` has `counts.len() + 1` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins spanning their min and max.
    ///
    /// Every bin is half-open except the last, which also holds the maximum.
    /// When all values are equal the range is widened by 0.5 on each side.
    /// Returns `None` for no values or zero bins.
    pub fn from_values(values: &[f64], bins: usize) -> Option<Self> {
        if values.is_empty() || bins == 0 {
            return None;
        }

        let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min == max {
            min -= 0.5;
            max += 0.5;
        }

        let width = (max - min) / bins as f64;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| if i == bins { max } else { min + width * i as f64 })
            .collect();

        let mut counts = vec![0usize; bins];
        for &value in values {
            let idx = (((value - min) / (max - min)) * bins as f64) as usize;
            counts[idx.min(bins - 1)] += 1;
        }

        Some(Self { edges, counts })
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Five-number box plot summary of one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStats {
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest value within 1.5 IQR below q1.
    pub lower_whisker: f64,
    /// Largest value within 1.5 IQR above q3.
    pub upper_whisker: f64,
    pub outliers: usize,
}

impl BoxStats {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let q1 = linear_quantile(&sorted, 0.25);
        let median = linear_quantile(&sorted, 0.5);
        let q3 = linear_quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        let inside: Vec<f64> = sorted
            .iter()
            .copied()
            .filter(|v| *v >= low_fence && *v <= high_fence)
            .collect();
        // the quartiles always lie inside the fences, so inside is never empty
        let lower_whisker = inside.first().copied().unwrap_or(q1);
        let upper_whisker = inside.last().copied().unwrap_or(q3);

        Some(Self {
            count: sorted.len(),
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers: sorted.len() - inside.len(),
        })
    }
}

/// Movie durations grouped by the recency flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationByRecency {
    /// Movies released before the threshold (`Is_Recent` = 0).
    pub older: Option<BoxStats>,
    /// Movies released in or after the threshold (`Is_Recent` = 1).
    pub recent: Option<BoxStats>,
}

/// Pairwise Pearson coefficients; `None` where the correlation is undefined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values[i][j]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// Rows per content type, most frequent first.
    pub type_counts: Vec<(String, usize)>,
    pub release_year_histogram: Option<Histogram>,
    pub top_countries: Vec<(String, usize)>,
    pub movie_duration_by_recency: DurationByRecency,
    pub correlation: CorrelationMatrix,
}

fn column_series<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    df.column(name)
        .map(|col| col.as_materialized_series())
        .map_err(|_| EdaError::ColumnNotFound(name.to_string()))
}

impl ChartData {
    /// Compute all figure data from the final feature table.
    pub fn from_frame(df: &DataFrame, histogram_bins: usize, top_n: usize) -> Result<Self> {
        let types = string_values(column_series(df, columns::TYPE)?)?;
        let type_counts = ordered_value_counts(types.iter().flatten());

        let years: Vec<f64> = float_values(column_series(df, columns::RELEASE_YEAR)?)?
            .into_iter()
            .flatten()
            .collect();
        let release_year_histogram = Histogram::from_values(&years, histogram_bins);

        let countries = top_countries(df, top_n)?;
        let movie_duration_by_recency = Self::duration_by_recency(df, &types)?;
        let correlation = Self::correlation_matrix(df)?;

        Ok(Self {
            type_counts,
            release_year_histogram,
            top_countries: countries,
            movie_duration_by_recency,
            correlation,
        })
    }

    fn duration_by_recency(df: &DataFrame, types: &[Option<String>]) -> Result<DurationByRecency> {
        let minutes = float_values(column_series(df, columns::DURATION_MINUTES)?)?;
        let recent = float_values(column_series(df, columns::IS_RECENT)?)?;

        let mut older_values = Vec::new();
        let mut recent_values = Vec::new();
        for ((kind, minutes), flag) in types.iter().zip(&minutes).zip(&recent) {
            if ContentType::from_label(kind.as_deref()) != ContentType::Movie {
                continue;
            }
            match (minutes, flag) {
                (Some(m), Some(f)) if *f == 1.0 => recent_values.push(*m),
                (Some(m), Some(_)) => older_values.push(*m),
                _ => {}
            }
        }

        Ok(DurationByRecency {
            older: BoxStats::from_values(&older_values),
            recent: BoxStats::from_values(&recent_values),
        })
    }

    fn correlation_matrix(df: &DataFrame) -> Result<CorrelationMatrix> {
        let data = CORRELATION_COLUMNS
            .iter()
            .map(|name| Ok(float_values(column_series(df, name)?)?))
            .collect::<Result<Vec<_>>>()?;

        let values: Vec<Vec<Option<f64>>> = data
            .iter()
            .map(|x| data.iter().map(|y| pearson_correlation(x, y)).collect())
            .collect();

        Ok(CorrelationMatrix {
            columns: CORRELATION_COLUMNS.iter().map(|c| c.to_string()).collect(),
            values,
        })
    }
}
