//! Human readable console report.

use super::charts::ChartData;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::types::{ColumnSummaryKind, PipelineResult, columns};
use crate::utils::{sample_row_indices, take_rows};
use polars::prelude::*;
use std::fmt;

/// Console rendering of a finished analysis.
///
/// Row samples are drawn once on construction, so rendering the same report
/// twice prints the same rows.
pub struct ConsoleReport<'a> {
    result: &'a PipelineResult,
    charts: &'a ChartData,
    duration_sample: DataFrame,
    recency_sample: DataFrame,
    recent_year_threshold: i64,
    top_countries: usize,
}

impl<'a> ConsoleReport<'a> {
    pub fn new(
        result: &'a PipelineResult,
        charts: &'a ChartData,
        config: &PipelineConfig,
    ) -> Result<Self> {
        let data = &result.data;

        let duration_sample = sample_columns(
            data,
            &[
                columns::TYPE,
                columns::DURATION,
                columns::DURATION_MINUTES,
                columns::SEASONS,
            ],
            config.sample_rows,
            config.sample_seed,
        )?;
        let recency_sample = sample_columns(
            data,
            &[columns::RELEASE_YEAR, columns::IS_RECENT],
            config.sample_rows,
            config.sample_seed.wrapping_add(1),
        )?;

        Ok(Self {
            result,
            charts,
            duration_sample,
            recency_sample,
            recent_year_threshold: config.recent_year_threshold,
            top_countries: config.top_countries,
        })
    }

    fn write_inspection(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result;
        let summary = &result.summary;

        writeln!(f, "--- Initial Data Exploration & Inspection ---")?;
        writeln!(f)?;
        writeln!(f, "1. Preview of the first {} rows:", result.raw_preview.height())?;
        writeln!(f, "{}", result.raw_preview)?;
        writeln!(f)?;
        writeln!(
            f,
            "2. Rows Processed: {}, Duplicates Dropped: {} ({:.2}%)",
            summary.rows_processed,
            summary.duplicates_dropped,
            summary.duplicates_percentage()
        )?;
        writeln!(
            f,
            "3. Final Dataset Shape after cleaning: ({}, {})",
            result.profile.shape.0, result.profile.shape.1
        )?;

        writeln!(f)?;
        writeln!(f, "4. Final Data Types & Non-Null Counts:")?;
        writeln!(
            f,
            "{:>3}  {:<20} {:>14}  {}",
            "#", "Column", "Non-Null Count", "Dtype"
        )?;
        for (i, col) in result.profile.column_profiles.iter().enumerate() {
            writeln!(
                f,
                "{:>3}  {:<20} {:>14}  {}",
                i, col.name, col.non_null_count, col.dtype
            )?;
        }
        writeln!(
            f,
            "memory usage: {:.1} KB",
            result.profile.estimated_size_bytes as f64 / 1024.0
        )?;

        writeln!(f)?;
        writeln!(f, "5. Basic Statistics:")?;
        for stats in &result.statistics {
            match &stats.summary {
                ColumnSummaryKind::Numeric(s) => writeln!(
                    f,
                    "  {:<20} count={} mean={:.2} std={} min={} 25%={} 50%={} 75%={} max={}",
                    stats.name,
                    stats.count,
                    s.mean,
                    s.std.map_or_else(|| "NaN".to_string(), |v| format!("{:.2}", v)),
                    s.min,
                    s.q25,
                    s.median,
                    s.q75,
                    s.max
                )?,
                ColumnSummaryKind::Categorical(s) => writeln!(
                    f,
                    "  {:<20} count={} unique={} top={:?} freq={}",
                    stats.name, stats.count, s.unique, s.top, s.freq
                )?,
                ColumnSummaryKind::Empty => writeln!(f, "  {:<20} count=0", stats.name)?,
            }
        }

        writeln!(f)?;
        writeln!(f, "6. Missing Value Summary:")?;
        if result.missing_report.is_empty() {
            writeln!(f, "  No missing values.")?;
        } else {
            writeln!(f, "{:<20} {:>13} {:>15}", "", "Missing Count", "Missing Percent")?;
            for entry in &result.missing_report.entries {
                writeln!(
                    f,
                    "{:<20} {:>13} {:>15.2}",
                    entry.column, entry.missing_count, entry.missing_percent
                )?;
            }
        }
        writeln!(f)
    }

    fn write_features(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Data Cleaning & Feature Engineering ---")?;
        writeln!(f)?;
        writeln!(f, "1. Missing Values After Imputation:")?;
        for (name, count) in &self.result.missing_after_imputation {
            writeln!(f, "{:<20} {:>6}", name, count)?;
        }

        writeln!(f)?;
        writeln!(f, "2. Preview of New Duration Features:")?;
        writeln!(f, "{}", self.duration_sample)?;

        writeln!(f)?;
        writeln!(f, "3. Preview of New Binary Feature ({}):", columns::IS_RECENT)?;
        writeln!(f, "{}", self.recency_sample)?;
        writeln!(f)
    }

    fn write_charts(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let charts = self.charts;

        writeln!(f, "--- Summary Figures ---")?;
        writeln!(f)?;
        writeln!(f, "1. Count Plot: Content Type Distribution")?;
        for (kind, count) in &charts.type_counts {
            writeln!(f, "  {:<20} {:>6}", kind, count)?;
        }

        writeln!(f, "2. Histogram: Distribution of Content Release Year")?;
        match &charts.release_year_histogram {
            Some(hist) => {
                for (i, count) in hist.counts.iter().enumerate() {
                    writeln!(
                        f,
                        "  [{:>7.1}, {:>7.1}{} {:>6}",
                        hist.edges[i],
                        hist.edges[i + 1],
                        if i + 1 == hist.counts.len() { "]" } else { ")" },
                        count
                    )?;
                }
            }
            None => writeln!(f, "  No release years available.")?,
        }

        writeln!(
            f,
            "3. Bar Plot: Top {} Countries by Content Count",
            self.top_countries
        )?;
        for (country, count) in &charts.top_countries {
            writeln!(f, "  {:<30} {:>6}", country, count)?;
        }

        writeln!(
            f,
            "4. Box Plot: Movie Duration, Recent (>={}) vs Older",
            self.recent_year_threshold
        )?;
        let groups = [
            ("Older (0)", &charts.movie_duration_by_recency.older),
            ("Recent (1)", &charts.movie_duration_by_recency.recent),
        ];
        for (label, stats) in groups {
            match stats {
                Some(s) => writeln!(
                    f,
                    "  {:<11} n={} whiskers=[{}, {}] q1={} median={} q3={} outliers={}",
                    label, s.count, s.lower_whisker, s.upper_whisker, s.q1, s.median, s.q3, s.outliers
                )?,
                None => writeln!(f, "  {:<11} n=0", label)?,
            }
        }

        writeln!(f, "5. Correlation Heatmap")?;
        write!(f, "  {:<18}", "")?;
        for name in &charts.correlation.columns {
            write!(f, " {:>16}", name)?;
        }
        writeln!(f)?;
        for (name, row) in charts.correlation.columns.iter().zip(&charts.correlation.values) {
            write!(f, "  {:<18}", name)?;
            for value in row {
                match value {
                    Some(v) => write!(f, " {:>16.2}", v)?,
                    None => write!(f, " {:>16}", "NaN")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for ConsoleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_inspection(f)?;
        self.write_features(f)?;
        self.write_charts(f)?;
        writeln!(f)?;
        writeln!(f, "*** All Tasks Complete. ***")
    }
}

/// Seeded random rows of the named columns.
fn sample_columns(df: &DataFrame, names: &[&str], n: usize, seed: u64) -> Result<DataFrame> {
    let selected = df.select(names.iter().copied())?;
    let rows = sample_row_indices(selected.height(), n, seed);
    Ok(take_rows(&selected, &rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Pipeline;

    fn sample_result() -> PipelineResult {
        let df = df![
            "show_id" => ["s1", "s2", "s3", "s3"],
            "type" => ["Movie", "TV Show", "Movie", "Movie"],
            "title" => ["A", "B", "C", "C again"],
            "director" => [None, Some("D"), None, None],
            "cast" => [Some("X"), None, Some("Y"), Some("Y")],
            "country" => [Some("India"), None, Some("United States, India"), None],
            "date_added" => [Some("May 1, 2020"), Some("June 2, 2019"), None, None],
            "release_year" => [2018i64, 2010, 2015, 2015],
            "rating" => [Some("TV-MA"), None, Some("PG"), Some("PG")],
            "duration" => [Some("90 min"), Some("3 Seasons"), None, None],
            "description" => ["a", "b", "c", "d"],
        ]
        .unwrap();

        Pipeline::builder()
            .config(PipelineConfig::default())
            .build()
            .unwrap()
            .process(df)
            .unwrap()
    }

    #[test]
    fn test_console_report_sections() {
        let config = PipelineConfig::default();
        let result = sample_result();
        let charts = ChartData::from_frame(&result.data, 30, 10).unwrap();
        let report = ConsoleReport::new(&result, &charts, &config).unwrap();
        let text = report.to_string();

        assert!(text.contains("2. Rows Processed: 4, Duplicates Dropped: 1 (25.00%)"));
        assert!(text.contains("3. Final Dataset Shape after cleaning: (3, 10)"));
        assert!(text.contains("6. Missing Value Summary:"));
        assert!(text.contains("66.67"));
        assert!(text.contains("Top 10 Countries"));
        assert!(text.contains("5. Correlation Heatmap"));
        assert!(text.ends_with("*** All Tasks Complete. ***\n"));
    }

    #[test]
    fn test_samples_are_reproducible() {
        let config = PipelineConfig::default();
        let result = sample_result();
        let charts = ChartData::from_frame(&result.data, 30, 10).unwrap();

        let first = ConsoleReport::new(&result, &charts, &config).unwrap().to_string();
        let second = ConsoleReport::new(&result, &charts, &config).unwrap().to_string();
        assert_eq!(first, second);
    }
}
