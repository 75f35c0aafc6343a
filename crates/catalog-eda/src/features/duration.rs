//! Numeric duration features parsed from the free-text `duration` column.

use crate::error::{EdaError, Result};
use crate::types::{ContentType, DurationFeatureStats, columns};
use crate::utils::string_values;
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use tracing::debug;

static MINUTES_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+) min").expect("valid minutes regex"));
static SEASONS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+) Season").expect("valid seasons regex"));

/// First integer captured by `pattern` anywhere in `text`.
fn capture_number(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Minutes of a movie duration such as "90 min".
pub fn parse_minutes(text: &str) -> Option<f64> {
    capture_number(&MINUTES_PATTERN, text)
}

/// Season count of a show duration such as "2 Seasons".
pub fn parse_seasons(text: &str) -> Option<f64> {
    capture_number(&SEASONS_PATTERN, text)
}

/// Add `duration_minutes` and `seasons` (both Float64).
///
/// Movies only populate minutes, TV shows only populate seasons, anything
/// else leaves both missing.
///
/// # Errors
///
/// Returns `ColumnNotFound` if `type` or `duration` is absent.
pub fn derive_duration_features(mut df: DataFrame) -> Result<(DataFrame, DurationFeatureStats)> {
    let kinds = string_values(
        df.column(columns::TYPE)
            .map_err(|_| EdaError::ColumnNotFound(columns::TYPE.to_string()))?
            .as_materialized_series(),
    )?;
    let durations = string_values(
        df.column(columns::DURATION)
            .map_err(|_| EdaError::ColumnNotFound(columns::DURATION.to_string()))?
            .as_materialized_series(),
    )?;

    let mut stats = DurationFeatureStats::default();
    let mut minutes = Vec::with_capacity(df.height());
    let mut seasons = Vec::with_capacity(df.height());

    for (kind, duration) in kinds.iter().zip(&durations) {
        let duration = duration.as_deref();
        match ContentType::from_label(kind.as_deref()) {
            ContentType::Movie => {
                stats.movies += 1;
                let parsed = duration.and_then(parse_minutes);
                stats.movies_parsed += usize::from(parsed.is_some());
                minutes.push(parsed);
                seasons.push(None);
            }
            ContentType::TvShow => {
                stats.tv_shows += 1;
                let parsed = duration.and_then(parse_seasons);
                stats.tv_shows_parsed += usize::from(parsed.is_some());
                minutes.push(None);
                seasons.push(parsed);
            }
            ContentType::Other => {
                stats.other_rows += 1;
                minutes.push(None);
                seasons.push(None);
            }
        }
    }

    df.with_column(Series::new(columns::DURATION_MINUTES.into(), minutes))?;
    df.with_column(Series::new(columns::SEASONS.into(), seasons))?;

    debug!(
        "Parsed {}/{} movie durations and {}/{} season counts",
        stats.movies_parsed, stats.movies, stats.tv_shows_parsed, stats.tv_shows
    );

    Ok((df, stats))
}
