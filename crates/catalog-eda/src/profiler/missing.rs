//! Missing value accounting.

use crate::types::{MissingValueEntry, MissingValueReport};
use polars::prelude::*;

/// Missing count of every column, in table order.
pub fn missing_counts(df: &DataFrame) -> Vec<(String, usize)> {
    df.get_columns()
        .iter()
        .map(|col| (col.name().to_string(), col.null_count()))
        .collect()
}

/// Build the missing value report: columns with at least one missing entry,
/// sorted by missing count descending. Equal counts keep table order.
pub fn compute_missing_report(df: &DataFrame) -> MissingValueReport {
    let total_rows = df.height();

    let mut entries: Vec<MissingValueEntry> = missing_counts(df)
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(column, missing_count)| MissingValueEntry {
            column,
            missing_count,
            missing_percent: (missing_count as f64 / total_rows as f64) * 100.0,
        })
        .collect();

    entries.sort_by(|a, b| b.missing_count.cmp(&a.missing_count));

    MissingValueReport { total_rows, entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_of_twenty_is_twenty_five_percent() {
        let director: Vec<Option<&str>> = (0..20)
            .map(|i| if i % 4 == 0 { None } else { Some("Someone") })
            .collect();
        let df = df![
            "director" => director,
        ]
        .unwrap();

        let report = compute_missing_report(&df);
        let entry = report.get("director").unwrap();

        assert_eq!(entry.missing_count, 5);
        assert_eq!(format!("{:.2}", entry.missing_percent), "25.00");
    }

    #[test]
    fn test_report_filters_and_sorts() {
        let df = df![
            "show_id" => ["s1", "s2", "s3", "s4"],
            "cast" => [Some("x"), None, Some("y"), Some("z")],
            "director" => [None, None, None, Some("d")],
            "country" => [Some("x"), None, Some("y"), Some("z")],
        ]
        .unwrap();

        let report = compute_missing_report(&df);
        let order: Vec<&str> = report.entries.iter().map(|e| e.column.as_str()).collect();

        assert_eq!(report.total_rows, 4);
        assert_eq!(order, vec!["director", "cast", "country"]);
        assert_eq!(report.entries[0].missing_percent, 75.0);
        assert!(report.get("show_id").is_none());
    }

    #[test]
    fn test_report_empty_table() {
        let report = compute_missing_report(&DataFrame::empty());
        assert!(report.is_empty());
        assert_eq!(report.total_rows, 0);
    }
}
