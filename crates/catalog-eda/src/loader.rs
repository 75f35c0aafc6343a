//! CSV loading for catalog datasets.

use crate::error::{EdaError, Result, ResultExt};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load a catalog CSV into a DataFrame.
///
/// Tries standard quoted parsing first, then falls back to re-reading the raw
/// text with doubled quotes and blank lines normalized.
///
/// # Errors
///
/// Returns [`EdaError::InputNotFound`] when `path` does not point to a file.
/// Parse failures of the fallback surface as `Polars` errors.
pub fn load_catalog(path: impl AsRef<Path>, infer_schema_length: Option<usize>) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(EdaError::InputNotFound(path.to_path_buf()));
    }

    info!("Loading dataset from: {}", path.display());

    let standard = CsvReadOptions::default()
        .with_infer_schema_length(infer_schema_length)
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish();

    let df = match standard {
        Ok(df) => df,
        Err(e) => {
            warn!("Standard CSV parsing failed, retrying with cleaned content: {}", e);
            let content = std::fs::read_to_string(path)?;
            load_catalog_from_str(&clean_csv_content(&content), infer_schema_length)
                .context(format!("Failed to parse {}", path.display()))?
        }
    };

    debug!("Loaded shape: {:?}", df.shape());
    Ok(df)
}

/// Parse catalog CSV content held in memory.
pub fn load_catalog_from_str(content: &str, infer_schema_length: Option<usize>) -> Result<DataFrame> {
    let cursor = Cursor::new(content.as_bytes().to_vec());
    let df = CsvReadOptions::default()
        .with_infer_schema_length(infer_schema_length)
        .with_has_header(true)
        .into_reader_with_file_handle(cursor)
        .finish()?;
    Ok(df)
}

/// Normalize doubled quotes and drop blank lines.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
