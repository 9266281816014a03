//! CSV loading for the command line tool.
//!
//! Loading sits outside the analyzer: it only turns a file into a
//! `DataFrame`. Several strategies are tried in turn because real-world
//! exports often carry broken quoting.

use crate::error::{DescribeError, Result, ResultExt};
use polars::io::csv::read::{CsvReadOptions, NullValues};
use polars::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Rows scanned to infer column types.
pub const SCHEMA_INFERENCE_ROWS: usize = 100;

/// Cell contents read as missing values.
pub const NULL_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn parse_options(quote_char: Option<u8>) -> CsvParseOptions {
    let tokens = NULL_TOKENS.iter().copied().map(PlSmallStr::from_static).collect();
    CsvParseOptions::default()
        .with_quote_char(quote_char)
        .with_null_values(Some(NullValues::AllColumns(tokens)))
}

/// Load a CSV file with a header row, falling back to laxer parsing.
pub fn load_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DescribeError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Input file not found: {}", path.display()),
        )));
    }

    // Strategy 1: standard loading with quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(SCHEMA_INFERENCE_ROWS))
        .with_has_header(true)
        .with_parse_options(parse_options(Some(b'"')))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return loaded(path, df),
        Err(e) => debug!("Standard loading failed: {}", e),
    }

    // Strategy 2: without quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(SCHEMA_INFERENCE_ROWS))
        .with_has_header(true)
        .with_parse_options(parse_options(None))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return loaded(path, df),
        Err(e) => debug!("Loading without quotes failed: {}", e),
    }

    // Strategy 3: pre-clean content
    let content = std::fs::read_to_string(path)?;
    let df = CsvReadOptions::default()
        .with_infer_schema_length(Some(SCHEMA_INFERENCE_ROWS))
        .with_has_header(true)
        .with_parse_options(parse_options(Some(b'"')))
        .into_reader_with_file_handle(Cursor::new(clean_csv_content(&content)))
        .finish()
        .context(format!("Failed to parse CSV file {}", path.display()))?;
    loaded(path, df)
}

fn loaded(path: &Path, df: DataFrame) -> Result<DataFrame> {
    info!(
        "Loaded {} ({} rows x {} columns)",
        path.display(),
        df.height(),
        df.width()
    );
    Ok(df)
}

/// Collapse doubled quotes and drop blank lines.
pub(crate) fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
