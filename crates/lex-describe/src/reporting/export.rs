use crate::analyzer::DataAnalyzer;
use crate::error::{Result, ResultExt};
use crate::types::{ColumnReport, GlobalInfo};
use chrono::Local;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

// ============================================================================
// Report Envelope
// ============================================================================

/// Full description of a dataset, ready for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptionReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Where the data came from (file path, table name, ...)
    pub source: Option<String>,
    /// Dataset-level facts (single element)
    pub global_info: Vec<GlobalInfo>,
    /// Per-column rows, highest missing percentage first
    pub columns: Vec<ColumnReport>,
}

impl DescriptionReport {
    /// Run every analysis on `analyzer` and collect the results.
    ///
    /// `columns` restricts the column report; `None` describes all columns.
    pub fn build(
        analyzer: &DataAnalyzer,
        source: Option<&str>,
        columns: Option<&[String]>,
    ) -> Result<Self> {
        let column_rows = match columns {
            Some(selection) => analyzer.describe_columns(selection)?,
            None => analyzer.global_description_table(None)?,
        };
        let global_info = analyzer.global_info()?;

        info!(
            "Report ready: {} column rows{}",
            column_rows.len(),
            source.map(|s| format!(" for {}", s)).unwrap_or_default()
        );

        Ok(Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            source: source.map(str::to_string),
            global_info,
            columns: column_rows,
        })
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The column report as a frame, see [`columns_to_dataframe`].
    pub fn columns_frame(&self) -> Result<DataFrame> {
        columns_to_dataframe(&self.columns)
    }
}

// ============================================================================
// Tabular Export
// ============================================================================

/// Flatten column report rows into one frame.
///
/// Fields a row kind does not have are null.
pub fn columns_to_dataframe(rows: &[ColumnReport]) -> Result<DataFrame> {
    let mut column = Vec::with_capacity(rows.len());
    let mut kind = Vec::with_capacity(rows.len());
    let mut non_missing = Vec::with_capacity(rows.len());
    let mut missing_pct = Vec::with_capacity(rows.len());
    let mut mean = Vec::with_capacity(rows.len());
    let mut max = Vec::with_capacity(rows.len());
    let mut min = Vec::with_capacity(rows.len());
    let mut distinct_categories = Vec::with_capacity(rows.len());
    let mut distribution = Vec::with_capacity(rows.len());
    let mut description = Vec::with_capacity(rows.len());

    for row in rows {
        column.push(row.column().to_string());
        kind.push(row.kind().as_str().to_string());
        non_missing.push(row.non_missing() as u64);
        missing_pct.push(row.missing_pct());
        distribution.push(row.distribution().map(str::to_string));
        description.push(row.description().to_string());

        match row {
            ColumnReport::Numeric(r) => {
                mean.push(r.mean);
                max.push(r.max);
                min.push(r.min);
                distinct_categories.push(None);
            }
            ColumnReport::Boolean(_) => {
                mean.push(None);
                max.push(None);
                min.push(None);
                distinct_categories.push(None);
            }
            ColumnReport::Categorical(r) => {
                mean.push(None);
                max.push(None);
                min.push(None);
                distinct_categories.push(Some(r.distinct_categories as u64));
            }
        }
    }

    df!(
        "column" => column,
        "kind" => kind,
        "non_missing" => non_missing,
        "missing_pct" => missing_pct,
        "mean" => mean,
        "max" => max,
        "min" => min,
        "distinct_categories" => distinct_categories,
        "distribution" => distribution,
        "description" => description
    )
    .context("Failed to build column report frame")
}

/// Flatten global info records into one frame.
///
/// Constant column names are joined with `", "`.
pub fn global_info_to_dataframe(records: &[GlobalInfo]) -> Result<DataFrame> {
    df!(
        "rows" => records.iter().map(|r| r.rows as u64).collect::<Vec<_>>(),
        "columns" => records.iter().map(|r| r.columns as u64).collect::<Vec<_>>(),
        "duplicate_rows" => records.iter().map(|r| r.duplicate_rows as u64).collect::<Vec<_>>(),
        "constant_column_count" => records.iter().map(|r| r.constant_column_count as u64).collect::<Vec<_>>(),
        "constant_columns" => records.iter().map(|r| r.constant_columns.join(", ")).collect::<Vec<_>>(),
        "missing_pct" => records.iter().map(|r| r.missing_pct).collect::<Vec<_>>(),
        "categorical" => records.iter().map(|r| r.dtypes.categorical as u64).collect::<Vec<_>>(),
        "numeric" => records.iter().map(|r| r.dtypes.numeric as u64).collect::<Vec<_>>(),
        "boolean" => records.iter().map(|r| r.dtypes.boolean as u64).collect::<Vec<_>>()
    )
    .context("Failed to build global info frame")
}
