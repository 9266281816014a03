//! Dataset-level facts: duplicates, constant columns, overall missingness.

use crate::error::Result;
use crate::utils::percentage;
use polars::prelude::*;

/// Count rows that repeat an earlier row. Nulls compare equal.
pub(crate) fn duplicate_row_count(df: &DataFrame) -> Result<usize> {
    if df.width() == 0 {
        return Ok(0);
    }
    let unique = df.unique::<&str, &str>(None, UniqueKeepStrategy::First, None)?;
    Ok(df.height() - unique.height())
}

/// Columns holding a single distinct value, missing counted as a value.
pub(crate) fn constant_columns(df: &DataFrame) -> Result<Vec<String>> {
    let mut constant = Vec::new();
    for column in df.get_columns() {
        let series = column.as_materialized_series();
        if series.n_unique()? == 1 {
            constant.push(series.name().to_string());
        }
    }
    Ok(constant)
}

/// Total null cells in the frame.
pub(crate) fn missing_cell_count(df: &DataFrame) -> usize {
    df.get_columns().iter().map(|c| c.null_count()).sum()
}

/// Rounded share of null cells over all cells.
pub(crate) fn overall_missing_percentage(df: &DataFrame, decimals: u32) -> f64 {
    let cells = df.height() * df.width();
    percentage(missing_cell_count(df), cells, decimals)
}
