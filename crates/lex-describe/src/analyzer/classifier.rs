//! Column classification into numeric, boolean and categorical buckets.

use crate::error::Result;
use crate::types::{ColumnKind, ColumnTypes};
use crate::utils::{is_numeric_dtype, is_text_dtype};
use polars::prelude::*;
use tracing::debug;

/// Distinct non-missing values that turn a numeric column into a flag.
pub(crate) const BOOLEAN_DISTINCT_VALUES: usize = 2;

/// Classify a single series, or `None` when its dtype is not analyzed.
pub(crate) fn classify_series(series: &Series) -> Result<Option<ColumnKind>> {
    let dtype = series.dtype();
    if is_numeric_dtype(dtype) {
        let distinct = series.drop_nulls().n_unique()?;
        if distinct == BOOLEAN_DISTINCT_VALUES {
            return Ok(Some(ColumnKind::Boolean));
        }
        return Ok(Some(ColumnKind::Numeric));
    }

    if is_text_dtype(dtype) {
        return Ok(Some(ColumnKind::Categorical));
    }

    Ok(None)
}

/// Split the columns of a frame into analysis buckets, keeping table order.
pub(crate) fn classify_columns(df: &DataFrame) -> Result<ColumnTypes> {
    let mut types = ColumnTypes::default();

    for column in df.get_columns() {
        let series = column.as_materialized_series();
        let name = series.name().to_string();
        match classify_series(series)? {
            Some(ColumnKind::Numeric) => types.numeric.push(name),
            Some(ColumnKind::Boolean) => types.boolean.push(name),
            Some(ColumnKind::Categorical) => types.categorical.push(name),
            None => debug!("Skipping column '{}' with dtype {:?}", name, series.dtype()),
        }
    }

    debug!(
        "Classified columns: {} numeric, {} boolean, {} categorical",
        types.numeric.len(),
        types.boolean.len(),
        types.categorical.len()
    );

    Ok(types)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== classify_series tests ====================

    #[test]
    fn test_two_values_with_nulls_is_boolean() {
        let series = Series::new("flag".into(), &[Some(0i64), Some(1), None, Some(1)]);
        assert_eq!(classify_series(&series).unwrap(), Some(ColumnKind::Boolean));
    }

    #[test]
    fn test_three_values_is_numeric() {
        let series = Series::new("score".into(), &[1.5f64, 2.5, 3.5]);
        assert_eq!(classify_series(&series).unwrap(), Some(ColumnKind::Numeric));
    }

    #[test]
    fn test_single_value_stays_numeric() {
        let series = Series::new("constant".into(), &[7i32, 7, 7]);
        assert_eq!(classify_series(&series).unwrap(), Some(ColumnKind::Numeric));
    }

    #[test]
    fn test_text_is_categorical() {
        let series = Series::new("city".into(), &["NY", "LA"]);
        assert_eq!(
            classify_series(&series).unwrap(),
            Some(ColumnKind::Categorical)
        );
    }

    #[test]
    fn test_native_boolean_is_skipped() {
        let series = Series::new("active".into(), &[true, false]);
        assert_eq!(classify_series(&series).unwrap(), None);
    }

    // ==================== classify_columns tests ====================

    #[test]
    fn test_classify_columns_partitions_in_table_order() {
        let df = df!(
            "city" => ["NY", "LA", "SF"],
            "income" => [10.0f64, 20.0, 30.0],
            "churned" => [0i64, 1, 0],
            "active" => [true, false, true],
            "age" => [30i64, 40, 50],
            "segment" => ["a", "b", "a"]
        )
        .unwrap();

        let types = classify_columns(&df).unwrap();
        assert_eq!(types.numeric, vec!["income", "age"]);
        assert_eq!(types.boolean, vec!["churned"]);
        assert_eq!(types.categorical, vec!["city", "segment"]);
        assert_eq!(types.kind_of("active"), None);
    }
}
