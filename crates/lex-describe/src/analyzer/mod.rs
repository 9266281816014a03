//! Descriptive statistics over a wrapped dataset.
//!
//! [`DataAnalyzer`] owns the primary table and an optional metadata table
//! and derives every report from them on demand:
//! - column classification into numeric, boolean and categorical buckets
//! - per-column report rows sorted by missing percentage
//! - dataset-level summary facts

mod classifier;
mod statistics;
mod summary;

use crate::config::AnalyzerConfig;
use crate::error::{DescribeError, Result, ResultExt};
use crate::metadata::MetadataTable;
use crate::types::{
    BooleanColumnReport, CategoricalColumnReport, ColumnKind, ColumnReport, ColumnTypes,
    GlobalInfo, NumericColumnReport,
};
use crate::utils::nan_to_null_frame;
use polars::prelude::*;
use std::cmp::Ordering;
use tracing::{debug, info};

pub(crate) use classifier::classify_columns;

/// Analyzer over a primary table with optional variable descriptions.
///
/// Float NaN values are stored as nulls, so they count as missing in every
/// report. Otherwise tables are never mutated; every call recomputes its
/// result from them.
///
/// # Example
///
/// ```rust,ignore
/// use lex_describe::DataAnalyzer;
///
/// let analyzer = DataAnalyzer::new(df, Some(metadata_df))?;
/// let types = analyzer.data_col_type()?;
/// let report = analyzer.global_description_table(None)?;
/// let info = analyzer.global_info()?;
/// ```
#[derive(Debug, Clone)]
pub struct DataAnalyzer {
    df: DataFrame,
    metadata: Option<MetadataTable>,
    config: AnalyzerConfig,
}

static_assertions::assert_impl_all!(DataAnalyzer: Send, Sync);

impl DataAnalyzer {
    /// Wrap a table with the default configuration.
    ///
    /// The metadata table, when given, is validated here.
    pub fn new(df: DataFrame, metadata: Option<DataFrame>) -> Result<Self> {
        Self::with_config(df, metadata, AnalyzerConfig::default())
    }

    /// Wrap a table with a custom configuration.
    pub fn with_config(
        df: DataFrame,
        metadata: Option<DataFrame>,
        config: AnalyzerConfig,
    ) -> Result<Self> {
        config.validate()?;

        let metadata = metadata
            .map(|m| MetadataTable::from_dataframe(&m, &config))
            .transpose()
            .context("Failed to load metadata table")?;

        let df = nan_to_null_frame(df).context("Failed to normalize NaN values")?;

        debug!(
            "Created analyzer over {} rows x {} columns (metadata: {})",
            df.height(),
            df.width(),
            metadata.is_some()
        );

        Ok(Self {
            df,
            metadata,
            config,
        })
    }

    /// The wrapped primary table.
    pub fn data(&self) -> &DataFrame {
        &self.df
    }

    /// The validated metadata table, if one was supplied.
    pub fn metadata(&self) -> Option<&MetadataTable> {
        self.metadata.as_ref()
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Numeric, categorical and boolean column names, in table order.
    pub fn data_col_type(&self) -> Result<ColumnTypes> {
        classify_columns(&self.df)
    }

    /// Description of a variable from the metadata table.
    ///
    /// Falls back to the configured sentinel texts when there is no
    /// metadata table or no entry for the variable.
    pub fn variable_description(&self, variable: &str) -> String {
        let Some(metadata) = &self.metadata else {
            return self.config.no_metadata_text.clone();
        };

        match metadata.lookup(variable) {
            Some(description) => description.to_string(),
            None => self.config.description_not_found_text.clone(),
        }
    }

    /// Per-column report, sorted by missing percentage (highest first).
    ///
    /// Columns are classified on the wrapped table; `subset` restricts the
    /// report to its own columns and supplies the values to aggregate.
    /// With `None` the wrapped table is described.
    pub fn global_description_table(&self, subset: Option<&DataFrame>) -> Result<Vec<ColumnReport>> {
        let normalized;
        let df = match subset {
            Some(subset) => {
                normalized = nan_to_null_frame(subset.clone())
                    .context("Failed to normalize NaN values")?;
                &normalized
            }
            None => &self.df,
        };
        let mut types = self.data_col_type()?;
        types.retain(|name| df.column(name).is_ok());

        let total_rows = df.height();
        let mut rows = Vec::with_capacity(types.total());

        for name in &types.numeric {
            rows.push(self.numeric_row(df, name, total_rows)?);
        }
        for name in &types.boolean {
            rows.push(self.boolean_row(df, name, total_rows)?);
        }
        for name in &types.categorical {
            rows.push(self.categorical_row(df, name, total_rows)?);
        }

        // stable sort: ties keep numeric, boolean, categorical order
        rows.sort_by(|a, b| {
            b.missing_pct()
                .partial_cmp(&a.missing_pct())
                .unwrap_or(Ordering::Equal)
        });

        info!(
            "Built description table for {} columns over {} rows",
            rows.len(),
            total_rows
        );

        Ok(rows)
    }

    /// Report for selected columns of the wrapped table.
    ///
    /// Fails with [`DescribeError::ColumnNotFound`] for unknown names.
    pub fn describe_columns<S: AsRef<str>>(&self, columns: &[S]) -> Result<Vec<ColumnReport>> {
        for name in columns {
            if self.df.column(name.as_ref()).is_err() {
                return Err(DescribeError::ColumnNotFound(name.as_ref().to_string()));
            }
        }
        let subset = self
            .df
            .select(columns.iter().map(|c| c.as_ref()))
            .context("Failed to select report columns")?;
        self.global_description_table(Some(&subset))
    }

    /// Dataset-level summary, as a one-element list.
    pub fn global_info(&self) -> Result<Vec<GlobalInfo>> {
        let decimals = self.config.percentage_decimals;
        let types = self.data_col_type()?;
        let constant_columns = summary::constant_columns(&self.df)?;

        let info = GlobalInfo {
            rows: self.df.height(),
            columns: self.df.width(),
            duplicate_rows: summary::duplicate_row_count(&self.df)
                .context("Failed to count duplicate rows")?,
            constant_column_count: constant_columns.len(),
            constant_columns,
            missing_pct: summary::overall_missing_percentage(&self.df, decimals),
            dtypes: types.breakdown(),
        };

        debug!(
            "Global info: {} duplicates, {} constant columns, {}% missing",
            info.duplicate_rows, info.constant_column_count, info.missing_pct
        );

        Ok(vec![info])
    }

    /// Kind of a single column of the wrapped table.
    pub fn column_kind(&self, column: &str) -> Result<Option<ColumnKind>> {
        let col = self
            .df
            .column(column)
            .map_err(|_| DescribeError::ColumnNotFound(column.to_string()))?;
        classifier::classify_series(col.as_materialized_series())
    }

    fn series<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
        df.column(name)
            .map(|c| c.as_materialized_series())
            .map_err(|_| DescribeError::ColumnNotFound(name.to_string()))
    }

    fn numeric_row(&self, df: &DataFrame, name: &str, total_rows: usize) -> Result<ColumnReport> {
        let series = Self::series(df, name)?;
        let stats = statistics::numeric_summary(series)
            .context(format!("Failed to summarize column '{}'", name))?;

        Ok(ColumnReport::Numeric(NumericColumnReport {
            column: name.to_string(),
            non_missing: series.len() - series.null_count(),
            missing_pct: statistics::missing_percentage(
                series,
                total_rows,
                self.config.percentage_decimals,
            ),
            mean: stats.mean,
            max: stats.max,
            min: stats.min,
            description: self.variable_description(name),
        }))
    }

    fn boolean_row(&self, df: &DataFrame, name: &str, total_rows: usize) -> Result<ColumnReport> {
        let series = Self::series(df, name)?;
        let decimals = self.config.percentage_decimals;

        Ok(ColumnReport::Boolean(BooleanColumnReport {
            column: name.to_string(),
            non_missing: series.len() - series.null_count(),
            missing_pct: statistics::missing_percentage(series, total_rows, decimals),
            distribution: statistics::value_distribution(
                series,
                total_rows,
                &self.config.missing_label,
                decimals,
            )?,
            description: self.variable_description(name),
        }))
    }

    fn categorical_row(
        &self,
        df: &DataFrame,
        name: &str,
        total_rows: usize,
    ) -> Result<ColumnReport> {
        let series = Self::series(df, name)?;
        let decimals = self.config.percentage_decimals;

        Ok(ColumnReport::Categorical(CategoricalColumnReport {
            column: name.to_string(),
            non_missing: series.len() - series.null_count(),
            missing_pct: statistics::missing_percentage(series, total_rows, decimals),
            distinct_categories: statistics::distinct_non_missing(series)?,
            top_categories: statistics::value_distribution(
                series,
                total_rows,
                &self.config.missing_label,
                decimals,
            )?,
            description: self.variable_description(name),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn customers() -> DataFrame {
        df!(
            "age" => [Some(25i64), Some(30), Some(25), None],
            "city" => ["NY", "LA", "NY", "NY"]
        )
        .unwrap()
    }

    fn metadata() -> DataFrame {
        df!(
            "Row" => ["age"],
            "Type" => ["int"],
            "Source" => ["crm"],
            "Description" => ["Age of the customer"]
        )
        .unwrap()
    }

    // ==================== data_col_type tests ====================

    #[test]
    fn test_two_valued_integer_is_boolean() {
        let analyzer = DataAnalyzer::new(customers(), None).unwrap();
        let types = analyzer.data_col_type().unwrap();

        assert!(types.numeric.is_empty());
        assert_eq!(types.boolean, vec!["age"]);
        assert_eq!(types.categorical, vec!["city"]);
    }

    // ==================== variable_description tests ====================

    #[test]
    fn test_description_without_metadata() {
        let analyzer = DataAnalyzer::new(customers(), None).unwrap();
        assert_eq!(analyzer.variable_description("age"), "No metadata available");
        assert_eq!(analyzer.variable_description("unknown"), "No metadata available");
    }

    #[test]
    fn test_description_found_and_not_found() {
        let analyzer = DataAnalyzer::new(customers(), Some(metadata())).unwrap();
        assert_eq!(analyzer.variable_description("age"), "Age of the customer");
        assert_eq!(analyzer.variable_description("city"), "Description not found");
    }

    #[test]
    fn test_malformed_metadata_fails_at_construction() {
        let bad = df!("Row" => ["age"], "Description_fr" => ["Âge"]).unwrap();
        let err = DataAnalyzer::new(customers(), Some(bad)).unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_METADATA");
    }

    // ==================== global_description_table tests ====================

    #[test]
    fn test_description_table_end_to_end() {
        let analyzer = DataAnalyzer::new(customers(), Some(metadata())).unwrap();
        let rows = analyzer.global_description_table(None).unwrap();

        assert_eq!(
            rows,
            vec![
                ColumnReport::Boolean(BooleanColumnReport {
                    column: "age".to_string(),
                    non_missing: 3,
                    missing_pct: 25.0,
                    distribution: "25 (50.0), 30 (25.0), missing (25.0)".to_string(),
                    description: "Age of the customer".to_string(),
                }),
                ColumnReport::Categorical(CategoricalColumnReport {
                    column: "city".to_string(),
                    non_missing: 4,
                    missing_pct: 0.0,
                    distinct_categories: 2,
                    top_categories: "NY (75.0), LA (25.0)".to_string(),
                    description: "Description not found".to_string(),
                }),
            ]
        );
    }

    #[test]
    fn test_description_table_sorted_by_missing_desc() {
        let df = df!(
            "a" => [None, Some(1.0f64), Some(2.0), Some(3.0), Some(4.0), Some(5.0), Some(6.0), Some(7.0), Some(8.0), Some(9.0)],
            "b" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0],
            "c" => [None, None, None, None, None, Some(1.0f64), Some(2.0), Some(3.0), Some(4.0), Some(5.0)]
        )
        .unwrap();

        let analyzer = DataAnalyzer::new(df, None).unwrap();
        let rows = analyzer.global_description_table(None).unwrap();
        let order: Vec<&str> = rows.iter().map(|r| r.column()).collect();
        let missing: Vec<f64> = rows.iter().map(|r| r.missing_pct()).collect();

        assert_eq!(order, vec!["c", "a", "b"]);
        assert_eq!(missing, vec![50.0, 10.0, 0.0]);
    }

    #[test]
    fn test_numeric_row_fields() {
        let df = df!("income" => [Some(10.0f64), Some(20.0), None, Some(60.0)]).unwrap();
        let analyzer = DataAnalyzer::new(df, None).unwrap();
        let rows = analyzer.global_description_table(None).unwrap();

        let ColumnReport::Numeric(row) = &rows[0] else {
            panic!("expected numeric row, got {:?}", rows[0]);
        };
        assert_eq!(row.non_missing, 3);
        assert_eq!(row.missing_pct, 25.0);
        assert_eq!(row.mean, Some(30.0));
        assert_eq!(row.min, Some(10.0));
        assert_eq!(row.max, Some(60.0));
        assert_eq!(row.description, "No metadata available");
    }

    #[test]
    fn test_subset_restricts_columns() {
        let analyzer = DataAnalyzer::new(customers(), None).unwrap();
        let subset = analyzer.data().select(["city"]).unwrap();
        let rows = analyzer.global_description_table(Some(&subset)).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].column(), "city");
    }

    #[test]
    fn test_describe_columns_unknown_name() {
        let analyzer = DataAnalyzer::new(customers(), None).unwrap();
        let err = analyzer.describe_columns(&["city", "zip"]).unwrap_err();
        assert!(matches!(err, DescribeError::ColumnNotFound(name) if name == "zip"));
    }

    #[test]
    fn test_empty_table_reports_zero_missing() {
        let df = df!(
            "age" => Vec::<i64>::new(),
            "city" => Vec::<String>::new()
        )
        .unwrap();
        let analyzer = DataAnalyzer::new(df, None).unwrap();
        let rows = analyzer.global_description_table(None).unwrap();

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.missing_pct() == 0.0));
        assert!(rows.iter().all(|r| r.non_missing() == 0));
    }

    #[test]
    fn test_nan_counts_as_missing() {
        let df = df!("score" => [1.0f64, 2.0, f64::NAN, 1.0]).unwrap();
        let analyzer = DataAnalyzer::new(df, None).unwrap();
        let rows = analyzer.global_description_table(None).unwrap();

        assert_eq!(
            rows,
            vec![ColumnReport::Boolean(BooleanColumnReport {
                column: "score".to_string(),
                non_missing: 3,
                missing_pct: 25.0,
                distribution: "1.0 (50.0), 2.0 (25.0), missing (25.0)".to_string(),
                description: "No metadata available".to_string(),
            })]
        );

        let info = analyzer.global_info().unwrap();
        assert_eq!(info[0].missing_pct, 25.0);
    }

    #[test]
    fn test_nan_excluded_from_numeric_stats() {
        let df = df!("income" => [10.0f64, f64::NAN, 20.0, 60.0]).unwrap();
        let subset = df.clone();
        let analyzer = DataAnalyzer::new(df, None).unwrap();

        // a caller-supplied subset still carries the raw NaN
        let rows = analyzer.global_description_table(Some(&subset)).unwrap();
        let ColumnReport::Numeric(row) = &rows[0] else {
            panic!("expected numeric row, got {:?}", rows[0]);
        };
        assert_eq!(row.non_missing, 3);
        assert_eq!(row.missing_pct, 25.0);
        assert_eq!(row.mean, Some(30.0));
        assert_eq!(row.min, Some(10.0));
        assert_eq!(row.max, Some(60.0));
    }

    #[test]
    fn test_large_unsigned_values_keep_their_labels() {
        let df = df!("id" => [u64::MAX, 1, u64::MAX]).unwrap();
        let analyzer = DataAnalyzer::new(df, None).unwrap();
        let rows = analyzer.global_description_table(None).unwrap();

        let ColumnReport::Boolean(row) = &rows[0] else {
            panic!("expected boolean row, got {:?}", rows[0]);
        };
        assert_eq!(row.missing_pct, 0.0);
        assert_eq!(row.distribution, "18446744073709551615 (66.67), 1 (33.33)");
    }

    // ==================== global_info tests ====================

    #[test]
    fn test_global_info() {
        let df = df!(
            "age" => [Some(25i64), Some(30), Some(25), None, Some(25)],
            "city" => [Some("NY"), Some("LA"), Some("NY"), Some("SF"), Some("NY")],
            "country" => ["US", "US", "US", "US", "US"]
        )
        .unwrap();
        let analyzer = DataAnalyzer::new(df, None).unwrap();
        let info = analyzer.global_info().unwrap();

        assert_eq!(info.len(), 1);
        let info = &info[0];
        assert_eq!(info.rows, 5);
        assert_eq!(info.columns, 3);
        assert_eq!(info.duplicate_rows, 2);
        assert_eq!(info.constant_columns, vec!["country"]);
        assert_eq!(info.constant_column_count, 1);
        assert_eq!(info.missing_pct, 6.67);
        assert_eq!(info.dtypes.boolean, 1);
        assert_eq!(info.dtypes.categorical, 2);
        assert_eq!(info.dtypes.numeric, 0);
    }

    #[test]
    fn test_column_kind() {
        let analyzer = DataAnalyzer::new(customers(), None).unwrap();
        assert_eq!(analyzer.column_kind("city").unwrap(), Some(ColumnKind::Categorical));
        assert!(analyzer.column_kind("zip").is_err());
    }
}
