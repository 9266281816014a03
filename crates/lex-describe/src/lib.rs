//! Dataset Description Library
//!
//! Descriptive statistics for tabular data, built on Polars.
//!
//! # Overview
//!
//! [`DataAnalyzer`] wraps a primary table and an optional metadata table and
//! answers four questions about it:
//!
//! - **Column types**: which columns are numeric, boolean (two-valued
//!   numbers) or categorical (text)
//! - **Variable descriptions**: human-written text from the metadata table
//! - **Column report**: counts, missing percentages, ranges and value
//!   distributions, highest missing percentage first
//! - **Global info**: shape, duplicate rows, constant columns and overall
//!   missingness
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_describe::DataAnalyzer;
//! use polars::prelude::*;
//!
//! let df = df!(
//!     "age" => [Some(25i64), Some(30), Some(25), None],
//!     "city" => ["NY", "LA", "NY", "NY"]
//! )?;
//!
//! let analyzer = DataAnalyzer::new(df, None)?;
//!
//! let types = analyzer.data_col_type()?;
//! assert_eq!(types.boolean, vec!["age"]);
//!
//! for row in analyzer.global_description_table(None)? {
//!     println!("{} {:.2}%", row.column(), row.missing_pct());
//! }
//!
//! let info = &analyzer.global_info()?[0];
//! println!("{} duplicate rows", info.duplicate_rows);
//! ```
//!
//! # Metadata
//!
//! The metadata table is keyed by a `Row` column holding variable names.
//! Descriptions are read from a `Description` column, or from the 4th field
//! when no column carries that name. Both names are configurable through
//! [`AnalyzerConfig`]. A table without the key or description field is
//! rejected when the analyzer is built.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod loader;
pub mod metadata;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use analyzer::DataAnalyzer;
pub use config::{AnalyzerConfig, AnalyzerConfigBuilder, ConfigValidationError};
pub use error::{DescribeError, Result as DescribeResult, ResultExt};
pub use metadata::MetadataTable;
pub use reporting::{DescriptionReport, columns_to_dataframe, global_info_to_dataframe};
pub use types::{
    BooleanColumnReport, CategoricalColumnReport, ColumnKind, ColumnReport, ColumnTypes,
    DtypeBreakdown, GlobalInfo, NumericColumnReport,
};
pub use utils::{DtypeCategory, get_dtype_category, is_numeric_dtype, is_text_dtype};
