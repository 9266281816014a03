//! Report assembly and export.
//!
//! [`DescriptionReport`] bundles the dataset-level facts and the column
//! report under a timestamp, for JSON output. The `*_to_dataframe`
//! helpers flatten the same records into polars frames, filling fields a
//! row kind does not carry with nulls.
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_describe::reporting::DescriptionReport;
//!
//! let report = DescriptionReport::build(&analyzer, Some("data/train.csv"), None)?;
//! println!("{}", report.to_json_pretty()?);
//!
//! let frame = report.columns_frame()?;
//! println!("{}", frame);
//! ```

mod export;

pub use export::{DescriptionReport, columns_to_dataframe, global_info_to_dataframe};
