//! Side table of human-written variable descriptions.
//!
//! The table is resolved once, when it is handed to the analyzer: the key
//! and description columns must exist, and only the first row for each key
//! is kept. Lookups afterwards never fail.

use crate::config::AnalyzerConfig;
use crate::error::{DescribeError, Result};
use polars::prelude::*;
use std::collections::HashMap;
use tracing::debug;

/// Validated metadata table mapping variable names to descriptions.
#[derive(Debug, Clone)]
pub struct MetadataTable {
    descriptions: HashMap<String, Option<String>>,
    key_column: String,
    description_column: String,
}

impl MetadataTable {
    /// Build a lookup table from a metadata frame.
    ///
    /// The description column is taken by name, or by the configured
    /// positional fallback when no column carries that name.
    pub fn from_dataframe(df: &DataFrame, config: &AnalyzerConfig) -> Result<Self> {
        let key_column = config.metadata_key_column.clone();
        let keys = df.column(&key_column).map_err(|_| {
            DescribeError::MalformedMetadata(format!("missing key column '{}'", key_column))
        })?;

        let description_column = Self::resolve_description_column(df, config)?;
        let values = df.column(&description_column)?;

        let keys = keys.as_materialized_series().cast(&DataType::String)?;
        let values = values.as_materialized_series().cast(&DataType::String)?;

        let mut descriptions = HashMap::with_capacity(df.height());
        for (key, value) in keys.str()?.into_iter().zip(values.str()?.into_iter()) {
            if let Some(key) = key {
                descriptions
                    .entry(key.to_string())
                    .or_insert_with(|| value.map(|v| v.to_string()));
            }
        }

        debug!(
            "Loaded metadata for {} variables (key '{}', description '{}')",
            descriptions.len(),
            key_column,
            description_column
        );

        Ok(Self {
            descriptions,
            key_column,
            description_column,
        })
    }

    fn resolve_description_column(df: &DataFrame, config: &AnalyzerConfig) -> Result<String> {
        let names = df.get_column_names();
        let named = &config.metadata_description_column;
        if names.iter().any(|n| n.as_str() == named.as_str()) {
            return Ok(named.clone());
        }

        match config.description_fallback_index {
            Some(index) if index < names.len() => {
                let positional = names[index].to_string();
                debug!(
                    "No '{}' column in metadata, using field {} ('{}')",
                    named,
                    index + 1,
                    positional
                );
                Ok(positional)
            }
            Some(index) => Err(DescribeError::MalformedMetadata(format!(
                "no '{}' column and only {} fields (description expected in field {})",
                named,
                names.len(),
                index + 1
            ))),
            None => Err(DescribeError::MalformedMetadata(format!(
                "missing description column '{}'",
                named
            ))),
        }
    }

    /// Description of a variable, if the table has a non-empty entry for it.
    pub fn lookup(&self, variable: &str) -> Option<&str> {
        self.descriptions.get(variable).and_then(|d| d.as_deref())
    }

    /// Check whether the table has a row for a variable.
    pub fn contains(&self, variable: &str) -> bool {
        self.descriptions.contains_key(variable)
    }

    /// Number of distinct variables described.
    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }

    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    /// Column the descriptions were read from.
    pub fn description_column(&self) -> &str {
        &self.description_column
    }
}
