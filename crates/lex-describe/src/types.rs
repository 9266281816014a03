//! Report data model: column kinds, report rows and the dataset summary.

use serde::{Deserialize, Serialize};

/// Analysis bucket a column falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Integer or float column with more than two distinct values.
    Numeric,
    /// Integer or float column with exactly two distinct values.
    Boolean,
    /// Text column.
    Categorical,
}

impl ColumnKind {
    /// Get a human-readable display name for the kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Numeric => "Numeric",
            Self::Boolean => "Boolean",
            Self::Categorical => "Categorical",
        }
    }

    /// Snake-case name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Boolean => "boolean",
            Self::Categorical => "categorical",
        }
    }
}

/// Column names grouped by [`ColumnKind`], each in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTypes {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
    pub boolean: Vec<String>,
}

impl ColumnTypes {
    /// Kind of a column, or `None` when it is not analyzed.
    pub fn kind_of(&self, column: &str) -> Option<ColumnKind> {
        if self.numeric.iter().any(|c| c == column) {
            Some(ColumnKind::Numeric)
        } else if self.boolean.iter().any(|c| c == column) {
            Some(ColumnKind::Boolean)
        } else if self.categorical.iter().any(|c| c == column) {
            Some(ColumnKind::Categorical)
        } else {
            None
        }
    }

    /// Number of analyzed columns across all buckets.
    pub fn total(&self) -> usize {
        self.numeric.len() + self.categorical.len() + self.boolean.len()
    }

    /// Keep only the columns for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.numeric.retain(|c| keep(c));
        self.categorical.retain(|c| keep(c));
        self.boolean.retain(|c| keep(c));
    }

    /// Bucket sizes as reported in [`GlobalInfo`].
    pub fn breakdown(&self) -> DtypeBreakdown {
        DtypeBreakdown {
            categorical: self.categorical.len(),
            numeric: self.numeric.len(),
            boolean: self.boolean.len(),
        }
    }
}

/// Report row for a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericColumnReport {
    pub column: String,
    pub non_missing: usize,
    pub missing_pct: f64,
    /// `None` when the column holds no values.
    pub mean: Option<f64>,
    pub max: Option<f64>,
    pub min: Option<f64>,
    pub description: String,
}

/// Report row for a two-valued numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanColumnReport {
    pub column: String,
    pub non_missing: usize,
    pub missing_pct: f64,
    /// `"value (pct), ..."` over every value, missing included.
    pub distribution: String,
    pub description: String,
}

/// Report row for a text column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalColumnReport {
    pub column: String,
    pub non_missing: usize,
    pub missing_pct: f64,
    /// Distinct values, missing excluded.
    pub distinct_categories: usize,
    /// `"value (pct), ..."` over every value, missing included.
    pub top_categories: String,
    pub description: String,
}

/// One row of the column report.
///
/// Serialized with a `kind` discriminant next to the variant's fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnReport {
    Numeric(NumericColumnReport),
    Boolean(BooleanColumnReport),
    Categorical(CategoricalColumnReport),
}

impl ColumnReport {
    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Numeric(_) => ColumnKind::Numeric,
            Self::Boolean(_) => ColumnKind::Boolean,
            Self::Categorical(_) => ColumnKind::Categorical,
        }
    }

    pub fn column(&self) -> &str {
        match self {
            Self::Numeric(r) => &r.column,
            Self::Boolean(r) => &r.column,
            Self::Categorical(r) => &r.column,
        }
    }

    pub fn non_missing(&self) -> usize {
        match self {
            Self::Numeric(r) => r.non_missing,
            Self::Boolean(r) => r.non_missing,
            Self::Categorical(r) => r.non_missing,
        }
    }

    pub fn missing_pct(&self) -> f64 {
        match self {
            Self::Numeric(r) => r.missing_pct,
            Self::Boolean(r) => r.missing_pct,
            Self::Categorical(r) => r.missing_pct,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Numeric(r) => &r.description,
            Self::Boolean(r) => &r.description,
            Self::Categorical(r) => &r.description,
        }
    }

    /// Distribution string for boolean and categorical rows.
    pub fn distribution(&self) -> Option<&str> {
        match self {
            Self::Numeric(_) => None,
            Self::Boolean(r) => Some(&r.distribution),
            Self::Categorical(r) => Some(&r.top_categories),
        }
    }
}

/// Column counts per analysis bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DtypeBreakdown {
    pub categorical: usize,
    pub numeric: usize,
    pub boolean: usize,
}

/// Dataset-level summary facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalInfo {
    pub rows: usize,
    pub columns: usize,
    /// Rows repeating an earlier row; first occurrences are not counted.
    pub duplicate_rows: usize,
    pub constant_column_count: usize,
    pub constant_columns: Vec<String>,
    /// Missing cells over all cells.
    pub missing_pct: f64,
    pub dtypes: DtypeBreakdown,
}
