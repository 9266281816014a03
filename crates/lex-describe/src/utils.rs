//! Shared helpers for dtype inspection, rounding and value formatting.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Category of a native data type as seen by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtypeCategory {
    /// Integer types
    Integer,
    /// Floating point types
    Float,
    /// String/text type
    Text,
    /// Anything else (booleans, dates, nested types, ...)
    Other,
}

/// Check if a DataType is an integer type.
#[inline]
pub fn is_integer_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Check if a DataType is an unsigned integer type.
#[inline]
pub fn is_unsigned_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64
    )
}

/// Check if a DataType is a floating point type.
#[inline]
pub fn is_float_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    is_integer_dtype(dtype) || is_float_dtype(dtype)
}

/// Check if a DataType holds text.
#[inline]
pub fn is_text_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::String | DataType::Categorical(_, _))
}

/// Get the category of a DataType.
pub fn get_dtype_category(dtype: &DataType) -> DtypeCategory {
    if is_integer_dtype(dtype) {
        DtypeCategory::Integer
    } else if is_float_dtype(dtype) {
        DtypeCategory::Float
    } else if is_text_dtype(dtype) {
        DtypeCategory::Text
    } else {
        DtypeCategory::Other
    }
}

// =============================================================================
// Numeric Utilities
// =============================================================================

/// Round a value to a fixed number of decimals.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Share of `part` in `total` as a rounded percentage.
///
/// An empty total yields `0.0` rather than a division by zero.
pub fn percentage(part: usize, total: usize, decimals: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(part as f64 / total as f64 * 100.0, decimals)
}

// =============================================================================
// Formatting Utilities
// =============================================================================

/// Format a float the way report strings show it: integral values keep one
/// decimal (`25.0`), others use the shortest exact form (`33.33`).
pub fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Render every value of a series as a label, keeping nulls as `None`.
///
/// Integers print without a fractional part, floats through
/// [`format_decimal`], and text as-is.
pub fn value_labels(series: &Series) -> PolarsResult<Vec<Option<String>>> {
    let labels = match get_dtype_category(series.dtype()) {
        DtypeCategory::Integer if is_unsigned_dtype(series.dtype()) => {
            let cast = series.cast(&DataType::UInt64)?;
            cast.u64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DtypeCategory::Integer => {
            let cast = series.cast(&DataType::Int64)?;
            cast.i64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DtypeCategory::Float => {
            let cast = series.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .map(|v| v.map(format_decimal))
                .collect()
        }
        DtypeCategory::Text | DtypeCategory::Other => {
            let cast = series.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()
        }
    };
    Ok(labels)
}

// =============================================================================
// Missing Value Utilities
// =============================================================================

/// Replace float NaN with null so NaN counts as missing everywhere.
///
/// Non-float series are returned unchanged.
pub fn nan_to_null(series: &Series) -> PolarsResult<Series> {
    let name = series.name().clone();
    let normalized = match series.dtype() {
        DataType::Float32 => series
            .f32()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect::<Float32Chunked>()
            .with_name(name)
            .into_series(),
        DataType::Float64 => series
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect::<Float64Chunked>()
            .with_name(name)
            .into_series(),
        _ => series.clone(),
    };
    Ok(normalized)
}

/// Apply [`nan_to_null`] to every float column of a frame.
pub fn nan_to_null_frame(mut df: DataFrame) -> PolarsResult<DataFrame> {
    let float_columns: Vec<PlSmallStr> = df
        .get_columns()
        .iter()
        .filter(|c| is_float_dtype(c.dtype()))
        .map(|c| c.name().clone())
        .collect();

    for name in float_columns {
        let normalized = nan_to_null(df.column(&name)?.as_materialized_series())?;
        df.with_column(normalized)?;
    }
    Ok(df)
}
