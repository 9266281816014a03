//! Per-column aggregates: missing ratios, numeric ranges and value
//! distributions.

use crate::error::Result;
use crate::utils::{format_decimal, percentage, value_labels};
use polars::prelude::*;
use std::collections::HashMap;

/// Mean and range of the non-missing values of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct NumericSummary {
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Rounded share of missing values in a series, relative to `total_rows`.
pub(crate) fn missing_percentage(series: &Series, total_rows: usize, decimals: u32) -> f64 {
    percentage(series.null_count(), total_rows, decimals)
}

/// Compute mean, min and max over the non-missing values.
pub(crate) fn numeric_summary(series: &Series) -> Result<NumericSummary> {
    let float_series = series.cast(&DataType::Float64)?;
    let values = float_series.f64()?;

    let mut count = 0usize;
    let mut sum = 0.0f64;
    let mut min: Option<f64> = None;
    let mut max: Option<f64> = None;
    for val in values.into_iter().flatten() {
        count += 1;
        sum += val;
        min = Some(min.map_or(val, |m| m.min(val)));
        max = Some(max.map_or(val, |m| m.max(val)));
    }

    let mean = if count > 0 {
        Some(sum / count as f64)
    } else {
        None
    };

    Ok(NumericSummary { mean, min, max })
}

/// Count occurrences of every value, missing included (as `None`).
///
/// Sorted by descending count; ties keep the order of first appearance.
pub(crate) fn value_counts(series: &Series) -> Result<Vec<(Option<String>, usize)>> {
    let labels = value_labels(series)?;

    let mut counts: Vec<(Option<String>, usize)> = Vec::new();
    let mut index: HashMap<Option<String>, usize> = HashMap::new();
    for label in labels {
        match index.get(&label) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(label.clone(), counts.len());
                counts.push((label, 1));
            }
        }
    }

    // stable: equal counts stay in appearance order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(counts)
}

/// Render the value distribution as `"value (pct), ..."`.
///
/// Percentages are relative to `total_rows`; the missing bucket is shown
/// with `missing_label`.
pub(crate) fn value_distribution(
    series: &Series,
    total_rows: usize,
    missing_label: &str,
    decimals: u32,
) -> Result<String> {
    let parts: Vec<String> = value_counts(series)?
        .into_iter()
        .map(|(label, count)| {
            let pct = percentage(count, total_rows, decimals);
            format!(
                "{} ({})",
                label.as_deref().unwrap_or(missing_label),
                format_decimal(pct)
            )
        })
        .collect();

    Ok(parts.join(", "))
}

/// Number of distinct non-missing values.
pub(crate) fn distinct_non_missing(series: &Series) -> Result<usize> {
    Ok(series.drop_nulls().n_unique()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_percentages(distribution: &str) -> Vec<f64> {
        distribution
            .split(", ")
            .filter_map(|part| {
                let start = part.rfind('(')?;
                part[start + 1..part.len() - 1].parse::<f64>().ok()
            })
            .collect()
    }

    // ==================== missing_percentage tests ====================

    #[test]
    fn test_missing_percentage_three_of_ten() {
        let values: Vec<Option<f64>> = (0..10)
            .map(|i| if i < 3 { None } else { Some(i as f64) })
            .collect();
        let series = Series::new("val".into(), values);
        assert_eq!(missing_percentage(&series, 10, 2), 30.0);
    }

    #[test]
    fn test_missing_percentage_empty_series() {
        let series = Series::new("val".into(), Vec::<f64>::new());
        assert_eq!(missing_percentage(&series, 0, 2), 0.0);
    }

    // ==================== numeric_summary tests ====================

    #[test]
    fn test_numeric_summary_ignores_nulls() {
        let series = Series::new("price".into(), &[Some(10i64), None, Some(30), Some(20)]);
        let summary = numeric_summary(&series).unwrap();
        assert_eq!(summary.mean, Some(20.0));
        assert_eq!(summary.min, Some(10.0));
        assert_eq!(summary.max, Some(30.0));
    }

    #[test]
    fn test_numeric_summary_all_null() {
        let series = Series::new("price".into(), &[None::<f64>, None]);
        assert_eq!(numeric_summary(&series).unwrap(), NumericSummary::default());
    }

    // ==================== value_counts tests ====================

    #[test]
    fn test_value_counts_ties_keep_appearance_order() {
        let series = Series::new("age".into(), &[Some(25i64), Some(30), Some(25), None]);
        let counts = value_counts(&series).unwrap();
        assert_eq!(
            counts,
            vec![
                (Some("25".to_string()), 2),
                (Some("30".to_string()), 1),
                (None, 1),
            ]
        );
    }

    // ==================== value_distribution tests ====================

    #[test]
    fn test_distribution_with_missing_bucket() {
        let series = Series::new("age".into(), &[Some(25i64), Some(30), Some(25), None]);
        let dist = value_distribution(&series, 4, "missing", 2).unwrap();
        assert_eq!(dist, "25 (50.0), 30 (25.0), missing (25.0)");
    }

    #[test]
    fn test_distribution_text() {
        let series = Series::new("city".into(), &["NY", "LA", "NY", "NY"]);
        let dist = value_distribution(&series, 4, "missing", 2).unwrap();
        assert_eq!(dist, "NY (75.0), LA (25.0)");
    }

    #[test]
    fn test_distribution_sums_to_hundred() {
        let series = Series::new(
            "segment".into(),
            &[Some("a"), Some("b"), Some("c"), None, Some("a"), Some("b")],
        );
        let dist = value_distribution(&series, 6, "missing", 2).unwrap();
        let total: f64 = parse_percentages(&dist).iter().sum();
        assert!((total - 100.0).abs() < 0.05, "got {} from {}", total, dist);
    }

    #[test]
    fn test_distribution_thirds_are_rounded() {
        let series = Series::new("flag".into(), &[1.0f64, 0.0, 0.0]);
        let dist = value_distribution(&series, 3, "missing", 2).unwrap();
        assert_eq!(dist, "0.0 (66.67), 1.0 (33.33)");
    }

    #[test]
    fn test_distinct_non_missing() {
        let series = Series::new("city".into(), &[Some("NY"), None, Some("LA"), Some("NY")]);
        assert_eq!(distinct_non_missing(&series).unwrap(), 2);
    }
}
