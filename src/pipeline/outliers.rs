//! IQR-based outlier detection

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::pipeline::stats::{present_values, quantile_linear, round2, sorted};

/// Fence distance from the quartiles, in IQRs
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Outlier counts for one numerical column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierSummary {
    pub column: String,
    pub q1: Option<f64>,
    pub q3: Option<f64>,
    pub lower_fence: Option<f64>,
    pub upper_fence: Option<f64>,
    pub below: usize,
    pub above: usize,
    /// below + above
    pub count: usize,
    pub non_missing: usize,
    /// count / non_missing * 100, rounded to 2 decimals; undefined for empty columns
    pub percentage: Option<f64>,
}

impl OutlierSummary {
    pub fn from_values(column: &str, values: &[f64]) -> Self {
        let ordered = sorted(values);
        let q1 = quantile_linear(&ordered, 0.25);
        let q3 = quantile_linear(&ordered, 0.75);

        let (lower_fence, upper_fence) = match (q1, q3) {
            (Some(q1), Some(q3)) => {
                let iqr = q3 - q1;
                (
                    Some(q1 - IQR_MULTIPLIER * iqr),
                    Some(q3 + IQR_MULTIPLIER * iqr),
                )
            }
            _ => (None, None),
        };

        let below = lower_fence.map_or(0, |fence| values.iter().filter(|v| **v < fence).count());
        let above = upper_fence.map_or(0, |fence| values.iter().filter(|v| **v > fence).count());
        let count = below + above;

        let percentage = if values.is_empty() {
            None
        } else {
            Some(round2(count as f64 / values.len() as f64 * 100.0))
        };

        OutlierSummary {
            column: column.to_string(),
            q1,
            q3,
            lower_fence,
            upper_fence,
            below,
            above,
            count,
            non_missing: values.len(),
            percentage,
        }
    }

    pub fn is_outlier(&self, value: f64) -> bool {
        matches!(self.lower_fence, Some(fence) if value < fence)
            || matches!(self.upper_fence, Some(fence) if value > fence)
    }
}

/// Detect outliers in each listed numerical column
pub fn detect_outliers(df: &DataFrame, columns: &[String]) -> Result<Vec<OutlierSummary>> {
    columns
        .iter()
        .map(|name| {
            let col = df
                .column(name)
                .with_context(|| format!("Numerical column '{}' not found", name))?;
            let values = present_values(col)
                .with_context(|| format!("Column '{}' is not numeric", name))?;
            let summary = OutlierSummary::from_values(name, &values);
            debug!(column = %name, outliers = summary.count, "outlier summary");
            Ok(summary)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_high_outlier() {
        let summary = OutlierSummary::from_values("x", &[1.0, 2.0, 3.0, 4.0, 100.0]);
        assert_eq!(summary.q1, Some(2.0));
        assert_eq!(summary.q3, Some(4.0));
        assert_eq!(summary.lower_fence, Some(-1.0));
        assert_eq!(summary.upper_fence, Some(7.0));
        assert_eq!(summary.above, 1);
        assert_eq!(summary.below, 0);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.percentage, Some(20.0));
    }

    #[test]
    fn test_values_on_fence_are_not_outliers() {
        // q1 = 2, q3 = 4, fences [-1, 7]
        let summary = OutlierSummary::from_values("x", &[-1.0, 2.0, 3.0, 4.0, 7.0]);
        assert_eq!(summary.count, 0);
        assert!(!summary.is_outlier(7.0));
        assert!(summary.is_outlier(7.01));
    }

    #[test]
    fn test_percentage_rounding() {
        let mut values: Vec<f64> = vec![10.0; 6];
        values.push(1000.0);
        // q1 = q3 = 10, iqr = 0 -> 1000 is above the fence
        let summary = OutlierSummary::from_values("x", &values);
        assert_eq!(summary.q3, Some(10.0));
        assert_eq!(summary.count, 1);
        assert_eq!(summary.percentage, Some(14.29));
    }

    #[test]
    fn test_percentage_half_rounds_to_even() {
        // 1 / 800 = 0.125%
        let mut values: Vec<f64> = vec![0.0; 799];
        values.push(1000.0);
        let summary = OutlierSummary::from_values("x", &values);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.percentage, Some(0.12));
    }

    #[test]
    fn test_empty_column_has_no_percentage() {
        let summary = OutlierSummary::from_values("x", &[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.non_missing, 0);
        assert_eq!(summary.percentage, None);
        assert_eq!(summary.lower_fence, None);
    }

    #[test]
    fn test_detect_outliers_ignores_missing() {
        let df = df! {
            "x" => [Some(1.0f64), Some(2.0), None, Some(3.0), Some(4.0), Some(100.0)],
            "empty" => [None::<f64>, None, None, None, None, None],
        }
        .unwrap();

        let summaries =
            detect_outliers(&df, &["x".to_string(), "empty".to_string()]).unwrap();
        assert_eq!(summaries[0].non_missing, 5);
        assert_eq!(summaries[0].percentage, Some(20.0));
        assert_eq!(summaries[1].percentage, None);
    }
}
