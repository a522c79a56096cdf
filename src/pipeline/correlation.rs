//! Correlation of numerical features with the encoded target

use anyhow::{Context, Result};
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::pipeline::stats::{numeric_values, pearson};

/// A feature and its signed Pearson correlation with the target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetCorrelation {
    pub feature: String,
    pub correlation: f64,
}

/// Pearson correlation of every listed feature with the target column.
///
/// Uses pairwise complete observations per feature. Features whose
/// correlation is undefined (constant, or fewer than two paired rows) are
/// left out. Output keeps the input column order.
pub fn correlate_with_target(
    df: &DataFrame,
    features: &[String],
    target: &str,
) -> Result<Vec<TargetCorrelation>> {
    let target_col = df
        .column(target)
        .with_context(|| format!("Target column '{}' not found", target))?;
    let target_values = numeric_values(target_col)
        .with_context(|| format!("Target column '{}' is not numeric", target))?;

    // Pre-cast all feature columns so the parallel pass is pure arithmetic
    let feature_values: Vec<(&String, Vec<Option<f64>>)> = features
        .iter()
        .filter(|name| name.as_str() != target)
        .map(|name| {
            let col = df
                .column(name)
                .with_context(|| format!("Numerical column '{}' not found", name))?;
            Ok((name, numeric_values(col)?))
        })
        .collect::<Result<_>>()?;

    let correlations: Vec<TargetCorrelation> = feature_values
        .par_iter()
        .filter_map(|(name, values)| {
            let corr = pearson(values, &target_values);
            if corr.is_none() {
                debug!(feature = %name, "correlation undefined, skipping");
            }
            corr.map(|c| TargetCorrelation {
                feature: (*name).clone(),
                correlation: c,
            })
        })
        .collect();

    Ok(correlations)
}

/// Rank by absolute correlation descending and keep the first `top_n`.
///
/// The sort is stable: equal magnitudes keep their input order.
pub fn rank_correlations(
    mut correlations: Vec<TargetCorrelation>,
    top_n: usize,
) -> Vec<TargetCorrelation> {
    correlations.sort_by(|a, b| {
        b.correlation
            .abs()
            .partial_cmp(&a.correlation.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    correlations.truncate(top_n);
    correlations
}

/// Top `top_n` features by absolute correlation with the target
pub fn top_target_correlations(
    df: &DataFrame,
    features: &[String],
    target: &str,
    top_n: usize,
) -> Result<Vec<TargetCorrelation>> {
    let correlations = correlate_with_target(df, features, target)?;
    Ok(rank_correlations(correlations, top_n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corr(feature: &str, correlation: f64) -> TargetCorrelation {
        TargetCorrelation {
            feature: feature.to_string(),
            correlation,
        }
    }

    #[test]
    fn test_rank_by_absolute_value_keeps_sign() {
        let ranked = rank_correlations(
            vec![corr("a", 0.2), corr("b", -0.9), corr("c", 0.5)],
            10,
        );
        assert_eq!(ranked, vec![corr("b", -0.9), corr("c", 0.5), corr("a", 0.2)]);
    }

    #[test]
    fn test_rank_ties_are_stable() {
        let ranked = rank_correlations(
            vec![corr("first", 0.5), corr("second", -0.5), corr("third", 0.5)],
            2,
        );
        assert_eq!(ranked, vec![corr("first", 0.5), corr("second", -0.5)]);
    }

    #[test]
    fn test_correlate_skips_target_and_constant() {
        let df = df! {
            "target" => [0i32, 1, 0, 1],
            "up" => [0.0f64, 1.0, 0.0, 1.0],
            "flat" => [3.0f64, 3.0, 3.0, 3.0],
        }
        .unwrap();

        let features = vec!["up".to_string(), "flat".to_string(), "target".to_string()];
        let result = correlate_with_target(&df, &features, "target").unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].feature, "up");
        assert!((result[0].correlation - 1.0).abs() < 1e-12);
    }
}
