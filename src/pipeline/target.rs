//! Target column analysis and encoding
//!
//! The target column arrives as a two-valued label column and is encoded to
//! 0/1 before the correlation section runs.

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::EdaError;

/// Tolerance for floating point comparison when checking binary 0/1 values
const TOLERANCE: f64 = 1e-9;

/// Mapping configuration for converting target column values to binary 0/1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetMapping {
    /// Value that maps to 1 (event)
    pub event_value: String,
    /// Value that maps to 0 (non-event)
    pub non_event_value: String,
}

impl TargetMapping {
    /// Create a new target mapping
    pub fn new(event_value: String, non_event_value: String) -> Self {
        Self {
            event_value,
            non_event_value,
        }
    }
}

impl Default for TargetMapping {
    fn default() -> Self {
        Self::new(
            "satisfied".to_string(),
            "neutral or dissatisfied".to_string(),
        )
    }
}

/// Result of analyzing a target column
#[derive(Debug, Clone)]
pub enum TargetAnalysis {
    /// Target column is already binary 0/1, no mapping needed
    AlreadyBinary,
    /// Target column needs mapping - contains these unique values
    NeedsMapping { unique_values: Vec<String> },
}

/// Analyze a target column to determine if it needs value mapping
///
/// # Returns
/// - `AlreadyBinary` if the column is numeric and contains only 0 and 1 values
/// - `NeedsMapping` with the sorted unique labels otherwise
pub fn analyze_target_column(df: &DataFrame, target: &str) -> Result<TargetAnalysis> {
    let target_col = df
        .column(target)
        .with_context(|| format!("Target column '{}' not found", target))?;

    if target_col.dtype().is_primitive_numeric() {
        let float_col = target_col.cast(&DataType::Float64)?;
        let is_binary = float_col
            .f64()?
            .into_iter()
            .flatten()
            .all(|v| v.abs() < TOLERANCE || (v - 1.0).abs() < TOLERANCE);

        if is_binary {
            return Ok(TargetAnalysis::AlreadyBinary);
        }
    }

    let mut unique_values: Vec<String> = column_to_string_vec(target_col)?
        .into_iter()
        .flatten()
        .collect();
    unique_values.sort();
    unique_values.dedup();

    Ok(TargetAnalysis::NeedsMapping { unique_values })
}

/// Create a binary target mask based on the mapping
///
/// Returns a Vec<Option<i32>> where:
/// - Some(1) for event values
/// - Some(0) for non-event values
/// - None for nulls and values that don't match either label
pub fn create_target_mask(
    df: &DataFrame,
    target: &str,
    mapping: &TargetMapping,
) -> Result<Vec<Option<i32>>> {
    let target_col = df
        .column(target)
        .with_context(|| format!("Target column '{}' not found", target))?;

    let string_values = column_to_string_vec(target_col)?;

    let mask: Vec<Option<i32>> = string_values
        .iter()
        .map(|v| match v {
            Some(s) if s == &mapping.event_value => Some(1),
            Some(s) if s == &mapping.non_event_value => Some(0),
            _ => None,
        })
        .collect();

    Ok(mask)
}

/// Convert a column to a Vec of Option<String> for label comparison
fn column_to_string_vec(col: &Column) -> Result<Vec<Option<String>>> {
    let values: Vec<Option<String>> = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => {
            let cast = col.cast(&DataType::Int64)?;
            cast.i64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 => {
            let cast = col.cast(&DataType::UInt64)?;
            cast.u64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::Float32 | DataType::Float64 => {
            let cast = col.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .map(|v| v.map(|n| format!("{}", n)))
                .collect()
        }
        DataType::Boolean => col
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| b.to_string()))
            .collect(),
        _ => {
            let cast = col.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()
        }
    };

    Ok(values)
}

/// Replace the target column with its 0/1 encoding.
///
/// A numeric target that is already 0/1 is cast to Int32 and left otherwise
/// unchanged. Labels outside the mapping are an input error unless
/// `allow_unmapped` is set, in which case they become nulls.
pub fn encode_target(
    df: &mut DataFrame,
    target: &str,
    mapping: &TargetMapping,
    allow_unmapped: bool,
) -> Result<()> {
    if df.column(target).is_err() {
        return Err(EdaError::TargetNotFound {
            column: target.to_string(),
            available: df
                .get_column_names()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
        .into());
    }

    let unique_values = match analyze_target_column(df, target)? {
        TargetAnalysis::AlreadyBinary => {
            debug!(column = target, "target already binary, skipping label mapping");
            let encoded = df.column(target)?.cast(&DataType::Int32)?;
            df.with_column(encoded)?;
            return Ok(());
        }
        TargetAnalysis::NeedsMapping { unique_values } => unique_values,
    };

    // sorted and deduplicated already; nulls are not labels
    let labels: Vec<String> = unique_values
        .into_iter()
        .filter(|v| *v != mapping.event_value && *v != mapping.non_event_value)
        .collect();
    let mask = create_target_mask(df, target, mapping)?;

    if !labels.is_empty() {
        let source_nulls = df.column(target)?.null_count();
        let count = mask
            .iter()
            .filter(|v| v.is_none())
            .count()
            .saturating_sub(source_nulls);

        if !allow_unmapped {
            return Err(EdaError::UnrecognizedTargetLabels {
                column: target.to_string(),
                event: mapping.event_value.clone(),
                non_event: mapping.non_event_value.clone(),
                labels,
                count,
            }
            .into());
        }
        warn!(
            column = target,
            count,
            labels = ?labels,
            "unrecognized target labels coerced to null"
        );
    }

    df.with_column(Column::new(target.into(), mask))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_binary_int_target() {
        let df = df! {
            "target" => [0i32, 1, 0, 1, 0, 1],
            "feature" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0],
        }
        .unwrap();

        let result = analyze_target_column(&df, "target").unwrap();
        assert!(matches!(result, TargetAnalysis::AlreadyBinary));
    }

    #[test]
    fn test_analyze_string_target() {
        let df = df! {
            "target" => ["satisfied", "neutral or dissatisfied", "satisfied"],
        }
        .unwrap();

        match analyze_target_column(&df, "target").unwrap() {
            TargetAnalysis::NeedsMapping { unique_values } => {
                assert_eq!(
                    unique_values,
                    vec!["neutral or dissatisfied".to_string(), "satisfied".to_string()]
                );
            }
            _ => panic!("Expected NeedsMapping"),
        }
    }

    #[test]
    fn test_analyze_non_binary_numeric_target() {
        let df = df! {
            "target" => [1i32, 2, 3, 1, 2, 3],
        }
        .unwrap();

        match analyze_target_column(&df, "target").unwrap() {
            TargetAnalysis::NeedsMapping { unique_values } => assert_eq!(unique_values.len(), 3),
            _ => panic!("Expected NeedsMapping"),
        }
    }

    #[test]
    fn test_create_target_mask_default_mapping() {
        let df = df! {
            "target" => [Some("satisfied"), Some("neutral or dissatisfied"), None, Some("other")],
        }
        .unwrap();

        let mask = create_target_mask(&df, "target", &TargetMapping::default()).unwrap();
        assert_eq!(mask, vec![Some(1), Some(0), None, None]);
    }

    #[test]
    fn test_unmapped_labels_reported_sorted_with_row_count() {
        let mut df = df! {
            "target" => [Some("satisfied"), Some("meh"), None, Some("awful"), Some("meh")],
        }
        .unwrap();

        let err = encode_target(&mut df, "target", &TargetMapping::default(), false).unwrap_err();
        match err.downcast_ref::<EdaError>() {
            Some(EdaError::UnrecognizedTargetLabels { labels, count, .. }) => {
                assert_eq!(labels, &vec!["awful".to_string(), "meh".to_string()]);
                assert_eq!(*count, 3);
            }
            other => panic!("Expected UnrecognizedTargetLabels, got {:?}", other),
        }
    }

    #[test]
    fn test_encode_target_replaces_labels() {
        let mut df = df! {
            "target" => ["satisfied", "neutral or dissatisfied", "satisfied"],
        }
        .unwrap();

        encode_target(&mut df, "target", &TargetMapping::default(), false).unwrap();

        let col = df.column("target").unwrap();
        assert_eq!(col.dtype(), &DataType::Int32);
        let values: Vec<Option<i32>> = col.i32().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(1), Some(0), Some(1)]);
    }

    #[test]
    fn test_encode_target_rejects_unknown_labels() {
        let mut df = df! {
            "target" => ["satisfied", "angry", "angry", "bored"],
        }
        .unwrap();

        let err = encode_target(&mut df, "target", &TargetMapping::default(), false).unwrap_err();
        match err.downcast_ref::<EdaError>() {
            Some(EdaError::UnrecognizedTargetLabels { labels, count, .. }) => {
                assert_eq!(labels, &vec!["angry".to_string(), "bored".to_string()]);
                assert_eq!(*count, 3);
            }
            other => panic!("Expected UnrecognizedTargetLabels, got {:?}", other),
        }
    }

    #[test]
    fn test_encode_target_coerces_when_allowed() {
        let mut df = df! {
            "target" => ["satisfied", "angry"],
        }
        .unwrap();

        encode_target(&mut df, "target", &TargetMapping::default(), true).unwrap();
        let values: Vec<Option<i32>> = df
            .column("target")
            .unwrap()
            .i32()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(values, vec![Some(1), None]);
    }

    #[test]
    fn test_encode_missing_target_column() {
        let mut df = df! { "feature" => [1.0f64, 2.0] }.unwrap();

        let err = encode_target(&mut df, "target", &TargetMapping::default(), false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EdaError>(),
            Some(EdaError::TargetNotFound { .. })
        ));
    }
}
