//! Numerical column summaries and distribution insights

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::pipeline::stats::{
    distinct_count, mean, median, mode, present_values, round2, sample_std, sorted,
};

/// Columns with fewer distinct values than this look categorical
pub const CATEGORICAL_DISTINCT_LIMIT: usize = 10;

/// Mean-median gap, in standard deviations, above which a column is skewed
pub const SKEW_STD_RATIO: f64 = 0.5;

/// Distribution insight for a numerical column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericInsight {
    Skewed,
    MaybeCategorical,
    FairlyDistributed,
}

/// Descriptive statistics for one numerical column.
///
/// Statistics are rounded to 2 decimals and computed over non-missing values
/// only; they are `None` when the column has no usable values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub column: String,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub mode: Option<f64>,
    pub std: Option<f64>,
    pub missing: usize,
    pub non_missing: usize,
    pub distinct: usize,
    pub insight: NumericInsight,
}

/// An ordered rule: the first predicate that holds picks the insight
struct NumericRule {
    applies: fn(&NumericSummary) -> bool,
    insight: NumericInsight,
}

const NUMERIC_RULES: &[NumericRule] = &[
    NumericRule {
        applies: is_skewed,
        insight: NumericInsight::Skewed,
    },
    NumericRule {
        applies: |s| s.distinct < CATEGORICAL_DISTINCT_LIMIT,
        insight: NumericInsight::MaybeCategorical,
    },
    NumericRule {
        applies: |_| true,
        insight: NumericInsight::FairlyDistributed,
    },
];

/// Skewed iff |mean - median| > 0.5 * std with a positive std
fn is_skewed(s: &NumericSummary) -> bool {
    match (s.mean, s.median, s.std) {
        (Some(mean), Some(median), Some(std)) if std > 0.0 => {
            (mean - median).abs() > std * SKEW_STD_RATIO
        }
        _ => false,
    }
}

/// Apply the rule table to a summary
pub fn classify_numeric(summary: &NumericSummary) -> NumericInsight {
    NUMERIC_RULES
        .iter()
        .find(|rule| (rule.applies)(summary))
        .map(|rule| rule.insight)
        .unwrap_or(NumericInsight::FairlyDistributed)
}

impl NumericSummary {
    /// Summarize a slice of non-missing values
    pub fn from_values(column: &str, values: &[f64], total_rows: usize) -> Self {
        let ordered = sorted(values);
        let mut summary = NumericSummary {
            column: column.to_string(),
            mean: mean(values).map(round2),
            median: median(&ordered).map(round2),
            mode: mode(&ordered).map(round2),
            std: sample_std(values).map(round2),
            missing: total_rows.saturating_sub(values.len()),
            non_missing: values.len(),
            distinct: distinct_count(&ordered),
            insight: NumericInsight::FairlyDistributed,
        };
        summary.insight = classify_numeric(&summary);
        summary
    }

    /// Narrative message for the insight
    pub fn insight_message(&self) -> String {
        match self.insight {
            NumericInsight::Skewed => {
                format!("`{}` is skewed (mean and median differ).", self.column)
            }
            NumericInsight::MaybeCategorical => format!(
                "`{}` may be categorical (only {} unique values).",
                self.column, self.distinct
            ),
            NumericInsight::FairlyDistributed => {
                format!("`{}` seems fairly distributed.", self.column)
            }
        }
    }
}

/// Summarize each listed numerical column of the dataset
pub fn summarize_numeric(df: &DataFrame, columns: &[String]) -> Result<Vec<NumericSummary>> {
    let total_rows = df.height();

    columns
        .iter()
        .map(|name| {
            let col = df
                .column(name)
                .with_context(|| format!("Numerical column '{}' not found", name))?;
            let values = present_values(col)
                .with_context(|| format!("Column '{}' is not numeric", name))?;
            let summary = NumericSummary::from_values(name, &values, total_rows);
            debug!(column = %name, insight = ?summary.insight, "numeric summary");
            Ok(summary)
        })
        .collect()
}
