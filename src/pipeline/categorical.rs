//! Categorical column breakdowns and dominance insights

use std::collections::HashMap;

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::pipeline::stats::round2;

/// Label used for missing values, which count as their own category
pub const MISSING_LABEL: &str = "NaN";

/// Top share (percent) at or above which a column is dominated by one value
pub const DOMINANT_PCT: f64 = 70.0;

/// Top share (percent) at or above which grouping rare values is suggested
pub const FREQUENT_PCT: f64 = 40.0;

/// Distinct values above which a column is flagged as high-cardinality
pub const MANY_UNIQUE_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalInsight {
    HighlyDominated,
    FrequentValue,
    ManyUnique,
    FairlyBalanced,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
    /// count / total rows * 100, rounded to 2 decimals
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSummary {
    pub column: String,
    pub total_rows: usize,
    /// Distinct non-missing values
    pub distinct: usize,
    pub top: Vec<CategoryCount>,
    pub insight: CategoricalInsight,
}

struct CategoricalRule {
    applies: fn(&CategoricalSummary) -> bool,
    insight: CategoricalInsight,
}

const CATEGORICAL_RULES: &[CategoricalRule] = &[
    CategoricalRule {
        applies: |s| s.top_percentage().is_some_and(|pct| pct >= DOMINANT_PCT),
        insight: CategoricalInsight::HighlyDominated,
    },
    CategoricalRule {
        applies: |s| s.top_percentage().is_some_and(|pct| pct >= FREQUENT_PCT),
        insight: CategoricalInsight::FrequentValue,
    },
    CategoricalRule {
        applies: |s| s.distinct > MANY_UNIQUE_LIMIT,
        insight: CategoricalInsight::ManyUnique,
    },
    CategoricalRule {
        applies: |_| true,
        insight: CategoricalInsight::FairlyBalanced,
    },
];

pub fn classify_categorical(summary: &CategoricalSummary) -> CategoricalInsight {
    CATEGORICAL_RULES
        .iter()
        .find(|rule| (rule.applies)(summary))
        .map(|rule| rule.insight)
        .unwrap_or(CategoricalInsight::FairlyBalanced)
}

/// Count labels in first-appearance order, then sort by count descending.
/// The sort is stable, so equal counts keep first-appearance order.
pub fn value_counts<'a, I>(labels: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut index: HashMap<Option<&'a str>, usize> = HashMap::new();
    let mut counts: Vec<(Option<&'a str>, usize)> = Vec::new();

    for label in labels {
        match index.get(&label) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(label, counts.len());
                counts.push((label, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .map(|(label, count)| (label.unwrap_or(MISSING_LABEL).to_string(), count))
        .collect()
}

impl CategoricalSummary {
    /// Build a summary from labels in row order (`None` = missing)
    pub fn from_labels<'a, I>(column: &str, labels: I, top_n: usize) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut total_rows = 0;
        let mut missing = 0;
        let labels: Vec<Option<&'a str>> = labels
            .into_iter()
            .inspect(|l| {
                total_rows += 1;
                if l.is_none() {
                    missing += 1;
                }
            })
            .collect();

        let counts = value_counts(labels);
        let distinct = counts.len() - usize::from(missing > 0);

        let top = counts
            .into_iter()
            .take(top_n)
            .map(|(label, count)| CategoryCount {
                label,
                count,
                percentage: round2(count as f64 / total_rows as f64 * 100.0),
            })
            .collect();

        let mut summary = CategoricalSummary {
            column: column.to_string(),
            total_rows,
            distinct,
            top,
            insight: CategoricalInsight::FairlyBalanced,
        };
        summary.insight = classify_categorical(&summary);
        summary
    }

    pub fn top_percentage(&self) -> Option<f64> {
        self.top.first().map(|c| c.percentage)
    }

    pub fn insight_message(&self) -> String {
        let top_label = self.top.first().map(|c| c.label.as_str()).unwrap_or("");
        let top_pct = self.top_percentage().unwrap_or(0.0);
        match self.insight {
            CategoricalInsight::HighlyDominated => format!(
                "`{}` is highly dominated by `{}` ({}%).",
                self.column, top_label, top_pct
            ),
            CategoricalInsight::FrequentValue => format!(
                "Frequent value `{}` in `{}` appears {}%, consider grouping rare values.",
                top_label, self.column, top_pct
            ),
            CategoricalInsight::ManyUnique => format!(
                "`{}` has many unique values ({}).",
                self.column, self.distinct
            ),
            CategoricalInsight::FairlyBalanced => format!("`{}` is fairly balanced.", self.column),
        }
    }
}

/// Boolean categories are labelled `True` / `False`
fn bool_label(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Summarize each listed categorical column; values are compared as strings
pub fn summarize_categorical(
    df: &DataFrame,
    columns: &[String],
    top_n: usize,
) -> Result<Vec<CategoricalSummary>> {
    columns
        .iter()
        .map(|name| {
            let col = df
                .column(name)
                .with_context(|| format!("Categorical column '{}' not found", name))?;
            let summary = if col.dtype() == &DataType::Boolean {
                let labels = col.bool()?.into_iter().map(|v| v.map(bool_label));
                CategoricalSummary::from_labels(name, labels, top_n)
            } else {
                let as_str = col
                    .cast(&DataType::String)
                    .with_context(|| format!("Column '{}' cannot be read as text", name))?;
                CategoricalSummary::from_labels(name, as_str.str()?.into_iter(), top_n)
            };
            debug!(column = %name, insight = ?summary.insight, "categorical summary");
            Ok(summary)
        })
        .collect()
}
