//! Report generation: runs the summarizers and emits blocks to a sink

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::error::EdaError;
use crate::pipeline::stats::present_values;
use crate::pipeline::{
    detect_outliers, encode_target, summarize_categorical, summarize_numeric,
    top_target_correlations, AnalysisConfig, CategoricalSummary, ColumnRoles, NumericSummary,
    OutlierSummary, Section, TargetCorrelation,
};
use crate::report::chart::{
    Bar, BarChart, Chart, ColorScale, Histogram, LineStyle, ReferenceLine, TableBlock,
};
use crate::report::sink::ReportSink;

/// Everything computed for one report, independent of how it was rendered
#[derive(Debug, Clone, Default, Serialize)]
pub struct EdaReport {
    pub numerical: Vec<NumericSummary>,
    pub outliers: Vec<OutlierSummary>,
    pub categorical: Vec<CategoricalSummary>,
    pub correlations: Vec<TargetCorrelation>,
}

/// Format an optional statistic, `n/a` when undefined
fn fmt_stat(value: Option<f64>) -> String {
    // Debug keeps the trailing `.0` on whole floats
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:?}", v))
}

fn fmt_pct(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}%", v))
}

/// Drives the four summarizers over one dataset
pub struct ReportGenerator<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> ReportGenerator<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Encode the target, compute every selected section and emit it to `sink`.
    ///
    /// Column roles are taken from the raw dataset before the target is
    /// encoded.
    pub fn generate(&self, mut df: DataFrame, sink: &mut dyn ReportSink) -> Result<EdaReport> {
        let config = self.config;
        config.validate()?;
        let target = config.target.as_str();

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

        let roles = ColumnRoles::detect(&df, target);
        if roles.numerical.is_empty() {
            return Err(EdaError::NoNumericColumns {
                target: target.to_string(),
            }
            .into());
        }

        encode_target(&mut df, target, &config.mapping, config.allow_unmapped_target)?;

        let mut report = EdaReport::default();

        if config.wants(Section::Numerical) || config.wants(Section::Outliers) {
            sink.begin_section("Numerical Analysis", 0)?;

            if config.wants(Section::Numerical) {
                let columns = roles.summarizable(config.skip_leading_numeric);
                info!(columns = columns.len(), "numerical summaries");
                report.numerical = summarize_numeric(&df, columns)?;
                self.emit_numeric(&df, &report.numerical, sink)?;
            }

            if config.wants(Section::Outliers) {
                info!(columns = roles.numerical.len(), "outlier detection");
                report.outliers = detect_outliers(&df, &roles.numerical)?;
                self.emit_outliers(&report.outliers, sink)?;
            }
        }

        if config.wants(Section::Categorical) {
            info!(columns = roles.categorical.len(), "categorical summaries");
            report.categorical =
                summarize_categorical(&df, &roles.categorical, config.top_categories)?;
            self.emit_categorical(&report.categorical, sink)?;
        }

        if config.wants(Section::Correlation) {
            info!(features = roles.numerical.len(), "target correlation");
            report.correlations = top_target_correlations(
                &df,
                &roles.numerical,
                target,
                config.top_correlations,
            )?;
            self.emit_correlations(&report.correlations, sink)?;
        }

        sink.finish()?;
        Ok(report)
    }

    fn emit_numeric(
        &self,
        df: &DataFrame,
        summaries: &[NumericSummary],
        sink: &mut dyn ReportSink,
    ) -> Result<()> {
        sink.begin_section("Distribution & Stats", 1)?;

        for summary in summaries {
            sink.begin_section(&format!("Column: `{}`", summary.column), 2)?;
            sink.add_text(&format!(
                "- Mean: {}\n- Median: {}\n- Mode: {}\n- Std Dev: {}\n- Missing Values: {}\n- Insight: {}",
                fmt_stat(summary.mean),
                fmt_stat(summary.median),
                fmt_stat(summary.mode),
                fmt_stat(summary.std),
                summary.missing,
                summary.insight_message()
            ))?;

            let col = df
                .column(&summary.column)
                .with_context(|| format!("Numerical column '{}' not found", summary.column))?;
            let values = present_values(col)?;
            let histogram = Histogram::from_values(
                format!("Distribution of `{}`", summary.column),
                summary.column.clone(),
                &values,
                self.config.histogram_bins,
                reference_lines(summary),
            );
            sink.add_chart(&Chart::Histogram(histogram))?;
        }

        Ok(())
    }

    fn emit_outliers(&self, summaries: &[OutlierSummary], sink: &mut dyn ReportSink) -> Result<()> {
        sink.begin_section("Outliers Summary", 1)?;
        sink.add_text("Outlier Analysis using IQR")?;

        let mut table = TableBlock::new(&["Column", "Outliers Count", "Outliers %"]);
        let mut bars = Vec::with_capacity(summaries.len());
        for s in summaries {
            table.push_row(vec![
                s.column.clone(),
                s.count.to_string(),
                fmt_pct(s.percentage),
            ]);
            bars.push(Bar {
                label: s.column.clone(),
                value: s.count as f64,
                text: fmt_pct(s.percentage),
                color_value: s.percentage,
            });
        }
        sink.add_table(&table)?;

        sink.add_chart(&Chart::Bar(BarChart {
            title: "Outliers per Column".to_string(),
            x_label: "Column".to_string(),
            y_label: "Count".to_string(),
            color_scale: ColorScale::Teal,
            bars,
        }))
    }

    fn emit_categorical(
        &self,
        summaries: &[CategoricalSummary],
        sink: &mut dyn ReportSink,
    ) -> Result<()> {
        sink.begin_section("Categorical Analysis", 0)?;

        for summary in summaries {
            sink.begin_section(&format!("Column: `{}`", summary.column), 2)?;

            let mut table = TableBlock::new(&["Category", "Count", "Percentage"]);
            for c in &summary.top {
                table.push_row(vec![
                    c.label.clone(),
                    c.count.to_string(),
                    format!("{}", c.percentage),
                ]);
            }
            sink.add_table(&table)?;

            sink.add_chart(&Chart::Bar(BarChart {
                title: format!(
                    "Top {} Values in `{}`",
                    self.config.top_categories, summary.column
                ),
                x_label: "Category".to_string(),
                y_label: "Count".to_string(),
                color_scale: ColorScale::Palette,
                bars: summary
                    .top
                    .iter()
                    .map(|c| Bar {
                        label: c.label.clone(),
                        value: c.count as f64,
                        text: format!("{}%", c.percentage),
                        color_value: None,
                    })
                    .collect(),
            }))?;

            sink.add_text(&format!("Insight: {}", summary.insight_message()))?;
        }

        Ok(())
    }

    fn emit_correlations(
        &self,
        correlations: &[TargetCorrelation],
        sink: &mut dyn ReportSink,
    ) -> Result<()> {
        sink.begin_section("Correlation with Target", 0)?;

        let mut table = TableBlock::new(&["Feature", "Correlation"]).with_title(format!(
            "Top {} Features Correlated with `{}`",
            self.config.top_correlations, self.config.target
        ));
        for c in correlations {
            table.push_row(vec![c.feature.clone(), format!("{:.3}", c.correlation)]);
        }
        sink.add_table(&table)?;

        sink.add_chart(&Chart::Bar(BarChart {
            title: format!("Top {} Correlated Features", self.config.top_correlations),
            x_label: "Feature".to_string(),
            y_label: "Correlation with Target".to_string(),
            color_scale: ColorScale::Viridis,
            bars: correlations
                .iter()
                .map(|c| Bar {
                    label: c.feature.clone(),
                    value: c.correlation,
                    text: format!("{:.2}", c.correlation),
                    color_value: Some(c.correlation),
                })
                .collect(),
        }))
    }
}

/// Mean, median and mean ± 1 std markers, when defined
fn reference_lines(summary: &NumericSummary) -> Vec<ReferenceLine> {
    let mut lines = Vec::new();
    if let Some(mean) = summary.mean {
        lines.push(ReferenceLine {
            label: "Mean".to_string(),
            value: mean,
            style: LineStyle::Dash,
        });
    }
    if let Some(median) = summary.median {
        lines.push(ReferenceLine {
            label: "Median".to_string(),
            value: median,
            style: LineStyle::Dot,
        });
    }
    if let (Some(mean), Some(std)) = (summary.mean, summary.std) {
        lines.push(ReferenceLine {
            label: "+1 STD".to_string(),
            value: mean + std,
            style: LineStyle::Dash,
        });
        lines.push(ReferenceLine {
            label: "-1 STD".to_string(),
            value: mean - std,
            style: LineStyle::Dash,
        });
    }
    lines
}
