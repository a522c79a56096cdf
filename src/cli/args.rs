//! Command-line argument definitions using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use anyhow::Result;

use crate::pipeline::{AnalysisConfig, Section};

/// Output rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Styled tables and text charts
    Terminal,
    /// A single JSON document with every report block
    Json,
}

/// Edalens - exploratory data analysis report for a train/test dataset pair
#[derive(Parser, Debug)]
#[command(name = "edalens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Training data file (CSV or Parquet)
    #[arg(long)]
    pub train: PathBuf,

    /// Test data file (CSV or Parquet), appended after the training rows
    #[arg(long)]
    pub test: PathBuf,

    /// Target column name [default: satisfaction]
    #[arg(short, long)]
    pub target: Option<String>,

    /// Target label that represents EVENT (maps to 1) [default: satisfied]
    #[arg(long)]
    pub event_value: Option<String>,

    /// Target label that represents NON-EVENT (maps to 0) [default: "neutral or dissatisfied"]
    #[arg(long)]
    pub non_event_value: Option<String>,

    /// Turn target labels outside the mapping into nulls instead of failing
    #[arg(long, default_value = "false")]
    pub allow_unmapped_target: bool,

    /// Leading numeric columns treated as identifiers and left out of the
    /// numerical summaries [default: 1]
    #[arg(long)]
    pub skip_leading_numeric: Option<usize>,

    /// Number of histogram bins [default: 30]
    #[arg(long, value_parser = validate_positive)]
    pub histogram_bins: Option<usize>,

    /// Categories listed per categorical column [default: 3]
    #[arg(long, value_parser = validate_positive)]
    pub top_categories: Option<usize>,

    /// Features listed in the correlation ranking [default: 10]
    #[arg(long, value_parser = validate_positive)]
    pub top_correlations: Option<usize>,

    /// Report sections to render (repeatable). Default: all sections.
    #[arg(long = "section", value_enum)]
    pub sections: Vec<Section>,

    /// Output format
    #[arg(long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// JSON configuration file. Explicit flags override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Build the analysis configuration: the `--config` file (or defaults)
    /// with explicit flags layered on top.
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        let base = match &self.config {
            Some(path) => AnalysisConfig::from_json_file(path)?,
            None => AnalysisConfig::default(),
        };
        let config = self.apply_overrides(base);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, mut config: AnalysisConfig) -> AnalysisConfig {
        if let Some(target) = &self.target {
            config.target = target.clone();
        }
        if let Some(event) = &self.event_value {
            config.mapping.event_value = event.clone();
        }
        if let Some(non_event) = &self.non_event_value {
            config.mapping.non_event_value = non_event.clone();
        }
        if self.allow_unmapped_target {
            config.allow_unmapped_target = true;
        }
        if let Some(n) = self.skip_leading_numeric {
            config.skip_leading_numeric = n;
        }
        if let Some(n) = self.histogram_bins {
            config.histogram_bins = n;
        }
        if let Some(n) = self.top_categories {
            config.top_categories = n;
        }
        if let Some(n) = self.top_correlations {
            config.top_correlations = n;
        }
        if !self.sections.is_empty() {
            // keep report order regardless of flag order
            config.sections = Section::ALL
                .into_iter()
                .filter(|s| self.sections.contains(s))
                .collect();
        }
        config
    }
}

/// Validator for count parameters that must be at least 1
fn validate_positive(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid count", s))?;

    if value == 0 {
        Err("value must be at least 1".to_string())
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["edalens", "--train", "train.csv", "--test", "test.csv"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_defaults_match_analysis_config() {
        let cli = parse(&[]);
        let config = cli.analysis_config().unwrap();
        let default = AnalysisConfig::default();
        assert_eq!(config.target, default.target);
        assert_eq!(config.histogram_bins, 30);
        assert_eq!(config.top_categories, 3);
        assert_eq!(config.top_correlations, 10);
        assert_eq!(config.sections, Section::ALL.to_vec());
        assert_eq!(cli.format, OutputFormat::Terminal);
    }

    #[test]
    fn test_flags_override() {
        let cli = parse(&[
            "-t",
            "label",
            "--event-value",
            "yes",
            "--non-event-value",
            "no",
            "--top-correlations",
            "5",
            "--section",
            "correlation",
            "--section",
            "numerical",
            "--format",
            "json",
        ]);
        let config = cli.analysis_config().unwrap();
        assert_eq!(config.target, "label");
        assert_eq!(config.mapping.event_value, "yes");
        assert_eq!(config.mapping.non_event_value, "no");
        assert_eq!(config.top_correlations, 5);
        assert_eq!(config.sections, vec![Section::Numerical, Section::Correlation]);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_zero_bins_rejected() {
        let result = Cli::try_parse_from([
            "edalens",
            "--train",
            "a.csv",
            "--test",
            "b.csv",
            "--histogram-bins",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_train_and_test_required() {
        assert!(Cli::try_parse_from(["edalens", "--train", "a.csv"]).is_err());
    }

    #[test]
    fn test_verbosity_count() {
        let cli = parse(&["-vv"]);
        assert_eq!(cli.verbose, 2);
    }
}
