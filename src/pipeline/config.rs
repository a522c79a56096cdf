//! Analysis configuration
//!
//! Everything the report generator needs besides the dataset itself. Built
//! from CLI flags, optionally layered over a JSON config file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::EdaError;
use crate::pipeline::TargetMapping;

/// Default target column of the airline satisfaction datasets
pub const DEFAULT_TARGET: &str = "satisfaction";

/// Report sections that can be selected individually
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Numerical,
    Outliers,
    Categorical,
    Correlation,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Numerical,
        Section::Outliers,
        Section::Categorical,
        Section::Correlation,
    ];
}

/// Configuration for a single report run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Target column name
    pub target: String,
    /// Label -> 0/1 mapping applied to the target column
    pub mapping: TargetMapping,
    /// Turn unrecognized target labels into nulls instead of failing
    pub allow_unmapped_target: bool,
    /// Leading numeric columns treated as identifiers by the numerical summarizer
    pub skip_leading_numeric: usize,
    /// Histogram bin count
    pub histogram_bins: usize,
    /// Categories kept per categorical column
    pub top_categories: usize,
    /// Features kept in the correlation ranking
    pub top_correlations: usize,
    /// Sections to render, in report order
    pub sections: Vec<Section>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            mapping: TargetMapping::default(),
            allow_unmapped_target: false,
            skip_leading_numeric: 1,
            histogram_bins: 30,
            top_categories: 3,
            top_correlations: 10,
            sections: Section::ALL.to_vec(),
        }
    }
}

impl AnalysisConfig {
    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: AnalysisConfig = serde_json::from_str(&raw).map_err(|e| {
            EdaError::InvalidConfig {
                reason: format!("{}: {}", path.display(), e),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the summarizers cannot work with
    pub fn validate(&self) -> Result<(), EdaError> {
        if self.target.trim().is_empty() {
            return Err(EdaError::InvalidConfig {
                reason: "target column name is empty".to_string(),
            });
        }
        if self.mapping.event_value == self.mapping.non_event_value {
            return Err(EdaError::InvalidConfig {
                reason: format!(
                    "event and non-event labels are both '{}'",
                    self.mapping.event_value
                ),
            });
        }
        if self.histogram_bins == 0 {
            return Err(EdaError::InvalidConfig {
                reason: "histogram_bins must be at least 1".to_string(),
            });
        }
        if self.top_categories == 0 || self.top_correlations == 0 {
            return Err(EdaError::InvalidConfig {
                reason: "top_categories and top_correlations must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn wants(&self, section: Section) -> bool {
        self.sections.contains(&section)
    }
}
