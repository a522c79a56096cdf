//! Input error taxonomy
//!
//! Degenerate statistics (zero variance, empty columns, zero rows) are not
//! errors; they route to fallback branches in the summarizers. Everything
//! here aborts report generation.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal input errors surfaced to the user with the offending file or column.
#[derive(Debug, Error)]
pub enum EdaError {
    /// Input file does not exist.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Input file extension is not CSV or Parquet.
    #[error("unsupported file format '{extension}' for {path}. Supported formats: csv, parquet")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// The two input tables do not share the same columns.
    #[error("schema mismatch between {left} and {right}: {reason}")]
    SchemaMismatch {
        left: PathBuf,
        right: PathBuf,
        reason: String,
    },

    /// Configured target column is absent from the dataset.
    #[error("target column '{column}' not found in dataset. Available columns: {available:?}")]
    TargetNotFound {
        column: String,
        available: Vec<String>,
    },

    /// Target column holds labels outside the configured mapping.
    #[error(
        "target column '{column}' contains {count} value(s) outside the mapping ({event} -> 1, {non_event} -> 0): {labels:?}"
    )]
    UnrecognizedTargetLabels {
        column: String,
        event: String,
        non_event: String,
        labels: Vec<String>,
        count: usize,
    },

    /// Dataset has no numeric columns to summarize or correlate.
    #[error("dataset has no numerical columns (target '{target}' excluded)")]
    NoNumericColumns { target: String },

    /// Configuration file could not be parsed or holds invalid values.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}
