//! Dataset loader for CSV and Parquet files

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

use crate::error::EdaError;
use crate::pipeline::columns::is_numeric;
use crate::utils::{create_spinner, finish_with_success};

/// Shape and size of a loaded dataset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetStats {
    pub rows: usize,
    pub columns: usize,
    pub memory_mb: f64,
}

impl DatasetStats {
    pub fn of(df: &DataFrame) -> Self {
        let (rows, columns) = df.shape();
        Self {
            rows,
            columns,
            memory_mb: df.estimated_size() as f64 / (1024.0 * 1024.0),
        }
    }
}

/// Load a dataset from a file (CSV or Parquet based on extension)
///
/// `infer_schema_length` only applies to CSV; 0 scans the whole file.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<LazyFrame> {
    if !path.exists() {
        return Err(EdaError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let schema_rows = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(schema_rows)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => {
            return Err(EdaError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }
            .into())
        }
    };

    Ok(lf)
}

/// Load and collect a single dataset
pub fn load_dataframe(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    load_dataset(path, infer_schema_length)?
        .collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))
}

fn is_all_null(col: &Column) -> bool {
    col.null_count() == col.len()
}

/// Stack two same-schema tables row-wise.
///
/// Column sets must match exactly; `right` is reordered to `left`'s column
/// order. Numeric dtype differences (e.g. Int64 vs Float64) are reconciled
/// by casting both sides to Float64, and an all-null column takes the other
/// side's dtype. Any other dtype disagreement is a schema mismatch.
pub fn combine_datasets(
    left: DataFrame,
    right: DataFrame,
    left_path: &Path,
    right_path: &Path,
) -> Result<DataFrame> {
    let mismatch = |reason: String| EdaError::SchemaMismatch {
        left: left_path.to_path_buf(),
        right: right_path.to_path_buf(),
        reason,
    };

    let left_names: Vec<String> = left
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let right_names: Vec<String> = right
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let only_left: Vec<&String> = left_names
        .iter()
        .filter(|n| !right_names.contains(n))
        .collect();
    let only_right: Vec<&String> = right_names
        .iter()
        .filter(|n| !left_names.contains(n))
        .collect();

    if !only_left.is_empty() || !only_right.is_empty() {
        return Err(mismatch(format!(
            "columns only in {}: {:?}; columns only in {}: {:?}",
            left_path.display(),
            only_left,
            right_path.display(),
            only_right
        ))
        .into());
    }

    let mut left = left;
    let mut right = right.select(left_names.iter().map(|s| s.as_str()))?;

    for name in &left_names {
        let left_col = left.column(name)?;
        let right_col = right.column(name)?;
        let left_dtype = left_col.dtype().clone();
        let right_dtype = right_col.dtype().clone();

        if left_dtype == right_dtype {
            continue;
        }

        if is_numeric(&left_dtype) && is_numeric(&right_dtype) {
            debug!(column = %name, %left_dtype, %right_dtype, "reconciling numeric dtypes as Float64");
            let l = left_col.cast(&DataType::Float64)?;
            let r = right_col.cast(&DataType::Float64)?;
            left.with_column(l)?;
            right.with_column(r)?;
        } else if is_all_null(right_col) {
            let r = right_col.cast(&left_dtype)?;
            right.with_column(r)?;
        } else if is_all_null(left_col) {
            let l = left_col.cast(&right_dtype)?;
            left.with_column(l)?;
        } else {
            return Err(mismatch(format!(
                "column '{}' is {} in {} but {} in {}",
                name,
                left_dtype,
                left_path.display(),
                right_dtype,
                right_path.display()
            ))
            .into());
        }
    }

    let combined = left
        .vstack(&right)
        .context("Failed to stack datasets")?;
    Ok(combined)
}

/// Load both input files and merge them into one dataset, with a spinner
pub fn load_combined(
    train_path: &Path,
    test_path: &Path,
    infer_schema_length: usize,
) -> Result<(DataFrame, DatasetStats)> {
    let spinner = create_spinner("Loading datasets...");

    let train = load_dataframe(train_path, infer_schema_length)?;
    let test = load_dataframe(test_path, infer_schema_length)?;
    info!(
        train_rows = train.height(),
        test_rows = test.height(),
        "datasets loaded"
    );

    let combined = combine_datasets(train, test, train_path, test_path)?;
    let stats = DatasetStats::of(&combined);

    finish_with_success(&spinner, "Datasets loaded and merged");
    Ok((combined, stats))
}
