//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a small airline-satisfaction style DataFrame with known statistics
///
/// This DataFrame includes:
/// - `id`: identifier column (skipped by the numerical summaries)
/// - `Gender`: 9 Female / 3 Male (75% dominant)
/// - `Age`: 12 distinct values, mean 42.83, median 43 (fairly distributed)
/// - `Class`: Business 5 / Eco 4 / Eco Plus 2 / one missing
/// - `Departure Delay`: one missing, 10 and 300 are IQR outliers
/// - `satisfaction`: first 6 rows unsatisfied, last 6 satisfied
pub fn create_airline_dataframe() -> DataFrame {
    df! {
        "id" => [1i64, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
        "Gender" => ["Female", "Male", "Female", "Female", "Male", "Female",
                     "Female", "Female", "Male", "Female", "Female", "Female"],
        "Age" => [22i64, 25, 31, 34, 38, 41, 45, 47, 52, 56, 60, 63],
        "Class" => [Some("Business"), Some("Eco"), Some("Business"), Some("Eco"),
                    Some("Eco Plus"), Some("Business"), Some("Eco"), Some("Business"),
                    Some("Eco Plus"), Some("Eco"), Some("Business"), None],
        "Departure Delay" => [Some(0.0f64), Some(0.0), Some(0.0), Some(0.0), Some(0.0), Some(0.0),
                              Some(0.0), Some(0.0), Some(5.0), Some(10.0), Some(300.0), None],
        "satisfaction" => ["neutral or dissatisfied", "neutral or dissatisfied",
                           "neutral or dissatisfied", "neutral or dissatisfied",
                           "neutral or dissatisfied", "neutral or dissatisfied",
                           "satisfied", "satisfied", "satisfied",
                           "satisfied", "satisfied", "satisfied"],
    }
    .unwrap()
}

/// Split a DataFrame into a train part (first `train_rows`) and a test part
pub fn split_train_test(df: &DataFrame, train_rows: usize) -> (DataFrame, DataFrame) {
    let train = df.slice(0, train_rows);
    let test = df.slice(train_rows as i64, df.height() - train_rows);
    (train, test)
}

/// Create a larger random DataFrame for performance/property tests
pub fn create_large_test_dataframe(rows: usize, cols: usize, seed: u64) -> DataFrame {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let mut columns: Vec<Column> = Vec::with_capacity(cols + 3);

    let ids: Vec<i64> = (0..rows as i64).collect();
    columns.push(Column::new("id".into(), ids));

    for i in 0..cols {
        let values: Vec<Option<f64>> = (0..rows)
            .map(|_| {
                if rng.gen_bool(0.05) {
                    None
                } else {
                    Some(rng.gen::<f64>() * 100.0)
                }
            })
            .collect();
        columns.push(Column::new(format!("feature_{}", i).into(), values));
    }

    let labels = ["A", "B", "C", "D", "E"];
    let category: Vec<Option<&str>> = (0..rows)
        .map(|_| {
            if rng.gen_bool(0.1) {
                None
            } else {
                Some(labels[rng.gen_range(0..labels.len())])
            }
        })
        .collect();
    columns.push(Column::new("category".into(), category));

    let target: Vec<&str> = (0..rows)
        .map(|_| {
            if rng.gen_bool(0.5) {
                "satisfied"
            } else {
                "neutral or dissatisfied"
            }
        })
        .collect();
    columns.push(Column::new("satisfaction".into(), target));

    DataFrame::new(columns).unwrap()
}

/// Write `df` as CSV into `dir` under `name`
pub fn write_csv(dir: &Path, name: &str, df: &mut DataFrame) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();
    path
}

/// Write `df` as Parquet into `dir` under `name`
pub fn write_parquet(dir: &Path, name: &str, df: &mut DataFrame) -> PathBuf {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();
    path
}

/// Write the airline fixture as a train/test CSV pair (8 + 4 rows)
pub fn create_temp_train_test_csv() -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let (mut train, mut test) = split_train_test(&create_airline_dataframe(), 8);
    let train_path = write_csv(temp_dir.path(), "train.csv", &mut train);
    let test_path = write_csv(temp_dir.path(), "test.csv", &mut test);
    (temp_dir, train_path, test_path)
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}
