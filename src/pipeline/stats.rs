//! Descriptive statistics over plain f64 slices
//!
//! All functions here expect missing values to be removed already; see
//! [`present_values`]. Empty input yields `None` rather than NaN.

use anyhow::Result;
use polars::prelude::*;

/// Round to 2 decimal places, ties to even
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Cast a numeric column to f64, mapping NaN to missing
pub fn numeric_values(col: &Column) -> Result<Vec<Option<f64>>> {
    let cast = col.cast(&DataType::Float64)?;
    Ok(cast
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// Non-missing values of a numeric column, in row order
pub fn present_values(col: &Column) -> Result<Vec<f64>> {
    Ok(numeric_values(col)?.into_iter().flatten().collect())
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (ddof = 1). Needs at least two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((sum_sq / (n - 1) as f64).sqrt())
}

/// Sort a copy of the values ascending
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Quantile with linear interpolation between closest ranks.
///
/// `sorted_values` must be sorted ascending; `q` is clamped to [0, 1].
pub fn quantile_linear(sorted_values: &[f64], q: f64) -> Option<f64> {
    if sorted_values.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted_values.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted_values[lo] + (sorted_values[hi] - sorted_values[lo]) * frac)
}

pub fn median(sorted_values: &[f64]) -> Option<f64> {
    quantile_linear(sorted_values, 0.5)
}

/// Most frequent value; ties resolve to the smallest value.
pub fn mode(sorted_values: &[f64]) -> Option<f64> {
    let mut best: Option<(f64, usize)> = None;
    let mut i = 0;
    while i < sorted_values.len() {
        let value = sorted_values[i];
        let mut j = i;
        while j < sorted_values.len() && sorted_values[j] == value {
            j += 1;
        }
        let run = j - i;
        // strict comparison keeps the earliest (smallest) value on ties
        if best.map_or(true, |(_, count)| run > count) {
            best = Some((value, run));
        }
        i = j;
    }
    best.map(|(value, _)| value)
}

/// Number of distinct values in a sorted slice
pub fn distinct_count(sorted_values: &[f64]) -> usize {
    if sorted_values.is_empty() {
        return 0;
    }
    1 + sorted_values.windows(2).filter(|w| w[0] != w[1]).count()
}

/// Pearson correlation over pairwise complete observations.
///
/// Returns `None` with fewer than two complete pairs or when either side has
/// zero variance.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    let r = cov / (var_x.sqrt() * var_y.sqrt());
    // floating point can push |r| a hair past 1
    Some(r.clamp(-1.0, 1.0))
}
