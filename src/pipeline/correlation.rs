//! Rank correlation between a single feature and the target

use std::cmp::Ordering;

use polars::prelude::*;

use super::error::{RankError, Result};

/// Average ranks of `values` (ties share the mean of their positions), 1-based.
pub fn average_ranks(values: &[f64]) -> Result<Vec<f64>> {
    let df = DataFrame::new(vec![Column::new("v".into(), values.to_vec())])?;
    let ranked = df
        .lazy()
        .select([col("v")
            .rank(
                RankOptions {
                    method: RankMethod::Average,
                    descending: false,
                },
                None,
            )
            .cast(DataType::Float64)])
        .collect()?;

    Ok(ranked.column("v")?.f64()?.into_no_null_iter().collect())
}

/// Pearson correlation using a single-pass Welford update.
///
/// Returns `None` when either side has zero variance or the lengths differ.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len();
    if n == 0 || n != y.len() {
        return None;
    }

    let mut count = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for (&xi, &yi) in x.iter().zip(y.iter()) {
        count += 1.0;
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        mean_x += dx / count;
        mean_y += dy / count;
        var_x += dx * (xi - mean_x);
        var_y += dy * (yi - mean_y);
        cov_xy += dx * (yi - mean_y);
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }

    Some((cov_xy / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

fn undefined(feature: &str, reason: &str) -> RankError {
    RankError::UndefinedCorrelation {
        feature: feature.to_string(),
        reason: reason.to_string(),
    }
}

/// Spearman's rho between `feature` values and `target`: Pearson over average ranks.
pub fn spearman(feature: &str, values: &[f64], target: &[f64]) -> Result<f64> {
    if values.len() < 2 {
        return Err(undefined(feature, "fewer than two observations"));
    }
    let rx = average_ranks(values)?;
    let ry = average_ranks(target)?;
    pearson_correlation(&rx, &ry).ok_or_else(|| undefined(feature, "zero variance"))
}

/// Kendall's tau-b between `feature` values and `target`.
pub fn kendall(feature: &str, values: &[f64], target: &[f64]) -> Result<f64> {
    if values.len() < 2 {
        return Err(undefined(feature, "fewer than two observations"));
    }
    if is_constant(values) || is_constant(target) {
        return Err(undefined(feature, "zero variance"));
    }

    let (tau, _significance) =
        kendalls::tau_b_with_comparator(values, target, |a: &f64, b: &f64| {
            a.partial_cmp(b).unwrap_or(Ordering::Equal)
        })
        .map_err(|e| undefined(feature, &format!("{:?}", e)))?;

    if tau.is_nan() {
        return Err(undefined(feature, "tau-b is not a number"));
    }
    Ok(tau)
}
