//! Categorical and target encoding
//!
//! Turns the cleaned dataset into a dense numeric feature matrix and an
//! integer-coded target. Codes follow the sorted order of the distinct values,
//! so the same value set always produces the same codes.

use std::cmp::Ordering;

use log::debug;
use ndarray::Array2;
use polars::prelude::*;

use super::error::{RankError, Result};

/// Dense numeric feature matrix with column names in dataset order
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    pub names: Vec<String>,
    pub values: Array2<f64>,
}

impl FeatureMatrix {
    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.names.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Values of a single feature column
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        self.column_index(name)
            .map(|idx| self.values.column(idx).to_vec())
    }

    /// Restrict the matrix to `features`.
    ///
    /// Columns keep the matrix order regardless of the order in `features`, so a
    /// subset containing every column reproduces the matrix exactly.
    pub fn select(&self, features: &[String]) -> Result<FeatureMatrix> {
        for feature in features {
            if self.column_index(feature).is_none() {
                return Err(RankError::DataFormat(format!(
                    "Feature '{}' is not part of the feature matrix",
                    feature
                )));
            }
        }

        let indices: Vec<usize> = self
            .names
            .iter()
            .enumerate()
            .filter(|(_, name)| features.contains(name))
            .map(|(idx, _)| idx)
            .collect();

        let names = indices.iter().map(|&i| self.names[i].clone()).collect();
        let values = self.values.select(ndarray::Axis(1), &indices);

        Ok(FeatureMatrix { names, values })
    }
}

/// Integer-coded target with the original class labels
#[derive(Debug, Clone, PartialEq)]
pub struct TargetEncoding {
    pub codes: Vec<usize>,
    pub classes: Vec<String>,
}

impl TargetEncoding {
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn as_f64(&self) -> Vec<f64> {
        self.codes.iter().map(|&c| c as f64).collect()
    }
}

/// Assign each distinct value its position in sorted order.
///
/// Returns the code of every input value and the sorted distinct values.
pub fn encode_labels<T: PartialOrd + Clone>(values: &[T]) -> (Vec<usize>, Vec<T>) {
    let mut classes: Vec<T> = values.to_vec();
    classes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    classes.dedup_by(|a, b| (*a).partial_cmp(&*b) == Some(Ordering::Equal));

    let codes = values
        .iter()
        .map(|v| {
            classes
                .binary_search_by(|probe| probe.partial_cmp(v).unwrap_or(Ordering::Equal))
                .unwrap_or_else(|insert_at| insert_at)
        })
        .collect();

    (codes, classes)
}

fn is_text(dtype: &DataType) -> bool {
    matches!(dtype, DataType::String | DataType::Categorical(_, _) | DataType::Enum(_, _))
}

/// Category a missing text value is encoded as, sorted among the other values
pub const MISSING_TEXT: &str = "nan";

/// Text view of a column; missing values become [`MISSING_TEXT`]
fn column_as_text(column: &Column) -> Result<Vec<String>> {
    let cast = column.cast(&DataType::String)?;
    Ok(cast
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or(MISSING_TEXT).to_string())
        .collect())
}

fn numeric_column(column: &Column) -> Result<Vec<f64>> {
    if column.null_count() > 0 {
        return Err(RankError::DataFormat(format!(
            "Numeric column '{}' contains {} missing values; impute before ranking",
            column.name(),
            column.null_count()
        )));
    }
    let cast = column.cast(&DataType::Float64)?;
    Ok(cast.f64()?.into_no_null_iter().collect())
}

/// Build the feature matrix from every column except `target`.
///
/// Text and categorical columns are label-encoded per column, with missing
/// values taking the `"nan"` category; numeric and boolean columns are cast to f64.
pub fn encode_features(df: &DataFrame, target: &str) -> Result<FeatureMatrix> {
    let feature_columns: Vec<&Column> = df
        .get_columns()
        .iter()
        .filter(|c| c.name().as_str() != target)
        .collect();

    if feature_columns.is_empty() {
        return Err(RankError::DataFormat(
            "No feature columns remain after cleaning".to_string(),
        ));
    }

    let n_rows = df.height();
    let mut names = Vec::with_capacity(feature_columns.len());
    let mut values = Array2::<f64>::zeros((n_rows, feature_columns.len()));

    for (j, column) in feature_columns.iter().enumerate() {
        let encoded: Vec<f64> = if is_text(column.dtype()) {
            let text = column_as_text(column)?;
            let (codes, classes) = encode_labels(&text);
            debug!(
                "Encoded '{}' into {} categories",
                column.name(),
                classes.len()
            );
            codes.into_iter().map(|c| c as f64).collect()
        } else if column.dtype().is_primitive_numeric() || column.dtype() == &DataType::Boolean {
            numeric_column(column)?
        } else {
            return Err(RankError::DataFormat(format!(
                "Column '{}' has unsupported type {}",
                column.name(),
                column.dtype()
            )));
        };

        for (i, v) in encoded.into_iter().enumerate() {
            values[(i, j)] = v;
        }
        names.push(column.name().to_string());
    }

    Ok(FeatureMatrix { names, values })
}

/// Encode the target column into integer class codes.
///
/// Numeric targets are ordered numerically, text targets lexicographically.
pub fn encode_target(df: &DataFrame, target: &str) -> Result<TargetEncoding> {
    let column = df.column(target).map_err(|_| RankError::MissingTarget {
        column: target.to_string(),
    })?;

    if column.null_count() > 0 {
        return Err(RankError::DataFormat(format!(
            "Target column '{}' still contains {} missing values",
            target,
            column.null_count()
        )));
    }

    let encoding = if column.dtype().is_primitive_numeric() {
        let raw = numeric_column(column)?;
        let (codes, classes) = encode_labels(&raw);
        TargetEncoding {
            codes,
            classes: classes.iter().map(|v| format!("{}", v)).collect(),
        }
    } else {
        let raw = column_as_text(column)?;
        let (codes, classes) = encode_labels(&raw);
        TargetEncoding { codes, classes }
    };

    debug!(
        "Target '{}' encoded into classes {:?}",
        target, encoding.classes
    );

    Ok(encoding)
}
