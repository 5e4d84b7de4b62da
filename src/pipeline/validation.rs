//! Stratified k-fold cross-validated accuracy of a forest on a feature subset

use linfa::prelude::ToConfusionMatrix;
use linfa::Dataset;
use log::debug;
use ndarray::{Array1, Axis};
use serde::Serialize;

use super::encoder::{FeatureMatrix, TargetEncoding};
use super::error::{RankError, Result};
use super::forest::{ForestConfig, RandomForest};

/// Number of folds used when nothing else is configured
pub const DEFAULT_FOLDS: usize = 5;

/// Per-fold accuracies of one feature subset with their mean and population std
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossValidation {
    pub features: Vec<String>,
    pub fold_scores: Vec<f64>,
    pub mean: f64,
    pub std: f64,
}

/// Assign every row to one of `folds` validation folds, stratified by class.
///
/// Classes are taken in order of first appearance. The class-sorted codes are dealt
/// round-robin over the folds to fix how many rows of each class every fold holds;
/// the rows of each class then fill the folds in row order. Fold sizes differ by at
/// most one and each row is validated exactly once.
pub fn stratified_fold_ids(codes: &[usize], folds: usize) -> Result<Vec<usize>> {
    if folds < 2 {
        return Err(RankError::InvalidConfig(format!(
            "cross-validation needs at least 2 folds, got {}",
            folds
        )));
    }
    if codes.len() < folds {
        return Err(RankError::InvalidConfig(format!(
            "cannot split {} rows into {} folds",
            codes.len(),
            folds
        )));
    }

    let mut first_seen: Vec<usize> = Vec::new();
    let encoded: Vec<usize> = codes
        .iter()
        .map(|code| match first_seen.iter().position(|c| c == code) {
            Some(idx) => idx,
            None => {
                first_seen.push(*code);
                first_seen.len() - 1
            }
        })
        .collect();

    let n_classes = first_seen.len();
    let mut counts = vec![0usize; n_classes];
    for &class in &encoded {
        counts[class] += 1;
    }
    if counts.iter().all(|&count| count < folds) {
        return Err(RankError::InvalidConfig(format!(
            "{} folds exceed the size of every class (largest has {} rows)",
            folds,
            counts.iter().copied().max().unwrap_or(0)
        )));
    }

    // allocation[fold][class]: rows of `class` validated in `fold`
    let mut allocation = vec![vec![0usize; n_classes]; folds];
    let sorted = counts
        .iter()
        .enumerate()
        .flat_map(|(class, &count)| std::iter::repeat(class).take(count));
    for (i, class) in sorted.enumerate() {
        allocation[i % folds][class] += 1;
    }

    let mut queues: Vec<Vec<usize>> = (0..n_classes)
        .map(|class| {
            let mut queue: Vec<usize> = (0..folds)
                .flat_map(|fold| std::iter::repeat(fold).take(allocation[fold][class]))
                .collect();
            queue.reverse();
            queue
        })
        .collect();

    encoded
        .iter()
        .map(|&class| {
            queues[class].pop().ok_or_else(|| {
                RankError::InvalidConfig("fold allocation does not cover every row".to_string())
            })
        })
        .collect()
}

/// Cross-validate a forest restricted to `features`.
///
/// Folds come from [`stratified_fold_ids`] and are not shuffled. Each fold fits a
/// new forest with the same configuration on the remaining rows and scores
/// accuracy on the held-out rows.
pub fn cross_validate(
    x: &FeatureMatrix,
    y: &TargetEncoding,
    features: &[String],
    forest: &ForestConfig,
    folds: usize,
) -> Result<CrossValidation> {
    if features.is_empty() {
        return Err(RankError::InvalidConfig(
            "cannot cross-validate an empty feature subset".to_string(),
        ));
    }

    let fold_ids = stratified_fold_ids(&y.codes, folds)?;
    let subset = x.select(features)?;
    let targets = Array1::from(y.codes.clone());

    let mut fold_scores = Vec::with_capacity(folds);
    for fold in 0..folds {
        let (valid_rows, train_rows): (Vec<usize>, Vec<usize>) =
            (0..fold_ids.len()).partition(|&row| fold_ids[row] == fold);

        let train_targets: Vec<usize> = train_rows.iter().map(|&row| y.codes[row]).collect();
        let model = RandomForest::fit(
            &subset.values.select(Axis(0), &train_rows),
            &train_targets,
            forest,
        )?;

        let valid = Dataset::new(
            subset.values.select(Axis(0), &valid_rows),
            targets.select(Axis(0), &valid_rows),
        );
        let predictions = model.predict(valid.records());
        let accuracy = predictions
            .confusion_matrix(&valid)
            .map_err(|e| RankError::Training(e.to_string()))?
            .accuracy() as f64;

        debug!(
            "fold {} of {:?}: {} held-out rows, accuracy {:.4}",
            fold + 1,
            features,
            valid_rows.len(),
            accuracy
        );
        fold_scores.push(accuracy);
    }

    let scores = Array1::from(fold_scores.clone());
    let mean = scores.mean().unwrap_or(0.0);
    let std = scores.std(0.0);

    Ok(CrossValidation {
        features: features.to_vec(),
        fold_scores,
        mean,
        std,
    })
}
