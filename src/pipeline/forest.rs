//! Seeded random forest over linfa decision trees
//!
//! Each tree is a Gini decision tree fit by linfa-trees on a bootstrap sample of
//! the rows. Bootstrap indices are drawn up front from a single seeded RNG, so
//! parallel fitting cannot change the result.
//!
//! Every split considers all features; there is no per-split feature
//! subsampling (`max_features = sqrt` elsewhere). Correlated features can
//! therefore mask one another more strongly than in a subsampled forest, and
//! importances differ in kind from such forests, not only in precision.

use linfa::prelude::{Fit, Predict};
use linfa::Dataset;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2, Axis};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;
use rayon::prelude::*;

use super::error::{RankError, Result};

/// Number of trees used when nothing else is configured
pub const DEFAULT_N_TREES: usize = 100;

/// Seed used when nothing else is configured
pub const DEFAULT_SEED: u64 = 42;

/// Forest hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ForestConfig {
    pub n_trees: usize,
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: DEFAULT_N_TREES,
            seed: DEFAULT_SEED,
        }
    }
}

/// A fitted bootstrap ensemble of decision trees
pub struct RandomForest {
    trees: Vec<DecisionTree<f64, usize>>,
    n_features: usize,
    n_classes: usize,
}

impl RandomForest {
    /// Fit a forest on `records` (rows x features) and integer class `targets`.
    pub fn fit(records: &Array2<f64>, targets: &[usize], config: &ForestConfig) -> Result<Self> {
        let n_rows = records.nrows();
        if n_rows == 0 {
            return Err(RankError::Training("cannot fit a forest on zero rows".to_string()));
        }
        if n_rows != targets.len() {
            return Err(RankError::Training(format!(
                "records have {} rows but targets have {} values",
                n_rows,
                targets.len()
            )));
        }
        if config.n_trees == 0 {
            return Err(RankError::InvalidConfig(
                "a forest needs at least one tree".to_string(),
            ));
        }

        let mut rng = Xoshiro256Plus::seed_from_u64(config.seed);
        let samples: Vec<Vec<usize>> = (0..config.n_trees)
            .map(|_| (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect())
            .collect();

        let targets = Array1::from(targets.to_vec());

        let trees = samples
            .par_iter()
            .map(|rows| {
                let dataset = Dataset::new(
                    records.select(Axis(0), rows),
                    targets.select(Axis(0), rows),
                );
                DecisionTree::params()
                    .split_quality(SplitQuality::Gini)
                    .fit(&dataset)
                    .map_err(|e| RankError::Training(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let n_classes = targets.iter().copied().max().map_or(0, |m| m + 1);

        Ok(Self {
            trees,
            n_features: records.ncols(),
            n_classes,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Impurity-based importance per feature, in column order.
    ///
    /// Each tree's normalized impurity decrease is averaged over the ensemble and
    /// the result is normalized to sum to one. Trees that never split contribute
    /// zeros.
    pub fn feature_importances(&self) -> Vec<f64> {
        let mut totals = vec![0.0; self.n_features];

        for tree in &self.trees {
            let importances = tree.feature_importance();
            if importances.iter().any(|v| !v.is_finite()) {
                continue;
            }
            for (total, value) in totals.iter_mut().zip(importances.iter()) {
                *total += value;
            }
        }

        let sum: f64 = totals.iter().sum();
        if sum > 0.0 {
            totals.iter().map(|v| v / sum).collect()
        } else {
            totals
        }
    }

    /// Majority-vote class prediction; ties go to the smallest class code.
    pub fn predict(&self, records: &Array2<f64>) -> Array1<usize> {
        let mut votes = vec![vec![0usize; self.n_classes.max(1)]; records.nrows()];

        for tree in &self.trees {
            let predictions: Array1<usize> = tree.predict(records);
            for (row, &label) in predictions.iter().enumerate() {
                if label >= votes[row].len() {
                    votes[row].resize(label + 1, 0);
                }
                votes[row][label] += 1;
            }
        }

        votes
            .iter()
            .map(|counts| {
                let mut best = 0;
                for (label, &count) in counts.iter().enumerate() {
                    if count > counts[best] {
                        best = label;
                    }
                }
                best
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn separable() -> (Array2<f64>, Vec<usize>) {
        let records = array![
            [0.0, 5.0],
            [0.1, 3.0],
            [0.2, 4.0],
            [0.3, 5.0],
            [1.0, 3.0],
            [1.1, 4.0],
            [1.2, 5.0],
            [1.3, 3.0],
        ];
        (records, vec![0, 0, 0, 0, 1, 1, 1, 1])
    }

    #[test]
    fn test_importances_sum_to_one_and_favor_signal() {
        let (records, targets) = separable();
        let forest = RandomForest::fit(&records, &targets, &ForestConfig::default()).unwrap();

        let importances = forest.feature_importances();
        assert_eq!(importances.len(), 2);
        assert!((importances.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(importances[0] > importances[1]);
    }

    #[test]
    fn test_same_seed_same_importances() {
        let (records, targets) = separable();
        let config = ForestConfig { n_trees: 20, seed: 7 };
        let a = RandomForest::fit(&records, &targets, &config).unwrap();
        let b = RandomForest::fit(&records, &targets, &config).unwrap();
        assert_eq!(a.feature_importances(), b.feature_importances());
    }

    #[test]
    fn test_predict_recovers_training_labels() {
        let (records, targets) = separable();
        let forest = RandomForest::fit(&records, &targets, &ForestConfig::default()).unwrap();
        let predictions = forest.predict(&records);
        assert_eq!(predictions.to_vec(), targets);
    }

    #[test]
    fn test_zero_trees_rejected() {
        let (records, targets) = separable();
        let config = ForestConfig { n_trees: 0, seed: 1 };
        assert!(RandomForest::fit(&records, &targets, &config).is_err());
    }
}
