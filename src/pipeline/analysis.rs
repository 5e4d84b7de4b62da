//! End-to-end ranking and validation run

use log::info;
use polars::prelude::DataFrame;
use serde::Serialize;

use super::encoder::{encode_features, encode_target, FeatureMatrix, TargetEncoding};
use super::error::{RankError, Result};
use super::forest::ForestConfig;
use super::loader::TARGET_COLUMN;
use super::ranking::{rank_method, FeatureRanking, MethodRankings, RankingMethod, RankingScope};
use super::validation::{cross_validate, CrossValidation, DEFAULT_FOLDS};

/// Size of every reported feature subset when nothing else is configured
pub const DEFAULT_TOP_N: usize = 5;

/// Size of the shortlist the reduced pass rescoring uses by default
pub const DEFAULT_REDUCE_TO: usize = 10;

/// Settings for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisConfig {
    pub forest: ForestConfig,
    pub folds: usize,
    pub top_n: usize,
    pub reduce_to: usize,
    pub target: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            forest: ForestConfig::default(),
            folds: DEFAULT_FOLDS,
            top_n: DEFAULT_TOP_N,
            reduce_to: DEFAULT_REDUCE_TO,
            target: TARGET_COLUMN.to_string(),
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(RankError::InvalidConfig("top_n must be at least 1".to_string()));
        }
        if self.reduce_to < self.top_n {
            return Err(RankError::InvalidConfig(format!(
                "reduce_to ({}) must be at least top_n ({})",
                self.reduce_to, self.top_n
            )));
        }
        if self.folds < 2 {
            return Err(RankError::InvalidConfig(format!(
                "folds must be at least 2, got {}",
                self.folds
            )));
        }
        if self.forest.n_trees == 0 {
            return Err(RankError::InvalidConfig("n_trees must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// One of the six evaluated feature subsets
#[derive(Debug, Clone, Copy)]
pub struct AnalysisCase<'a> {
    pub method: RankingMethod,
    pub scope: RankingScope,
    pub ranking: &'a FeatureRanking,
    pub features: &'a [String],
}

impl AnalysisCase<'_> {
    /// Display name, e.g. `RF_full_top5`
    pub fn name(&self) -> String {
        format!(
            "{}_{}_top{}",
            self.method.case_tag(),
            self.scope.label(),
            self.features.len()
        )
    }

    /// CSV source tag, e.g. `rf_full` or `SP_reduced`
    pub fn source(&self) -> String {
        format!("{}_{}", self.method.source_tag(), self.scope.label())
    }
}

/// Cross-validation outcome for a named case
#[derive(Debug, Clone, Serialize)]
pub struct CaseValidation {
    pub case: String,
    pub result: CrossValidation,
}

/// Everything one run produces
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub n_rows: usize,
    pub n_features: usize,
    pub classes: Vec<String>,
    pub rankings: Vec<MethodRankings>,
    pub validations: Vec<CaseValidation>,
}

impl AnalysisReport {
    /// The six cases in report order: each method full, then reduced
    pub fn cases(&self) -> Vec<AnalysisCase<'_>> {
        self.rankings
            .iter()
            .flat_map(|r| {
                [
                    AnalysisCase {
                        method: r.method,
                        scope: RankingScope::Full,
                        ranking: &r.full,
                        features: r.top_full.as_slice(),
                    },
                    AnalysisCase {
                        method: r.method,
                        scope: RankingScope::Reduced,
                        ranking: &r.reduced,
                        features: r.top_reduced.as_slice(),
                    },
                ]
            })
            .collect()
    }

    pub fn rankings_for(&self, method: RankingMethod) -> Option<&MethodRankings> {
        self.rankings.iter().find(|r| r.method == method)
    }
}

/// Encode, rank with every method and cross-validate every resulting subset.
///
/// `on_step` is called with a short description before each expensive step.
pub fn run_analysis<F: FnMut(&str)>(
    df: &DataFrame,
    config: &AnalysisConfig,
    mut on_step: F,
) -> Result<AnalysisReport> {
    config.validate()?;

    let x: FeatureMatrix = encode_features(df, &config.target)?;
    let y: TargetEncoding = encode_target(df, &config.target)?;
    info!(
        "Encoded {} rows, {} features, {} classes",
        x.n_rows(),
        x.n_features(),
        y.n_classes()
    );

    let mut rankings = Vec::with_capacity(RankingMethod::ALL.len());
    for method in RankingMethod::ALL {
        on_step(&format!("Ranking features by {}", method.label()));
        rankings.push(rank_method(
            method,
            &x,
            &y,
            &config.forest,
            config.top_n,
            config.reduce_to,
        )?);
    }

    let mut report = AnalysisReport {
        n_rows: x.n_rows(),
        n_features: x.n_features(),
        classes: y.classes.clone(),
        rankings,
        validations: Vec::new(),
    };

    let mut validations = Vec::with_capacity(6);
    for case in report.cases() {
        let name = case.name();
        on_step(&format!("Cross-validating {}", name));
        let result = cross_validate(&x, &y, case.features, &config.forest, config.folds)?;
        info!("{}: {:.4} ± {:.4}", name, result.mean, result.std);
        validations.push(CaseValidation { case: name, result });
    }
    report.validations = validations;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_fixed_contract() {
        let config = AnalysisConfig::default();
        assert_eq!(config.forest.n_trees, 100);
        assert_eq!(config.forest.seed, 42);
        assert_eq!(config.folds, 5);
        assert_eq!(config.top_n, 5);
        assert_eq!(config.reduce_to, 10);
        assert_eq!(config.target, "stage");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reduce_to_below_top_n_rejected() {
        let config = AnalysisConfig {
            top_n: 5,
            reduce_to: 3,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
