//! Feature ranking by forest importance and rank correlation

use std::cmp::Ordering;
use std::fmt;

use log::debug;
use rayon::prelude::*;
use serde::Serialize;

use super::correlation::{kendall, spearman};
use super::encoder::{FeatureMatrix, TargetEncoding};
use super::error::Result;
use super::forest::{ForestConfig, RandomForest};

/// Scoring method used to rank features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMethod {
    RandomForest,
    Spearman,
    Kendall,
}

impl RankingMethod {
    /// Methods in report order
    pub const ALL: [RankingMethod; 3] = [
        RankingMethod::RandomForest,
        RankingMethod::Spearman,
        RankingMethod::Kendall,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RankingMethod::RandomForest => "RF",
            RankingMethod::Spearman => "Spearman",
            RankingMethod::Kendall => "Kendall",
        }
    }

    /// Short tag used in case names (`RF_full_top5`)
    pub fn case_tag(&self) -> &'static str {
        match self {
            RankingMethod::RandomForest => "RF",
            RankingMethod::Spearman => "SP",
            RankingMethod::Kendall => "KD",
        }
    }

    /// Tag used in the `Source` column of the CSV export (`rf_full`, `SP_full`)
    pub fn source_tag(&self) -> &'static str {
        match self {
            RankingMethod::RandomForest => "rf",
            RankingMethod::Spearman => "SP",
            RankingMethod::Kendall => "KD",
        }
    }

    /// Description of what the score column holds
    pub fn score_label(&self) -> &'static str {
        match self {
            RankingMethod::RandomForest => "importances",
            RankingMethod::Spearman => "|Spearman| values",
            RankingMethod::Kendall => "|Kendall| values",
        }
    }
}

impl fmt::Display for RankingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a ranking covers every feature or a method's own top list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingScope {
    Full,
    Reduced,
}

impl RankingScope {
    pub fn label(&self) -> &'static str {
        match self {
            RankingScope::Full => "full",
            RankingScope::Reduced => "reduced",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureScore {
    pub feature: String,
    pub score: f64,
}

/// Features sorted by descending score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRanking {
    pub method: RankingMethod,
    pub scope: RankingScope,
    pub scores: Vec<FeatureScore>,
}

impl FeatureRanking {
    /// Sort `(name, score)` pairs descending. The sort is stable, so equal scores
    /// keep the order of `names`.
    pub fn from_scores(
        method: RankingMethod,
        scope: RankingScope,
        names: &[String],
        scores: &[f64],
    ) -> Self {
        let mut scores: Vec<FeatureScore> = names
            .iter()
            .zip(scores.iter())
            .map(|(feature, &score)| FeatureScore {
                feature: feature.clone(),
                score,
            })
            .collect();

        scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        Self {
            method,
            scope,
            scores,
        }
    }

    /// Names of the `n` best features; all of them when fewer exist
    pub fn top(&self, n: usize) -> Vec<String> {
        self.scores
            .iter()
            .take(n)
            .map(|s| s.feature.clone())
            .collect()
    }

    /// The `n` best entries with their scores
    pub fn top_scores(&self, n: usize) -> &[FeatureScore] {
        &self.scores[..n.min(self.scores.len())]
    }

    pub fn score_of(&self, feature: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|s| s.feature == feature)
            .map(|s| s.score)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Score every column of `x` against `y` with `method`.
///
/// Correlation scores are absolute values; forest scores are impurity
/// importances of a freshly fit forest.
pub fn rank_features(
    method: RankingMethod,
    scope: RankingScope,
    x: &FeatureMatrix,
    y: &TargetEncoding,
    forest: &ForestConfig,
) -> Result<FeatureRanking> {
    let scores = match method {
        RankingMethod::RandomForest => {
            RandomForest::fit(&x.values, &y.codes, forest)?.feature_importances()
        }
        RankingMethod::Spearman | RankingMethod::Kendall => {
            let target = y.as_f64();
            x.names
                .par_iter()
                .enumerate()
                .map(|(j, name)| {
                    let values = x.values.column(j).to_vec();
                    let coefficient = if method == RankingMethod::Spearman {
                        spearman(name, &values, &target)?
                    } else {
                        kendall(name, &values, &target)?
                    };
                    Ok(coefficient.abs())
                })
                .collect::<Result<Vec<f64>>>()?
        }
    };

    let ranking = FeatureRanking::from_scores(method, scope, &x.names, &scores);
    debug!(
        "{} {} ranking: {:?}",
        method,
        scope.label(),
        ranking.top(ranking.len())
    );
    Ok(ranking)
}

/// Full and reduced rankings for one method
#[derive(Debug, Clone, Serialize)]
pub struct MethodRankings {
    pub method: RankingMethod,
    pub full: FeatureRanking,
    /// Best features of the full ranking
    pub top_full: Vec<String>,
    /// Wider selection from the full ranking that the reduced pass rescoring uses
    pub shortlist: Vec<String>,
    pub reduced: FeatureRanking,
    pub top_reduced: Vec<String>,
}

/// Rank all features, keep the best `reduce_to`, rank again on only those, and
/// take the best `top_n` of both passes.
pub fn rank_method(
    method: RankingMethod,
    x: &FeatureMatrix,
    y: &TargetEncoding,
    forest: &ForestConfig,
    top_n: usize,
    reduce_to: usize,
) -> Result<MethodRankings> {
    let full = rank_features(method, RankingScope::Full, x, y, forest)?;
    let top_full = full.top(top_n);
    let shortlist = full.top(reduce_to);

    let reduced_x = x.select(&shortlist)?;
    let reduced = rank_features(method, RankingScope::Reduced, &reduced_x, y, forest)?;
    let top_reduced = reduced.top(top_n);

    Ok(MethodRankings {
        method,
        full,
        top_full,
        shortlist,
        reduced,
        top_reduced,
    })
}
