//! Tests for full and reduced feature rankings

use featrank::pipeline::{
    clean_dataset, encode_features, encode_target, rank_features, rank_method, FeatureMatrix,
    ForestConfig, RankingMethod, RankingScope, TargetEncoding,
};

#[path = "common/mod.rs"]
mod common;

use common::assert_subset;

fn encoded(rows: usize, n_features: usize, seed: u64) -> (FeatureMatrix, TargetEncoding) {
    let df = common::create_stage_dataframe(rows, n_features, seed);
    let cleaned = clean_dataset(&df).unwrap().data;
    (
        encode_features(&cleaned, "stage").unwrap(),
        encode_target(&cleaned, "stage").unwrap(),
    )
}

fn small_forest() -> ForestConfig {
    ForestConfig { n_trees: 15, seed: 42 }
}

#[test]
fn test_top_lists_are_nested_for_every_method() {
    let (x, y) = encoded(200, 15, 11);

    for method in RankingMethod::ALL {
        let rankings = rank_method(method, &x, &y, &small_forest(), 5, 10).unwrap();

        assert_eq!(rankings.top_full.len(), 5);
        assert_eq!(rankings.shortlist.len(), 10);
        assert_eq!(rankings.top_reduced.len(), 5);
        assert_eq!(rankings.reduced.len(), 10);
        assert_subset(&rankings.top_full, &rankings.shortlist, "full top-5 in top-10");
        assert_subset(&rankings.top_reduced, &rankings.shortlist, "reduced top-5 in top-10");
        assert_subset(&rankings.shortlist, &x.names, "top-10 in feature matrix");
    }
}

#[test]
fn test_monotonic_feature_leads_correlation_rankings() {
    let (x, y) = encoded(200, 15, 5);

    for method in [RankingMethod::Spearman, RankingMethod::Kendall] {
        let rankings = rank_method(method, &x, &y, &small_forest(), 5, 10).unwrap();
        assert!(
            rankings.top_full.contains(&"f1".to_string()),
            "{} top-5 {:?} should contain f1",
            method,
            rankings.top_full
        );
        assert_eq!(rankings.top_full[0], "f1");
    }
}

#[test]
fn test_monotonic_feature_has_top_forest_importance() {
    let (x, y) = encoded(200, 15, 5);

    let ranking = rank_features(
        RankingMethod::RandomForest,
        RankingScope::Full,
        &x,
        &y,
        &small_forest(),
    )
    .unwrap();

    assert_eq!(ranking.top(1), vec!["f1".to_string()]);
    let total: f64 = ranking.scores.iter().map(|s| s.score).sum();
    assert!((total - 1.0).abs() < 1e-9, "importances sum to {}", total);
}

#[test]
fn test_correlation_scores_are_absolute_and_sorted() {
    let (x, y) = encoded(120, 8, 9);

    for method in [RankingMethod::Spearman, RankingMethod::Kendall] {
        let ranking = rank_features(method, RankingScope::Full, &x, &y, &small_forest()).unwrap();
        assert!(ranking.scores.iter().all(|s| (0.0..=1.0).contains(&s.score)));
        assert!(ranking
            .scores
            .windows(2)
            .all(|w| w[0].score >= w[1].score));
    }
}

#[test]
fn test_reruns_are_identical() {
    let (x, y) = encoded(150, 12, 21);

    for method in RankingMethod::ALL {
        let first = rank_method(method, &x, &y, &small_forest(), 5, 10).unwrap();
        let second = rank_method(method, &x, &y, &small_forest(), 5, 10).unwrap();
        assert_eq!(first.top_full, second.top_full);
        assert_eq!(first.top_reduced, second.top_reduced);
        assert_eq!(first.full, second.full);
        assert_eq!(first.reduced, second.reduced);
    }
}

#[test]
fn test_six_features_reduced_equals_full() {
    let (x, y) = encoded(100, 6, 3);
    assert_eq!(x.n_features(), 6);

    for method in RankingMethod::ALL {
        let rankings = rank_method(method, &x, &y, &small_forest(), 5, 10).unwrap();

        let mut shortlist = rankings.shortlist.clone();
        shortlist.sort();
        let mut all = x.names.clone();
        all.sort();
        assert_eq!(shortlist, all, "{} top-10 should be every feature", method);

        assert_eq!(rankings.full.scores, rankings.reduced.scores);
        assert_eq!(rankings.top_full, rankings.top_reduced);
    }
}

#[test]
fn test_fewer_features_than_top_n() {
    let (x, y) = encoded(60, 3, 8);

    let rankings = rank_method(RankingMethod::Kendall, &x, &y, &small_forest(), 5, 10).unwrap();

    assert_eq!(rankings.top_full.len(), 3);
    assert_eq!(rankings.shortlist.len(), 3);
    assert_eq!(rankings.top_reduced.len(), 3);
}
