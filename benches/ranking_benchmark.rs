//! Benchmark of the three ranking methods on synthetic data
//!
//! Run with: cargo bench --bench ranking_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndarray::Array2;
use rand::prelude::*;

use featrank::pipeline::{
    rank_features, FeatureMatrix, ForestConfig, RankingMethod, RankingScope, TargetEncoding,
};

/// Generate a matrix where the first feature tracks the class and the rest are noise
fn generate_data(n_rows: usize, n_features: usize, seed: u64) -> (FeatureMatrix, TargetEncoding) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let codes: Vec<usize> = (0..n_rows).map(|i| i % 3).collect();
    let mut values = Array2::<f64>::zeros((n_rows, n_features));
    for i in 0..n_rows {
        values[(i, 0)] = codes[i] as f64 * 5.0 + rng.gen::<f64>();
        for j in 1..n_features {
            values[(i, j)] = rng.gen::<f64>() * 100.0;
        }
    }

    (
        FeatureMatrix {
            names: (0..n_features).map(|j| format!("f{}", j)).collect(),
            values,
        },
        TargetEncoding {
            codes,
            classes: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        },
    )
}

fn bench_ranking_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking_methods");
    group.sample_size(10);

    let forest = ForestConfig {
        n_trees: 20,
        seed: 42,
    };

    for &n_rows in &[200usize, 1000] {
        let (x, y) = generate_data(n_rows, 20, 42);
        group.throughput(Throughput::Elements(n_rows as u64));

        for method in RankingMethod::ALL {
            group.bench_with_input(
                BenchmarkId::new(method.label(), n_rows),
                &(&x, &y),
                |b, (x, y)| {
                    b.iter(|| {
                        rank_features(
                            black_box(method),
                            RankingScope::Full,
                            black_box(*x),
                            black_box(*y),
                            &forest,
                        )
                        .unwrap()
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_ranking_methods);
criterion_main!(benches);
