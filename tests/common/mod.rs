//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tempfile::TempDir;

use featrank::pipeline::{AnalysisConfig, ForestConfig};

/// Number of classes in the synthetic `stage` column
pub const N_STAGES: usize = 4;

/// Create a labelled dataset with `rows` usable rows and `n_features` numeric
/// features `f1..fN`.
///
/// - `f1` is monotonic in the stage (stage ranges never overlap)
/// - the remaining features are uniform noise
/// - `rowname`, `country` and `decade` are excluded columns
/// - `status` marks 10 extra rows as unlabelled; 5 more labelled rows have no stage
pub fn create_stage_dataframe(rows: usize, n_features: usize, seed: u64) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(seed);
    let total = rows + 15;

    let mut rownames = Vec::with_capacity(total);
    let mut countries = Vec::with_capacity(total);
    let mut decades = Vec::with_capacity(total);
    let mut statuses: Vec<Option<String>> = Vec::with_capacity(total);
    let mut stages: Vec<Option<String>> = Vec::with_capacity(total);
    let mut stage_codes = Vec::with_capacity(total);

    for i in 0..total {
        rownames.push(format!("row_{}", i));
        countries.push(if i % 2 == 0 { "NL" } else { "CA" }.to_string());
        decades.push((1990 + 10 * (i % 3)) as i64);

        let stage = i % N_STAGES;
        stage_codes.push(stage);
        if i < rows {
            statuses.push(Some("labelled".to_string()));
            stages.push(Some(format!("S{}", stage)));
        } else if i < rows + 10 {
            statuses.push(Some("unlabelled".to_string()));
            stages.push(Some(format!("S{}", (stage + 1) % N_STAGES)));
        } else {
            statuses.push(Some("labelled".to_string()));
            stages.push(None);
        }
    }

    let mut columns: Vec<Column> = vec![
        Column::new("rowname".into(), rownames),
        Column::new("country".into(), countries),
        Column::new("decade".into(), decades),
        Column::new("status".into(), statuses),
        Column::new("stage".into(), stages),
    ];

    for f in 1..=n_features {
        let values: Vec<f64> = if f == 1 {
            stage_codes
                .iter()
                .enumerate()
                .map(|(i, &s)| s as f64 * 10.0 + (i % 7) as f64 * 0.5)
                .collect()
        } else {
            (0..total).map(|_| rng.gen::<f64>() * 100.0).collect()
        };
        columns.push(Column::new(format!("f{}", f).into(), values));
    }

    DataFrame::new(columns).unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("imputed_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("imputed_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Analysis settings with a small forest so tests stay fast
pub fn fast_config() -> AnalysisConfig {
    AnalysisConfig {
        forest: ForestConfig { n_trees: 15, seed: 42 },
        ..Default::default()
    }
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}

/// Assert every element of `subset` appears in `superset`
pub fn assert_subset(subset: &[String], superset: &[String], context: &str) {
    for name in subset {
        assert!(
            superset.contains(name),
            "{}: '{}' not in {:?}",
            context,
            name,
            superset
        );
    }
}
