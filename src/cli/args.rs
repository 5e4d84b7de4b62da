//! Command-line argument definitions using clap

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::pipeline::{AnalysisConfig, ForestConfig, TARGET_COLUMN};

/// Featrank - rank features by forest importance and rank correlation,
/// then cross-validate the top subsets
#[derive(Parser, Debug)]
#[command(name = "featrank")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long, default_value = "imputed_data.csv")]
    pub input: PathBuf,

    /// Output CSV path for the long-format importance table (overwritten if present)
    #[arg(short, long, default_value = "rf_feature_importances.csv")]
    pub output: PathBuf,

    /// Optional path for a JSON export of the full analysis
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Number of trees in every forest
    #[arg(long, default_value = "100", value_parser = validate_positive)]
    pub n_trees: usize,

    /// Seed for bootstrap sampling; fixed so reruns reproduce the same rankings
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Number of cross-validation folds
    #[arg(long, default_value = "5", value_parser = validate_folds)]
    pub folds: usize,

    /// Size of every reported feature subset
    #[arg(long, default_value = "5", value_parser = validate_positive)]
    pub top_n: usize,

    /// Size of the shortlist the reduced pass rescoring uses (must be >= --top-n)
    #[arg(long, default_value = "10", value_parser = validate_positive)]
    pub reduce_to: usize,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Hide spinners and decorative output; results are still printed
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Cli {
    /// Analysis settings described by the flags
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            forest: ForestConfig {
                n_trees: self.n_trees,
                seed: self.seed,
            },
            folds: self.folds,
            top_n: self.top_n,
            reduce_to: self.reduce_to,
            target: TARGET_COLUMN.to_string(),
        }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

/// Validator for counts that must be at least one
fn validate_positive(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid count", s))?;

    if value == 0 {
        Err("value must be at least 1".to_string())
    } else {
        Ok(value)
    }
}

/// Validator for the fold count
fn validate_folds(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid count", s))?;

    if value < 2 {
        Err(format!("folds must be at least 2, got {}", value))
    } else {
        Ok(value)
    }
}
