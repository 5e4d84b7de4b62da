//! Dataset loading and cleaning for CSV and Parquet files

use std::path::Path;

use log::debug;
use polars::prelude::*;

use super::error::{RankError, Result};

/// Name of the classification target column
pub const TARGET_COLUMN: &str = "stage";

/// Optional labelling-status column; rows marked unlabelled are removed
pub const STATUS_COLUMN: &str = "status";

/// Status value marking rows without a usable label
pub const UNLABELLED: &str = "unlabelled";

/// Identifier, outcome and bookkeeping columns that are never used as predictors
pub const EXCLUDED_COLUMNS: [&str; 14] = [
    "rowname",
    "year_data",
    "country",
    "name",
    "CD_inc",
    "UC_inc",
    "CD_change_inc",
    "UC_change_inc",
    "CD_prev",
    "UC_prev",
    "CD_change_prev",
    "UC_change_prev",
    "status",
    "decade",
];

/// Load a dataset from a file (CSV or Parquet based on extension).
///
/// `infer_schema_length` of 0 means a full scan for CSV type inference.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if !path.exists() {
        return Err(RankError::DataFormat(format!(
            "Input file not found: {}",
            path.display()
        )));
    }

    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(schema_length)
            .finish()?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())?,
        _ => {
            return Err(RankError::DataFormat(format!(
                "Unsupported file format: '{}'. Supported formats: csv, parquet",
                extension
            )))
        }
    };

    let df = lf.collect().map_err(|e| {
        RankError::DataFormat(format!("Failed to read {}: {}", path.display(), e))
    })?;

    debug!(
        "Loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );

    Ok(df)
}

/// What cleaning removed from the raw dataset
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CleaningSummary {
    pub rows_before: usize,
    pub rows_after: usize,
    pub unlabelled_removed: usize,
    pub missing_target_removed: usize,
    pub dropped_columns: Vec<String>,
}

/// Cleaned dataset together with a summary of what was removed
#[derive(Debug, Clone)]
pub struct CleaningOutcome {
    pub data: DataFrame,
    pub summary: CleaningSummary,
}

/// Remove unlabelled rows, rows without a target and the excluded columns.
///
/// Rows whose status is missing are kept; only the literal `"unlabelled"` is
/// filtered. Excluded columns that are not present are ignored.
pub fn clean_dataset(df: &DataFrame) -> Result<CleaningOutcome> {
    let rows_before = df.height();
    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let labelled = if column_names.iter().any(|c| c == STATUS_COLUMN) {
        df.clone()
            .lazy()
            .filter(
                col(STATUS_COLUMN)
                    .cast(DataType::String)
                    .neq_missing(lit(UNLABELLED)),
            )
            .collect()?
    } else {
        df.clone()
    };
    let unlabelled_removed = rows_before - labelled.height();

    if !column_names.iter().any(|c| c == TARGET_COLUMN) {
        return Err(RankError::MissingTarget {
            column: TARGET_COLUMN.to_string(),
        });
    }

    let with_target = labelled
        .clone()
        .lazy()
        .filter(col(TARGET_COLUMN).is_not_null())
        .collect()?;
    let missing_target_removed = labelled.height() - with_target.height();

    let dropped_columns: Vec<String> = EXCLUDED_COLUMNS
        .iter()
        .filter(|excluded| column_names.iter().any(|c| c == *excluded))
        .map(|s| s.to_string())
        .collect();

    let data = with_target.drop_many(dropped_columns.iter().map(|s| s.as_str()));

    debug!(
        "Cleaning removed {} unlabelled rows, {} rows without target, columns {:?}",
        unlabelled_removed, missing_target_removed, dropped_columns
    );

    let summary = CleaningSummary {
        rows_before,
        rows_after: data.height(),
        unlabelled_removed,
        missing_target_removed,
        dropped_columns,
    };

    Ok(CleaningOutcome { data, summary })
}
