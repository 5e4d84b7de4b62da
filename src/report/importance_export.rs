//! Long-format CSV export of every top list and its scores

use std::fs::File;
use std::path::Path;

use polars::prelude::*;

use crate::pipeline::{AnalysisReport, Result};

/// Header of the source column
pub const SOURCE_COLUMN: &str = "Source";
/// Header of the feature column
pub const FEATURE_COLUMN: &str = "Feature";
/// Header of the score column
pub const VALUE_COLUMN: &str = "Importance value";

/// One row of the long-format table
#[derive(Debug, Clone, PartialEq)]
pub struct ImportanceRow {
    pub source: String,
    pub feature: String,
    pub value: f64,
}

/// Rows for every case in report order, each in top-list order
pub fn importance_rows(report: &AnalysisReport) -> Vec<ImportanceRow> {
    report
        .cases()
        .iter()
        .flat_map(|case| {
            let source = case.source();
            case.ranking
                .top_scores(case.features.len())
                .iter()
                .map(move |entry| ImportanceRow {
                    source: source.clone(),
                    feature: entry.feature.clone(),
                    value: entry.score,
                })
        })
        .collect()
}

/// Build the `Source, Feature, Importance value` table
pub fn importance_table(report: &AnalysisReport) -> Result<DataFrame> {
    let rows = importance_rows(report);

    let sources: Vec<String> = rows.iter().map(|r| r.source.clone()).collect();
    let features: Vec<String> = rows.iter().map(|r| r.feature.clone()).collect();
    let values: Vec<f64> = rows.iter().map(|r| r.value).collect();

    let df = DataFrame::new(vec![
        Column::new(SOURCE_COLUMN.into(), sources),
        Column::new(FEATURE_COLUMN.into(), features),
        Column::new(VALUE_COLUMN.into(), values),
    ])?;

    Ok(df)
}

/// Write the long-format table to `path`, replacing any existing file.
///
/// Returns the number of data rows written.
pub fn export_importances_csv(report: &AnalysisReport, path: &Path) -> Result<usize> {
    let mut df = importance_table(report)?;
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;
    Ok(df.height())
}
