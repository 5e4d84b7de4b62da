//! JSON export of a full analysis run

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{AnalysisConfig, AnalysisReport, CleaningSummary, Result};

/// Metadata about the analysis run
#[derive(Serialize)]
pub struct RunMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    pub featrank_version: String,
    pub input_file: String,
    pub config: AnalysisConfig,
}

/// Complete analysis export
#[derive(Serialize)]
pub struct AnalysisExport<'a> {
    pub metadata: RunMetadata,
    pub cleaning: &'a CleaningSummary,
    pub analysis: &'a AnalysisReport,
}

/// Write the cleaning summary, all rankings and all CV results to `output_path`
pub fn export_analysis_json(
    report: &AnalysisReport,
    cleaning: &CleaningSummary,
    config: &AnalysisConfig,
    input_file: &str,
    output_path: &Path,
) -> Result<()> {
    let export = AnalysisExport {
        metadata: RunMetadata {
            timestamp: Utc::now().to_rfc3339(),
            featrank_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: input_file.to_string(),
            config: config.clone(),
        },
        cleaning,
        analysis: report,
    };

    let writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(writer, &export)?;
    Ok(())
}
