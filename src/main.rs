//! Featrank: Feature Ranking CLI Tool
//!
//! Loads a labelled dataset, ranks its features three ways, cross-validates
//! the resulting subsets and writes a long-format importance table.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use featrank::cli::Cli;
use featrank::pipeline::{clean_dataset, load_dataset, run_analysis};
use featrank::report::{
    export_analysis_json, export_importances_csv, print_cleaning_summary, print_cv_results,
    print_score_tables, print_top_lists,
};
use featrank::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_step_header, print_success,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = cli.analysis_config();
    config.validate()?;

    if !cli.quiet {
        print_banner(env!("CARGO_PKG_VERSION"));
        print_config(cli.input(), cli.output(), &config);
    }

    // Step 1: Load and clean
    if !cli.quiet {
        print_step_header(1, "Load & Clean");
    }
    let step_start = Instant::now();
    let spinner = create_spinner("Loading dataset...", cli.quiet);
    let raw = load_dataset(cli.input(), cli.infer_schema_length)
        .with_context(|| format!("Failed to load {}", cli.input().display()))?;
    let cleaned = clean_dataset(&raw).context("Failed to clean dataset")?;
    finish_with_success(
        &spinner,
        &format!("Dataset ready ({:.2}s)", step_start.elapsed().as_secs_f64()),
    );
    print_cleaning_summary(&cleaned.summary);

    // Step 2: Rank and cross-validate
    if !cli.quiet {
        print_step_header(2, "Rank & Cross-Validate");
    }
    let step_start = Instant::now();
    let spinner = create_spinner("Encoding features...", cli.quiet);
    let report = run_analysis(&cleaned.data, &config, |step| {
        spinner.set_message(step.to_string())
    })
    .context("Feature ranking failed")?;
    finish_with_success(
        &spinner,
        &format!(
            "Ranked {} features over {} rows ({:.2}s)",
            report.n_features,
            report.n_rows,
            step_start.elapsed().as_secs_f64()
        ),
    );

    // Step 3: Report
    if !cli.quiet {
        print_step_header(3, "Results");
    }
    print_top_lists(&report);
    print_score_tables(&report);
    print_cv_results(&report, config.folds);

    let rows = export_importances_csv(&report, cli.output())
        .with_context(|| format!("Failed to write {}", cli.output().display()))?;
    println!();
    print_success(&format!(
        "Wrote {} rows to {}",
        rows,
        cli.output().display()
    ));

    if let Some(json_path) = &cli.json {
        let input = cli.input().display().to_string();
        export_analysis_json(&report, &cleaned.summary, &config, &input, json_path)
            .with_context(|| format!("Failed to write {}", json_path.display()))?;
        print_success(&format!("Wrote analysis report to {}", json_path.display()));
    }

    if !cli.quiet {
        print_completion();
    }

    Ok(())
}
