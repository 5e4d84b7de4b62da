//! Console report: top lists, score tables and cross-validation results

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{
    AnalysisCase, AnalysisReport, CleaningSummary, CrossValidation, RankingScope,
};

/// Heading for a top list, e.g. `RF – top 5 features on REDUCED (top-10) data:`
///
/// A reduced ranking covers exactly the shortlist, so its length is the
/// shortlist size.
pub fn top_list_heading(case: &AnalysisCase) -> String {
    let scope = match case.scope {
        RankingScope::Full => "FULL data".to_string(),
        RankingScope::Reduced => format!("REDUCED (top-{}) data", case.ranking.len()),
    };
    format!(
        "{} – top {} features on {}:",
        case.method.label(),
        case.features.len(),
        scope
    )
}

/// One cross-validation line: name padded to 17, mean and std to 4 decimals
pub fn format_cv_line(name: &str, cv: &CrossValidation) -> String {
    format!("{:17}: {:.4} ± {:.4}", name, cv.mean, cv.std)
}

fn indent(table: &Table) {
    for line in table.to_string().lines() {
        println!("      {}", line);
    }
}

/// Print what cleaning removed
pub fn print_cleaning_summary(summary: &CleaningSummary) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    table.add_row(vec![Cell::new("Rows loaded"), Cell::new(summary.rows_before)]);
    table.add_row(vec![
        Cell::new("Removed (unlabelled)"),
        Cell::new(summary.unlabelled_removed).fg(if summary.unlabelled_removed == 0 {
            Color::White
        } else {
            Color::Red
        }),
    ]);
    table.add_row(vec![
        Cell::new("Removed (missing stage)"),
        Cell::new(summary.missing_target_removed).fg(if summary.missing_target_removed == 0 {
            Color::White
        } else {
            Color::Red
        }),
    ]);
    table.add_row(vec![
        Cell::new("Rows kept"),
        Cell::new(summary.rows_after)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Excluded columns"),
        Cell::new(summary.dropped_columns.len()),
    ]);

    indent(&table);
}

/// Print every top list in report order
pub fn print_top_lists(report: &AnalysisReport) {
    for case in report.cases() {
        println!();
        println!("    {}", style(top_list_heading(&case)).white().bold());
        println!("      {:?}", case.features);
    }
}

/// Print the score of every feature in every top list
pub fn print_score_tables(report: &AnalysisReport) {
    println!();
    println!(
        "    {}",
        style("Feature importances / correlation values for each subset").white().bold()
    );

    for case in report.cases() {
        println!();
        println!(
            "    {} {}:",
            style(case.name()).cyan(),
            case.method.score_label()
        );

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Feature").add_attribute(Attribute::Bold),
            Cell::new("Score").add_attribute(Attribute::Bold),
        ]);
        for entry in case.ranking.top_scores(case.features.len()) {
            table.add_row(vec![
                Cell::new(&entry.feature),
                Cell::new(format!("{:.6}", entry.score)).set_alignment(CellAlignment::Right),
            ]);
        }
        indent(&table);
    }
}

/// Print the cross-validation line of every case
pub fn print_cv_results(report: &AnalysisReport, folds: usize) {
    println!();
    println!(
        "    {}",
        style(format!(
            "=== {}-Fold CV Accuracy (mean ± std) on each feature subset ===",
            folds
        ))
        .white()
        .bold()
    );
    for validation in &report.validations {
        println!("      {}", format_cv_line(&validation.case, &validation.result));
    }
}
