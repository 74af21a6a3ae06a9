use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use colored::*;

use super::CorpusReport;
use crate::checker::DiscrepancyKind;

/// All kinds in the order they appear in the totals footer
const KINDS: [DiscrepancyKind; 6] = [
    DiscrepancyKind::OrphanHeading,
    DiscrepancyKind::DanglingTocEntry,
    DiscrepancyKind::OrderMismatch,
    DiscrepancyKind::MissingToc,
    DiscrepancyKind::MissingDeviceWidget,
    DiscrepancyKind::ParseFailure,
];

/// Prints the human-readable summary: one table row per discrepancy,
/// grouped by document, then per-kind totals and a pass/fail footer.
///
/// # Arguments
///
/// * `report` - The collected corpus report
/// * `strict_order` - Whether order mismatches count as blocking
pub fn display_summary(report: &CorpusReport, strict_order: bool) {
    println!(
        "\n{} {}",
        "notelint report".bold(),
        report
            .generated_at
            .format("(%Y-%m-%d %H:%M:%S UTC)")
            .to_string()
            .bright_black()
    );
    println!("{} {}", "Root:".bright_black(), report.root.display());

    let flagged: Vec<_> = report.documents.iter().filter(|d| !d.passed()).collect();

    if flagged.is_empty() {
        println!(
            "\n{}",
            format!("All {} documents passed", report.documents.len()).green()
        );
        return;
    }

    let mut table = Table::new();
    table
        .set_header(vec![
            Cell::new("Document").fg(comfy_table::Color::Cyan).add_attribute(Attribute::Bold),
            Cell::new("Kind").fg(comfy_table::Color::Cyan).add_attribute(Attribute::Bold),
            Cell::new("Line").fg(comfy_table::Color::Cyan).add_attribute(Attribute::Bold),
            Cell::new("Detail").fg(comfy_table::Color::Cyan).add_attribute(Attribute::Bold),
        ])
        .load_preset(comfy_table::presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    for doc in &flagged {
        for (i, d) in doc.discrepancies.iter().enumerate() {
            // Repeat the path only on the first row of each document
            let path_cell = if i == 0 {
                Cell::new(doc.path.display().to_string()).fg(comfy_table::Color::Yellow)
            } else {
                Cell::new("")
            };
            let kind_color = if d.kind.is_blocking(strict_order) {
                comfy_table::Color::Red
            } else {
                comfy_table::Color::Blue
            };
            let line = d.line.map(|l| l.to_string()).unwrap_or_default();
            table.add_row(vec![
                path_cell,
                Cell::new(d.kind.label()).fg(kind_color),
                Cell::new(line).set_alignment(CellAlignment::Right),
                Cell::new(&d.detail),
            ]);
        }
    }

    println!("\n{}", table);
    println!("{}", "=".repeat(72).bright_black());

    for kind in KINDS {
        let count = report.count_of(kind);
        if count == 0 {
            continue;
        }
        let label = format!("{:>4}  {}", count, kind.label());
        if kind.is_blocking(strict_order) {
            println!("{}", label.red());
        } else {
            println!("{}", label.yellow());
        }
    }

    let checked = format!(
        "Checked {} documents, {} flagged",
        report.documents.len(),
        flagged.len()
    );
    if report.has_blocking(strict_order) {
        println!("{}", checked.red().bold());
    } else {
        println!("{}", format!("{} (advisory only)", checked).yellow());
    }
}

/// Prints the report as pretty JSON for machine consumption
pub fn display_json(report: &CorpusReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => println!("{}", format!("Failed to serialize report: {}", e).red()),
    }
}
