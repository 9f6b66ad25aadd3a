//! Format run and validation reports as text.

use crate::config::SacConfig;
use crate::pipeline::{CheckReport, RunReport};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Summary of a finished conversion.
pub fn format_run_report_text(report: &RunReport, config: &SacConfig) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Conversion")));
    out.push_str(&format!("  Input: {}\n", config.input.display()));
    out.push_str(&format!("  Output: {}\n", config.output_dir.display()));
    let mode = if config.write_individual_items {
        "one file per item"
    } else {
        "items.json"
    };
    out.push_str(&format!("  Mode: {}\n\n", mode));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Items", "Count"]);
    let rows = [
        ("Total", report.total_items),
        ("Accepted", report.accepted),
        ("Skipped (type)", report.skipped_type),
        ("Skipped (invalid)", report.skipped_invalid),
        ("Projected", report.projected),
        ("Orphans", report.orphans),
        ("Files written", report.files_written),
    ];
    for (label, count) in rows {
        table.add_row(vec![label.to_string(), count.to_string()]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!("Finished in {} ms", report.elapsed_ms));
    out
}

/// Validation result as text or pretty JSON.
pub fn format_check_report(report: &CheckReport, format: &str) -> Result<String, serde_json::Error> {
    if format == "json" {
        return serde_json::to_string_pretty(report);
    }

    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Validation")));
    out.push_str(&format!("  Items: {}\n", report.total_items));
    out.push_str(&format!("  Valid items: {}\n", report.valid_items));
    out.push_str(&format!("  Issues: {}\n\n", report.issues.len()));

    if report.is_valid() {
        out.push_str(&format!("{}", "No issues found.".green()));
        return Ok(out);
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Path", "Issue"]);
    for issue in report.issues.iter() {
        table.add_row(vec![issue.path.clone(), issue.message.clone()]);
    }
    out.push_str(&format!("{}\n\n", table));
    let verdict = if report.fatal {
        "Export cannot be converted.".to_string()
    } else {
        format!(
            "{} item(s) would be skipped with --skip-invalid.",
            report.total_items.saturating_sub(report.valid_items)
        )
    };
    out.push_str(&format!("{}", verdict.red()));
    Ok(out)
}
