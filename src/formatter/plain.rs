//! Plain text formatter.

use std::path::Path;

use colored::Colorize;

use crate::formatter::{FileValidation, ValidationSummary};
use crate::pipeline::MendReport;

/// Format a validation summary as human-readable text.
pub fn format_summary(summary: &ValidationSummary) -> String {
    let mut output = String::new();

    for file in &summary.files {
        output.push_str(&format_file(file));
    }

    let invalid = summary.files.iter().filter(|file| !file.valid).count();
    if invalid == 0 {
        output.push_str(&format!(
            "\n{} {} file(s) valid.\n",
            "✓".green(),
            summary.files.len()
        ));
    } else {
        output.push_str(&format!(
            "\n{} {} of {} file(s) invalid.\n",
            "✗".red(),
            invalid,
            summary.files.len()
        ));
    }

    output
}

fn format_file(file: &FileValidation) -> String {
    let mut output = String::new();
    let kind = file.kind.as_deref().unwrap_or("unknown");

    if file.valid {
        output.push_str(&format!(
            "{} {} ({})\n",
            "✓".green(),
            file.path.display(),
            kind
        ));
    } else {
        output.push_str(&format!(
            "{} {} ({})\n",
            "✗".red(),
            file.path.display(),
            kind
        ));
        for error in &file.errors {
            output.push_str(&format!("    {}\n", error));
        }
    }

    output
}

/// Format a repair report as human-readable text.
pub fn format_report(path: &Path, report: &MendReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Repairing {}\n", path.display()));

    if !report.pre_validation.valid {
        output.push_str("\nIssues before repair:\n");
        for error in &report.pre_validation.errors {
            output.push_str(&format!("  {} {}\n", "✗".red(), error));
        }
    }

    let fixes: Vec<_> = report.fixes().collect();
    if fixes.is_empty() {
        output.push_str(&format!("\n{} No changes needed.\n", "✓".green()));
    } else {
        output.push_str("\nApplied fixes:\n");
        for fix in fixes {
            let marker = if fix.is_warning() {
                "⚠".yellow()
            } else {
                "✓".green()
            };
            output.push_str(&format!("  {} {}\n", marker, fix.message));
        }
    }

    if report.converged {
        output.push_str(&format!(
            "\n{} Manifest is valid after repair.\n",
            "✓".green()
        ));
    } else {
        output.push_str(&format!("\n{} Manifest is still invalid:\n", "✗".red()));
        for error in &report.post_validation.errors {
            output.push_str(&format!("  {}\n", error));
        }
    }

    output
}
