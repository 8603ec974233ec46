//! JSON formatter.

use std::path::Path;

use serde::Serialize;

use crate::formatter::{FileValidation, ValidationSummary};
use crate::pipeline::MendReport;
use crate::repair::Fix;

/// Format a validation summary as JSON.
pub fn format_summary(summary: &ValidationSummary) -> String {
    let output = JsonSummary::from(summary);
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

/// Format a repair report as JSON.
pub fn format_report(path: &Path, report: &MendReport) -> String {
    let output = JsonReport::new(path, report);
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

#[derive(Serialize)]
struct JsonSummary {
    files: Vec<JsonFile>,
    total: usize,
    invalid: usize,
    passed: bool,
}

#[derive(Serialize)]
struct JsonFile {
    path: String,
    kind: Option<String>,
    valid: bool,
    errors: Vec<String>,
}

#[derive(Serialize)]
struct JsonReport {
    path: String,
    valid_before: bool,
    errors_before: Vec<String>,
    fixes: Vec<Fix>,
    valid_after: bool,
    errors_after: Vec<String>,
    modified: bool,
    converged: bool,
    output: String,
}

impl From<&ValidationSummary> for JsonSummary {
    fn from(summary: &ValidationSummary) -> Self {
        let invalid = summary.files.iter().filter(|file| !file.valid).count();
        Self {
            files: summary.files.iter().map(JsonFile::from).collect(),
            total: summary.files.len(),
            invalid,
            passed: summary.all_valid(),
        }
    }
}

impl From<&FileValidation> for JsonFile {
    fn from(file: &FileValidation) -> Self {
        Self {
            path: file.path.display().to_string(),
            kind: file.kind.clone(),
            valid: file.valid,
            errors: file.errors.clone(),
        }
    }
}

impl JsonReport {
    fn new(path: &Path, report: &MendReport) -> Self {
        Self {
            path: path.display().to_string(),
            valid_before: report.pre_validation.valid,
            errors_before: report.pre_validation.errors.clone(),
            fixes: report.fixes().cloned().collect(),
            valid_after: report.post_validation.valid,
            errors_after: report.post_validation.errors.clone(),
            modified: report.modified(),
            converged: report.converged,
            output: report.output.clone(),
        }
    }
}
