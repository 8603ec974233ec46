//! Output formatters for validation and repair results.

pub mod json;
pub mod plain;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::pipeline::MendReport;

/// Validation outcome for one manifest file.
#[derive(Debug, Clone, Serialize)]
pub struct FileValidation {
    /// Path as given or discovered during the directory walk
    pub path: PathBuf,
    /// Declared kind, when the file parsed
    pub kind: Option<String>,
    /// True when no errors were recorded
    pub valid: bool,
    /// Structural errors, in rule order
    pub errors: Vec<String>,
}

/// Aggregate outcome of a validation run over one or more files.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationSummary {
    pub files: Vec<FileValidation>,
}

impl ValidationSummary {
    /// True when every file validated cleanly.
    pub fn all_valid(&self) -> bool {
        self.files.iter().all(|file| file.valid)
    }
}

/// Format a validation summary to a string.
pub fn format_summary(summary: &ValidationSummary, format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => plain::format_summary(summary),
        OutputFormat::Json => json::format_summary(summary),
    }
}

/// Format a repair report to a string.
pub fn format_report(path: &Path, report: &MendReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => plain::format_report(path, report),
        OutputFormat::Json => json::format_report(path, report),
    }
}
