//! Repair pipeline orchestration.
//!
//! Sequences the passes over one document:
//!
//! ```text
//! raw text -> syntax recovery -> parse -> semantic resolver -> validator -> serialize
//! ```
//!
//! [`mend_content`] never fails on malformed input; unrecoverable content
//! surfaces inside the report. [`mend_file`] adds the read/write edges and
//! only rewrites a file when the repaired content parsed to a mapping.

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{MendError, Result};
use crate::manifest::{parse_document, serialize_document};
use crate::repair::{repair_syntax, resolve_semantics, Fix, Resolution, SyntaxRepair};
use crate::validate::{validate_content, validate_document, ValidationResult};

/// Options controlling how [`mend_file`] persists its result.
#[derive(Debug, Clone)]
pub struct MendOptions {
    /// Report without writing anything back
    pub dry_run: bool,
    /// Write `<name>.bak` beside the file before overwriting
    pub backup: bool,
}

impl Default for MendOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            backup: true,
        }
    }
}

/// Aggregate result of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MendReport {
    /// Validation of the input before any repair
    pub pre_validation: ValidationResult,
    /// Line-oriented syntax recovery outcome
    pub syntax: SyntaxRepair,
    /// Semantic resolution outcome over the parsed document
    pub semantic: Resolution,
    /// Validation of the repaired document
    pub post_validation: ValidationResult,
    /// Block-style serialization of the repaired document
    pub output: String,
    /// True when the repaired document passed post-validation
    pub converged: bool,
}

impl MendReport {
    /// True when either pass changed the input.
    pub fn modified(&self) -> bool {
        self.syntax.modified || self.semantic.modified
    }

    /// True when the repaired content parsed to a mapping.
    pub fn repaired(&self) -> bool {
        self.semantic.document.is_mapping()
    }

    /// Fixes from both passes, in application order.
    pub fn fixes(&self) -> impl Iterator<Item = &Fix> {
        self.syntax.fixes.iter().chain(self.semantic.fixes.iter())
    }
}

/// Run the full repair pipeline over a YAML string.
pub fn mend_content(content: &str) -> MendReport {
    let pre_validation = validate_content(content);
    let syntax = repair_syntax(content);

    let semantic = match parse_document(&syntax.content) {
        Ok(document) => resolve_semantics(&document),
        Err(e) => Resolution {
            modified: false,
            document: Value::Null,
            fixes: vec![Fix::warning(e.to_string())],
        },
    };

    let (post_validation, output) = if semantic.document.is_mapping() {
        let output =
            serialize_document(&semantic.document).unwrap_or_else(|_| syntax.content.clone());
        (validate_document(&semantic.document), output)
    } else {
        (validate_content(&syntax.content), syntax.content.clone())
    };

    let converged = post_validation.valid;
    debug!(
        "pipeline finished: {} syntax fix(es), {} semantic fix(es), converged={}",
        syntax.fixes.len(),
        semantic.fixes.len(),
        converged
    );

    MendReport {
        pre_validation,
        syntax,
        semantic,
        post_validation,
        output,
        converged,
    }
}

/// Read, mend, and persist one manifest file.
///
/// The file is only rewritten when the repaired content parsed to a mapping
/// and at least one pass changed something; unrecoverable inputs leave the
/// original untouched.
pub fn mend_file(path: &Path, options: &MendOptions) -> Result<MendReport> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(MendError::FileNotFound(path.display().to_string()));
        }
        Err(e) => return Err(MendError::Io(e)),
    };

    let report = mend_content(&content);

    if options.dry_run {
        info!("dry run, not writing {}", path.display());
        return Ok(report);
    }

    if report.repaired() && report.modified() {
        if options.backup {
            let mut backup = path.as_os_str().to_os_string();
            backup.push(".bak");
            fs::write(&backup, &content)?;
            debug!("backed up original to {}", Path::new(&backup).display());
        }
        fs::write(path, &report.output)?;
        info!(
            "rewrote {} with {} fix(es)",
            path.display(),
            report.fixes().count()
        );
    }

    Ok(report)
}
