//! Structural validation of manifest documents.
//!
//! Per-kind required-field and type rules, applied in a fixed order. Every
//! rule that applies is run and reported; only a missing `kind` cuts the
//! run short. Nothing here mutates the document or performs repairs.

use std::fs;
use std::io;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::manifest::parse_document;
use crate::manifest::schema::{is_supported_kind, required_fields};

/// Outcome of one validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True when no structural errors were found
    pub valid: bool,
    /// One entry per defect, in rule order
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn failed(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![message.into()],
        }
    }

    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Check a parsed document against the per-kind structural rules.
///
/// Pure function: no mutation, no I/O. Rules run in order; all applicable
/// rules contribute errors rather than failing fast, except that a missing
/// `kind` returns immediately.
pub fn validate_document(document: &Value) -> ValidationResult {
    let Some(root) = document.as_mapping() else {
        return ValidationResult::failed("Manifest must be a valid YAML mapping");
    };

    let kind_value = match root.get("kind") {
        Some(value) => value,
        None => return ValidationResult::failed("Missing required field: 'kind'"),
    };

    let mut errors = Vec::new();

    if let Some(kind) = kind_value.as_str() {
        if !is_supported_kind(kind) {
            errors.push(format!("Unsupported Kubernetes kind: {}", kind));
        }
        if let Some(required) = required_fields(kind) {
            for field in required {
                if !root.contains_key(*field) {
                    errors.push(format!(
                        "Missing required field for {}: '{}'",
                        kind, field
                    ));
                }
            }
        }
    } else {
        errors.push(format!(
            "Unsupported Kubernetes kind: {}",
            kind_label(kind_value)
        ));
    }

    if let Some(api_version) = root.get("apiVersion") {
        if !matches!(api_version, Value::String(s) if !s.trim().is_empty()) {
            errors.push("Invalid apiVersion: must be a non-empty string".to_string());
        }
    }

    if let Some(metadata) = root.get("metadata") {
        match metadata.as_mapping() {
            Some(metadata) => {
                if !metadata.contains_key("name") {
                    errors.push("Missing required field in metadata: 'name'".to_string());
                }
            }
            None => errors.push("Invalid metadata: must be a mapping".to_string()),
        }
    }

    ValidationResult::from_errors(errors)
}

/// Companion check for a Pod's `spec.containers` list.
///
/// Takes the pod spec mapping, not the whole document. Container entries
/// are addressed by index, one error per missing field.
pub fn validate_pod_spec(spec: &Value) -> ValidationResult {
    let Some(containers) = spec.get("containers") else {
        return ValidationResult::failed("Missing required field in spec: 'containers'");
    };

    let containers = match containers.as_sequence() {
        Some(list) if !list.is_empty() => list,
        _ => return ValidationResult::failed("Containers must be a non-empty list"),
    };

    let mut errors = Vec::new();
    for (index, container) in containers.iter().enumerate() {
        let (has_name, has_image) = match container.as_mapping() {
            Some(container) => (
                container.contains_key("name"),
                container.contains_key("image"),
            ),
            None => (false, false),
        };
        if !has_name {
            errors.push(format!("Container {}: missing required field 'name'", index));
        }
        if !has_image {
            errors.push(format!(
                "Container {}: missing required field 'image'",
                index
            ));
        }
    }

    ValidationResult::from_errors(errors)
}

/// Parse and validate a YAML string.
pub fn validate_content(content: &str) -> ValidationResult {
    if content.trim().is_empty() {
        return ValidationResult::failed("File is empty or contains only whitespace");
    }

    let document = match parse_document(content) {
        Ok(document) => document,
        Err(e) => return ValidationResult::failed(e.to_string()),
    };

    if document.is_null() {
        return ValidationResult::failed("File is empty or contains only whitespace");
    }
    if !document.is_mapping() {
        return ValidationResult::failed("Manifest must be a valid YAML mapping");
    }

    validate_document(&document)
}

/// Read, parse, and validate a manifest file.
///
/// Missing files and parse failures surface as single descriptive errors
/// in the result rather than as `Err`.
pub fn validate_file(path: &Path) -> ValidationResult {
    debug!("validating {}", path.display());

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return ValidationResult::failed(format!("File not found: {}", path.display()));
        }
        Err(e) => {
            return ValidationResult::failed(format!("Unexpected error: {}", e));
        }
    };

    validate_content(&content)
}

/// Render a non-string `kind` scalar for the unsupported-kind message.
fn kind_label(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        _ => "<non-scalar>".to_string(),
    }
}
