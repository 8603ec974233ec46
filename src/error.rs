//! Error types for manifest loading and repair
//!
//! Structural defects found by the validator are collected into result
//! structs rather than raised; the variants here cover unrecoverable
//! input errors only.

use thiserror::Error;

/// Errors that can occur while loading, repairing, or writing manifests
#[derive(Debug, Error)]
pub enum MendError {
    /// Reading or writing a manifest file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The text could not be parsed as YAML
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON rendering for `--format json` failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Manifest file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),
}

/// Result type alias for repair pipeline operations
pub type Result<T> = std::result::Result<T, MendError>;
