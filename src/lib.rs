//! # KubeMend CLI
//!
//! A Rust-based command-line tool that validates Kubernetes manifest files
//! against structural rules and automatically repairs common defects in
//! corrupted or incomplete manifests.
//!
//! ## Features
//!
//! - **Syntax Recovery**: Line-oriented recovery of known YAML corruption
//!   patterns (split keys, orphaned values, token typos)
//! - **Semantic Resolution**: Kind-aware defaulting of missing required
//!   fields over the parsed document
//! - **Structural Validation**: Per-kind required-field and type checks,
//!   standalone or as the post-repair gate
//! - **Safe Rewrites**: Files are only rewritten when the repaired content
//!   parses cleanly, with optional `.bak` backups
//!
//! ## Example
//!
//! ```rust
//! use kubemend_cli::mend_content;
//!
//! let report = mend_content("kind: Pod\n");
//! assert!(report.converged);
//! assert!(report.output.contains("image: nginx:latest"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod handlers;
pub mod manifest;
pub mod pipeline;
pub mod repair;
pub mod validate;

// Re-export commonly used types and functions
pub use error::{MendError, Result};
pub use pipeline::{mend_content, mend_file, MendOptions, MendReport};
pub use repair::{repair_syntax, resolve_semantics, Fix, FixKind, Resolution, SyntaxRepair};
pub use validate::{validate_document, validate_file, ValidationResult};

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
