//! Manifest repair passes and the shared fix record types.
//!
//! - [`syntax`] recovers known corruption signatures in raw YAML text.
//! - [`semantic`] fills missing required fields in a parsed document.
//!
//! Both passes report every action as a [`Fix`], accumulated in application
//! order and never deduplicated.

pub mod semantic;
pub mod syntax;

pub use semantic::{resolve_semantics, Resolution};
pub use syntax::{repair_syntax, SyntaxRepair};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a fix entry records an applied repair or a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixKind {
    /// A repair was applied to the text or document
    Applied,
    /// A recognized but unfixable situation
    Warning,
}

impl FixKind {
    /// Status marker rendered ahead of the message.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Applied => "✓",
            Self::Warning => "⚠",
        }
    }
}

/// One recorded repair action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    /// Applied repair or warning
    pub kind: FixKind,
    /// Human-readable description of the action
    pub message: String,
}

impl Fix {
    /// Record an applied repair.
    pub fn applied(message: impl Into<String>) -> Self {
        Self {
            kind: FixKind::Applied,
            message: message.into(),
        }
    }

    /// Record a recognized but unfixable situation.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: FixKind::Warning,
            message: message.into(),
        }
    }

    /// Whether this entry is a warning rather than an applied repair.
    pub fn is_warning(&self) -> bool {
        self.kind == FixKind::Warning
    }
}

impl fmt::Display for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.marker(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_display_markers() {
        let fix = Fix::applied("Added default apiVersion (v1)");
        assert_eq!(fix.to_string(), "✓ Added default apiVersion (v1)");

        let warn = Fix::warning("Missing 'kind' field - cannot proceed");
        assert_eq!(warn.to_string(), "⚠ Missing 'kind' field - cannot proceed");
        assert!(warn.is_warning());
    }
}
