//! Static schema tables for supported Kubernetes kinds.
//!
//! Required-field lists, defaulting constants, and the token vocabularies
//! consulted by the syntax recovery pass. All tables are process-wide and
//! immutable.

/// Resource kinds the validator accepts.
pub static SUPPORTED_KINDS: &[&str] = &["Pod", "Deployment", "Service", "ConfigMap", "Secret"];

/// Required top-level fields, per kind with structural rules.
static REQUIRED_FIELDS: &[(&str, &[&str])] = &[
    ("Pod", &["apiVersion", "kind", "metadata", "spec"]),
    ("Deployment", &["apiVersion", "kind", "metadata", "spec"]),
    ("Service", &["apiVersion", "kind", "metadata", "spec"]),
];

/// Fallback `apiVersion` for documents that omit one.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Fallback `metadata.namespace`.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Image substituted into containers that lack one.
pub const DEFAULT_IMAGE: &str = "nginx:latest";

/// Pull policy substituted into containers that lack one.
pub const DEFAULT_IMAGE_PULL_POLICY: &str = "IfNotPresent";

/// Restart policy substituted into pod specs that lack one.
pub const DEFAULT_RESTART_POLICY: &str = "Always";

/// Replica count substituted into deployment specs that lack one.
pub const DEFAULT_REPLICA_COUNT: i64 = 1;

/// Service port substituted into service specs that lack ports.
pub const DEFAULT_SERVICE_PORT: i64 = 80;

/// Target port paired with [`DEFAULT_SERVICE_PORT`].
pub const DEFAULT_CONTAINER_PORT: i64 = 8080;

/// `app` label value used by synthesized selectors and templates.
pub const DEFAULT_APP_LABEL: &str = "default";

/// Field names the split-key merge recognizes as a completed key.
pub static KNOWN_FIELD_NAMES: &[&str] = &[
    "apiVersion",
    "kind",
    "metadata",
    "name",
    "namespace",
    "labels",
    "spec",
    "containers",
    "image",
    "imagePullPolicy",
    "restartPolicy",
    "replicas",
    "selector",
    "matchLabels",
    "template",
    "ports",
    "port",
    "targetPort",
];

/// Bare scalar tokens the orphaned-value merges will attach to a key.
///
/// Matched by prefix, so `Always` also covers a trailing-comment variant.
pub static KNOWN_ENUM_VALUES: &[&str] = &["True", "False", "Always", "IfNotPresent", "Never"];

/// A known in-token typo and its replacement.
#[derive(Debug, Clone, Copy)]
pub struct TokenTypo {
    /// The corrupted substring as it appears in manifests
    pub broken: &'static str,
    /// Replacement text
    pub fixed: &'static str,
    /// Human label used in fix messages
    pub label: &'static str,
}

/// Literal substring typos repaired wherever they occur in a line.
pub static TOKEN_TYPOS: &[TokenTypo] = &[
    TokenTypo {
        broken: "ngin x",
        fixed: "nginx",
        label: "image name",
    },
    TokenTypo {
        broken: "conts ainer",
        fixed: "container",
        label: "container name",
    },
];

/// Whether the validator accepts this kind at all.
pub fn is_supported_kind(kind: &str) -> bool {
    SUPPORTED_KINDS.contains(&kind)
}

/// Required top-level fields for a kind, if it has structural rules.
pub fn required_fields(kind: &str) -> Option<&'static [&'static str]> {
    REQUIRED_FIELDS
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, fields)| *fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_lookup() {
        let fields = required_fields("Pod").unwrap();
        assert_eq!(fields, &["apiVersion", "kind", "metadata", "spec"]);
        assert!(required_fields("ConfigMap").is_none());
        assert!(required_fields("Banana").is_none());
    }

    #[test]
    fn test_supported_kinds() {
        assert!(is_supported_kind("Pod"));
        assert!(is_supported_kind("Secret"));
        assert!(!is_supported_kind("pod"));
        assert!(!is_supported_kind("Banana"));
    }
}
