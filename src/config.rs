//! Environment-derived runtime configuration.
//!
//! Read once at startup into an immutable struct. The repair and validation
//! passes never consult configuration; only the CLI layer does.

use serde::Serialize;

/// Resolved environment configuration.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Kubeconfig path reported by `config` and `health`
    pub kubeconfig: String,
    /// Kubernetes context name, when set
    pub context: Option<String>,
    /// Namespace reported alongside tool status
    pub namespace: String,
    /// Gate for the validation pass
    pub validation_enabled: bool,
    /// Strict mode flag reported by `config` and `health`
    pub strict_validation: bool,
    /// Debug flag reported by `config` and `health`
    pub debug_mode: bool,
    /// Fallback log level when no verbosity flag is given
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kubeconfig: "~/.kube/config".to_string(),
            context: None,
            namespace: "default".to_string(),
            validation_enabled: true,
            strict_validation: false,
            debug_mode: false,
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Ok(value) = std::env::var("KUBECONFIG") {
            config.kubeconfig = value;
        }
        if let Ok(value) = std::env::var("KUBERNETES_CONTEXT") {
            config.context = Some(value);
        }
        if let Ok(value) = std::env::var("KUBERNETES_NAMESPACE") {
            config.namespace = value;
        }
        if let Ok(value) = std::env::var("YAML_VALIDATION_ENABLED") {
            config.validation_enabled = parse_bool(&value);
        }
        if let Ok(value) = std::env::var("STRICT_VALIDATION") {
            config.strict_validation = parse_bool(&value);
        }
        if let Ok(value) = std::env::var("DEBUG_MODE") {
            config.debug_mode = parse_bool(&value);
        }
        if let Ok(value) = std::env::var("LOG_LEVEL") {
            config.log_level = value;
        }

        config
    }
}

/// Case-insensitive boolean flag; anything other than `true` reads as false.
fn parse_bool(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}
