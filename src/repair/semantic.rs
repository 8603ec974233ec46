//! Semantic defaulting over a parsed manifest document.
//!
//! Operates on a structural clone; the input document is never mutated.
//! Generic defaults (apiVersion, metadata, name, namespace) apply first,
//! then kind-specific defaults selected through a static dispatch table.
//! A document without a usable `kind` halts after the generic defaults
//! with a warning entry.

use std::collections::HashMap;

use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::manifest::schema::{
    DEFAULT_API_VERSION, DEFAULT_APP_LABEL, DEFAULT_CONTAINER_PORT, DEFAULT_IMAGE,
    DEFAULT_IMAGE_PULL_POLICY, DEFAULT_NAMESPACE, DEFAULT_REPLICA_COUNT, DEFAULT_RESTART_POLICY,
    DEFAULT_SERVICE_PORT,
};
use crate::manifest::{insert_string, insert_value, is_blank};
use crate::repair::Fix;

/// Outcome of one semantic resolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    /// True when any default was filled in
    pub modified: bool,
    /// The repaired document; a clone of the input when nothing applied
    pub document: Value,
    /// One entry per action, in application order
    pub fixes: Vec<Fix>,
}

type KindRepair = fn(&mut Mapping) -> Vec<Fix>;

/// Kind-specific repair routines, consulted after the generic defaults.
static KIND_REPAIRS: Lazy<HashMap<&'static str, KindRepair>> = Lazy::new(|| {
    HashMap::from([
        ("Pod", repair_pod_spec as KindRepair),
        ("Deployment", repair_deployment_spec as KindRepair),
        ("Service", repair_service_spec as KindRepair),
    ])
});

/// Fill missing required fields in `document`, per its declared kind.
///
/// Returns unmodified with a single warning when the root is not a
/// mapping. All substituted values are fixed literals.
pub fn resolve_semantics(document: &Value) -> Resolution {
    let Some(mapping) = document.as_mapping() else {
        return Resolution {
            modified: false,
            document: document.clone(),
            fixes: vec![Fix::warning("Invalid manifest format")],
        };
    };

    let mut root = mapping.clone();
    let mut fixes = Vec::new();

    if is_blank(root.get("apiVersion")) {
        insert_string(&mut root, "apiVersion", DEFAULT_API_VERSION);
        fixes.push(Fix::applied(format!(
            "Added default apiVersion ({})",
            DEFAULT_API_VERSION
        )));
    }

    let kind = match root.get("kind").and_then(Value::as_str) {
        Some(kind) => kind.to_string(),
        None => {
            fixes.push(Fix::warning("Missing 'kind' field - cannot proceed"));
            return Resolution {
                modified: true,
                document: Value::Mapping(root),
                fixes,
            };
        }
    };

    if !matches!(root.get("metadata"), Some(Value::Mapping(_))) {
        insert_value(&mut root, "metadata", Value::Mapping(Mapping::new()));
        fixes.push(Fix::applied("Added metadata section"));
    }

    if let Some(metadata) = root.get_mut("metadata").and_then(Value::as_mapping_mut) {
        if is_blank(metadata.get("name")) {
            let name = format!("{}-default", kind.to_lowercase());
            insert_string(metadata, "name", &name);
            fixes.push(Fix::applied(format!("Added default name: {}", name)));
        }
        if !metadata.contains_key("namespace") {
            insert_string(metadata, "namespace", DEFAULT_NAMESPACE);
            fixes.push(Fix::applied(format!(
                "Added default namespace ({})",
                DEFAULT_NAMESPACE
            )));
        }
    }

    if let Some(repair) = KIND_REPAIRS.get(kind.as_str()) {
        fixes.extend(repair(&mut root));
    }

    if !fixes.is_empty() {
        debug!("semantic resolution applied {} fix(es) to {}", fixes.len(), kind);
    }

    Resolution {
        modified: !fixes.is_empty(),
        document: Value::Mapping(root),
        fixes,
    }
}

/// Replace a missing or non-mapping `spec` with an empty section.
fn ensure_spec(root: &mut Mapping, fixes: &mut Vec<Fix>) {
    if !matches!(root.get("spec"), Some(Value::Mapping(_))) {
        insert_value(root, "spec", Value::Mapping(Mapping::new()));
        fixes.push(Fix::applied("Added spec section"));
    }
}

/// Pod repair: spec section, containers, and restart policy.
fn repair_pod_spec(root: &mut Mapping) -> Vec<Fix> {
    let mut fixes = Vec::new();
    ensure_spec(root, &mut fixes);

    if let Some(spec) = root.get_mut("spec").and_then(Value::as_mapping_mut) {
        repair_containers(spec, &mut fixes);

        if !spec.contains_key("restartPolicy") {
            insert_string(spec, "restartPolicy", DEFAULT_RESTART_POLICY);
            fixes.push(Fix::applied(format!(
                "Added default restartPolicy ({})",
                DEFAULT_RESTART_POLICY
            )));
        }
    }

    fixes
}

/// Synthesize one fully defaulted container when the list is missing or
/// empty, otherwise fill each entry's missing fields individually.
fn repair_containers(spec: &mut Mapping, fixes: &mut Vec<Fix>) {
    let needs_default = match spec.get("containers") {
        Some(Value::Sequence(containers)) => containers.is_empty(),
        _ => true,
    };

    if needs_default {
        let mut container = Mapping::new();
        insert_string(&mut container, "name", "container-0");
        insert_string(&mut container, "image", DEFAULT_IMAGE);
        insert_string(&mut container, "imagePullPolicy", DEFAULT_IMAGE_PULL_POLICY);
        insert_value(
            spec,
            "containers",
            Value::Sequence(vec![Value::Mapping(container)]),
        );
        fixes.push(Fix::applied("Added default container"));
        return;
    }

    if let Some(containers) = spec.get_mut("containers").and_then(Value::as_sequence_mut) {
        for (index, entry) in containers.iter_mut().enumerate() {
            let Some(container) = entry.as_mapping_mut() else {
                continue;
            };

            if is_blank(container.get("name")) {
                let name = format!("container-{}", index);
                insert_string(container, "name", &name);
                fixes.push(Fix::applied(format!(
                    "Fixed container {} name: {}",
                    index, name
                )));
            }
            if is_blank(container.get("image")) {
                insert_string(container, "image", DEFAULT_IMAGE);
                fixes.push(Fix::applied(format!(
                    "Added default image to container {}: {}",
                    index, DEFAULT_IMAGE
                )));
            }
            if !container.contains_key("imagePullPolicy") {
                insert_string(container, "imagePullPolicy", DEFAULT_IMAGE_PULL_POLICY);
                fixes.push(Fix::applied(format!(
                    "Added imagePullPolicy to container {}",
                    index
                )));
            }
        }
    }
}

/// Deployment repair: spec section, replicas, selector, and template.
fn repair_deployment_spec(root: &mut Mapping) -> Vec<Fix> {
    let mut fixes = Vec::new();
    ensure_spec(root, &mut fixes);

    if let Some(spec) = root.get_mut("spec").and_then(Value::as_mapping_mut) {
        if !spec.contains_key("replicas") {
            insert_value(spec, "replicas", Value::from(DEFAULT_REPLICA_COUNT));
            fixes.push(Fix::applied("Added default replicas"));
        }
        if !spec.contains_key("selector") {
            let mut match_labels = Mapping::new();
            insert_string(&mut match_labels, "app", DEFAULT_APP_LABEL);
            let mut selector = Mapping::new();
            insert_value(&mut selector, "matchLabels", Value::Mapping(match_labels));
            insert_value(spec, "selector", Value::Mapping(selector));
            fixes.push(Fix::applied("Added default selector"));
        }
        if !spec.contains_key("template") {
            insert_value(spec, "template", default_pod_template());
            fixes.push(Fix::applied("Added template section"));
        }
    }

    fixes
}

/// Service repair: spec section, selector, and ports.
fn repair_service_spec(root: &mut Mapping) -> Vec<Fix> {
    let mut fixes = Vec::new();
    ensure_spec(root, &mut fixes);

    if let Some(spec) = root.get_mut("spec").and_then(Value::as_mapping_mut) {
        if !spec.contains_key("selector") {
            let mut selector = Mapping::new();
            insert_string(&mut selector, "app", DEFAULT_APP_LABEL);
            insert_value(spec, "selector", Value::Mapping(selector));
            fixes.push(Fix::applied("Added default selector"));
        }

        // Blank scalars and empty collections count as missing
        let ports_missing = match spec.get("ports") {
            None | Some(Value::Null) => true,
            Some(Value::Sequence(ports)) => ports.is_empty(),
            Some(Value::Mapping(ports)) => ports.is_empty(),
            Some(Value::String(ports)) => ports.is_empty(),
            Some(Value::Bool(flag)) => !flag,
            Some(Value::Number(number)) => number.as_f64() == Some(0.0),
            Some(_) => false,
        };
        if ports_missing {
            let mut port = Mapping::new();
            insert_value(&mut port, "port", Value::from(DEFAULT_SERVICE_PORT));
            insert_value(&mut port, "targetPort", Value::from(DEFAULT_CONTAINER_PORT));
            insert_value(spec, "ports", Value::Sequence(vec![Value::Mapping(port)]));
            fixes.push(Fix::applied("Added default ports"));
        }
    }

    fixes
}

/// Minimal pod template: `app: default` labels and an empty spec.
fn default_pod_template() -> Value {
    let mut labels = Mapping::new();
    insert_string(&mut labels, "app", DEFAULT_APP_LABEL);
    let mut metadata = Mapping::new();
    insert_value(&mut metadata, "labels", Value::Mapping(labels));
    let mut template = Mapping::new();
    insert_value(&mut template, "metadata", Value::Mapping(metadata));
    insert_value(&mut template, "spec", Value::Mapping(Mapping::new()));
    Value::Mapping(template)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Value {
        serde_yaml::from_str(content).unwrap()
    }

    #[test]
    fn test_minimal_pod_gets_seven_fixes() {
        let result = resolve_semantics(&parse("kind: Pod"));

        assert!(result.modified);
        assert_eq!(result.fixes.len(), 7);

        let doc = &result.document;
        assert_eq!(doc.get("apiVersion").and_then(Value::as_str), Some("v1"));

        let metadata = doc.get("metadata").unwrap();
        assert_eq!(
            metadata.get("name").and_then(Value::as_str),
            Some("pod-default")
        );
        assert_eq!(
            metadata.get("namespace").and_then(Value::as_str),
            Some("default")
        );

        let spec = doc.get("spec").unwrap();
        let containers = spec.get("containers").and_then(Value::as_sequence).unwrap();
        assert_eq!(containers.len(), 1);
        assert_eq!(
            containers[0].get("name").and_then(Value::as_str),
            Some("container-0")
        );
        assert_eq!(
            containers[0].get("image").and_then(Value::as_str),
            Some("nginx:latest")
        );
        assert_eq!(
            containers[0].get("imagePullPolicy").and_then(Value::as_str),
            Some("IfNotPresent")
        );
        assert_eq!(
            spec.get("restartPolicy").and_then(Value::as_str),
            Some("Always")
        );
    }

    #[test]
    fn test_input_document_is_never_mutated() {
        let doc = parse("kind: Pod");
        let before = doc.clone();
        let _ = resolve_semantics(&doc);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_second_pass_is_identity() {
        for manifest in ["kind: Pod", "kind: Deployment", "kind: Service"] {
            let first = resolve_semantics(&parse(manifest));
            assert!(first.modified);

            let second = resolve_semantics(&first.document);
            assert!(!second.modified, "re-resolving {} added fixes", manifest);
            assert!(second.fixes.is_empty());
        }
    }

    #[test]
    fn test_non_mapping_root_fails_closed() {
        let doc = parse("- a\n- b");
        let result = resolve_semantics(&doc);

        assert!(!result.modified);
        assert_eq!(result.document, doc);
        assert_eq!(result.fixes.len(), 1);
        assert!(result.fixes[0].is_warning());
        assert_eq!(result.fixes[0].message, "Invalid manifest format");
    }

    #[test]
    fn test_missing_kind_halts_after_generic_defaults() {
        let result = resolve_semantics(&parse("metadata:\n  name: web"));

        assert!(result.modified);
        assert_eq!(result.fixes.len(), 2);
        assert!(!result.fixes[0].is_warning());
        assert!(result.fixes[1].is_warning());

        // No defaulting past the halt: namespace stays absent.
        let metadata = result.document.get("metadata").unwrap();
        assert!(metadata.get("namespace").is_none());
    }

    #[test]
    fn test_existing_containers_filled_per_field() {
        let result = resolve_semantics(&parse(
            r#"
kind: Pod
metadata:
  name: web
  namespace: prod
spec:
  containers:
    - name: app
    - image: caddy:2
  restartPolicy: Never
"#,
        ));

        assert_eq!(result.fixes.len(), 5);
        assert_eq!(
            result.fixes[1].message,
            "Added default image to container 0: nginx:latest"
        );
        assert_eq!(
            result.fixes[3].message,
            "Fixed container 1 name: container-1"
        );

        let spec = result.document.get("spec").unwrap();
        let containers = spec.get("containers").and_then(Value::as_sequence).unwrap();
        assert_eq!(
            containers[1].get("name").and_then(Value::as_str),
            Some("container-1")
        );
        assert_eq!(
            containers[0].get("image").and_then(Value::as_str),
            Some("nginx:latest")
        );
        assert_eq!(
            spec.get("restartPolicy").and_then(Value::as_str),
            Some("Never")
        );
    }

    #[test]
    fn test_deployment_defaults() {
        let result = resolve_semantics(&parse("kind: Deployment\nmetadata:\n  name: web"));

        assert_eq!(result.fixes.len(), 6);

        let spec = result.document.get("spec").unwrap();
        assert_eq!(spec.get("replicas").and_then(Value::as_i64), Some(1));
        assert_eq!(
            spec.get("selector")
                .and_then(|s| s.get("matchLabels"))
                .and_then(|m| m.get("app"))
                .and_then(Value::as_str),
            Some("default")
        );
        let template = spec.get("template").unwrap();
        assert!(template.get("metadata").is_some());
        assert!(template.get("spec").is_some());
    }

    #[test]
    fn test_service_defaults() {
        let result = resolve_semantics(&parse("kind: Service"));

        let spec = result.document.get("spec").unwrap();
        assert_eq!(
            spec.get("selector")
                .and_then(|s| s.get("app"))
                .and_then(Value::as_str),
            Some("default")
        );
        let ports = spec.get("ports").and_then(Value::as_sequence).unwrap();
        assert_eq!(ports[0].get("port").and_then(Value::as_i64), Some(80));
        assert_eq!(ports[0].get("targetPort").and_then(Value::as_i64), Some(8080));
    }

    #[test]
    fn test_service_blank_ports_are_replaced() {
        for manifest in [
            "kind: Service\nspec:\n  ports: ''",
            "kind: Service\nspec:\n  ports: false",
            "kind: Service\nspec:\n  ports: 0",
            "kind: Service\nspec:\n  ports: {}",
        ] {
            let result = resolve_semantics(&parse(manifest));

            let spec = result.document.get("spec").unwrap();
            let ports = spec.get("ports").and_then(Value::as_sequence).unwrap();
            assert_eq!(ports[0].get("port").and_then(Value::as_i64), Some(80));
            assert!(result
                .fixes
                .iter()
                .any(|fix| fix.message == "Added default ports"));
        }

        let result = resolve_semantics(&parse("kind: Service\nspec:\n  ports: 8080"));
        let spec = result.document.get("spec").unwrap();
        assert_eq!(spec.get("ports").and_then(Value::as_i64), Some(8080));
        assert!(result
            .fixes
            .iter()
            .all(|fix| fix.message != "Added default ports"));
    }

    #[test]
    fn test_kind_without_rules_gets_common_fixes_only() {
        let result = resolve_semantics(&parse("kind: ConfigMap"));

        assert_eq!(result.fixes.len(), 4);
        let metadata = result.document.get("metadata").unwrap();
        assert_eq!(
            metadata.get("name").and_then(Value::as_str),
            Some("configmap-default")
        );
        assert!(result.document.get("spec").is_none());
    }
}
