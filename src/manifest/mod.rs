//! Manifest document plumbing.
//!
//! Parsing, block-style serialization, and small typed accessors over the
//! `serde_yaml` value tree. Mappings preserve key insertion order, which the
//! resolver relies on when appending defaulted fields.

pub mod schema;

use serde_yaml::{Mapping, Sequence, Value};

use crate::error::Result;

/// Parse one YAML document into a value tree.
pub fn parse_document(content: &str) -> Result<Value> {
    Ok(serde_yaml::from_str(content)?)
}

/// Serialize a document back to block-style YAML.
pub fn serialize_document(document: &Value) -> Result<String> {
    Ok(serde_yaml::to_string(document)?)
}

/// String value for `key`, if present and a string.
pub fn get_string(value: &Value, key: &str) -> Option<String> {
    value.get(key)?.as_str().map(|s| s.to_string())
}

/// Mapping value for `key`, if present and a mapping.
pub fn get_mapping<'a>(value: &'a Value, key: &str) -> Option<&'a Mapping> {
    value.get(key)?.as_mapping()
}

/// Sequence value for `key`, if present and a sequence.
pub fn get_sequence<'a>(value: &'a Value, key: &str) -> Option<&'a Sequence> {
    value.get(key)?.as_sequence()
}

/// The document's declared `kind`, if any.
pub fn kind_of(value: &Value) -> Option<&str> {
    value.get("kind")?.as_str()
}

/// Insert a string value under `key`.
pub fn insert_string(map: &mut Mapping, key: &str, value: &str) {
    map.insert(
        Value::String(key.to_string()),
        Value::String(value.to_string()),
    );
}

/// Insert an arbitrary value under `key`.
pub fn insert_value(map: &mut Mapping, key: &str, value: Value) {
    map.insert(Value::String(key.to_string()), value);
}

/// True when the value is missing, null, or an empty string.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        _ => false,
    }
}
