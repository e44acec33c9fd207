//! Wire values: the raw tagged values exchanged with the host protocol.
//!
//! A [`WireValue`] is what the host hands over at plan/apply time and what a
//! re-parsed manifest turns back into. It mirrors the host's value kinds
//! one-to-one, including `Unknown`, which only the host itself can produce.
//!
//! Two text front-ends are provided:
//!
//! - [`WireValue::from_json_str`]: JSON, the form the CLI and most tooling use
//! - [`WireValue::from_yaml_str`]: YAML, used to re-read emitted manifests

use crate::error::{DecodeError, Result};
use crate::path::AttrPath;
use serde_json::Number;

/// A raw value as produced by the host protocol.
///
/// Maps keep the order in which the host listed their entries.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Null,
    Unknown,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<WireValue>),
    Map(Vec<(String, WireValue)>),
}

impl WireValue {
    /// Name of the wire tag, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            WireValue::Null => "null",
            WireValue::Unknown => "unknown",
            WireValue::Bool(_) => "bool",
            WireValue::Number(_) => "number",
            WireValue::String(_) => "string",
            WireValue::List(_) => "list",
            WireValue::Map(_) => "map",
        }
    }

    /// Convert a parsed JSON value. JSON has no way to spell `Unknown`.
    ///
    /// Relies on `serde_json`'s `preserve_order` feature so object entries come
    /// out in document order.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => WireValue::Null,
            serde_json::Value::Bool(b) => WireValue::Bool(b),
            serde_json::Value::Number(n) => WireValue::Number(n),
            serde_json::Value::String(s) => WireValue::String(s),
            serde_json::Value::Array(items) => {
                WireValue::List(items.into_iter().map(WireValue::from_json).collect())
            }
            serde_json::Value::Object(map) => WireValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, WireValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Parse JSON text into a wire value.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Ok(WireValue::from_json(value))
    }

    /// Parse YAML text (a single document) into a wire value.
    ///
    /// This is the re-read half of the manifest round trip. Explicitly tagged
    /// nodes, non-string keys and non-finite floats have no wire counterpart
    /// and are reported as unsupported shapes.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        let mut path = AttrPath::new();
        Ok(from_yaml(value, &mut path)?)
    }
}

fn from_yaml(
    value: serde_yaml::Value,
    path: &mut AttrPath,
) -> std::result::Result<WireValue, DecodeError> {
    match value {
        serde_yaml::Value::Null => Ok(WireValue::Null),
        serde_yaml::Value::Bool(b) => Ok(WireValue::Bool(b)),
        serde_yaml::Value::Number(n) => yaml_number(&n, path).map(WireValue::Number),
        serde_yaml::Value::String(s) => Ok(WireValue::String(s)),
        serde_yaml::Value::Sequence(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.into_iter().enumerate() {
                path.push_index(i);
                out.push(from_yaml(item, path)?);
                path.pop();
            }
            Ok(WireValue::List(out))
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut out = Vec::with_capacity(mapping.len());
            for (key, item) in mapping {
                let key = match key {
                    serde_yaml::Value::String(key) => key,
                    other => {
                        return Err(DecodeError::unsupported(
                            path,
                            "string key",
                            yaml_kind(&other),
                        ));
                    }
                };
                path.push_key(&key);
                let item = from_yaml(item, path)?;
                path.pop();
                out.push((key, item));
            }
            Ok(WireValue::Map(out))
        }
        serde_yaml::Value::Tagged(tagged) => Err(DecodeError::unsupported(
            path,
            "untagged node",
            format!("tagged node {}", tagged.tag),
        )),
    }
}

fn yaml_number(
    n: &serde_yaml::Number,
    path: &AttrPath,
) -> std::result::Result<Number, DecodeError> {
    if let Some(i) = n.as_i64() {
        return Ok(Number::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Number::from(u));
    }
    n.as_f64()
        .and_then(Number::from_f64)
        .ok_or_else(|| DecodeError::unsupported(path, "finite number", n.to_string()))
}

fn yaml_kind(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "bool",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged node",
    }
    .to_string()
}
