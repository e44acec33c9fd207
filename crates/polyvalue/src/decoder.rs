//! Decoder — converts host wire values into value trees.
//!
//! Decoding is a straight recursive classification on the wire tag:
//!
//! - `null` → `Null`, `unknown` → `Unknown`
//! - `bool` / `string` → the matching leaf
//! - `number` → `Int64` when the wire carries an integer, `Float64` when it
//!   carries a float (a float with no fractional part stays a float)
//! - `list` / `map` → recurse, preserving element and entry order
//!
//! The wire is assumed well-formed. Anything that does not fit the target type
//! (a boolean for a number-or-string attribute, an integer beyond `i64`, a map
//! listing a key twice) is a host contract violation and comes back as
//! [`DecodeError::UnsupportedShape`].
//!
//! # Example
//! ```
//! use polyvalue::{decode, Value, WireValue};
//! let wire = WireValue::from_json_str(r#"{"b":1,"a":[true,"x"]}"#).unwrap();
//! let value = decode(&wire).unwrap();
//! assert_eq!(
//!     value,
//!     Value::map([
//!         ("b", Value::Int64(1)),
//!         ("a", Value::list([Value::Bool(true), Value::from("x")])),
//!     ])
//! );
//! ```

use crate::error::{DecodeError, Result};
use crate::number::NumberOrString;
use crate::path::AttrPath;
use crate::value::Value;
use crate::wire::WireValue;
use serde_json::Number;
use std::collections::HashSet;

/// Decode a wire value into a [`Value`] tree.
pub fn decode(wire: &WireValue) -> std::result::Result<Value, DecodeError> {
    let mut path = AttrPath::new();
    let value = decode_node(wire, &mut path)?;
    if tracing::enabled!(tracing::Level::DEBUG) {
        tracing::debug!(nodes = value.node_count(), "decoded dynamic value");
    }
    Ok(value)
}

/// Decode a wire value into a [`NumberOrString`].
///
/// Booleans, lists and maps are rejected.
pub fn decode_number_or_string(
    wire: &WireValue,
) -> std::result::Result<NumberOrString, DecodeError> {
    let path = AttrPath::new();
    match wire {
        WireValue::Null => Ok(NumberOrString::Null),
        WireValue::Unknown => Ok(NumberOrString::Unknown),
        WireValue::Number(n) => Ok(match classify_number(n, &path)? {
            NumberLeaf::Int(i) => NumberOrString::Int64(i),
            NumberLeaf::Float(f) => NumberOrString::Float64(f),
        }),
        WireValue::String(s) => Ok(NumberOrString::String(s.clone())),
        WireValue::Bool(_) | WireValue::List(_) | WireValue::Map(_) => {
            tracing::trace!(found = wire.kind(), "rejected number-or-string input");
            Err(DecodeError::unsupported(&path, "number or string", wire.kind()))
        }
    }
}

/// Parse JSON text and decode it into a [`Value`].
pub fn decode_json(json: &str) -> Result<Value> {
    let wire = WireValue::from_json_str(json)?;
    Ok(decode(&wire)?)
}

/// Parse YAML text and decode it into a [`Value`].
pub fn decode_yaml(yaml: &str) -> Result<Value> {
    let wire = WireValue::from_yaml_str(yaml)?;
    Ok(decode(&wire)?)
}

fn decode_node(
    wire: &WireValue,
    path: &mut AttrPath,
) -> std::result::Result<Value, DecodeError> {
    match wire {
        WireValue::Null => Ok(Value::Null),
        WireValue::Unknown => Ok(Value::Unknown),
        WireValue::Bool(b) => Ok(Value::Bool(*b)),
        WireValue::Number(n) => Ok(match classify_number(n, path)? {
            NumberLeaf::Int(i) => Value::Int64(i),
            NumberLeaf::Float(f) => Value::Float64(f),
        }),
        WireValue::String(s) => Ok(Value::String(s.clone())),
        WireValue::List(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                path.push_index(i);
                out.push(decode_node(item, path)?);
                path.pop();
            }
            Ok(Value::List(out))
        }
        WireValue::Map(entries) => {
            let mut seen = HashSet::with_capacity(entries.len());
            let mut out = Vec::with_capacity(entries.len());
            for (key, item) in entries {
                if !seen.insert(key.as_str()) {
                    tracing::trace!(%path, key = %key, "rejected duplicate map key");
                    return Err(DecodeError::unsupported(
                        path,
                        "map with unique keys",
                        format!("duplicate key {key:?}"),
                    ));
                }
                path.push_key(key);
                out.push((key.clone(), decode_node(item, path)?));
                path.pop();
            }
            Ok(Value::Map(out))
        }
    }
}

enum NumberLeaf {
    Int(i64),
    Float(f64),
}

/// Split a wire number into integer or float. Integers that only fit `u64`
/// would lose precision as a float, so they are rejected instead.
fn classify_number(
    n: &Number,
    path: &AttrPath,
) -> std::result::Result<NumberLeaf, DecodeError> {
    if let Some(i) = n.as_i64() {
        return Ok(NumberLeaf::Int(i));
    }
    if n.is_u64() {
        tracing::trace!(%path, number = %n, "rejected out-of-range integer");
        return Err(DecodeError::unsupported(
            path,
            "integer within int64 range",
            n.to_string(),
        ));
    }
    match n.as_f64() {
        Some(f) => Ok(NumberLeaf::Float(f)),
        None => Err(DecodeError::unsupported(path, "number", n.to_string())),
    }
}
