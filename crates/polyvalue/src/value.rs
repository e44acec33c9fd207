//! The polymorphic value tree.
//!
//! [`Value`] carries data whose shape is only known once the host hands it
//! over: any scalar, an ordered list, or an ordered string-keyed map, nested to
//! any depth. Integers and floats are distinct variants so that a value decoded
//! as `1` never comes back out as `1.0`, and map entries are kept as a `Vec` of
//! pairs so declaration order survives all the way to the emitted manifest.

use crate::error::EncodeError;
use crate::path::AttrPath;
use crate::wire::WireValue;
use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};

/// A value of any shape, as carried by a dynamically typed attribute.
///
/// Equality is structural and tag-sensitive: `Int64(1)`, `Float64(1.0)`,
/// `String("1")` and `Bool(true)` are all different. Map equality also
/// compares entry order.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit absence.
    Null,
    /// Not yet resolved by the host. Never valid at encode time.
    Unknown,
    Bool(bool),
    Int64(i64),
    Float64(f64),
    String(String),
    List(Vec<Value>),
    /// Key-value pairs in insertion order. Keys are unique.
    Map(Vec<(String, Value)>),
}

impl Value {
    /// Build a map from entries. A repeated key overwrites the earlier entry
    /// in place, so the first occurrence decides the position.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut out: Vec<(String, Value)> = Vec::new();
        for (key, value) in entries {
            let key = key.into();
            let value = value.into();
            match out.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => out.push((key, value)),
            }
        }
        Value::Map(out)
    }

    /// Build a list from anything convertible into values.
    pub fn list<V, I>(items: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }

    /// True when neither this node nor any descendant is `Unknown`.
    pub fn is_fully_known(&self) -> bool {
        match self {
            Value::Unknown => false,
            Value::List(items) => items.iter().all(Value::is_fully_known),
            Value::Map(entries) => entries.iter().all(|(_, v)| v.is_fully_known()),
            _ => true,
        }
    }

    /// Variant name, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Unknown => "unknown",
            Value::Bool(_) => "bool",
            Value::Int64(_) => "int64",
            Value::Float64(_) => "float64",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Look up a map entry by key. Returns `None` for non-maps.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Number of nodes in the tree, this one included.
    pub fn node_count(&self) -> usize {
        match self {
            Value::List(items) => 1 + items.iter().map(Value::node_count).sum::<usize>(),
            Value::Map(entries) => 1 + entries.iter().map(|(_, v)| v.node_count()).sum::<usize>(),
            _ => 1,
        }
    }

    /// Convert back into the host's wire representation.
    ///
    /// Fails only for non-finite floats, which the wire cannot carry.
    pub fn to_wire(&self) -> Result<WireValue, EncodeError> {
        let mut path = AttrPath::new();
        to_wire(self, &mut path)
    }
}

fn to_wire(value: &Value, path: &mut AttrPath) -> Result<WireValue, EncodeError> {
    Ok(match value {
        Value::Null => WireValue::Null,
        Value::Unknown => WireValue::Unknown,
        Value::Bool(b) => WireValue::Bool(*b),
        Value::Int64(i) => WireValue::Number((*i).into()),
        Value::Float64(f) => WireValue::Number(float_to_wire(*f, path)?),
        Value::String(s) => WireValue::String(s.clone()),
        Value::List(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                path.push_index(i);
                out.push(to_wire(item, path)?);
                path.pop();
            }
            WireValue::List(out)
        }
        Value::Map(entries) => {
            let mut out = Vec::with_capacity(entries.len());
            for (key, item) in entries {
                path.push_key(key);
                out.push((key.clone(), to_wire(item, path)?));
                path.pop();
            }
            WireValue::Map(out)
        }
    })
}

pub(crate) fn float_to_wire(f: f64, path: &AttrPath) -> Result<serde_json::Number, EncodeError> {
    serde_json::Number::from_f64(f).ok_or_else(|| EncodeError::NonFiniteNumber {
        path: path.to_string(),
        value: f,
    })
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Unknown => Err(S::Error::custom("cannot serialize unknown value")),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int64(i) => serializer.serialize_i64(*i),
            Value::Float64(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => serializer.collect_seq(items),
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int64(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int64(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float64(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}
