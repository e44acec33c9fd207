//! Number-or-string values.
//!
//! Fields such as jitter or loss percentages and distribution parameters may be
//! written either as a bare number or as a string token (`"10%"`, `"250m"`).
//! [`NumberOrString`] keeps whichever form was supplied. The `String` variant is
//! opaque: it is never parsed, normalized or converted, so `"10%"` cannot turn
//! into `10.0` on the way out.

use crate::error::EncodeError;
use crate::path::AttrPath;
use crate::value::{float_to_wire, Value};
use crate::wire::WireValue;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};

/// A scalar that is either a number or a verbatim string token.
#[derive(Debug, Clone, PartialEq)]
pub enum NumberOrString {
    Null,
    Unknown,
    Int64(i64),
    Float64(f64),
    /// Verbatim token, e.g. a percentage or a quantity with a unit suffix.
    String(String),
}

impl NumberOrString {
    pub fn is_null(&self) -> bool {
        matches!(self, NumberOrString::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, NumberOrString::Unknown)
    }

    /// Variant name, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            NumberOrString::Null => "null",
            NumberOrString::Unknown => "unknown",
            NumberOrString::Int64(_) => "int64",
            NumberOrString::Float64(_) => "float64",
            NumberOrString::String(_) => "string",
        }
    }

    /// Numeric view of the value. String tokens yield `None`; they are never
    /// reinterpreted.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrString::Int64(i) => Some(*i as f64),
            NumberOrString::Float64(f) => Some(*f),
            _ => None,
        }
    }

    /// Convert back into the host's wire representation.
    pub fn to_wire(&self) -> Result<WireValue, EncodeError> {
        Ok(match self {
            NumberOrString::Null => WireValue::Null,
            NumberOrString::Unknown => WireValue::Unknown,
            NumberOrString::Int64(i) => WireValue::Number((*i).into()),
            NumberOrString::Float64(f) => WireValue::Number(float_to_wire(*f, &AttrPath::new())?),
            NumberOrString::String(s) => WireValue::String(s.clone()),
        })
    }
}

impl From<NumberOrString> for Value {
    fn from(n: NumberOrString) -> Self {
        match n {
            NumberOrString::Null => Value::Null,
            NumberOrString::Unknown => Value::Unknown,
            NumberOrString::Int64(i) => Value::Int64(i),
            NumberOrString::Float64(f) => Value::Float64(f),
            NumberOrString::String(s) => Value::String(s),
        }
    }
}

impl From<i64> for NumberOrString {
    fn from(i: i64) -> Self {
        NumberOrString::Int64(i)
    }
}

impl From<f64> for NumberOrString {
    fn from(f: f64) -> Self {
        NumberOrString::Float64(f)
    }
}

impl From<&str> for NumberOrString {
    fn from(s: &str) -> Self {
        NumberOrString::String(s.to_string())
    }
}

impl From<String> for NumberOrString {
    fn from(s: String) -> Self {
        NumberOrString::String(s)
    }
}

impl Serialize for NumberOrString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NumberOrString::Null => serializer.serialize_unit(),
            NumberOrString::Unknown => Err(S::Error::custom("cannot serialize unknown value")),
            NumberOrString::Int64(i) => serializer.serialize_i64(*i),
            NumberOrString::Float64(f) => serializer.serialize_f64(*f),
            NumberOrString::String(s) => serializer.serialize_str(s),
        }
    }
}
