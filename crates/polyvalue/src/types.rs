//! Type descriptors exposed to the host attribute protocol.
//!
//! The host compares attribute types while diffing plans and asks the type to
//! turn a wire value into an attribute value. Both descriptors here are
//! zero-sized markers with no state, so they can be shared freely between
//! concurrent resource operations.

use crate::decoder::{decode, decode_number_or_string};
use crate::encoder::encode;
use crate::error::{DecodeError, EncodeError};
use crate::number::NumberOrString;
use crate::value::Value;
use crate::wire::WireValue;
use std::fmt;

/// Which polymorphic type a descriptor stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Dynamic,
    NumberOrString,
}

/// An attribute type as seen by the host framework.
pub trait AttrType: fmt::Debug + Send + Sync {
    fn kind(&self) -> TypeKind;

    /// Stable name used in diagnostics and plan output.
    fn name(&self) -> &'static str;

    /// True only for a descriptor of the identical kind.
    fn equal(&self, other: &dyn AttrType) -> bool {
        self.kind() == other.kind()
    }

    /// Convert a wire value into an attribute value of this type.
    fn value_from_wire(&self, wire: &WireValue) -> Result<AttrValue, DecodeError>;
}

/// The any-shaped value type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DynamicType;

/// The number-or-string value type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NumberOrStringType;

impl AttrType for DynamicType {
    fn kind(&self) -> TypeKind {
        TypeKind::Dynamic
    }

    fn name(&self) -> &'static str {
        "dynamic"
    }

    fn value_from_wire(&self, wire: &WireValue) -> Result<AttrValue, DecodeError> {
        decode(wire).map(AttrValue::Dynamic)
    }
}

impl AttrType for NumberOrStringType {
    fn kind(&self) -> TypeKind {
        TypeKind::NumberOrString
    }

    fn name(&self) -> &'static str {
        "number_or_string"
    }

    fn value_from_wire(&self, wire: &WireValue) -> Result<AttrValue, DecodeError> {
        decode_number_or_string(wire).map(AttrValue::NumberOrString)
    }
}

/// A decoded attribute value, tagged with the type that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Dynamic(Value),
    NumberOrString(NumberOrString),
}

impl AttrValue {
    /// The descriptor this value belongs to.
    pub fn attr_type(&self) -> &'static dyn AttrType {
        match self {
            AttrValue::Dynamic(_) => &DynamicType,
            AttrValue::NumberOrString(_) => &NumberOrStringType,
        }
    }

    /// Query used by omit-empty field policies.
    pub fn is_null(&self) -> bool {
        match self {
            AttrValue::Dynamic(v) => v.is_null(),
            AttrValue::NumberOrString(v) => v.is_null(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        match self {
            AttrValue::Dynamic(v) => v.is_unknown(),
            AttrValue::NumberOrString(v) => v.is_unknown(),
        }
    }

    /// Encode as a YAML fragment.
    pub fn encode(&self) -> Result<String, EncodeError> {
        match self {
            AttrValue::Dynamic(v) => encode(v),
            AttrValue::NumberOrString(v) => crate::encoder::encode_number_or_string(v),
        }
    }
}

impl From<AttrValue> for Value {
    fn from(value: AttrValue) -> Self {
        match value {
            AttrValue::Dynamic(v) => v,
            AttrValue::NumberOrString(v) => v.into(),
        }
    }
}
