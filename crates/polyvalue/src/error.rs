//! Error types for decoding wire values and encoding manifest fragments.

use crate::path::AttrPath;
use thiserror::Error;

/// A wire value that does not fit the attribute's value type.
///
/// Raised only when the host protocol hands over a value it should never have
/// produced for this attribute, so it is fatal for the operation at hand.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The wire tag at `path` is not a member of the target type.
    #[error("unsupported shape at {path}: expected {expected}, found {found}")]
    UnsupportedShape {
        /// Attribute path of the offending node, e.g. `spec.ports[1]`.
        path: String,
        /// What the target type accepts at this position.
        expected: &'static str,
        /// What the wire value actually carried.
        found: String,
    },
}

impl DecodeError {
    pub(crate) fn unsupported(
        path: &AttrPath,
        expected: &'static str,
        found: impl Into<String>,
    ) -> Self {
        DecodeError::UnsupportedShape {
            path: path.to_string(),
            expected,
            found: found.into(),
        }
    }
}

/// A value tree that cannot be written into a manifest.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodeError {
    /// The tree still contains a value the host has not resolved yet.
    #[error("cannot encode unknown value at {path}")]
    UnknownValue { path: String },

    /// NaN and infinities have no wire representation.
    #[error("cannot encode non-finite number {value} at {path}")]
    NonFiniteNumber { path: String, value: f64 },

    /// A map lists the same key twice; the emitted mapping would be invalid.
    #[error("duplicate key {key:?} at {path}")]
    DuplicateKey { path: String, key: String },
}

/// Umbrella error for the text-level entry points (JSON/YAML in, YAML out).
#[derive(Error, Debug)]
pub enum PolyError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The input text was not valid JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The input text was not valid YAML.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Convenience alias used throughout polyvalue.
pub type Result<T> = std::result::Result<T, PolyError>;
