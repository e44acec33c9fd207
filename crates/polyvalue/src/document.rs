//! Document composition — the parent node generated resource code fills.
//!
//! A resource's manifest mixes statically typed fields (`apiVersion`, `kind`,
//! names, counts) with polymorphic ones. [`Document`] collects them in the
//! order they are set and applies the omit-empty policy: a field added with
//! [`Document::omit_empty`] is dropped entirely when its value is null.
//!
//! # Example
//! ```
//! use polyvalue::{Document, Value};
//! let yaml = Document::manifest("chaos-mesh.org/v1alpha1", "NetworkChaos")
//!     .field("metadata", Value::map([("name", "delay")]))
//!     .omit_empty("jitter", Value::Null)
//!     .omit_empty("correlation", "25")
//!     .to_yaml()
//!     .unwrap();
//! assert_eq!(
//!     yaml,
//!     "apiVersion: chaos-mesh.org/v1alpha1\nkind: NetworkChaos\nmetadata:\n  name: delay\ncorrelation: \"25\"\n"
//! );
//! ```

use crate::encoder::encode;
use crate::error::EncodeError;
use crate::value::Value;

/// An ordered mapping node under construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: Vec<(String, Value)>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a Kubernetes manifest with its `apiVersion` and `kind` entries.
    pub fn manifest(api_version: &str, kind: &str) -> Self {
        Self::new()
            .field("apiVersion", api_version)
            .field("kind", kind)
    }

    /// Set a field unconditionally; a null value is written as `null`.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key.into(), value.into());
        self
    }

    /// Set a field unless its value is null, in which case the key is left
    /// out of the document altogether.
    pub fn omit_empty(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        if !value.is_null() {
            self.set(key.into(), value);
        }
        self
    }

    /// Replace in place when the key exists, so its position does not move.
    fn set(&mut self, key: String, value: Value) {
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Map(self.fields)
    }

    /// Encode the whole document.
    pub fn to_yaml(&self) -> Result<String, EncodeError> {
        encode(&Value::Map(self.fields.clone()))
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        doc.into_value()
    }
}
