//! # polyvalue
//!
//! Polymorphic configuration values for attributes generated from Kubernetes
//! custom-resource schemas.
//!
//! Most CRD fields map onto a fixed attribute type. Some do not: free-form
//! `x-kubernetes-preserve-unknown-fields` objects, and quantities that may be
//! written as `10` or as `"10%"`. This crate carries those values through a
//! statically typed attribute framework and writes them back out as YAML
//! without changing what they mean: integers stay integers, `"0644"` stays a
//! string, and map entries keep their order.
//!
//! ## Quick start
//!
//! ```rust
//! use polyvalue::{decode, encode, WireValue};
//!
//! // Wire value → tree → YAML
//! let wire = WireValue::from_json_str(r#"{"loss":"10%","ports":[80,443]}"#).unwrap();
//! let value = decode(&wire).unwrap();
//! let yaml = encode(&value).unwrap();
//! assert_eq!(yaml, "loss: 10%\nports:\n- 80\n- 443\n");
//!
//! // YAML → wire → tree (roundtrip)
//! let back = decode(&WireValue::from_yaml_str(&yaml).unwrap()).unwrap();
//! assert_eq!(back, value);
//! ```
//!
//! ## Modules
//!
//! - [`value`] — `Value`, the any-shaped tree
//! - [`number`] — `NumberOrString`, the number-or-string scalar
//! - [`wire`] — `WireValue`, the host protocol's raw values (JSON/YAML front-ends)
//! - [`decoder`] — wire value → tree
//! - [`encoder`] — tree → YAML fragment
//! - [`types`] — type descriptors for the host attribute protocol
//! - [`document`] — ordered parent node with omit-empty fields
//! - [`validate`] — plan-time validator contract
//! - [`error`] — error types

pub mod decoder;
pub mod document;
pub mod encoder;
pub mod error;
pub mod number;
mod path;
pub mod types;
pub mod validate;
pub mod value;
pub mod wire;

pub use decoder::{decode, decode_json, decode_number_or_string, decode_yaml};
pub use document::Document;
pub use encoder::{encode, encode_json, encode_number_or_string};
pub use error::{DecodeError, EncodeError, PolyError};
pub use number::NumberOrString;
pub use types::{AttrType, AttrValue, DynamicType, NumberOrStringType, TypeKind};
pub use validate::{validate_all, Diagnostic, NumberOrStringValidator, Severity, Validator};
pub use value::Value;
pub use wire::WireValue;
