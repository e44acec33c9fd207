//! Plan-time validation contract.
//!
//! Validators run during plan validation, before any value is decoded, and
//! report problems as [`Diagnostic`]s instead of failing. The host collects the
//! diagnostics of every validator on an attribute; any error-severity
//! diagnostic stops the operation before it reaches the decoder.

use crate::wire::WireValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// A pure check over a raw attribute value.
pub trait Validator: Send + Sync {
    /// Human-readable description, shown in schema documentation.
    fn description(&self) -> String;

    fn validate(&self, value: &WireValue) -> Vec<Diagnostic>;
}

/// Run every validator and collect all diagnostics, in validator order.
pub fn validate_all(validators: &[&dyn Validator], value: &WireValue) -> Vec<Diagnostic> {
    validators
        .iter()
        .flat_map(|validator| validator.validate(value))
        .collect()
}

/// Rejects values a number-or-string attribute cannot hold.
///
/// Unknown and null values pass; the host resolves or omits them later.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberOrStringValidator;

impl Validator for NumberOrStringValidator {
    fn description(&self) -> String {
        "value must be a number or a string".to_string()
    }

    fn validate(&self, value: &WireValue) -> Vec<Diagnostic> {
        match value {
            WireValue::Null
            | WireValue::Unknown
            | WireValue::Number(_)
            | WireValue::String(_) => Vec::new(),
            WireValue::Bool(_) | WireValue::List(_) | WireValue::Map(_) => {
                vec![Diagnostic::error(
                    "Invalid attribute value",
                    format!("expected a number or a string, got {}", value.kind()),
                )]
            }
        }
    }
}
