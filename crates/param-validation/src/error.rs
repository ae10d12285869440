//! Validation error types and handling

use std::fmt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// HTTP status a host should answer with when data fails validation
pub const VALIDATION_FAILED_STATUS: u16 = 422;

/// Human-readable message attached to a failed validation
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation Failed";

/// Error code attached to a failed validation payload
pub const INVALID_PARAM_CODE: &str = "invalid_param";

/// Configuration errors: a malformed rule declaration or registry call.
///
/// These abort the whole `validate`/`add_rule` call. Bad *data* never ends
/// up here; it is reported through [`FieldErrors`].
#[derive(Debug, Error)]
pub enum RuleError {
    /// The rules argument was not a structured mapping
    #[error("rules must be an object")]
    RulesNotObject,

    /// A rule normalized to a type the registry does not know
    #[error("rule type must be one of [{}], but found: {found}", .known.join(", "))]
    UnknownRuleType { found: String, known: Vec<String> },

    /// A rule was registered under an empty name
    #[error("rule name must be a non-empty string")]
    InvalidRuleName,

    /// A pattern declaration failed to compile
    #[error("invalid rule pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Validator configuration could not be loaded
    #[error("invalid validator configuration: {0}")]
    InvalidConfig(String),
}

/// Validation error for a single field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    /// The field that failed validation
    pub field: String,
    /// Human-readable error message
    pub error: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            error: error.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.error)
    }
}

/// Ordered list of field errors, in rule declaration order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    /// Create a new empty error list
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Append an error for a field
    pub fn push(&mut self, field: impl Into<String>, error: impl Into<String>) {
        self.errors.push(FieldError::new(field, error));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// First error reported for `field`, if any
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// `None` when nothing failed, which callers read as "valid"
    pub fn into_option(self) -> Option<Self> {
        if self.errors.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.errors
    }

    /// Convert to the bare JSON array of `{field, error}` records
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.errors
                .iter()
                .map(|e| json!({ "field": e.field, "error": e.error }))
                .collect(),
        )
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "No validation errors")
        } else {
            write!(f, "Validation failed for {} field(s):", self.errors.len())?;
            for error in &self.errors {
                write!(f, "\n  {}", error)?;
            }
            Ok(())
        }
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl FromIterator<FieldError> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

/// Data failed validation; what a host turns into a 422 response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation Failed: {errors}")]
pub struct ValidationFailed {
    pub errors: FieldErrors,
}

impl ValidationFailed {
    pub fn new(errors: FieldErrors) -> Self {
        Self { errors }
    }

    pub fn status(&self) -> u16 {
        VALIDATION_FAILED_STATUS
    }

    pub fn message(&self) -> &'static str {
        VALIDATION_FAILED_MESSAGE
    }

    pub fn code(&self) -> &'static str {
        INVALID_PARAM_CODE
    }

    /// Structured payload: `{"code": "invalid_param", "errors": [...]}`
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "code": INVALID_PARAM_CODE,
            "errors": self.errors.to_json(),
        })
    }
}

impl From<FieldErrors> for ValidationFailed {
    fn from(errors: FieldErrors) -> Self {
        Self::new(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_keep_insertion_order() {
        let mut errors = FieldErrors::new();
        errors.push("zeta", "should be a string");
        errors.push("alpha", "should be a number");

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["zeta", "alpha"]);
        assert_eq!(errors.get("alpha").unwrap().error, "should be a number");
        assert!(errors.get("missing").is_none());
    }

    #[test]
    fn test_empty_errors_into_option() {
        assert!(FieldErrors::new().into_option().is_none());

        let mut errors = FieldErrors::new();
        errors.push("age", "should be a number");
        assert_eq!(errors.into_option().map(|e| e.len()), Some(1));
    }

    #[test]
    fn test_field_errors_serialize_as_array() {
        let mut errors = FieldErrors::new();
        errors.push("age", "should smaller than 120");

        let serialized = serde_json::to_value(&errors).unwrap();
        assert_eq!(serialized, json!([{ "field": "age", "error": "should smaller than 120" }]));
        assert_eq!(serialized, errors.to_json());
    }

    #[test]
    fn test_validation_failed_payload() {
        let mut errors = FieldErrors::new();
        errors.push("name", "should be a string");
        let failed = ValidationFailed::from(errors);

        assert_eq!(failed.status(), 422);
        assert_eq!(failed.message(), "Validation Failed");
        assert_eq!(
            failed.to_json(),
            json!({
                "code": "invalid_param",
                "errors": [{ "field": "name", "error": "should be a string" }]
            })
        );
    }

    #[test]
    fn test_unknown_rule_type_message_lists_known_names() {
        let err = RuleError::UnknownRuleType {
            found: "email".to_string(),
            known: vec!["array".to_string(), "number".to_string()],
        };
        assert_eq!(err.to_string(), "rule type must be one of [array, number], but found: email");
    }

    #[test]
    fn test_display_lists_each_field() {
        let mut errors = FieldErrors::new();
        errors.push("a", "should be a boolean");
        assert_eq!(errors.to_string(), "Validation failed for 1 field(s):\n  a: should be a boolean");
        assert_eq!(FieldErrors::new().to_string(), "No validation errors");
    }
}
