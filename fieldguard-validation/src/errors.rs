// Validation and configuration errors

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Category of a record-level violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Field value has the wrong kind for the rule
    TypeMismatch,
    /// Numeric value outside its bound
    Range,
    /// String length outside its bound
    Length,
    /// String does not match a pattern
    Pattern,
    /// Compared field does not exist on the record
    SiblingNotFound,
    /// Compared field is not a string
    SiblingType,
    /// Field differs from the field it is compared to
    Mismatch,
    /// Value is outside an allowed set
    NotAllowed,
    /// Raised by a registered custom rule
    Custom,
}

impl ViolationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TypeMismatch => "type_mismatch",
            Self::Range => "range",
            Self::Length => "length",
            Self::Pattern => "pattern",
            Self::SiblingNotFound => "sibling_not_found",
            Self::SiblingType => "sibling_type",
            Self::Mismatch => "mismatch",
            Self::NotAllowed => "not_allowed",
            Self::Custom => "custom",
        }
    }
}

/// Validation error for a single field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Field name that failed validation
    pub key: String,

    /// Error message
    pub message: String,

    /// What kind of violation this is
    pub kind: ViolationKind,

    /// Offending value, when the rule recorded it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(key: impl Into<String>, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
            kind,
            value: None,
        }
    }

    /// Shorthand for a [`ViolationKind::TypeMismatch`] error
    pub fn type_mismatch(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(key, ViolationKind::TypeMismatch, message)
    }

    /// Set the invalid value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Outcome of a failed rule before it is attached to a field key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
    pub value: Option<String>,
}

impl Violation {
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            value: None,
        }
    }

    /// Record the offending value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Attach the violation to a field
    pub fn into_error(self, key: impl Into<String>) -> ValidationError {
        ValidationError {
            key: key.into(),
            message: self.message,
            kind: self.kind,
            value: self.value,
        }
    }
}

/// Ordered collection of validation errors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Get errors for a specific field
    pub fn get_field_errors(&self, key: &str) -> Vec<&ValidationError> {
        self.errors.iter().filter(|e| e.key == key).collect()
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "errors": self.errors })
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => Ok(()),
            [only] => write!(f, "{only}"),
            [first, rest @ ..] => write!(f, "{first} and {} other errors", rest.len()),
        }
    }
}

impl std::error::Error for ValidationErrors {}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::new(errors)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Problems with a declared rule, found while compiling a plan
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    /// Clause is not a single `name=options` pair
    #[error("malformed validation clause {clause:?}, expected name=options")]
    MalformedClause { clause: String },

    /// No rule registered under this name
    #[error("unknown validation named {0:?}")]
    UnknownRule(String),

    /// Options could not be parsed for this rule and field kind
    #[error("invalid options {options:?} for {rule}: {reason}")]
    InvalidOption {
        rule: String,
        options: String,
        reason: String,
    },

    /// Pattern handed to the format rule does not compile
    #[error("pattern {pattern:?} does not compile: {source}")]
    PatternCompile {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl ConfigError {
    pub fn invalid_option(
        rule: impl Into<String>,
        options: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            rule: rule.into(),
            options: options.into(),
            reason: reason.into(),
        }
    }
}

/// A record type whose declared rules could not be compiled
#[derive(Error, Debug, Clone)]
#[error("error creating validation for {record}.{field}: {source}")]
pub struct SchemaError {
    pub record: &'static str,
    pub field: String,
    #[source]
    pub source: ConfigError,
}
