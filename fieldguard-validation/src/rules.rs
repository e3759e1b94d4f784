// Built-in validation rules

use crate::{
    ConfigError, CustomCheck, FieldKind, FieldValue, NumericFamily, RecordView, Violation,
    ViolationKind,
};
use fieldguard_formats::{EMAIL_REGEX, is_valid_enum};
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Numeric bound, held in the family of the field it was declared on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

impl Threshold {
    /// Parse `options` in the numeric family of `kind`
    pub fn parse(rule: &str, options: &str, kind: FieldKind) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::invalid_option(rule, options, reason);

        match kind.numeric_family() {
            Some(NumericFamily::Signed) => options
                .parse()
                .map(Self::Signed)
                .map_err(|e| invalid(format!("{e}"))),
            Some(NumericFamily::Unsigned) => options
                .parse()
                .map(Self::Unsigned)
                .map_err(|e| invalid(format!("{e}"))),
            Some(NumericFamily::Float) => options
                .parse()
                .map(Self::Float)
                .map_err(|e| invalid(format!("{e}"))),
            None => Err(invalid(format!(
                "field is not of numeric type and {rule} validation only accepts numeric types"
            ))),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Self::Signed(_) => "int64",
            Self::Unsigned(_) => "uint64",
            Self::Float(_) => "float64",
        }
    }

    fn exceeded(&self, value: &FieldValue<'_>, lower: bool) -> Result<bool, Violation> {
        let ordering = match *self {
            Self::Signed(t) => value.as_i64().map(|v| v.partial_cmp(&t)),
            Self::Unsigned(t) => value.as_u64().map(|v| v.partial_cmp(&t)),
            Self::Float(t) => value.as_f64().map(|v| v.partial_cmp(&t)),
        };

        let Some(ordering) = ordering else {
            return Err(Violation::new(
                ViolationKind::TypeMismatch,
                format!("is not convertible to type {}", self.type_name()),
            ));
        };

        // NaN never violates a bound
        Ok(match ordering {
            Some(std::cmp::Ordering::Less) => lower,
            Some(std::cmp::Ordering::Greater) => !lower,
            _ => false,
        })
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signed(v) => write!(f, "{v}"),
            Self::Unsigned(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

/// Compiled pattern for the format rule
#[derive(Debug, Clone)]
pub struct Pattern {
    pub name: &'static str,
    pub regex: Regex,
}

/// The check a rule performs
#[derive(Debug, Clone)]
pub enum Check {
    MinNumeric(Threshold),
    MaxNumeric(Threshold),
    MinLength(usize),
    MaxLength(usize),
    Format(Pattern),
    /// Equal to the named sibling field
    FieldEquals(String),
    Enum {
        allowed: Vec<String>,
        empty_allowed: bool,
    },
    Custom(Arc<dyn CustomCheck>),
}

impl Check {
    /// Run the check against a field value
    pub fn validate(
        &self,
        value: &FieldValue<'_>,
        record: &RecordView<'_>,
    ) -> Result<(), Violation> {
        match self {
            Self::MinNumeric(threshold) => {
                if threshold.exceeded(value, true)? {
                    return Err(Violation::new(
                        ViolationKind::Range,
                        format!("must be greater than or equal to {threshold}"),
                    ));
                }
                Ok(())
            }
            Self::MaxNumeric(threshold) => {
                if threshold.exceeded(value, false)? {
                    return Err(Violation::new(
                        ViolationKind::Range,
                        format!("must be less than or equal to {threshold}"),
                    ));
                }
                Ok(())
            }
            Self::MinLength(length) => {
                let s = expect_str(value, "MinLengthValidation")?;
                if s.len() < *length {
                    return Err(Violation::new(
                        ViolationKind::Length,
                        format!("must be at least {length} characters"),
                    )
                    .with_value(s));
                }
                Ok(())
            }
            Self::MaxLength(length) => {
                let s = expect_str(value, "MaxLengthValidation")?;
                if s.len() > *length {
                    return Err(Violation::new(
                        ViolationKind::Length,
                        format!("must be no more than {length} characters"),
                    )
                    .with_value(s));
                }
                Ok(())
            }
            Self::Format(pattern) => {
                let s = expect_str(value, "FormatValidation")?;
                if !pattern.regex.is_match(s) {
                    return Err(Violation::new(
                        ViolationKind::Pattern,
                        format!("does not match {} format", pattern.name),
                    )
                    .with_value(s));
                }
                Ok(())
            }
            Self::FieldEquals(sibling) => {
                let s = expect_str(value, "compare")?;
                let other = record.get(sibling).ok_or_else(|| {
                    Violation::new(
                        ViolationKind::SiblingNotFound,
                        format!("cannot be compared to unknown field {sibling}"),
                    )
                })?;
                let Some(other) = other.as_str() else {
                    return Err(Violation::new(
                        ViolationKind::SiblingType,
                        format!("cannot be compared to {sibling}, which is not of type string"),
                    ));
                };
                if s != other {
                    return Err(Violation::new(
                        ViolationKind::Mismatch,
                        format!("must match {sibling}"),
                    ));
                }
                Ok(())
            }
            Self::Enum {
                allowed,
                empty_allowed,
            } => {
                let s = expect_str(value, "enum")?;
                is_valid_enum(s, allowed.as_slice(), *empty_allowed).map_err(|e| {
                    Violation::new(ViolationKind::NotAllowed, e.to_string()).with_value(s)
                })
            }
            Self::Custom(check) => check.check(value, record),
        }
    }
}

fn expect_str<'a>(value: &FieldValue<'a>, rule: &str) -> Result<&'a str, Violation> {
    value.as_str().ok_or_else(|| {
        Violation::new(
            ViolationKind::TypeMismatch,
            format!("is not of type string and {rule} only accepts strings"),
        )
    })
}

/// A check bound to the field it validates
#[derive(Debug, Clone)]
pub struct Rule {
    field: String,
    index: usize,
    check: Check,
}

impl Rule {
    pub fn new(field: impl Into<String>, index: usize, check: Check) -> Self {
        Self {
            field: field.into(),
            index,
            check,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Position of the field in declaration order
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn check(&self) -> &Check {
        &self.check
    }
}

/// Builder for `min=K`
pub fn min(options: &str, kind: FieldKind) -> Result<Check, ConfigError> {
    Threshold::parse("min", options, kind).map(Check::MinNumeric)
}

/// Builder for `max=K`
pub fn max(options: &str, kind: FieldKind) -> Result<Check, ConfigError> {
    Threshold::parse("max", options, kind).map(Check::MaxNumeric)
}

fn parse_length(rule: &str, options: &str) -> Result<usize, ConfigError> {
    options
        .parse()
        .map_err(|e| ConfigError::invalid_option(rule, options, format!("{e}")))
}

/// Builder for `min_length=N`
pub fn min_length(options: &str, _kind: FieldKind) -> Result<Check, ConfigError> {
    parse_length("min_length", options).map(Check::MinLength)
}

/// Builder for `max_length=N`
pub fn max_length(options: &str, _kind: FieldKind) -> Result<Check, ConfigError> {
    parse_length("max_length", options).map(Check::MaxLength)
}

/// Builder for `format=email` and `format=regexp:<pattern>`
pub fn format(options: &str, _kind: FieldKind) -> Result<Check, ConfigError> {
    if options.eq_ignore_ascii_case("email") {
        return Ok(Check::Format(Pattern {
            name: "email",
            regex: Regex::clone(&EMAIL_REGEX),
        }));
    }

    if options.contains("regexp:") {
        if let Some((_, pattern)) = options.split_once(':') {
            let regex = Regex::new(pattern).map_err(|source| ConfigError::PatternCompile {
                pattern: pattern.to_string(),
                source,
            })?;
            return Ok(Check::Format(Pattern {
                name: "regexp",
                regex,
            }));
        }
    }

    Err(ConfigError::invalid_option(
        "format",
        options,
        format!("has no pattern {options}"),
    ))
}

/// Builder for `compare=Sibling`
pub fn compare(options: &str, _kind: FieldKind) -> Result<Check, ConfigError> {
    if options.is_empty() {
        return Err(ConfigError::invalid_option(
            "compare",
            options,
            "a field name is required",
        ));
    }
    Ok(Check::FieldEquals(options.to_string()))
}

fn allow_list(rule: &str, options: &str, empty_allowed: bool) -> Result<Check, ConfigError> {
    let allowed: Vec<String> = options
        .split('|')
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();

    if allowed.is_empty() {
        return Err(ConfigError::invalid_option(
            rule,
            options,
            "at least one allowed value is required",
        ));
    }

    Ok(Check::Enum {
        allowed,
        empty_allowed,
    })
}

/// Builder for `enum=a|b|c`
pub fn one_of(options: &str, _kind: FieldKind) -> Result<Check, ConfigError> {
    allow_list("enum", options, false)
}

/// Builder for `enum_or_empty=a|b|c`
pub fn one_of_or_empty(options: &str, _kind: FieldKind) -> Result<Check, ConfigError> {
    allow_list("enum_or_empty", options, true)
}
