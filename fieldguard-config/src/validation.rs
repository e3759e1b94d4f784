// Configuration validation

use crate::{ConfigError, Result};

/// Trait for validating configuration
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Range and presence checks shared by settings types
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate that a number is within range
    pub fn in_range<T>(value: T, min: T, max: T, field: &str) -> Result<()>
    where
        T: PartialOrd + std::fmt::Display,
    {
        if value < min || value > max {
            return Err(ConfigError::OutOfRange {
                field: field.to_string(),
                min: min.to_string(),
                max: max.to_string(),
                value: value.to_string(),
            });
        }
        Ok(())
    }
}
