// Environment variable loading

use crate::{ConfigError, Result};
use std::env;
use std::str::FromStr;

/// Reads typed settings from prefixed environment variables.
///
/// With the prefix `FIELDGUARD`, the key `deliverability_timeout_ms` is read
/// from `FIELDGUARD_DELIVERABILITY_TIMEOUT_MS`.
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    /// Create a new environment loader
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Full variable name for a key
    pub fn var_name(&self, key: &str) -> String {
        match self.prefix {
            Some(ref prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        }
    }

    /// Raw value of a variable, `None` when unset or not unicode
    pub fn var(&self, key: &str) -> Option<String> {
        env::var(self.var_name(key)).ok()
    }

    /// Parse a variable into `T`; unset variables yield `Ok(None)`
    pub fn parse_var<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.var(key) {
            Some(raw) => raw
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|e| ConfigError::InvalidValue {
                    key: self.var_name(key),
                    reason: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    /// Parse a boolean flag; accepts `1/0`, `true/false`, `yes/no`, `on/off`
    pub fn flag(&self, key: &str) -> Result<Option<bool>> {
        let Some(raw) = self.var(key) else {
            return Ok(None);
        };

        match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            other => Err(ConfigError::InvalidValue {
                key: self.var_name(key),
                reason: format!("expected a boolean, got {:?}", other),
            }),
        }
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // std::env::set_var is unsafe in edition 2024, so these tests stick to
    // variables that are never set.

    #[test]
    fn test_var_name_with_prefix() {
        let loader = EnvLoader::new(Some("FIELDGUARD".to_string()));
        assert_eq!(
            loader.var_name("deliverability_enabled"),
            "FIELDGUARD_DELIVERABILITY_ENABLED"
        );
    }

    #[test]
    fn test_var_name_without_prefix() {
        let loader = EnvLoader::default();
        assert_eq!(loader.var_name("timeout"), "TIMEOUT");
    }

    #[test]
    fn test_missing_values_are_none() {
        let loader = EnvLoader::new(Some("FIELDGUARD_UNIT_MISSING_91827".to_string()));
        assert_eq!(loader.var("anything"), None);
        assert_eq!(loader.parse_var::<u64>("anything").unwrap(), None);
        assert_eq!(loader.flag("anything").unwrap(), None);
    }
}
