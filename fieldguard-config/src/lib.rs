//! Configuration for fieldguard validators.
//!
//! Settings can be read from a TOML or JSON document, from prefixed
//! environment variables, or from a `.env` file. Every loader validates the
//! result before returning it.
//!
//! ```
//! use fieldguard_config::FieldguardConfig;
//!
//! let config = FieldguardConfig::from_toml_str(
//!     r#"
//!     [deliverability]
//!     enabled = true
//!     timeout_ms = 1500
//!     "#,
//! )
//! .unwrap();
//!
//! assert!(config.deliverability.enabled);
//! assert_eq!(config.deliverability.timeout().as_millis(), 1500);
//! ```

pub mod env;
pub mod error;
pub mod loader;
pub mod validation;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use validation::{ConfigValidator, Validate};

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Environment prefix used by [`FieldguardConfig::from_default_env`].
pub const ENV_PREFIX: &str = "FIELDGUARD";

/// Upper bound accepted for `deliverability.timeout_ms`.
pub const MAX_TIMEOUT_MS: u64 = 60_000;

/// Settings for the optional email deliverability lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliverabilityConfig {
    /// Whether the mail-route lookup runs at all
    pub enabled: bool,

    /// Deadline for the whole lookup, in milliseconds
    pub timeout_ms: u64,

    /// Fall back to address records when no mail route is found
    pub address_fallback: bool,
}

impl DeliverabilityConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for DeliverabilityConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            timeout_ms: 5_000,
            address_fallback: true,
        }
    }
}

impl Validate for DeliverabilityConfig {
    fn validate(&self) -> Result<()> {
        ConfigValidator::in_range(
            self.timeout_ms,
            1,
            MAX_TIMEOUT_MS,
            "deliverability.timeout_ms",
        )
    }
}

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldguardConfig {
    pub deliverability: DeliverabilityConfig,
}

impl FieldguardConfig {
    /// Parse from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = ConfigLoader::new(FileFormat::Toml).parse(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from a JSON document
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = ConfigLoader::new(FileFormat::Json).parse(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.toml` or `.json` file, detected by extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: Self = ConfigLoader::auto(path)?.load_file(path)?;
        config.validate()?;
        debug!(path = %path.display(), "Loaded fieldguard configuration");
        Ok(config)
    }

    /// Defaults overridden by `{prefix}_DELIVERABILITY_*` variables
    pub fn from_env(prefix: &str) -> Result<Self> {
        let loader = EnvLoader::new(Some(prefix.to_string()));
        let mut config = Self::default();
        config.apply_env(&loader)?;
        config.validate()?;
        Ok(config)
    }

    /// [`from_env`](Self::from_env) with the `FIELDGUARD` prefix
    pub fn from_default_env() -> Result<Self> {
        Self::from_env(ENV_PREFIX)
    }

    /// Load a `.env` file into the process environment, then read variables.
    ///
    /// A missing default `.env` file is not an error; an explicit path must exist.
    pub fn load_dotenv(path: Option<&Path>, prefix: &str) -> Result<Self> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::Dotenv(e.to_string()))?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        Self::from_env(prefix)
    }

    fn apply_env(&mut self, loader: &EnvLoader) -> Result<()> {
        let d = &mut self.deliverability;
        if let Some(enabled) = loader.flag("deliverability_enabled")? {
            d.enabled = enabled;
        }
        if let Some(timeout_ms) = loader.parse_var::<u64>("deliverability_timeout_ms")? {
            d.timeout_ms = timeout_ms;
        }
        if let Some(fallback) = loader.flag("deliverability_address_fallback")? {
            d.address_fallback = fallback;
        }
        Ok(())
    }
}

impl Validate for FieldguardConfig {
    fn validate(&self) -> Result<()> {
        self.deliverability.validate()
    }
}
