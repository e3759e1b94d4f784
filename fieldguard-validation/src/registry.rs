// Rule registry

use crate::{Check, ConfigError, FieldKind, rules};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Builds a check from a clause's options and the declared field kind
pub type RuleBuilder = Arc<dyn Fn(&str, FieldKind) -> Result<Check, ConfigError> + Send + Sync>;

/// Named rule builders
///
/// Registration may happen at any time and from any thread. Plans that were
/// already compiled keep the checks they were built with.
pub struct RuleRegistry {
    builders: DashMap<String, RuleBuilder>,
}

impl RuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            builders: DashMap::new(),
        }
    }

    /// Create a registry holding the built-in rules
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register("min", rules::min);
        registry.register("max", rules::max);
        registry.register("min_length", rules::min_length);
        registry.register("max_length", rules::max_length);
        registry.register("format", rules::format);
        registry.register("compare", rules::compare);
        registry.register("enum", rules::one_of);
        registry.register("enum_or_empty", rules::one_of_or_empty);
        registry
    }

    /// Register a builder under `name`, replacing any previous one
    pub fn register<F>(&self, name: impl Into<String>, builder: F)
    where
        F: Fn(&str, FieldKind) -> Result<Check, ConfigError> + Send + Sync + 'static,
    {
        let name = name.into();
        let replaced = self.builders.insert(name.clone(), Arc::new(builder)).is_some();
        debug!(rule = %name, replaced, "Registered validation rule");
    }

    /// Build a check for one clause
    pub fn build(&self, name: &str, options: &str, kind: FieldKind) -> Result<Check, ConfigError> {
        // Clone the builder out so no shard lock is held while it runs
        let builder = self
            .builders
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| ConfigError::UnknownRule(name.to_string()))?;
        builder(options, kind)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    /// Registered rule names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.builders.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}
