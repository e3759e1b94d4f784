// Validation engine and plan cache

use crate::{
    Check, ConfigError, FieldKind, RuleRegistry, SchemaError, Validatable, ValidationErrors,
    ValidationPlan,
};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::any::TypeId;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Validates records against plans compiled from their schemas
///
/// Plans are compiled on first use of a record type and cached for the
/// lifetime of the validator. Two threads validating a new type at the same
/// time may both compile a plan; the last one stored wins and both results
/// are equivalent.
pub struct Validator {
    registry: RuleRegistry,
    plans: DashMap<TypeId, Arc<ValidationPlan>>,
}

impl Validator {
    /// Create a validator with the built-in rules
    pub fn new() -> Self {
        Self::with_registry(RuleRegistry::with_builtins())
    }

    /// Create a validator with no rules registered
    pub fn empty() -> Self {
        Self::with_registry(RuleRegistry::new())
    }

    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self {
            registry,
            plans: DashMap::new(),
        }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Register a rule builder. Already cached plans are not rebuilt.
    pub fn register_rule<F>(&self, name: impl Into<String>, builder: F)
    where
        F: Fn(&str, FieldKind) -> Result<Check, ConfigError> + Send + Sync + 'static,
    {
        self.registry.register(name, builder);
    }

    /// Cached plan for `T`, compiling it on first use
    pub fn plan_for<T: Validatable>(&self) -> Result<Arc<ValidationPlan>, SchemaError> {
        let type_id = TypeId::of::<T>();

        if let Some(plan) = self.plans.get(&type_id) {
            trace!(record = plan.record(), "Validation plan cache hit");
            return Ok(Arc::clone(plan.value()));
        }

        // Compile without holding a map lock; a concurrent compile may race us
        let plan = match ValidationPlan::compile::<T>(&self.registry) {
            Ok(plan) => Arc::new(plan),
            Err(e) => {
                warn!(
                    record = e.record,
                    field = %e.field,
                    error = %e.source,
                    "Invalid validation schema"
                );
                return Err(e);
            }
        };

        debug!(
            record = plan.record(),
            rules = plan.rules().len(),
            "Compiled validation plan"
        );
        self.plans.insert(type_id, Arc::clone(&plan));
        Ok(plan)
    }

    /// Validate a record
    ///
    /// Returns whether the record passed together with every violation found.
    /// A schema that cannot be compiled is reported as `Err` and is not cached.
    pub fn is_valid<T: Validatable>(
        &self,
        record: &T,
    ) -> Result<(bool, ValidationErrors), SchemaError> {
        let plan = self.plan_for::<T>()?;
        let errors = plan.execute(record);
        Ok((errors.is_empty(), errors))
    }

    /// Validate a record, returning the violations as an error
    pub fn validate<T: Validatable>(
        &self,
        record: &T,
    ) -> Result<Result<(), ValidationErrors>, SchemaError> {
        let (valid, errors) = self.is_valid(record)?;
        Ok(if valid { Ok(()) } else { Err(errors) })
    }

    /// Number of record types with a cached plan
    pub fn cached_plans(&self) -> usize {
        self.plans.len()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("registry", &self.registry)
            .field("cached_plans", &self.plans.len())
            .finish()
    }
}

static DEFAULT_VALIDATOR: Lazy<Validator> = Lazy::new(Validator::new);

/// Process-wide validator holding the built-in rules
pub fn default_validator() -> &'static Validator {
    &DEFAULT_VALIDATOR
}

/// Validate a record with the process-wide validator
pub fn is_valid<T: Validatable>(record: &T) -> Result<(bool, ValidationErrors), SchemaError> {
    DEFAULT_VALIDATOR.is_valid(record)
}

/// Register a rule with the process-wide validator
pub fn register_rule<F>(name: impl Into<String>, builder: F)
where
    F: Fn(&str, FieldKind) -> Result<Check, ConfigError> + Send + Sync + 'static,
{
    DEFAULT_VALIDATOR.register_rule(name, builder);
}

/// Plan for `T` from the process-wide validator
pub fn plan_for<T: Validatable>() -> Result<Arc<ValidationPlan>, SchemaError> {
    DEFAULT_VALIDATOR.plan_for::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldValue, Schema};

    struct Account {
        balance: f64,
    }

    impl Validatable for Account {
        fn schema() -> Schema {
            Schema::new().field("balance", FieldKind::F64, "min=0")
        }

        fn field(&self, index: usize) -> Option<FieldValue<'_>> {
            (index == 0).then_some(FieldValue::F64(self.balance))
        }
    }

    struct Misspelled;

    impl Validatable for Misspelled {
        fn schema() -> Schema {
            Schema::new().field("age", FieldKind::U8, "mni=1")
        }

        fn field(&self, _index: usize) -> Option<FieldValue<'_>> {
            Some(FieldValue::U8(0))
        }
    }

    #[test]
    fn test_plan_is_cached() {
        let validator = Validator::new();
        let first = validator.plan_for::<Account>().unwrap();
        let second = validator.plan_for::<Account>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(validator.cached_plans(), 1);
    }

    #[test]
    fn test_is_valid() {
        let validator = Validator::new();
        let (valid, errors) = validator.is_valid(&Account { balance: 1.0 }).unwrap();
        assert!(valid);
        assert!(errors.is_empty());

        let (valid, errors) = validator.is_valid(&Account { balance: -1.0 }).unwrap();
        assert!(!valid);
        assert_eq!(errors.to_string(), "balance must be greater than or equal to 0");
    }

    #[test]
    fn test_validate_result() {
        let validator = Validator::new();
        assert!(validator.validate(&Account { balance: 2.0 }).unwrap().is_ok());
        let errors = validator
            .validate(&Account { balance: -2.0 })
            .unwrap()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_schema_error_not_cached() {
        let validator = Validator::new();
        let err = validator.is_valid(&Misspelled).unwrap_err();
        assert!(matches!(err.source, ConfigError::UnknownRule(ref name) if name == "mni"));
        assert_eq!(validator.cached_plans(), 0);

        validator.register_rule("mni", crate::rules::min);
        let (valid, _) = validator.is_valid(&Misspelled).unwrap();
        assert!(!valid);
        assert_eq!(validator.cached_plans(), 1);
    }

    #[test]
    fn test_empty_validator_knows_no_rules() {
        let validator = Validator::empty();
        assert!(validator.is_valid(&Account { balance: 0.0 }).is_err());
    }

    #[test]
    fn test_default_validator_is_shared() {
        assert!(std::ptr::eq(default_validator(), default_validator()));
        assert!(default_validator().registry().contains("format"));
    }
}
