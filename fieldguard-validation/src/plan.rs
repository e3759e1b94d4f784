// Compiled validation plans

use crate::{
    FieldKind, RecordView, Rule, RuleRegistry, Schema, SchemaError, Validatable, ValidationError,
    ValidationErrors,
};

/// Name and declared kind of a record field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    pub name: String,
    pub kind: FieldKind,
}

/// Ordered rules for one record type
///
/// Rules run in reverse field declaration order: the last declared field's
/// rules come first. Within a field, clause order is kept.
#[derive(Debug, Clone)]
pub struct ValidationPlan {
    record: &'static str,
    fields: Vec<FieldMeta>,
    rules: Vec<Rule>,
}

impl ValidationPlan {
    /// Compile the plan for `T` against a registry
    pub fn compile<T: Validatable>(registry: &RuleRegistry) -> Result<Self, SchemaError> {
        Self::from_schema(std::any::type_name::<T>(), &T::schema(), registry)
    }

    /// Compile a plan from an explicit schema
    pub fn from_schema(
        record: &'static str,
        schema: &Schema,
        registry: &RuleRegistry,
    ) -> Result<Self, SchemaError> {
        let fields = schema
            .fields()
            .iter()
            .map(|def| FieldMeta {
                name: def.name.clone(),
                kind: def.kind,
            })
            .collect();

        let mut rules = Vec::new();
        for (index, def) in schema.fields().iter().enumerate().rev() {
            let wrap = |source| SchemaError {
                record,
                field: def.name.clone(),
                source,
            };

            for spec in def.rule_specs().map_err(wrap)? {
                let check = registry
                    .build(&spec.name, &spec.options, def.kind)
                    .map_err(wrap)?;
                rules.push(Rule::new(def.name.clone(), index, check));
            }
        }

        Ok(Self {
            record,
            fields,
            rules,
        })
    }

    /// Type name of the record this plan validates
    pub fn record(&self) -> &'static str {
        self.record
    }

    pub fn fields(&self) -> &[FieldMeta] {
        &self.fields
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule against `record`, collecting all violations
    pub fn execute(&self, record: &dyn Validatable) -> ValidationErrors {
        let view = RecordView::new(&self.fields, record);
        let mut errors = ValidationErrors::default();

        for rule in &self.rules {
            let Some(value) = record.field(rule.index()) else {
                errors.add(ValidationError::type_mismatch(
                    rule.field(),
                    "could not be read from the record",
                ));
                continue;
            };

            if let Err(violation) = rule.check().validate(&value, &view) {
                errors.add(violation.into_error(rule.field()));
            }
        }

        errors
    }
}
