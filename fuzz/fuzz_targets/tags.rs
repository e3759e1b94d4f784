//! Fuzz target for tag parsing and plan compilation.
//!
//! Arbitrary tags must compile or fail with a schema error, never panic,
//! and a compiled plan must run against any field value.

#![no_main]

use arbitrary::Arbitrary;
use fieldguard_validation::{
    FieldKind, FieldValue, RuleRegistry, Schema, Validatable, ValidationPlan, parse_tag,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzRecord {
    tag: String,
    text: String,
    number: i64,
    text_tag: String,
}

// Plans are compiled from an explicit schema, so only `field` is exercised.
struct Owned {
    text: String,
    number: i64,
}

impl Validatable for Owned {
    fn schema() -> Schema {
        Schema::new()
    }

    fn field(&self, index: usize) -> Option<FieldValue<'_>> {
        match index {
            0 => Some(FieldValue::I64(self.number)),
            1 => Some(FieldValue::Str(&self.text)),
            _ => None,
        }
    }
}

fuzz_target!(|input: FuzzRecord| {
    let _ = parse_tag(&input.tag);

    let schema = Schema::new()
        .field("number", FieldKind::I64, input.tag)
        .field("text", FieldKind::String, input.text_tag);
    let registry = RuleRegistry::with_builtins();

    if let Ok(plan) = ValidationPlan::from_schema("Fuzz", &schema, &registry) {
        let errors = plan.execute(&Owned {
            text: input.text,
            number: input.number,
        });
        assert!(errors.len() <= plan.rules().len());
    }
});
