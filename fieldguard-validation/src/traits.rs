// Validation traits

use crate::{FieldMeta, FieldValue, Schema, Violation};
use std::fmt;

/// Record types whose fields carry declarative validation rules
///
/// Usually implemented through the [`validatable!`](crate::validatable) macro,
/// which keeps `schema` and `field` in sync with the struct definition.
pub trait Validatable: 'static {
    /// Fields in declaration order, with their rule tags
    fn schema() -> Schema
    where
        Self: Sized;

    /// Current value of the field at `index` in declaration order
    fn field(&self, index: usize) -> Option<FieldValue<'_>>;
}

/// Extension point for user-defined rules
///
/// A registered rule builder returns `Check::Custom` wrapping an
/// implementation of this trait.
pub trait CustomCheck: Send + Sync {
    /// Check a value, with read access to the rest of the record
    fn check(&self, value: &FieldValue<'_>, record: &RecordView<'_>) -> Result<(), Violation>;

    /// Get rule name
    fn name(&self) -> &str;
}

impl fmt::Debug for dyn CustomCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomCheck")
            .field("name", &self.name())
            .finish()
    }
}

/// Name-based read access to a record during validation
#[derive(Clone, Copy)]
pub struct RecordView<'r> {
    fields: &'r [FieldMeta],
    record: &'r dyn Validatable,
}

impl<'r> RecordView<'r> {
    pub fn new(fields: &'r [FieldMeta], record: &'r dyn Validatable) -> Self {
        Self { fields, record }
    }

    /// Look up a field value by name
    pub fn get(&self, name: &str) -> Option<FieldValue<'r>> {
        let index = self.fields.iter().position(|f| f.name == name)?;
        self.record.field(index)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &'r str> + 'r {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

impl fmt::Debug for RecordView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordView")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}
