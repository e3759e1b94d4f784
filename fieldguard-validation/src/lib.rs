//! Declarative field validation for Fieldguard
//!
//! Record types declare rules per field as tag strings such as
//! `"min=1 max=99"`. The first time a type is validated its tags are compiled
//! into a [`ValidationPlan`] through a [`RuleRegistry`] and the plan is cached
//! for every later call.
//!
//! # Examples
//!
//! ## Tagged records
//!
//! ```
//! use fieldguard_validation::{is_valid, validatable};
//!
//! struct Customer {
//!     age: u32,
//!     email: String,
//!     password: String,
//!     password_confirmation: String,
//! }
//!
//! validatable!(Customer {
//!     age: u32 = "min=18",
//!     email: String = "format=email",
//!     password: String = "compare=password_confirmation",
//!     password_confirmation: String,
//! });
//!
//! let customer = Customer {
//!     age: 16,
//!     email: "john@protonmail.com".to_string(),
//!     password: "hunter2".to_string(),
//!     password_confirmation: "hunter3".to_string(),
//! };
//!
//! let (valid, errors) = is_valid(&customer).unwrap();
//! assert!(!valid);
//! assert_eq!(
//!     errors.to_string(),
//!     "password must match password_confirmation and 1 other errors"
//! );
//! ```
//!
//! ## Custom rules
//!
//! ```
//! use fieldguard_validation::{
//!     Check, CustomCheck, FieldKind, FieldValue, RecordView, Validator, Violation,
//!     ViolationKind, validatable,
//! };
//! use std::sync::Arc;
//!
//! struct Even;
//!
//! impl CustomCheck for Even {
//!     fn check(&self, value: &FieldValue<'_>, _: &RecordView<'_>) -> Result<(), Violation> {
//!         match value.as_i64() {
//!             Some(v) if v % 2 == 0 => Ok(()),
//!             _ => Err(Violation::new(ViolationKind::Custom, "must be even")),
//!         }
//!     }
//!
//!     fn name(&self) -> &str {
//!         "even"
//!     }
//! }
//!
//! struct Order {
//!     quantity: i32,
//! }
//!
//! validatable!(Order { quantity: i32 = "even=" });
//!
//! let validator = Validator::new();
//! validator.register_rule("even", |_: &str, _: FieldKind| Ok(Check::Custom(Arc::new(Even))));
//!
//! let (valid, errors) = validator.is_valid(&Order { quantity: 3 }).unwrap();
//! assert!(!valid);
//! assert_eq!(errors.to_string(), "quantity must be even");
//! ```

mod errors;
mod plan;
mod registry;
pub mod rules;
mod schema;
mod traits;
mod validator;
mod value;

pub use errors::*;
pub use plan::*;
pub use registry::*;
pub use rules::{Check, Pattern, Rule, Threshold};
pub use schema::*;
pub use traits::*;
pub use validator::*;
pub use value::*;

/// Implement [`Validatable`] for a struct from its field list
///
/// Fields are listed in declaration order with their type and an optional
/// tag. Untagged fields are still visible to rules such as `compare`.
///
/// ```
/// use fieldguard_validation::{Validatable, validatable};
///
/// struct Region {
///     code: i32,
///     name: String,
/// }
///
/// validatable!(Region {
///     code: i32 = "min=1 max=5",
///     name: String,
/// });
///
/// assert_eq!(Region::schema().len(), 2);
/// ```
#[macro_export]
macro_rules! validatable {
    (@tag) => {
        ""
    };
    (@tag $tag:literal) => {
        $tag
    };
    ($record:ty { $($field:ident : $fty:ty $(= $tag:literal)?),* $(,)? }) => {
        impl $crate::Validatable for $record {
            fn schema() -> $crate::Schema {
                $crate::Schema::new()
                    $(.field(
                        stringify!($field),
                        <$fty as $crate::FieldType>::KIND,
                        $crate::validatable!(@tag $($tag)?),
                    ))*
            }

            #[allow(unused_assignments, unused_mut, unused_variables)]
            fn field(&self, index: usize) -> Option<$crate::FieldValue<'_>> {
                let mut position = 0usize;
                $(
                    if index == position {
                        return Some($crate::FieldType::field_value(&self.$field));
                    }
                    position += 1;
                )*
                None
            }
        }
    };
}
