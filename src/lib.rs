// Fieldguard - declarative field validation for Rust
//
// Record types describe their rules as tag strings; the validation engine
// compiles them once per type and reports every violation in one pass.
// The format validators can also be used on their own.

// Re-export member crates
#[cfg(feature = "config")]
pub use fieldguard_config;

#[cfg(feature = "formats")]
pub use fieldguard_formats;

#[cfg(feature = "validation")]
pub use fieldguard_validation;

#[cfg(feature = "validation")]
pub use fieldguard_validation::validatable;

// Prelude for common imports
pub mod prelude {
    #[cfg(feature = "config")]
    pub use fieldguard_config::{DeliverabilityConfig, FieldguardConfig};

    #[cfg(feature = "formats")]
    pub use fieldguard_formats::{
        EmailVerifier, MailRouteResolver, StaticResolver, is_valid_dns_name, is_valid_email,
        is_valid_enum, is_valid_host, is_valid_ip, is_valid_phone_number, is_valid_social,
    };

    #[cfg(feature = "validation")]
    pub use fieldguard_validation::{
        Check, CustomCheck, FieldKind, FieldValue, RecordView, SchemaError, Validatable,
        ValidationError, ValidationErrors, Validator, Violation, ViolationKind, is_valid,
        register_rule, validatable,
    };
}
