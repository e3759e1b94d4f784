//! Standalone format validators
//!
//! Pure functions classifying a single string (or a phone/country-code pair)
//! against a small grammar. Each returns `Ok(())` or a typed error naming the
//! first rule the input broke; host, IP and DNS checks return a plain `bool`.
//!
//! None of these depend on the tag-driven rule engine.
//!
//! # Examples
//!
//! ```
//! use fieldguard_formats::*;
//!
//! assert!(is_valid_email("person@gmail.com").is_ok());
//! assert!(is_valid_social("212126768").is_ok());
//! assert!(is_valid_phone_number("234-234-2345", "1").is_ok());
//! assert!(is_valid_enum("Red", &["red", "green"], false).is_ok());
//! assert!(is_valid_host("localhost"));
//! assert!(is_valid_ipv6("::1"));
//! ```
//!
//! ## Deliverability
//!
//! Whether an email domain can actually receive mail needs the network, so it
//! is a separate, async step that goes through an injected
//! [`MailRouteResolver`]:
//!
//! ```
//! use fieldguard_formats::{StaticResolver, check_deliverability};
//! use std::time::Duration;
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let resolver = StaticResolver::new().with_mail_route("gmail.com");
//! let result = check_deliverability("gmail.com", &resolver, Some(Duration::from_secs(2))).await;
//! assert!(result.is_ok());
//! # });
//! ```

mod email;
mod enums;
mod error;
mod host;
mod phone;
pub mod resolver;
mod social;

pub use email::*;
pub use enums::*;
pub use error::*;
pub use host::*;
pub use phone::*;
pub use resolver::{MailRouteResolver, StaticResolver};
pub use social::*;
