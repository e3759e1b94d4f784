// Error types for the format validators

use thiserror::Error;

/// Allow-list membership failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnumError {
    #[error("value is not allowed: {0}")]
    NotAllowed(String),
}

/// Mail-route or address lookup failure reported by a resolver
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("lookup {domain}: no such host")]
    NotFound { domain: String },

    #[error("lookup {domain}: timed out")]
    Timeout { domain: String },

    #[error("lookup {domain}: {reason}")]
    Failed { domain: String, reason: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email length is invalid")]
    Length,

    #[error("email is not a valid address format")]
    Format,

    #[error("email is missing the @ sign")]
    MissingAt,

    #[error("email contains more than one @ sign")]
    MultipleAt,

    #[error("email domain is not accepted")]
    DomainNotAccepted,

    #[error("email domain is not a valid host")]
    InvalidHost,

    #[error("email domain invalid/cannot receive mail: {0}")]
    CannotReceive(#[source] LookupError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SocialError {
    #[error("social is empty")]
    Empty,

    #[error("social is not nine digits in length")]
    Length,

    #[error("social does not match the regex pattern")]
    Pattern,

    #[error("social section was found invalid (cannot be 000 or 666)")]
    SectionInvalid,

    #[error("social was found to be blacklisted")]
    Blacklisted,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    #[error("country code length is invalid")]
    CountryCodeLength,

    #[error("country code is not accepted: {0}")]
    CountryCodeNotAccepted(String),

    #[error("phone number length is invalid")]
    PhoneLength,

    #[error("phone number must be ten digits")]
    MustBeTenDigits,

    #[error("phone number NPA cannot start with specified digit: {0}")]
    NpaInvalidStart(String),

    #[error("phone number NXX cannot be specified digits: {0}")]
    NxxInvalidDigits(String),

    #[error("phone number must be either eight or ten digits")]
    MustBeEightOrTen,
}
