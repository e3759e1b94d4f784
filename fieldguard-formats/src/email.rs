// Email address validation and the optional deliverability check

use crate::resolver::MailRouteResolver;
use crate::{EmailError, LookupError, is_valid_host};
use fieldguard_config::DeliverabilityConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// Shape of an address: local-part characters, `@`, then two or more DNS labels.
///
/// Shared with the `format=email` tag rule.
pub static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^[a-z0-9._%+\-]+@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$",
    )
    .unwrap()
});

/// Domains that pass the shape check but never receive mail
pub static BLACKLISTED_EMAIL_DOMAINS: &[&str] = &[
    "aol.con",
    "example.com",
    "gmail.con",
    "gnail.com",
    "hotmail.con",
    "yahoo.con",
];

pub const MIN_EMAIL_LEN: usize = 5;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_LOCAL_PART_LEN: usize = 64;

/// Validates an email address without touching the network.
///
/// ```
/// use fieldguard_formats::{EmailError, is_valid_email};
///
/// assert!(is_valid_email("person@gmail.com").is_ok());
/// assert_eq!(is_valid_email("notvalid@domain"), Err(EmailError::Format));
/// assert_eq!(is_valid_email("someone@example.com"), Err(EmailError::DomainNotAccepted));
/// ```
pub fn is_valid_email(value: &str) -> Result<(), EmailError> {
    if value.len() < MIN_EMAIL_LEN || value.len() > MAX_EMAIL_LEN {
        return Err(EmailError::Length);
    }

    if !EMAIL_REGEX.is_match(value) {
        return Err(EmailError::Format);
    }

    let at = match value.rfind('@') {
        Some(at) if at > 0 && at + 3 <= value.len() => at,
        _ => return Err(EmailError::MissingAt),
    };

    if value.matches('@').count() > 1 {
        return Err(EmailError::MultipleAt);
    }

    let (local, domain) = (&value[..at], &value[at + 1..]);

    if local.len() > MAX_LOCAL_PART_LEN {
        return Err(EmailError::Length);
    }

    if BLACKLISTED_EMAIL_DOMAINS.contains(&domain) {
        return Err(EmailError::DomainNotAccepted);
    }

    if !is_valid_host(domain) {
        return Err(EmailError::InvalidHost);
    }

    Ok(())
}

/// Confirms that `domain` has a mail route, falling back to address records.
///
/// Either lookup succeeding is enough. When both fail the address lookup
/// error is reported. `timeout` bounds the whole check.
pub async fn check_deliverability<R>(
    domain: &str,
    resolver: &R,
    timeout: Option<Duration>,
) -> Result<(), EmailError>
where
    R: MailRouteResolver + ?Sized,
{
    lookup_with_fallback(domain, resolver, timeout, true).await
}

/// [`is_valid_email`] followed by [`check_deliverability`] on its domain
pub async fn is_valid_email_deliverable<R>(
    value: &str,
    resolver: &R,
    timeout: Option<Duration>,
) -> Result<(), EmailError>
where
    R: MailRouteResolver + ?Sized,
{
    is_valid_email(value)?;
    check_deliverability(domain_of(value), resolver, timeout).await
}

async fn lookup_with_fallback<R>(
    domain: &str,
    resolver: &R,
    timeout: Option<Duration>,
    address_fallback: bool,
) -> Result<(), EmailError>
where
    R: MailRouteResolver + ?Sized,
{
    let lookup = async {
        match resolver.lookup_mail_route(domain).await {
            Ok(()) => Ok(()),
            Err(mx_err) if !address_fallback => Err(mx_err),
            Err(mx_err) => {
                trace!(domain, error = %mx_err, "No mail route, trying address records");
                resolver.lookup_address(domain).await
            }
        }
    };

    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, lookup)
            .await
            .unwrap_or_else(|_| {
                Err(LookupError::Timeout {
                    domain: domain.to_string(),
                })
            }),
        None => lookup.await,
    };

    result.map_err(|e| {
        debug!(domain, error = %e, "Email domain cannot receive mail");
        EmailError::CannotReceive(e)
    })
}

// Only called on addresses that already passed `is_valid_email`.
fn domain_of(value: &str) -> &str {
    value.rfind('@').map_or(value, |at| &value[at + 1..])
}

/// Email validation bound to a resolver and deliverability settings.
///
/// ```
/// use fieldguard_formats::{EmailVerifier, StaticResolver};
/// use fieldguard_config::DeliverabilityConfig;
///
/// # tokio_test_block(async {
/// let verifier = EmailVerifier::new(StaticResolver::new().with_mail_route("gmail.com"))
///     .with_config(DeliverabilityConfig { enabled: true, ..Default::default() });
///
/// assert!(verifier.verify("someone@gmail.com").await.is_ok());
/// assert!(verifier.verify("someone@gmail.conn").await.is_err());
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Clone)]
pub struct EmailVerifier {
    resolver: Arc<dyn MailRouteResolver>,
    config: DeliverabilityConfig,
}

impl EmailVerifier {
    /// Deliverability is off until enabled through [`with_config`](Self::with_config)
    pub fn new(resolver: impl MailRouteResolver + 'static) -> Self {
        Self {
            resolver: Arc::new(resolver),
            config: DeliverabilityConfig::default(),
        }
    }

    pub fn from_arc(resolver: Arc<dyn MailRouteResolver>) -> Self {
        Self {
            resolver,
            config: DeliverabilityConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DeliverabilityConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &DeliverabilityConfig {
        &self.config
    }

    /// Shape checks, then the mail-route lookup when enabled
    pub async fn verify(&self, value: &str) -> Result<(), EmailError> {
        is_valid_email(value)?;

        if !self.config.enabled {
            return Ok(());
        }

        lookup_with_fallback(
            domain_of(value),
            self.resolver.as_ref(),
            Some(self.config.timeout()),
            self.config.address_fallback,
        )
        .await
    }
}

impl std::fmt::Debug for EmailVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailVerifier")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticResolver;

    #[test]
    fn test_invalid_emails() {
        let invalid = [
            "test",
            "test@",
            "test@some",
            "test.some",
            "t@t",
            "T@T.",
            ".com",
            "@.com",
            "a@.com",
            "a@..com",
            "a@...com",
            "a@something..com",
            "a@something.-.com",
            "a@---.com",
            "a@a---.com",
            "yolanda@615.yt@gmail.com",
            "person@gmail.com ",
        ];

        for email in invalid {
            assert!(is_valid_email(email).is_err(), "expected invalid: {}", email);
        }
    }

    #[test]
    fn test_valid_emails() {
        let valid = [
            "test@test.com",
            "t@dd.com",
            "t@t2.com",
            "t@2t.com",
            "t@t.co",
            "t@dekora.fashion",
            "t@sierra.finance",
            "t@money.cash.co",
            "jp.power.co@money.we.cash.co",
            "t@t.co.uk",
            "t@test.com.uk",
            "d-d-d.d.dt@test.com.uk",
            "john_doe@test.com.uk",
            "john+doe@test.com.uk",
            "JOHN@TEST.COM",
        ];

        for email in valid {
            assert!(is_valid_email(email).is_ok(), "expected valid: {}", email);
        }
    }

    #[test]
    fn test_error_classification() {
        assert_eq!(is_valid_email("test"), Err(EmailError::Length));
        assert_eq!(is_valid_email("test@"), Err(EmailError::Format));
        assert_eq!(is_valid_email("test.some"), Err(EmailError::Format));
        assert_eq!(is_valid_email("@this.com"), Err(EmailError::Format));
        assert_eq!(
            is_valid_email(&format!("{}@this.com", "1".repeat(70))),
            Err(EmailError::Length)
        );
        assert_eq!(
            is_valid_email(&format!("a@{}.com", "b".repeat(260))),
            Err(EmailError::Length)
        );
    }

    #[test]
    fn test_total_length_bounds() {
        assert!(is_valid_email("a@b.c").is_ok());
        assert_eq!(is_valid_email("a@bc"), Err(EmailError::Length));

        let domain = |tail: usize| {
            format!("{}.{}.{}.com", "a".repeat(63), "b".repeat(63), "c".repeat(tail))
        };
        let longest = format!("{}@{}", "l".repeat(64), domain(57));
        assert_eq!(longest.len(), MAX_EMAIL_LEN);
        assert!(is_valid_email(&longest).is_ok());

        let too_long = format!("{}@{}", "l".repeat(64), domain(58));
        assert_eq!(too_long.len(), MAX_EMAIL_LEN + 1);
        assert_eq!(is_valid_email(&too_long), Err(EmailError::Length));
    }

    #[test]
    fn test_local_part_length_bound() {
        let at_limit = format!("{}@gmail.com", "l".repeat(MAX_LOCAL_PART_LEN));
        assert!(is_valid_email(&at_limit).is_ok());

        let over_limit = format!("{}@gmail.com", "l".repeat(MAX_LOCAL_PART_LEN + 1));
        assert_eq!(is_valid_email(&over_limit), Err(EmailError::Length));
    }

    #[test]
    fn test_blacklisted_domains() {
        for domain in BLACKLISTED_EMAIL_DOMAINS {
            let email = format!("someone@{}", domain);
            assert_eq!(is_valid_email(&email), Err(EmailError::DomainNotAccepted), "{}", email);
        }
        assert_eq!(
            is_valid_email("someone@example.com").unwrap_err().to_string(),
            "email domain is not accepted"
        );
    }

    #[test]
    fn test_domain_label_too_long_is_invalid_host() {
        let email = format!("a@{}.com", "b".repeat(64));
        assert_eq!(is_valid_email(&email), Err(EmailError::InvalidHost));
    }

    #[tokio::test]
    async fn test_deliverability_mail_route() {
        let resolver = StaticResolver::new().with_mail_route("gmail.com");
        assert!(check_deliverability("gmail.com", &resolver, None).await.is_ok());
        assert_eq!(resolver.lookup_count(), 1);
    }

    #[tokio::test]
    async fn test_deliverability_address_fallback() {
        let resolver = StaticResolver::new().with_address("smallhost.net");
        assert!(check_deliverability("smallhost.net", &resolver, None).await.is_ok());
        assert_eq!(resolver.lookup_count(), 2);
    }

    #[tokio::test]
    async fn test_deliverability_failure_wraps_lookup() {
        let resolver = StaticResolver::new();
        let err = check_deliverability("gmail.conn", &resolver, None)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            EmailError::CannotReceive(LookupError::NotFound {
                domain: "gmail.conn".to_string()
            })
        );
        assert!(
            err.to_string()
                .starts_with("email domain invalid/cannot receive mail:")
        );
    }

    #[tokio::test]
    async fn test_deliverability_timeout() {
        let resolver = StaticResolver::new()
            .with_mail_route("gmail.com")
            .with_delay(Duration::from_millis(200));

        let err = check_deliverability("gmail.com", &resolver, Some(Duration::from_millis(10)))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            EmailError::CannotReceive(LookupError::Timeout {
                domain: "gmail.com".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_deliverable_runs_shape_checks_first() {
        let resolver = StaticResolver::new().with_mail_route("example.com");
        assert_eq!(
            is_valid_email_deliverable("tester@example.com", &resolver, None).await,
            Err(EmailError::DomainNotAccepted)
        );
        assert_eq!(resolver.lookup_count(), 0);

        assert!(
            is_valid_email_deliverable("someone@example.com.uk", &resolver, None)
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_verifier_disabled_skips_lookup() {
        let resolver = Arc::new(StaticResolver::new());
        let verifier = EmailVerifier::from_arc(resolver.clone());

        assert!(verifier.verify("someone@gmail.com").await.is_ok());
        assert_eq!(resolver.lookup_count(), 0);
    }

    #[tokio::test]
    async fn test_verifier_without_fallback() {
        let resolver = Arc::new(StaticResolver::new().with_address("smallhost.net"));
        let verifier = EmailVerifier::from_arc(resolver.clone()).with_config(DeliverabilityConfig {
            enabled: true,
            timeout_ms: 1_000,
            address_fallback: false,
        });

        assert!(verifier.verify("someone@smallhost.net").await.is_err());
        assert_eq!(resolver.lookup_count(), 1);
    }
}
