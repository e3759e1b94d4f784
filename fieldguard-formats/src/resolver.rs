// Mail-route resolver seam used by the deliverability check

use crate::LookupError;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// DNS-style lookups needed to decide whether a domain can receive mail.
///
/// The library ships no network resolver; applications plug in their own
/// (for example one backed by their DNS client of choice).
#[async_trait]
pub trait MailRouteResolver: Send + Sync {
    /// Succeeds when the domain publishes at least one mail exchanger
    async fn lookup_mail_route(&self, domain: &str) -> Result<(), LookupError>;

    /// Succeeds when the domain resolves to at least one address
    async fn lookup_address(&self, domain: &str) -> Result<(), LookupError>;
}

#[async_trait]
impl<R: MailRouteResolver + ?Sized> MailRouteResolver for Arc<R> {
    async fn lookup_mail_route(&self, domain: &str) -> Result<(), LookupError> {
        (**self).lookup_mail_route(domain).await
    }

    async fn lookup_address(&self, domain: &str) -> Result<(), LookupError> {
        (**self).lookup_address(domain).await
    }
}

/// In-memory resolver answering from fixed domain sets.
///
/// Unknown domains fail with [`LookupError::NotFound`]. An optional delay is
/// applied before every answer, which makes timeouts reproducible.
#[derive(Debug, Default)]
pub struct StaticResolver {
    mail_routes: HashSet<String>,
    addresses: HashSet<String>,
    delay: Option<Duration>,
    lookups: AtomicUsize,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Domain publishes an MX record
    pub fn with_mail_route(mut self, domain: impl Into<String>) -> Self {
        self.mail_routes.insert(domain.into());
        self
    }

    /// Domain publishes an A/AAAA record
    pub fn with_address(mut self, domain: impl Into<String>) -> Self {
        self.addresses.insert(domain.into());
        self
    }

    /// Wait this long before answering each lookup
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of lookups answered or started so far
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    async fn answer(&self, known: &HashSet<String>, domain: &str) -> Result<(), LookupError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if known.contains(domain) {
            Ok(())
        } else {
            Err(LookupError::NotFound {
                domain: domain.to_string(),
            })
        }
    }
}

#[async_trait]
impl MailRouteResolver for StaticResolver {
    async fn lookup_mail_route(&self, domain: &str) -> Result<(), LookupError> {
        self.answer(&self.mail_routes, domain).await
    }

    async fn lookup_address(&self, domain: &str) -> Result<(), LookupError> {
        self.answer(&self.addresses, domain).await
    }
}
