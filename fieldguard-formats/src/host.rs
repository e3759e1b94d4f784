// Host, IP and DNS name validators

use once_cell::sync::Lazy;
use regex::Regex;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Longest DNS name accepted, not counting dots
pub const MAX_DNS_NAME_LEN: usize = 255;

// Labels of 1..=63 characters; a trailing dot or underscore is tolerated.
static DNS_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z0-9_][a-zA-Z0-9_-]{0,62})(\.[a-zA-Z0-9_][a-zA-Z0-9_-]{0,62})*[._]?$")
        .unwrap()
});

/// `true` for an IP literal of either family or a DNS name
pub fn is_valid_host(value: &str) -> bool {
    is_valid_ip(value) || is_valid_dns_name(value)
}

/// `true` for an IPv4 or IPv6 literal
pub fn is_valid_ip(value: &str) -> bool {
    value.parse::<IpAddr>().is_ok()
}

/// `true` for a dotted-quad IPv4 literal
pub fn is_valid_ipv4(value: &str) -> bool {
    !value.contains(':') && value.parse::<Ipv4Addr>().is_ok()
}

/// `true` for an IPv6 literal, including IPv4-mapped forms
pub fn is_valid_ipv6(value: &str) -> bool {
    value.contains(':') && value.parse::<Ipv6Addr>().is_ok()
}

/// `true` for a DNS name.
///
/// IP literals are never DNS names, even though `127.0.0.1` would satisfy the
/// label grammar.
///
/// ```
/// use fieldguard_formats::is_valid_dns_name;
///
/// assert!(is_valid_dns_name("localhost"));
/// assert!(is_valid_dns_name("a.b."));
/// assert!(!is_valid_dns_name("-localhost"));
/// assert!(!is_valid_dns_name("127.0.0.1"));
/// ```
pub fn is_valid_dns_name(value: &str) -> bool {
    if value.is_empty() || value.bytes().filter(|b| *b != b'.').count() > MAX_DNS_NAME_LEN {
        return false;
    }
    !is_valid_ip(value) && DNS_NAME_REGEX.is_match(value)
}
