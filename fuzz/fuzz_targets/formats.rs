//! Fuzz target for the standalone format validators.
//!
//! None of the validators may panic on arbitrary input.

#![no_main]

use arbitrary::Arbitrary;
use fieldguard_formats::*;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    value: String,
    country_code: String,
    allowed: Vec<String>,
    empty_allowed: bool,
}

fuzz_target!(|input: FuzzInput| {
    let _ = is_valid_email(&input.value);
    let _ = is_valid_social(&input.value);
    let _ = is_valid_phone_number(&input.value, &input.country_code);
    let _ = is_valid_enum(&input.value, &input.allowed, input.empty_allowed);

    let host = is_valid_host(&input.value);
    let ip = is_valid_ip(&input.value);
    let dns = is_valid_dns_name(&input.value);
    assert_eq!(host, ip || dns);
    assert!(!(is_valid_ipv4(&input.value) && dns));
});
