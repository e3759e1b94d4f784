// Phone number validation (North American Numbering Plan and Mexico)

use crate::{PhoneError, is_valid_enum};

/// Country calling codes the phone validator understands
pub static ACCEPTED_COUNTRY_CODES: &[&str] = &[
    "1",  // USA and Canada
    "52", // Mexico
];

/// Validates `phone` for the given country calling code.
///
/// Both arguments may carry punctuation (`"+1"`, `"(234) 234-2345"`); only
/// their digits are considered.
///
/// ```
/// use fieldguard_formats::{PhoneError, is_valid_phone_number};
///
/// assert!(is_valid_phone_number("234-234-2345", "+1").is_ok());
/// assert_eq!(
///     is_valid_phone_number("5551234567", "44"),
///     Err(PhoneError::CountryCodeNotAccepted("44".to_string()))
/// );
/// ```
pub fn is_valid_phone_number(phone: &str, country_code: &str) -> Result<(), PhoneError> {
    let country_code = sanitize_country_code(country_code)?;

    if phone.is_empty() {
        return Err(PhoneError::PhoneLength);
    }

    let phone = digits(phone);

    match country_code.as_str() {
        "1" => validate_nanp(&phone),
        "52" => validate_mexico(&phone),
        other => Err(PhoneError::CountryCodeNotAccepted(other.to_string())),
    }
}

fn digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn sanitize_country_code(country_code: &str) -> Result<String, PhoneError> {
    let code = digits(country_code);
    if code.is_empty() || code.len() > 3 {
        return Err(PhoneError::CountryCodeLength);
    }

    if is_valid_enum(&code, ACCEPTED_COUNTRY_CODES, false).is_err() {
        return Err(PhoneError::CountryCodeNotAccepted(code));
    }

    Ok(code)
}

// NPA-NXX-XXXX
fn validate_nanp(phone: &str) -> Result<(), PhoneError> {
    if phone.len() != 10 {
        return Err(PhoneError::MustBeTenDigits);
    }

    let npa = &phone[0..3];
    let nxx = &phone[3..6];

    let npa_lead = &npa[0..1];
    if npa_lead == "0" || npa_lead == "1" {
        return Err(PhoneError::NpaInvalidStart(npa_lead.to_string()));
    }
    if npa == "555" {
        return Err(PhoneError::NpaInvalidStart(npa.to_string()));
    }

    let nxx_lead = &nxx[0..1];
    if nxx_lead == "0" || nxx_lead == "1" {
        return Err(PhoneError::NxxInvalidDigits(format!(
            "cannot start with {}",
            nxx_lead
        )));
    }
    if &nxx[1..3] == "11" {
        return Err(PhoneError::NxxInvalidDigits("cannot be X11".to_string()));
    }

    Ok(())
}

// Mexico moved from eight to ten digits in 2002; both are still accepted.
fn validate_mexico(phone: &str) -> Result<(), PhoneError> {
    if phone.len() != 8 && phone.len() != 10 {
        return Err(PhoneError::MustBeEightOrTen);
    }

    let npa_lead = &phone[0..1];
    if npa_lead == "0" || npa_lead == "1" {
        return Err(PhoneError::NpaInvalidStart(npa_lead.to_string()));
    }

    Ok(())
}
