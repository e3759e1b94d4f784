// Social security number validation

use crate::{SocialError, is_valid_enum};
use once_cell::sync::Lazy;
use regex::Regex;

static SOCIAL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{3}-[0-9]{2}-[0-9]{4}$").unwrap());

/// Numbers that are well formed but known to be invalid or published
pub static BLACKLISTED_SOCIALS: &[&str] = &[
    "123-45-6789",
    "219-09-9999",
    "078-05-1120",
    "987-65-4320",
    "987-65-4321",
    "987-65-4322",
    "987-65-4323",
    "987-65-4324",
    "987-65-4325",
    "987-65-4326",
    "987-65-4327",
    "987-65-4328",
    "987-65-4329",
    "111-11-1111",
    "222-22-2222",
    "333-33-3333",
    "444-44-4444",
    "555-55-5555",
    "777-77-7777",
    "888-88-8888",
    "999-99-9999",
    "012-34-5678",
];

/// Validates a US social security number.
///
/// Input without exactly two hyphens is reduced to its digits and must then
/// be nine digits long; it is re-grouped as `NNN-NN-NNNN` before the group
/// and blacklist checks, so `"212126768"` and `"212-12-6768"` are equivalent.
///
/// ```
/// use fieldguard_formats::{SocialError, is_valid_social};
///
/// assert!(is_valid_social("212126768").is_ok());
/// assert_eq!(is_valid_social("666-00-0000"), Err(SocialError::SectionInvalid));
/// ```
pub fn is_valid_social(value: &str) -> Result<(), SocialError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SocialError::Empty);
    }

    let social = normalize(value)?;

    if !SOCIAL_REGEX.is_match(&social) {
        return Err(SocialError::Pattern);
    }

    let (area, group, serial) = (&social[0..3], &social[4..6], &social[7..11]);
    if area == "000" || area == "666" || group == "00" || serial == "0000" {
        return Err(SocialError::SectionInvalid);
    }

    if is_valid_enum(&social, BLACKLISTED_SOCIALS, false).is_ok() {
        return Err(SocialError::Blacklisted);
    }

    Ok(())
}

fn normalize(value: &str) -> Result<String, SocialError> {
    if value.matches('-').count() == 2 {
        return Ok(value.to_string());
    }

    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 9 {
        return Err(SocialError::Length);
    }

    Ok(format!("{}-{}-{}", &digits[0..3], &digits[3..5], &digits[5..9]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socials() {
        let cases: &[(&str, bool)] = &[
            ("000-00-0000", false),
            ("434-43-433", false),
            ("434-43-4334444", false),
            ("666-00-0000", false),
            ("000-12-1235", false),
            ("888-00-1235", false),
            ("888-14-0000", false),
            ("434-43-4334", true),
            ("323126767", true),
            ("212126768", true),
            ("  212-12-6768 ", true),
        ];

        for (social, expected) in cases {
            assert_eq!(is_valid_social(social).is_ok(), *expected, "social {:?}", social);
        }
    }

    #[test]
    fn test_error_classification() {
        assert_eq!(is_valid_social(""), Err(SocialError::Empty));
        assert_eq!(is_valid_social("   "), Err(SocialError::Empty));
        assert_eq!(is_valid_social("2123"), Err(SocialError::Length));
        assert_eq!(is_valid_social("000-00-0000"), Err(SocialError::SectionInvalid));
        assert_eq!(is_valid_social("1234-1-2342"), Err(SocialError::Pattern));
        assert_eq!(is_valid_social("000-00-2345"), Err(SocialError::SectionInvalid));
        assert_eq!(is_valid_social("12a-45-6789"), Err(SocialError::Pattern));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            is_valid_social("666-00-0000").unwrap_err().to_string(),
            "social section was found invalid (cannot be 000 or 666)"
        );
        assert_eq!(is_valid_social("").unwrap_err().to_string(), "social is empty");
    }

    #[test]
    fn test_blacklist() {
        for social in BLACKLISTED_SOCIALS {
            assert_eq!(is_valid_social(social), Err(SocialError::Blacklisted), "{}", social);
            let digits: String = social.chars().filter(|c| *c != '-').collect();
            assert_eq!(is_valid_social(&digits), Err(SocialError::Blacklisted), "{}", digits);
        }
    }

    #[test]
    fn test_non_digit_separators_are_stripped() {
        assert!(is_valid_social("212 12 6768").is_ok());
        assert!(is_valid_social("212.12.6768").is_ok());
    }
}
