// Allow-list validation

use crate::EnumError;

/// Checks `value` against `allowed`, ignoring ASCII case.
///
/// An empty `value` passes without consulting the list when `empty_allowed`
/// is set.
///
/// ```
/// use fieldguard_formats::is_valid_enum;
///
/// assert!(is_valid_enum("mystring", &["myString"], false).is_ok());
/// assert!(is_valid_enum("", &["123"], true).is_ok());
/// assert_eq!(
///     is_valid_enum("1", &["123"], false).unwrap_err().to_string(),
///     "value is not allowed: 1"
/// );
/// ```
pub fn is_valid_enum<S: AsRef<str>>(
    value: &str,
    allowed: &[S],
    empty_allowed: bool,
) -> Result<(), EnumError> {
    if empty_allowed && value.is_empty() {
        return Ok(());
    }

    if allowed
        .iter()
        .any(|candidate| candidate.as_ref().eq_ignore_ascii_case(value))
    {
        Ok(())
    } else {
        Err(EnumError::NotAllowed(value.to_string()))
    }
}
