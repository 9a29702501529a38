//! String normalisation utilities.

/// Trims `value` and converts an empty result to `None`.
///
/// Optional text fields (format, qualifier, display name, custom type) are
/// stored as absent rather than as blank strings.
///
/// # Examples
///
/// ```
/// use theatrebase_domain::common::trimmed_or_none;
///
/// assert_eq!(trimmed_or_none(Some(" younger ")), Some("younger".to_string()));
/// assert_eq!(trimmed_or_none(Some("   ")), None);
/// assert_eq!(trimmed_or_none(None), None);
/// ```
pub fn trimmed_or_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Trims `value`, treating absence as the empty string.
///
/// Differentiators compare as strings, so a missing differentiator and an
/// empty one must be the same key.
///
/// ```
/// use theatrebase_domain::common::trimmed_or_empty;
///
/// assert_eq!(trimmed_or_empty(None), "");
/// assert_eq!(trimmed_or_empty(Some(" 2 ")), "2");
/// ```
pub fn trimmed_or_empty(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

/// Extension trait for strings providing `into_option` as a method.
pub trait StringExt {
    /// Converts this string to `None` if empty, otherwise `Some(self)`.
    fn into_option(self) -> Option<String>;
}

impl StringExt for String {
    fn into_option(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trimmed_or_none_drops_whitespace_only_values() {
        assert_eq!(trimmed_or_none(Some("\t\n")), None);
        assert_eq!(trimmed_or_none(Some("Shortlisted")), Some("Shortlisted".to_string()));
    }

    #[test]
    fn trimmed_or_empty_normalises_missing_to_empty() {
        assert_eq!(trimmed_or_empty(None), trimmed_or_empty(Some("")));
        assert_eq!(trimmed_or_empty(Some("  ")), "");
    }

    #[test]
    fn string_ext_into_option() {
        assert_eq!("Olivier".to_string().into_option(), Some("Olivier".to_string()));
        assert_eq!(String::new().into_option(), None);
    }
}
