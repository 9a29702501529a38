//! Field-attributed input errors collected while validating a write.
//!
//! Errors are keyed by the JSON path of the offending field
//! (`cast[0].roles[1].characterDifferentiator`) so a form can show each
//! message beside its input.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use theatrebase_domain::common::parse_date;
use theatrebase_domain::EntityKey;

pub const NAME_REQUIRED: &str = "Name is required";
pub const DUPLICATE_IN_GROUP: &str = "This item has been duplicated within the group";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, Vec<String>>,
    /// True once any error other than an ambiguous reference has been added.
    has_validation: bool,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.has_validation = true;
        self.push(field.into(), message.into());
    }

    /// A reference that matched more than one node and needs a differentiator.
    pub fn add_ambiguity(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.push(field.into(), message.into());
    }

    fn push(&mut self, field: String, message: String) {
        let messages = self.errors.entry(field).or_default();
        if !messages.contains(&message) {
            messages.push(message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Only ambiguous references were reported.
    pub fn is_ambiguity_only(&self) -> bool {
        !self.is_empty() && !self.has_validation
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.errors
    }
}

/// Builds the key for a required name, recording an error when it is blank.
pub fn require_key(
    errors: &mut FieldErrors,
    field: &str,
    name: Option<&str>,
    differentiator: Option<&str>,
) -> Option<EntityKey> {
    match EntityKey::new(name.unwrap_or_default(), differentiator) {
        Ok(key) => Some(key),
        Err(_) => {
            errors.add(field, NAME_REQUIRED);
            None
        }
    }
}

/// Parses an optional `YYYY-MM-DD` field; blank counts as absent.
pub fn optional_date(errors: &mut FieldErrors, field: &str, value: Option<&str>) -> Option<NaiveDate> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    match parse_date(value) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, "Value must be a valid date (YYYY-MM-DD)");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguity_alone_is_distinguished_from_validation() {
        let mut errors = FieldErrors::new();
        assert!(!errors.is_ambiguity_only());

        errors.add_ambiguity("cast[0].roles[0].characterDifferentiator", "ambiguous");
        assert!(errors.is_ambiguity_only());

        errors.add("name", NAME_REQUIRED);
        assert!(!errors.is_ambiguity_only());
    }

    #[test]
    fn repeated_messages_are_recorded_once() {
        let mut errors = FieldErrors::new();
        errors.add("name", NAME_REQUIRED);
        errors.add("name", NAME_REQUIRED);
        assert_eq!(errors.get("name"), Some(&[NAME_REQUIRED.to_string()][..]));
    }

    #[test]
    fn require_key_flags_blank_names() {
        let mut errors = FieldErrors::new();
        assert!(require_key(&mut errors, "name", Some("  "), None).is_none());
        assert!(require_key(&mut errors, "venue.name", Some("Almeida"), None).is_some());
        assert_eq!(errors.clone().into_map().len(), 1);
        assert!(errors.get("name").is_some());
    }

    #[test]
    fn optional_date_accepts_blank_and_rejects_garbage() {
        let mut errors = FieldErrors::new();
        assert_eq!(optional_date(&mut errors, "startDate", Some(" ")), None);
        assert_eq!(
            optional_date(&mut errors, "startDate", Some("2016-11-30")),
            NaiveDate::from_ymd_opt(2016, 11, 30)
        );
        assert!(errors.is_empty());

        assert_eq!(optional_date(&mut errors, "endDate", Some("30/11/2016")), None);
        assert!(errors.get("endDate").is_some());
    }
}
