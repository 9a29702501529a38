//! Errors raised while building domain values from raw input.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input that can never form a valid value, such as a blank name.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Text that does not parse as the expected date or label.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::parse_date;
    use crate::EntityKey;

    #[test]
    fn blank_names_are_validation_errors() {
        let err = EntityKey::new("   ", Some("1")).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn bad_dates_are_parse_errors_naming_the_input() {
        let err = parse_date("30/09/2010").unwrap_err();
        assert!(matches!(err, DomainError::Parse(_)));
        assert!(err.to_string().contains("30/09/2010"));
    }
}
