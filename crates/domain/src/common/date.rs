//! Calendar date parsing for production run dates.

use chrono::NaiveDate;

use crate::error::DomainError;

/// Wire and storage format for run dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an ISO calendar date (`YYYY-MM-DD`).
///
/// # Examples
///
/// ```
/// use theatrebase_domain::common::parse_date;
/// use chrono::Datelike;
///
/// let date = parse_date("2010-09-30").expect("valid date");
/// assert_eq!(date.year(), 2010);
/// ```
pub fn parse_date(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| DomainError::parse(format!("Invalid date '{s}': {e}")))
}

/// Parses an optional date, treating blank input as absent.
pub fn parse_optional_date(s: Option<&str>) -> Result<Option<NaiveDate>, DomainError> {
    match s.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => parse_date(s).map(Some),
        None => Ok(None),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_date_valid() {
        let date = parse_date("2024-01-15").expect("date");
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date("15/01/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_parse_optional_date_blank_is_none() {
        assert_eq!(parse_optional_date(None), Ok(None));
        assert_eq!(parse_optional_date(Some("  ")), Ok(None));
        assert!(parse_optional_date(Some("soon")).is_err());
    }

    #[test]
    fn test_format_date_round_trips() {
        let date = parse_date("1999-12-31").expect("date");
        assert_eq!(format_date(date), "1999-12-31");
    }
}
