//! Common utility functions shared by the domain and engine crates.
//!
//! Pure functions only: no side effects, no I/O.

pub mod date;
pub mod string;

pub use date::{format_date, parse_date, parse_optional_date, DATE_FORMAT};
pub use string::{trimmed_or_empty, trimmed_or_none, StringExt};
