//! Testability port for injecting identifier generation.

use uuid::Uuid;

/// Source of fresh node identifiers.
///
/// Production wiring uses random v4 uuids; tests inject a sequential
/// generator so fixtures get predictable ids.
#[cfg_attr(test, mockall::automock)]
pub trait UuidPort: Send + Sync {
    fn new_uuid(&self) -> Uuid;
}
