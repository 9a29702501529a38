//! Error payloads returned to HTTP clients.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    UniquenessConflict,
    AmbiguousReference,
    Validation,
    Internal,
}

/// Structured error body.
///
/// `errors` maps a field path (e.g. `cast[0].roles[1].characterDifferentiator`)
/// to the messages for that field, so a form can show each error beside its input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ErrorResponse {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            errors: BTreeMap::new(),
        }
    }

    pub fn with_errors(mut self, errors: BTreeMap<String, Vec<String>>) -> Self {
        self.errors = errors;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_errors_serialize_by_path() {
        let mut errors = BTreeMap::new();
        errors.insert(
            "name".to_string(),
            vec!["Name and differentiator combination already exists".to_string()],
        );
        let response = ErrorResponse::new(ErrorKind::UniquenessConflict, "Rejected").with_errors(errors);

        assert_eq!(
            serde_json::to_value(&response).expect("serialize"),
            json!({
                "kind": "uniqueness_conflict",
                "message": "Rejected",
                "errors": { "name": ["Name and differentiator combination already exists"] }
            })
        );
    }
}
