//! Mapping from use-case errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use theatrebase_shared::responses::{ErrorKind, ErrorResponse};

use crate::infrastructure::ports::RepoError;
use crate::use_cases::management::FieldMap;
use crate::use_cases::{ProjectionError, WriteError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    /// Input rejected, with messages per field path.
    #[error("{message}")]
    Rejected {
        kind: ErrorKind,
        message: String,
        errors: FieldMap,
    },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid_body(error: serde_json::Error) -> Self {
        ApiError::Rejected {
            kind: ErrorKind::Validation,
            message: format!("Invalid request body: {error}"),
            errors: FieldMap::new(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Rejected {
                kind: ErrorKind::UniquenessConflict,
                ..
            } => StatusCode::CONFLICT,
            ApiError::Rejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::NotFound(message) => ErrorResponse::new(ErrorKind::NotFound, message),
            ApiError::Rejected {
                kind,
                message,
                errors,
            } => ErrorResponse::new(kind, message).with_errors(errors),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                ErrorResponse::new(ErrorKind::Internal, "Internal error")
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<ProjectionError> for ApiError {
    fn from(e: ProjectionError) -> Self {
        let message = e.to_string();
        match e {
            ProjectionError::NotFound { .. } => ApiError::NotFound(message),
            ProjectionError::Repo(e) => e.into(),
        }
    }
}

impl From<WriteError> for ApiError {
    fn from(e: WriteError) -> Self {
        let message = e.to_string();
        let (kind, errors) = match e {
            WriteError::NotFound { .. } => return ApiError::NotFound(message),
            WriteError::Repo(e) => return e.into(),
            WriteError::UniquenessConflict(errors) => (ErrorKind::UniquenessConflict, errors),
            WriteError::AmbiguousReference(errors) => (ErrorKind::AmbiguousReference, errors),
            WriteError::Validation(errors) => (ErrorKind::Validation, errors),
        };
        ApiError::Rejected {
            kind,
            message,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::SubjectKind;
    use uuid::Uuid;

    fn fields(path: &str, message: &str) -> FieldMap {
        FieldMap::from([(path.to_string(), vec![message.to_string()])])
    }

    #[test]
    fn write_errors_map_to_statuses() {
        let cases = [
            (
                WriteError::not_found(SubjectKind::Venue, Uuid::nil()),
                StatusCode::NOT_FOUND,
            ),
            (
                WriteError::UniquenessConflict(fields("name", "taken")),
                StatusCode::CONFLICT,
            ),
            (
                WriteError::AmbiguousReference(fields("cast[0].roles[0].characterDifferentiator", "x")),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                WriteError::Validation(fields("startDate", "Value must be a valid date")),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                WriteError::Repo(RepoError::database("save", "connection reset")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status(), status);
        }
    }

    #[test]
    fn field_errors_survive_the_mapping() {
        match ApiError::from(WriteError::Validation(fields("name", "Value is too short"))) {
            ApiError::Rejected { kind, errors, .. } => {
                assert_eq!(kind, ErrorKind::Validation);
                assert_eq!(errors["name"], vec!["Value is too short".to_string()]);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }
}
