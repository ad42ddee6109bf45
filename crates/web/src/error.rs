use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use validator::ValidationErrors;

/// Web layer errors. Business outcomes from storage keep their reason codes;
/// infrastructure failures are logged and reported generically.
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::InvalidTransition { .. }) => StatusCode::CONFLICT,
            Self::Storage(StorageError::AlreadyInTargetState) => StatusCode::CONFLICT,
            Self::Storage(StorageError::IntegrityViolation(_)) => StatusCode::CONFLICT,
            Self::Storage(StorageError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Storage(StorageError::ConcurrencyConflict) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        };

        let body = match &self {
            Self::Storage(StorageError::NotFound) => {
                json!({ "code": "not_found", "error": "Resource not found" })
            }
            Self::Storage(StorageError::InvalidTransition { from, to }) => {
                json!({
                    "code": "invalid_transition",
                    "error": format!("Cannot move from '{from}' to '{to}'"),
                    "from": from,
                    "to": to
                })
            }
            Self::Storage(StorageError::AlreadyInTargetState) => {
                json!({
                    "code": "already_in_target_state",
                    "error": "The record is already in the requested state"
                })
            }
            Self::Storage(StorageError::IntegrityViolation(detail)) => {
                json!({ "code": "integrity_violation", "error": detail })
            }
            Self::Storage(StorageError::Validation(msg)) => {
                json!({ "code": "validation_failed", "error": msg })
            }
            Self::Storage(StorageError::ConcurrencyConflict) => {
                json!({
                    "code": "concurrency_conflict",
                    "error": "The operation conflicted with a concurrent update, retry",
                    "retryable": true
                })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({ "code": "internal", "error": "An internal error occurred" })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "code": "validation_failed",
                    "error": "Validation failed",
                    "details": field_errors
                })
            }
            Self::BadRequest(msg) => {
                json!({ "code": "bad_request", "error": msg })
            }
            Self::Unauthorized => {
                json!({ "code": "unauthorized", "error": "Missing or malformed actor context" })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        // Raw unique-violation and lock errors get folded into the taxonomy
        // before the response is built.
        Self::Storage(error.classify())
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

pub type WebResult<T> = Result<T, WebError>;
