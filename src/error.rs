// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request: a required field or selection was empty
    MissingField(String),

    // 400 Bad Request: a reference that cannot be satisfied
    // (correct_index out of bounds, course xor track violated, ...)
    InvalidReference(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict (e.g., duplicate email)
    Conflict(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::MissingField(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InvalidReference(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Converts validator failures into `AppError`.
/// Allows using `?` directly on `payload.validate()`.
///
/// Range violations (e.g. a pass threshold above 100) are bad
/// references into the allowed value space; everything else a DTO
/// validates (lengths, emails, empty selections) is a missing field.
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        if contains_code(&err, "range") {
            AppError::InvalidReference(err.to_string())
        } else {
            AppError::MissingField(err.to_string())
        }
    }
}

fn contains_code(errors: &validator::ValidationErrors, code: &str) -> bool {
    use validator::ValidationErrorsKind;

    errors.errors().values().any(|kind| match kind {
        ValidationErrorsKind::Field(list) => list.iter().any(|e| e.code == code),
        ValidationErrorsKind::Struct(nested) => contains_code(nested, code),
        ValidationErrorsKind::List(map) => map.values().any(|nested| contains_code(nested, code)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quiz::NewQuiz;
    use validator::Validate;

    #[test]
    fn out_of_range_threshold_maps_to_invalid_reference() {
        let quiz = NewQuiz {
            pass_threshold: 150,
            questions: vec![],
        };
        let err: AppError = quiz.validate().unwrap_err().into();
        assert!(matches!(err, AppError::InvalidReference(_)));
    }

    #[test]
    fn empty_required_field_maps_to_missing_field() {
        let req = crate::models::client::CreateClientRequest {
            name: String::new(),
            logo_url: String::new(),
            primary_color: "#1E3A8A".to_string(),
        };
        let err: AppError = req.validate().unwrap_err().into();
        assert!(matches!(err, AppError::MissingField(_)));
    }
}
