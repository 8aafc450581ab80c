use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::ScoringError;
use crate::models::Model;

/// Error body `{ "error": message }` with a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: "Not found".to_string(),
        }
    }

    /// Validation failures keep their own message; anything else is prefixed
    /// with the model's failure context.
    pub fn from_scoring(model: Model, err: ScoringError) -> Self {
        match err {
            ScoringError::Validation(message) => Self::bad_request(message),
            ScoringError::Unexpected(message) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("{}: {}", model.failure_context(), message),
            },
        }
    }

    pub fn from_rejection(rejection: JsonRejection) -> Self {
        Self::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
