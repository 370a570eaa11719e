use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

use crate::domain::DomainError;

/// Body of every non-2xx response from the chat API.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// An error already reduced to a status code and a caller-safe message.
///
/// This is the only place internal error kinds are mapped to HTTP; upstream
/// details are logged here and never copied into the body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidInput(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            DomainError::Upstream(detail) => {
                warn!("Upstream provider failed: {detail}");
                Self::new(
                    StatusCode::BAD_GATEWAY,
                    "The AI service is unavailable right now. Please try again later.",
                )
            }
            DomainError::Configuration(detail) => {
                error!("Configuration error: {detail}");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The AI service is not configured on this server.",
                )
            }
            DomainError::Internal(detail) => {
                error!("Internal error: {detail}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected chat payload: {}", rejection.body_text());
        Self::new(StatusCode::BAD_REQUEST, "request body must be a JSON object")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}
