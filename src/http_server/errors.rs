//! # Response Mapper
//!
//! Maps forum errors and validation failures to HTTP responses. Every
//! failure is logged here, once, before the response is built.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::forum::{ErrorKind, ForumError};
use crate::observability::{Event, Logger};

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// An error on its way to the client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {detail}")]
pub struct ApiError {
    kind: ErrorKind,
    detail: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Malformed required input
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, detail)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text returned to the client
    ///
    /// Client errors carry the kind's description; internal errors carry
    /// the underlying message.
    pub fn message(&self) -> String {
        match self.kind {
            ErrorKind::Internal => self.detail.clone(),
            kind => kind.description().to_string(),
        }
    }
}

impl From<ForumError> for ApiError {
    fn from(err: ForumError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            message: err.message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = status.as_u16().to_string();
        Logger::error(
            Event::RequestFailed.as_str(),
            &[
                ("kind", self.kind.as_str()),
                ("status", code.as_str()),
                ("detail", self.detail.as_str()),
            ],
        );

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
