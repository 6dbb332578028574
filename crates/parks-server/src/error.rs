//! HTTP error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use parks_core::{ErrorResponse, ParksError};
use thiserror::Error;
use tracing::{error, warn};

/// Failures returned to API clients. The message is fixed per endpoint so no
/// internal detail leaks into the response body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(&'static str),

    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    /// Log a storage failure and pick the response for it
    pub fn from_storage(err: ParksError, message: &'static str) -> Self {
        match err {
            ParksError::Validation(detail) => {
                warn!("{}: {}", message, detail);
                ApiError::BadRequest(message)
            }
            other => {
                error!("{}: {}", message, other);
                ApiError::Internal(message)
            }
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
