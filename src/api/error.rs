use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::time::Duration;
use thiserror::Error;

use super::models::ErrorResponse;

/// Failures surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("malformed transaction: {0}")]
    MalformedSubmission(String),

    #[error("invalid node list: {0}")]
    InvalidPeers(String),

    #[error("mining gave up after {0:?}")]
    MiningTimeout(Duration),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedSubmission(_) | ApiError::InvalidPeers(_) => StatusCode::BAD_REQUEST,
            ApiError::MiningTimeout(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}
