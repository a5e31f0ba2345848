//! Error-to-Status Mapping
//!
//! Every handler funnels failures through [`ApiError`]; the match here is the
//! only place a transport status is chosen. Error bodies are plain text; a
//! structured error envelope is a deliberately deferred improvement.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::store::StoreError;

/// Gateway-level failure taxonomy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Missing, malformed, or wrong credentials - indistinguishable on the wire
    #[error("{0}")]
    Unauthenticated(String),

    /// Request rejected before the store was called
    #[error("{0}")]
    Validation(String),

    /// Domain failure reported by the resource store
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// The transport status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(err) => match err {
                StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                StoreError::AlreadyExists(_) => StatusCode::CONFLICT,
                StoreError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                StoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

/// Decode a JSON request body.
///
/// Failures map to 400 with the decoder's message, before any store call.
/// The content type is not consulted; the body either parses or it does not.
pub(crate) fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Validation(e.to_string()))
}
