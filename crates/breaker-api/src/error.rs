//! Error types for the backend API client.

use reqwest::StatusCode;
use thiserror::Error;

/// API client error type.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request rejected client-side before any network call
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Transport or JSON decode failure from the HTTP layer
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("API request failed: {status} ({summary})")]
    Failed {
        status: StatusCode,
        summary: String,
    },
}

impl ApiError {
    /// True when the backend refused the credential behind the call rather
    /// than the call itself. A 401 or 403 means the stored session is no
    /// longer valid on the server.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(
            self,
            ApiError::Failed { status, .. }
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
        )
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
