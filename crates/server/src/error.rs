use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use verify::VerifyError;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error(transparent)]
    Verify(#[from] VerifyError),

    #[error("Request timeout")]
    Timeout,

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Not found")]
    NotFound,
}

/// API error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::Verify(err) => match err {
                VerifyError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                VerifyError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            },
            ServerError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "INVALID_INPUT",
            ServerError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ServerError::Verify(err) => match err {
                VerifyError::InvalidInput(_) => "INVALID_INPUT",
                VerifyError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
                VerifyError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
                VerifyError::InvalidImage { .. } => "INVALID_IMAGE",
                VerifyError::Provider(_) => "PROVIDER_ERROR",
                _ => "VERIFICATION_ERROR",
            },
            ServerError::Timeout => "REQUEST_TIMEOUT",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }

        let body = Json(ErrorResponse {
            detail: self.to_string(),
            code: self.error_code().to_string(),
        });

        (status, body).into_response()
    }
}

impl From<MultipartError> for ServerError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ServerError::PayloadTooLarge(format!("Request body too large: {}", err.body_text()))
        } else {
            ServerError::BadRequest(format!("Invalid multipart form: {}", err.body_text()))
        }
    }
}
