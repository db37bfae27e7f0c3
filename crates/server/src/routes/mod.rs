//! API route handlers
//!
//! - `health`: Liveness, capability descriptor, and metrics
//! - `faces`: Two-image face verification

pub mod health;
pub mod faces;

use crate::error::ServerError;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Service descriptor (GET /)
///
/// # Response
///
/// ```json
/// {
///   "service": "AWS Rekognition Face Verification API",
///   "version": "1.0.0",
///   "endpoints": {"verify": "/verify-faces", "health": "/health", "info": "/info"},
///   "usage": {"method": "POST", "endpoint": "/verify-faces", "...": "..."}
/// }
/// ```
pub async fn api_info() -> impl IntoResponse {
    Json(json!({
        "service": "AWS Rekognition Face Verification API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "verify": "/verify-faces",
            "health": "/health",
            "info": "/info",
        },
        "usage": {
            "method": "POST",
            "endpoint": "/verify-faces",
            "content_type": "multipart/form-data",
            "required_fields": [faces::IMAGE1_FIELD, faces::IMAGE2_FIELD],
            "optional_fields": [faces::THRESHOLD_FIELD],
        }
    }))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
