use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use verify::{MAX_SIMILARITY_THRESHOLD, MIN_SIMILARITY_THRESHOLD};

/// Health check endpoint (liveness)
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "face-verification",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Capability descriptor derived from the live configuration
pub async fn service_info(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let verify_cfg = state.verifier.config();

    Json(json!({
        "service": "AWS Rekognition Face Verification",
        "provider": state.verifier.provider_name(),
        "supported_formats": ["JPEG", "PNG"],
        "max_file_size": verify_cfg.max_image_size_label(),
        "max_file_size_bytes": verify_cfg.max_image_bytes,
        "similarity_threshold_range": format!(
            "{}-{}",
            MIN_SIMILARITY_THRESHOLD, MAX_SIMILARITY_THRESHOLD
        ),
        "default_similarity_threshold": verify_cfg.default_threshold,
        "endpoints": {
            "verify": "/verify-faces",
            "health": "/health",
        }
    }))
}

/// Prometheus metrics endpoint
pub async fn metrics(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    let handle = state.metrics.as_ref().ok_or(ServerError::NotFound)?;
    Ok((
        [(CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    ))
}
