//! Error types produced by the verification handler.
//!
//! Every failure is classified so the HTTP layer can map it onto a status code
//! without inspecting message text.
//!
//! | Error | Category | HTTP |
//! |-------|----------|------|
//! | [`InvalidInput`](VerifyError::InvalidInput) | Validation | 400 |
//! | [`UnsupportedFormat`](VerifyError::UnsupportedFormat) | Validation | 400 |
//! | [`PayloadTooLarge`](VerifyError::PayloadTooLarge) | Validation | 413 |
//! | [`InvalidImage`](VerifyError::InvalidImage) | Validation | 400 |
//! | [`Provider`](VerifyError::Provider) | Upstream | 500 |
//!
//! ```rust
//! use verify::VerifyError;
//!
//! fn to_http_status(error: &VerifyError) -> u16 {
//!     match error {
//!         VerifyError::PayloadTooLarge { .. } => 413,
//!         VerifyError::Provider(_) => 500,
//!         _ => 400,
//!     }
//! }
//! ```
use thiserror::Error;

/// Errors surfaced by [`Verifier::verify`](crate::Verifier::verify).
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum VerifyError {
    /// A request parameter is missing or out of range (e.g. the similarity threshold).
    #[error("{0}")]
    InvalidInput(String),

    /// The declared content type is not an accepted image MIME type.
    #[error("{field}: unsupported content type '{content_type}'; only JPEG and PNG images are accepted")]
    UnsupportedFormat { field: String, content_type: String },

    /// The image exceeds the configured upload limit.
    #[error("{field}: image is {size} bytes, exceeding the maximum of {limit_label}")]
    PayloadTooLarge {
        field: String,
        size: usize,
        limit: usize,
        limit_label: String,
    },

    /// The bytes could not be decoded as a raster image.
    #[error("{field}: invalid image file: {reason}")]
    InvalidImage { field: String, reason: String },

    /// The face comparison provider failed.
    #[error("face comparison failed: {0}")]
    Provider(#[from] ProviderError),
}

impl VerifyError {
    /// Returns `true` for failures caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        !matches!(self, VerifyError::Provider(_))
    }
}

/// Errors reported by a [`FaceComparer`](crate::FaceComparer) implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProviderError {
    /// No usable credentials were available to sign the request.
    #[error("missing provider credentials: {0}")]
    Credentials(String),

    /// The request never produced a response (DNS, TLS, timeout, connection reset).
    #[error("provider request failed: {0}")]
    Transport(String),

    /// The provider answered with an error document.
    #[error("{code}: {message}")]
    Service { code: String, message: String },

    /// The provider answered 2xx but the body could not be interpreted.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}
