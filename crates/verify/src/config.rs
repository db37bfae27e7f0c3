//! Configuration for the verification handler.
//!
//! ```rust
//! use verify::VerifyConfig;
//!
//! let config = VerifyConfig::default();
//! config.validate().expect("default config is valid");
//! assert_eq!(config.max_image_bytes, 5 * 1024 * 1024);
//! assert_eq!(config.max_image_size_label(), "5MB");
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default per-image upload limit (5 MiB, the provider's inline-bytes ceiling).
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Threshold applied when the caller does not send one.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 80.0;

/// Lowest accepted similarity threshold.
pub const MIN_SIMILARITY_THRESHOLD: f64 = 0.0;

/// Highest accepted similarity threshold.
pub const MAX_SIMILARITY_THRESHOLD: f64 = 100.0;

/// Runtime knobs for [`Verifier`](crate::Verifier).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// Maximum byte length of each uploaded image.
    pub max_image_bytes: usize,

    /// Threshold used by [`VerificationRequest::new`](crate::VerificationRequest::new).
    pub default_threshold: f64,

    /// Accepted MIME types, compared case-insensitively without parameters.
    pub accepted_content_types: Vec<String>,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            default_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            accepted_content_types: vec![
                "image/jpeg".into(),
                "image/jpg".into(),
                "image/pjpeg".into(),
                "image/png".into(),
            ],
        }
    }
}

/// Configuration validation failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("max_image_bytes must be greater than zero")]
    ZeroImageLimit,

    #[error("default_threshold {0} is outside the range 0-100")]
    ThresholdOutOfRange(f64),

    #[error("accepted_content_types must not be empty")]
    NoAcceptedContentTypes,

    #[error("accepted content type '{0}' is not an image type")]
    NonImageContentType(String),
}

impl VerifyConfig {
    /// Checks the configuration for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_image_bytes == 0 {
            return Err(ConfigError::ZeroImageLimit);
        }
        if !(MIN_SIMILARITY_THRESHOLD..=MAX_SIMILARITY_THRESHOLD).contains(&self.default_threshold)
        {
            return Err(ConfigError::ThresholdOutOfRange(self.default_threshold));
        }
        if self.accepted_content_types.is_empty() {
            return Err(ConfigError::NoAcceptedContentTypes);
        }
        if let Some(bad) = self
            .accepted_content_types
            .iter()
            .find(|ct| !ct.to_ascii_lowercase().starts_with("image/"))
        {
            return Err(ConfigError::NonImageContentType(bad.clone()));
        }
        Ok(())
    }

    /// Human-readable upload limit, e.g. `"5MB"` or `"512KB"`.
    pub fn max_image_size_label(&self) -> String {
        const MIB: usize = 1024 * 1024;
        const KIB: usize = 1024;
        let bytes = self.max_image_bytes;
        if bytes >= MIB && bytes % MIB == 0 {
            format!("{}MB", bytes / MIB)
        } else if bytes >= KIB && bytes % KIB == 0 {
            format!("{}KB", bytes / KIB)
        } else {
            format!("{bytes} bytes")
        }
    }

    /// Whether `content_type` (possibly carrying parameters) is accepted.
    pub fn accepts(&self, content_type: &str) -> bool {
        let essence = mime_essence(content_type);
        self.accepted_content_types
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(&essence))
    }
}

/// Strips MIME parameters and surrounding whitespace: `"Image/PNG; q=1"` -> `"image/png"`.
pub(crate) fn mime_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
