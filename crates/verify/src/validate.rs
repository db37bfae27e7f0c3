//! Validation guards run before any provider call.
//!
//! Each guard is a pure function so the HTTP layer and the CLI can reuse them
//! individually; [`Verifier`](crate::Verifier) runs them in order.
use crate::config::{mime_essence, VerifyConfig, MAX_SIMILARITY_THRESHOLD, MIN_SIMILARITY_THRESHOLD};
use crate::error::VerifyError;
use crate::types::UploadedImage;

/// Rejects thresholds outside `0..=100` (NaN included).
pub fn validate_threshold(threshold: f64) -> Result<f64, VerifyError> {
    if (MIN_SIMILARITY_THRESHOLD..=MAX_SIMILARITY_THRESHOLD).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(VerifyError::InvalidInput(format!(
            "similarity_threshold must be between 0 and 100, got {threshold}"
        )))
    }
}

/// Checks the declared content type against the accepted set.
pub fn validate_content_type(image: &UploadedImage, cfg: &VerifyConfig) -> Result<(), VerifyError> {
    match image.content_type.as_deref() {
        Some(ct) if cfg.accepts(ct) => Ok(()),
        Some(ct) => Err(VerifyError::UnsupportedFormat {
            field: image.field.clone(),
            content_type: mime_essence(ct),
        }),
        None => Err(VerifyError::UnsupportedFormat {
            field: image.field.clone(),
            content_type: "none".into(),
        }),
    }
}

pub fn validate_size(image: &UploadedImage, cfg: &VerifyConfig) -> Result<(), VerifyError> {
    let size = image.len();
    if size > cfg.max_image_bytes {
        return Err(VerifyError::PayloadTooLarge {
            field: image.field.clone(),
            size,
            limit: cfg.max_image_bytes,
            limit_label: cfg.max_image_size_label(),
        });
    }
    Ok(())
}

/// Fully decodes the payload to prove it is an intact raster image.
///
/// The pixels are discarded; only JPEG and PNG codecs are compiled in, so any
/// other container fails here even if its content type was spoofed.
pub fn validate_decodable(image: &UploadedImage) -> Result<(), VerifyError> {
    if image.is_empty() {
        return Err(VerifyError::InvalidImage {
            field: image.field.clone(),
            reason: "empty file".into(),
        });
    }
    image::load_from_memory(&image.bytes)
        .map(|_| ())
        .map_err(|err| VerifyError::InvalidImage {
            field: image.field.clone(),
            reason: err.to_string(),
        })
}
