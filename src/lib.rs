//! Workspace umbrella crate for two-image face verification.
//!
//! This crate stitches the validation core (`face-verify`) and the
//! Rekognition provider (`face-rekognition`) together so callers can run a
//! comparison from local files with a single configuration.

pub mod config;

pub use config::{ConfigLoadError, FaceCheckConfig};
pub use rekognition::{QualityFilter, RekognitionClient, RekognitionConfig};
pub use verify::{
    map_comparison, round_similarity, BoundingBox, ComparedFace, Comparison, FaceComparer,
    FaceDetails, FaceMatch, MatchedFace, ProviderError, UnmatchedFaces, UploadedImage,
    VerificationRequest, VerificationResponse, VerificationResult, Verifier, VerifyConfig,
    VerifyError,
};

use std::path::Path;
use std::sync::Arc;

/// Content type inferred from a file extension.
///
/// Unknown extensions map to `application/octet-stream`, which the verifier
/// rejects as an unsupported format.
pub fn content_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

/// Read a local file as the upload for `field`.
pub async fn read_upload(field: &str, path: &Path) -> std::io::Result<UploadedImage> {
    let bytes = tokio::fs::read(path).await?;
    let mut upload = UploadedImage::new(field, content_type_for_path(path), bytes);
    if let Some(name) = path.file_name() {
        upload = upload.with_filename(name.to_string_lossy());
    }
    tracing::debug!(field, path = %path.display(), bytes = upload.len(), "loaded upload");
    Ok(upload)
}

/// Build a verifier backed by Rekognition from a loaded configuration.
pub fn build_verifier(config: &FaceCheckConfig) -> Result<Verifier, rekognition::ConfigError> {
    let client = RekognitionClient::from_config(config.rekognition.clone())?;
    Ok(Verifier::new(Arc::new(client), config.verify.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type_for_path(Path::new("a/face.JPG")), "image/jpeg");
        assert_eq!(content_type_for_path(Path::new("face.jpeg")), "image/jpeg");
        assert_eq!(content_type_for_path(Path::new("face.png")), "image/png");
        assert_eq!(
            content_type_for_path(Path::new("scan.pdf")),
            "application/octet-stream"
        );
        assert_eq!(
            content_type_for_path(Path::new("noext")),
            "application/octet-stream"
        );
    }
}
