//! Face verification handler.
//!
//! Takes two uploaded images and a similarity threshold, checks that the
//! request is sane, hands the raw bytes to a [`FaceComparer`], and turns the
//! answer into a [`VerificationResult`].
//!
//! ## What we do here
//!
//! - **Validate the threshold** - must sit in `0..=100`.
//! - **Validate each upload** - content type must be JPEG or PNG, size must fit
//!   the configured limit, and the bytes must actually decode.
//! - **Call the provider exactly once** - no retries, no batching.
//! - **Normalize** - first match wins, similarity rounded to two decimals,
//!   unmatched faces counted.
//!
//! Nothing is kept between calls. The only shared value is the provider handle.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use verify::{FaceComparer, UploadedImage, VerificationRequest, Verifier, VerifyConfig};
//!
//! # async fn run(comparer: Arc<dyn FaceComparer>, a: Vec<u8>, b: Vec<u8>) -> Result<(), verify::VerifyError> {
//! let config = VerifyConfig::default();
//! let verifier = Verifier::new(comparer, config.clone());
//! let request = VerificationRequest::new(
//!     UploadedImage::new("image1", "image/jpeg", a),
//!     UploadedImage::new("image2", "image/png", b),
//!     &config,
//! );
//! let result = verifier.verify(request).await?;
//! println!("verified: {}", result.is_verified());
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod provider;
mod types;
mod validate;
mod verifier;

pub use crate::config::{
    ConfigError, VerifyConfig, DEFAULT_MAX_IMAGE_BYTES, DEFAULT_SIMILARITY_THRESHOLD,
    MAX_SIMILARITY_THRESHOLD, MIN_SIMILARITY_THRESHOLD,
};
pub use crate::error::{ProviderError, VerifyError};
pub use crate::provider::{ComparedFace, Comparison, FaceComparer, FaceMatch};
pub use crate::types::{
    AgeRange, BoundingBox, FaceDetails, Gender, MatchedFace, Pose, UnmatchedFaces, UploadedImage,
    VerificationRequest, VerificationResponse, VerificationResult,
};
pub use crate::validate::{
    validate_content_type, validate_decodable, validate_size, validate_threshold,
};
pub use crate::verifier::{map_comparison, round_similarity, Verifier};
