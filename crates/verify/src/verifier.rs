use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn, Instrument, Level};

use crate::config::VerifyConfig;
use crate::error::VerifyError;
use crate::provider::{Comparison, FaceComparer};
use crate::types::{
    FaceDetails, MatchedFace, UnmatchedFaces, UploadedImage, VerificationRequest,
    VerificationResult,
};
use crate::validate::{validate_content_type, validate_decodable, validate_size, validate_threshold};

/// Validates two uploads and asks the provider whether they show the same face.
///
/// Cloning is cheap; the provider handle is shared.
#[derive(Clone)]
pub struct Verifier {
    comparer: Arc<dyn FaceComparer>,
    config: VerifyConfig,
}

impl std::fmt::Debug for Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier")
            .field("provider", &self.comparer.name())
            .field("config", &self.config)
            .finish()
    }
}

impl Verifier {
    pub fn new(comparer: Arc<dyn FaceComparer>, config: VerifyConfig) -> Self {
        Self { comparer, config }
    }

    pub fn config(&self) -> &VerifyConfig {
        &self.config
    }

    pub fn provider_name(&self) -> &str {
        self.comparer.name()
    }

    /// Runs every guard without contacting the provider.
    ///
    /// Guards run stage by stage across both images: threshold, content
    /// types, sizes, then decoding.
    pub async fn validate(&self, request: &VerificationRequest) -> Result<(), VerifyError> {
        validate_threshold(request.threshold)?;

        let images = [&request.image1, &request.image2];
        for image in images {
            validate_content_type(image, &self.config)?;
        }
        for image in images {
            validate_size(image, &self.config)?;
        }
        for image in images {
            decode_off_thread(image).await?;
        }
        Ok(())
    }

    /// Validates the request, calls the provider once, and normalizes its answer.
    pub async fn verify(
        &self,
        request: VerificationRequest,
    ) -> Result<VerificationResult, VerifyError> {
        let start = Instant::now();
        let span = tracing::span!(
            Level::INFO,
            "verify.verify",
            provider = %self.comparer.name(),
            threshold = request.threshold,
            image1_bytes = request.image1.len(),
            image2_bytes = request.image2.len(),
        );

        match self.verify_inner(request).instrument(span.clone()).await {
            Ok(result) => {
                let _guard = span.enter();
                info!(
                    verified = result.is_verified(),
                    similarity = result.similarity(),
                    elapsed_micros = start.elapsed().as_micros(),
                    "verify_success"
                );
                Ok(result)
            }
            Err(err) => {
                let _guard = span.enter();
                warn!(
                    error = %err,
                    validation = err.is_validation(),
                    elapsed_micros = start.elapsed().as_micros(),
                    "verify_failure"
                );
                Err(err)
            }
        }
    }

    async fn verify_inner(
        &self,
        request: VerificationRequest,
    ) -> Result<VerificationResult, VerifyError> {
        self.validate(&request).await?;

        let comparison = self
            .comparer
            .compare_faces(&request.image1.bytes, &request.image2.bytes, request.threshold)
            .await?;

        Ok(map_comparison(comparison, request.threshold))
    }
}

/// Decoding a multi-megabyte JPEG is CPU bound; keep it off the async workers.
async fn decode_off_thread(image: &UploadedImage) -> Result<(), VerifyError> {
    let owned = image.clone();
    let field = image.field.clone();
    tokio::task::spawn_blocking(move || validate_decodable(&owned))
        .await
        .map_err(|err| VerifyError::InvalidImage {
            field,
            reason: format!("decoder aborted: {err}"),
        })?
}

/// Rounds a similarity score to two decimals.
pub fn round_similarity(similarity: f64) -> f64 {
    (similarity * 100.0).round() / 100.0
}

/// Turns the provider's answer into a [`VerificationResult`].
///
/// The first match in provider order wins; later matches are ignored.
pub fn map_comparison(comparison: Comparison, threshold: f64) -> VerificationResult {
    let Comparison {
        source_face_confidence,
        matches,
        unmatched_faces,
    } = comparison;

    match matches.into_iter().next() {
        Some(best) => VerificationResult::Matched(MatchedFace {
            similarity: round_similarity(best.similarity),
            confidence: best.face.confidence,
            source_face_confidence: source_face_confidence.unwrap_or(0.0),
            threshold_used: threshold,
            face: FaceDetails {
                bounding_box: best.face.bounding_box,
                age_range: best.face.age_range,
                gender: best.face.gender,
                pose: best.face.pose,
            },
        }),
        None => VerificationResult::Unmatched(UnmatchedFaces {
            threshold_used: threshold,
            unmatched_faces_count: unmatched_faces,
        }),
    }
}
