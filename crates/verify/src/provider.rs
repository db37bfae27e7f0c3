//! The seam between the handler and the external face comparison service.
//!
//! Implementations are constructed once and shared across requests behind an
//! `Arc`, so they must be `Send + Sync` and hold no per-request state.
use async_trait::async_trait;

use crate::error::ProviderError;
use crate::types::{AgeRange, BoundingBox, Gender, Pose};

/// A face detected in the target image.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComparedFace {
    pub confidence: f64,
    pub bounding_box: BoundingBox,
    pub age_range: Option<AgeRange>,
    pub gender: Option<Gender>,
    pub pose: Option<Pose>,
}

/// A target face whose similarity cleared the requested threshold.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FaceMatch {
    pub similarity: f64,
    pub face: ComparedFace,
}

/// Everything the provider reported for one comparison.
///
/// `matches` keeps the provider's order; the handler treats the first entry as
/// the match.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Comparison {
    pub source_face_confidence: Option<f64>,
    pub matches: Vec<FaceMatch>,
    pub unmatched_faces: usize,
}

/// Compares the largest face in `source` against the faces in `target`.
#[async_trait]
pub trait FaceComparer: Send + Sync {
    async fn compare_faces(
        &self,
        source: &[u8],
        target: &[u8],
        similarity_threshold: f64,
    ) -> Result<Comparison, ProviderError>;

    /// Short provider label used in logs.
    fn name(&self) -> &str;
}
