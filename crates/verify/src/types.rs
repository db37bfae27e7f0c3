use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::config::VerifyConfig;

/// One uploaded file as received from the caller.
///
/// `field` is the form field name (`image1`, `image2`) and is echoed in error
/// messages so callers know which upload was rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    pub field: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedImage {
    pub fn new(field: impl Into<String>, content_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            field: field.into(),
            filename: None,
            content_type: Some(content_type.into()),
            bytes: bytes.into(),
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Two images plus the similarity threshold to compare them with.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationRequest {
    pub image1: UploadedImage,
    pub image2: UploadedImage,
    pub threshold: f64,
}

impl VerificationRequest {
    /// Builds a request using the configured default threshold.
    pub fn new(image1: UploadedImage, image2: UploadedImage, config: &VerifyConfig) -> Self {
        Self {
            image1,
            image2,
            threshold: config.default_threshold,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Face position as ratios of the image width/height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
}

/// Estimated age range in years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub low: u32,
    pub high: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gender {
    pub value: String,
    pub confidence: f64,
}

/// Head orientation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub roll: f64,
    pub yaw: f64,
    pub pitch: f64,
}

/// Metadata about the matched face in the target image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceDetails {
    pub bounding_box: BoundingBox,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_range: Option<AgeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pose: Option<Pose>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedFace {
    /// Similarity of the first reported match, rounded to two decimals.
    pub similarity: f64,
    /// Detection confidence of the matched face.
    pub confidence: f64,
    /// Detection confidence of the face in the source image, `0.0` when not reported.
    pub source_face_confidence: f64,
    pub threshold_used: f64,
    pub face: FaceDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnmatchedFaces {
    pub threshold_used: f64,
    pub unmatched_faces_count: usize,
}

/// Normalized outcome of one verification.
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationResult {
    Matched(MatchedFace),
    Unmatched(UnmatchedFaces),
}

impl VerificationResult {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationResult::Matched(_))
    }

    /// Similarity of the match, `0.0` when nothing cleared the threshold.
    pub fn similarity(&self) -> f64 {
        match self {
            VerificationResult::Matched(m) => m.similarity,
            VerificationResult::Unmatched(_) => 0.0,
        }
    }

    pub fn threshold_used(&self) -> f64 {
        match self {
            VerificationResult::Matched(m) => m.threshold_used,
            VerificationResult::Unmatched(u) => u.threshold_used,
        }
    }
}

/// Wire form of a [`VerificationResult`], shared by the HTTP API and the CLI.
///
/// Matched results carry the face fields; unmatched results carry
/// `unmatched_faces_count` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResponse {
    pub verified: bool,
    pub similarity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_face_confidence: Option<f64>,
    pub threshold_used: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_details: Option<FaceDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unmatched_faces_count: Option<usize>,
}

impl From<VerificationResult> for VerificationResponse {
    fn from(result: VerificationResult) -> Self {
        match result {
            VerificationResult::Matched(m) => Self {
                verified: true,
                similarity: m.similarity,
                confidence: Some(m.confidence),
                source_face_confidence: Some(m.source_face_confidence),
                threshold_used: m.threshold_used,
                face_details: Some(m.face),
                unmatched_faces_count: None,
            },
            VerificationResult::Unmatched(u) => Self {
                verified: false,
                similarity: 0.0,
                confidence: None,
                source_face_confidence: None,
                threshold_used: u.threshold_used,
                face_details: None,
                unmatched_faces_count: Some(u.unmatched_faces_count),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_configured_default_threshold() {
        let cfg = VerifyConfig {
            default_threshold: 72.5,
            ..Default::default()
        };
        let a = UploadedImage::new("image1", "image/png", vec![1u8]);
        let b = UploadedImage::new("image2", "image/png", vec![2u8]);
        let req = VerificationRequest::new(a, b, &cfg);
        assert_eq!(req.threshold, 72.5);
        assert_eq!(req.with_threshold(90.0).threshold, 90.0);
    }

    #[test]
    fn unmatched_accessors() {
        let result = VerificationResult::Unmatched(UnmatchedFaces {
            threshold_used: 95.0,
            unmatched_faces_count: 2,
        });
        assert!(!result.is_verified());
        assert_eq!(result.similarity(), 0.0);
        assert_eq!(result.threshold_used(), 95.0);
    }

    #[test]
    fn face_details_omit_absent_attributes() {
        let details = FaceDetails {
            bounding_box: BoundingBox {
                width: 0.5,
                height: 0.25,
                left: 0.1,
                top: 0.2,
            },
            age_range: None,
            gender: None,
            pose: Some(Pose {
                roll: 1.0,
                yaw: -2.0,
                pitch: 3.5,
            }),
        };
        let json = serde_json::to_value(&details).unwrap();
        assert!(json.get("age_range").is_none());
        assert!(json.get("gender").is_none());
        assert_eq!(json["pose"]["pitch"], 3.5);
        assert_eq!(json["bounding_box"]["width"], 0.5);
    }

    #[test]
    fn matched_response_shape() {
        let response: VerificationResponse = VerificationResult::Matched(MatchedFace {
            similarity: 99.87,
            confidence: 99.9,
            source_face_confidence: 0.0,
            threshold_used: 80.0,
            face: FaceDetails {
                bounding_box: BoundingBox::default(),
                age_range: None,
                gender: None,
                pose: None,
            },
        })
        .into();

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["verified"], true);
        assert_eq!(json["similarity"], 99.87);
        assert_eq!(json["threshold_used"], 80.0);
        assert_eq!(json["source_face_confidence"], 0.0);
        assert!(json.get("unmatched_faces_count").is_none());
        assert!(json["face_details"].get("bounding_box").is_some());
    }

    #[test]
    fn unmatched_response_shape() {
        let response: VerificationResponse = VerificationResult::Unmatched(UnmatchedFaces {
            threshold_used: 95.0,
            unmatched_faces_count: 2,
        })
        .into();

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "verified": false,
                "similarity": 0.0,
                "threshold_used": 95.0,
                "unmatched_faces_count": 2
            })
        );
    }
}
