//! Wire types for `RekognitionService.CompareFaces` (AWS JSON 1.1 protocol).
//!
//! Every response field is optional on the wire; conversion into
//! [`verify::Comparison`] decides what absence means.
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::config::QualityFilter;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CompareFacesRequest {
    pub source_image: ImageBlob,
    pub target_image: ImageBlob,
    pub similarity_threshold: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_filter: Option<QualityFilter>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ImageBlob {
    pub bytes: String,
}

impl ImageBlob {
    pub fn encode(raw: &[u8]) -> Self {
        Self {
            bytes: STANDARD.encode(raw),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct CompareFacesResponse {
    pub source_image_face: Option<SourceImageFace>,
    pub face_matches: Vec<CompareFacesMatch>,
    pub unmatched_faces: Vec<WireComparedFace>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct SourceImageFace {
    pub bounding_box: Option<WireBoundingBox>,
    pub confidence: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct CompareFacesMatch {
    pub similarity: Option<f64>,
    pub face: Option<WireComparedFace>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct WireComparedFace {
    pub bounding_box: Option<WireBoundingBox>,
    pub confidence: Option<f64>,
    pub pose: Option<WirePose>,
    pub age_range: Option<WireAgeRange>,
    pub gender: Option<WireGender>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct WireBoundingBox {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub left: Option<f64>,
    pub top: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct WirePose {
    pub roll: Option<f64>,
    pub yaw: Option<f64>,
    pub pitch: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct WireAgeRange {
    pub low: Option<u32>,
    pub high: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct WireGender {
    pub value: Option<String>,
    pub confidence: Option<f64>,
}

/// JSON error document. AWS uses both `message` and `Message`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ErrorDocument {
    #[serde(rename = "__type")]
    pub kind: Option<String>,
    #[serde(alias = "Message")]
    pub message: Option<String>,
}

impl ErrorDocument {
    /// `com.amazonaws.rekognition#InvalidParameterException` -> `InvalidParameterException`.
    pub fn code(&self) -> Option<String> {
        self.kind.as_deref().map(|kind| {
            kind.rsplit('#')
                .next()
                .unwrap_or(kind)
                .split(':')
                .next()
                .unwrap_or(kind)
                .to_string()
        })
    }
}

impl From<WireBoundingBox> for verify::BoundingBox {
    fn from(b: WireBoundingBox) -> Self {
        verify::BoundingBox {
            width: b.width.unwrap_or_default(),
            height: b.height.unwrap_or_default(),
            left: b.left.unwrap_or_default(),
            top: b.top.unwrap_or_default(),
        }
    }
}

impl From<WireComparedFace> for verify::ComparedFace {
    fn from(face: WireComparedFace) -> Self {
        verify::ComparedFace {
            confidence: face.confidence.unwrap_or_default(),
            bounding_box: face.bounding_box.map(Into::into).unwrap_or_default(),
            age_range: face.age_range.and_then(|r| {
                Some(verify::AgeRange {
                    low: r.low?,
                    high: r.high?,
                })
            }),
            gender: face.gender.and_then(|g| {
                Some(verify::Gender {
                    value: g.value?,
                    confidence: g.confidence.unwrap_or_default(),
                })
            }),
            pose: face.pose.map(|p| verify::Pose {
                roll: p.roll.unwrap_or_default(),
                yaw: p.yaw.unwrap_or_default(),
                pitch: p.pitch.unwrap_or_default(),
            }),
        }
    }
}

impl From<CompareFacesResponse> for verify::Comparison {
    fn from(resp: CompareFacesResponse) -> Self {
        verify::Comparison {
            source_face_confidence: resp.source_image_face.and_then(|f| f.confidence),
            matches: resp
                .face_matches
                .into_iter()
                .map(|m| verify::FaceMatch {
                    similarity: m.similarity.unwrap_or_default(),
                    face: m.face.map(Into::into).unwrap_or_default(),
                })
                .collect(),
            unmatched_faces: resp.unmatched_faces.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATCH_FIXTURE: &str = r#"{
        "SourceImageFace": {
            "BoundingBox": {"Width": 0.39, "Height": 0.51, "Left": 0.31, "Top": 0.19},
            "Confidence": 99.99
        },
        "FaceMatches": [
            {
                "Similarity": 99.8734,
                "Face": {
                    "BoundingBox": {"Width": 0.40, "Height": 0.52, "Left": 0.30, "Top": 0.18},
                    "Confidence": 99.98,
                    "Pose": {"Roll": -1.2, "Yaw": 3.4, "Pitch": 5.6},
                    "Quality": {"Brightness": 80.1, "Sharpness": 92.3},
                    "Landmarks": [{"Type": "eyeLeft", "X": 0.4, "Y": 0.3}]
                }
            },
            {
                "Similarity": 85.0,
                "Face": {"Confidence": 97.0}
            }
        ],
        "UnmatchedFaces": [{"Confidence": 91.0}]
    }"#;

    #[test]
    fn converts_match_response_in_order() {
        let resp: CompareFacesResponse = serde_json::from_str(MATCH_FIXTURE).unwrap();
        let comparison: verify::Comparison = resp.into();

        assert_eq!(comparison.source_face_confidence, Some(99.99));
        assert_eq!(comparison.matches.len(), 2);
        assert_eq!(comparison.matches[0].similarity, 99.8734);
        assert_eq!(comparison.matches[1].similarity, 85.0);
        assert_eq!(comparison.unmatched_faces, 1);

        let face = &comparison.matches[0].face;
        assert_eq!(face.confidence, 99.98);
        assert_eq!(face.bounding_box.width, 0.40);
        assert_eq!(face.pose.unwrap().pitch, 5.6);
        assert!(face.age_range.is_none());
        assert!(face.gender.is_none());
    }

    #[test]
    fn optional_demographics_are_kept_when_present() {
        let resp: CompareFacesResponse = serde_json::from_str(
            r#"{"FaceMatches": [{"Similarity": 90.0, "Face": {
                "Confidence": 99.0,
                "AgeRange": {"Low": 22, "High": 30},
                "Gender": {"Value": "Male", "Confidence": 98.5}
            }}]}"#,
        )
        .unwrap();
        let comparison: verify::Comparison = resp.into();
        let face = &comparison.matches[0].face;
        assert_eq!(face.age_range, Some(verify::AgeRange { low: 22, high: 30 }));
        assert_eq!(face.gender.as_ref().unwrap().value, "Male");
        assert!(face.pose.is_none());
    }

    #[test]
    fn empty_response_is_no_match() {
        let resp: CompareFacesResponse = serde_json::from_str("{}").unwrap();
        let comparison: verify::Comparison = resp.into();
        assert!(comparison.matches.is_empty());
        assert_eq!(comparison.unmatched_faces, 0);
        assert_eq!(comparison.source_face_confidence, None);
    }

    #[test]
    fn request_serializes_pascal_case() {
        let req = CompareFacesRequest {
            source_image: ImageBlob::encode(b"abc"),
            target_image: ImageBlob::encode(b"xyz"),
            similarity_threshold: 80.0,
            quality_filter: Some(QualityFilter::Auto),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["SourceImage"]["Bytes"], "YWJj");
        assert_eq!(json["TargetImage"]["Bytes"], "eHl6");
        assert_eq!(json["SimilarityThreshold"], 80.0);
        assert_eq!(json["QualityFilter"], "AUTO");
    }

    #[test]
    fn error_code_is_unqualified() {
        let doc: ErrorDocument = serde_json::from_str(
            r#"{"__type": "com.amazonaws.rekognition#InvalidParameterException", "Message": "bad"}"#,
        )
        .unwrap();
        assert_eq!(doc.code().as_deref(), Some("InvalidParameterException"));
        assert_eq!(doc.message.as_deref(), Some("bad"));

        let plain: ErrorDocument =
            serde_json::from_str(r#"{"__type": "AccessDeniedException", "message": "denied"}"#)
                .unwrap();
        assert_eq!(plain.code().as_deref(), Some("AccessDeniedException"));
        assert_eq!(plain.message.as_deref(), Some("denied"));
    }
}
