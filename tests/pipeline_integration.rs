use std::io::Cursor;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use facecheck::{
    build_verifier, read_upload, BoundingBox, ComparedFace, Comparison, FaceCheckConfig,
    FaceComparer, FaceMatch, ProviderError, VerificationRequest, VerificationResponse,
    VerificationResult, Verifier, VerifyConfig, VerifyError,
};
use image::{ImageFormat, Rgb, RgbImage};
use tempfile::TempDir;

struct CountingComparer {
    calls: AtomicUsize,
    comparison: Comparison,
}

#[async_trait]
impl FaceComparer for CountingComparer {
    async fn compare_faces(
        &self,
        _source: &[u8],
        _target: &[u8],
        _similarity_threshold: f64,
    ) -> Result<Comparison, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.comparison.clone())
    }

    fn name(&self) -> &str {
        "counting"
    }
}

fn write_image(dir: &Path, name: &str, format: ImageFormat) -> std::path::PathBuf {
    let img = RgbImage::from_pixel(24, 24, Rgb([200, 160, 140]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, out.into_inner()).unwrap();
    path
}

fn matching(similarity: f64) -> Arc<CountingComparer> {
    Arc::new(CountingComparer {
        calls: AtomicUsize::new(0),
        comparison: Comparison {
            source_face_confidence: Some(99.9),
            matches: vec![FaceMatch {
                similarity,
                face: ComparedFace {
                    confidence: 99.7,
                    bounding_box: BoundingBox {
                        width: 0.5,
                        height: 0.6,
                        left: 0.2,
                        top: 0.1,
                    },
                    ..ComparedFace::default()
                },
            }],
            unmatched_faces: 0,
        },
    })
}

#[tokio::test]
async fn local_files_verify_end_to_end() {
    let dir = TempDir::new().unwrap();
    let a = write_image(dir.path(), "a.png", ImageFormat::Png);
    let b = write_image(dir.path(), "b.jpeg", ImageFormat::Jpeg);

    let comparer = matching(99.8734);
    let verifier = Verifier::new(comparer.clone(), VerifyConfig::default());
    let request = VerificationRequest::new(
        read_upload("image1", &a).await.unwrap(),
        read_upload("image2", &b).await.unwrap(),
        verifier.config(),
    );

    let result = verifier.verify(request).await.unwrap();
    assert!(result.is_verified());
    assert_eq!(result.similarity(), 99.87);
    assert_eq!(result.threshold_used(), 80.0);
    assert_eq!(comparer.calls.load(Ordering::SeqCst), 1);

    let json = serde_json::to_value(VerificationResponse::from(result)).unwrap();
    assert_eq!(json["face_details"]["bounding_box"]["height"], 0.6);
    assert!(json["face_details"].get("pose").is_none());
}

#[tokio::test]
async fn uploads_carry_filename_and_inferred_type() {
    let dir = TempDir::new().unwrap();
    let a = write_image(dir.path(), "portrait.JPG", ImageFormat::Jpeg);

    let upload = read_upload("image1", &a).await.unwrap();
    assert_eq!(upload.field, "image1");
    assert_eq!(upload.filename.as_deref(), Some("portrait.JPG"));
    assert_eq!(upload.content_type.as_deref(), Some("image/jpeg"));
    assert!(!upload.is_empty());
}

#[tokio::test]
async fn unknown_extension_is_rejected_without_provider_call() {
    let dir = TempDir::new().unwrap();
    let a = write_image(dir.path(), "a.png", ImageFormat::Png);
    let b = write_image(dir.path(), "b.bmp", ImageFormat::Png);

    let comparer = matching(99.0);
    let verifier = Verifier::new(comparer.clone(), VerifyConfig::default());
    let request = VerificationRequest::new(
        read_upload("image1", &a).await.unwrap(),
        read_upload("image2", &b).await.unwrap(),
        verifier.config(),
    );

    let err = verifier.verify(request).await.unwrap_err();
    assert!(matches!(err, VerifyError::UnsupportedFormat { ref field, .. } if field == "image2"));
    assert_eq!(comparer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn yaml_threshold_becomes_request_default() {
    let config = FaceCheckConfig::from_yaml(
        r#"
version: "1.0"
verify:
  default_threshold: 99.9
"#,
    )
    .unwrap();

    let dir = TempDir::new().unwrap();
    let a = write_image(dir.path(), "a.png", ImageFormat::Png);
    let b = write_image(dir.path(), "b.png", ImageFormat::Png);

    let comparer = Arc::new(CountingComparer {
        calls: AtomicUsize::new(0),
        comparison: Comparison {
            source_face_confidence: Some(98.0),
            matches: vec![],
            unmatched_faces: 1,
        },
    });
    let verifier = Verifier::new(comparer, config.verify.clone());
    let request = VerificationRequest::new(
        read_upload("image1", &a).await.unwrap(),
        read_upload("image2", &b).await.unwrap(),
        &config.verify,
    );

    let result = verifier.verify(request).await.unwrap();
    match result {
        VerificationResult::Unmatched(u) => {
            assert_eq!(u.threshold_used, 99.9);
            assert_eq!(u.unmatched_faces_count, 1);
        }
        other => panic!("expected no match, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_provider_surfaces_as_provider_error() {
    let config = FaceCheckConfig::from_yaml(
        r#"
version: "1.0"
rekognition:
  region: "us-west-2"
  endpoint: "http://127.0.0.1:1/"
  access_key_id: "AKIDEXAMPLE"
  secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY"
  timeout_secs: 5
  connect_timeout_secs: 2
"#,
    )
    .unwrap();
    let verifier = build_verifier(&config).unwrap();
    assert_eq!(verifier.provider_name(), "aws-rekognition");

    let dir = TempDir::new().unwrap();
    let a = write_image(dir.path(), "a.png", ImageFormat::Png);
    let b = write_image(dir.path(), "b.png", ImageFormat::Png);
    let request = VerificationRequest::new(
        read_upload("image1", &a).await.unwrap(),
        read_upload("image2", &b).await.unwrap(),
        &config.verify,
    );

    let err = verifier.verify(request).await.unwrap_err();
    assert!(matches!(err, VerifyError::Provider(ProviderError::Transport(_))));
    assert!(!err.is_validation());
}
