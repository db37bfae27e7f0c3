use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::{Multipart, State};
use axum::Json;
use std::sync::Arc;
use std::time::Instant;
use verify::{UploadedImage, VerificationRequest, VerificationResponse, VerifyError};

pub const IMAGE1_FIELD: &str = "image1";
pub const IMAGE2_FIELD: &str = "image2";
pub const THRESHOLD_FIELD: &str = "similarity_threshold";

/// Fields collected from the multipart form before validation.
#[derive(Debug, Default)]
struct VerifyForm {
    image1: Option<UploadedImage>,
    image2: Option<UploadedImage>,
    threshold: Option<String>,
}

impl VerifyForm {
    async fn read(mut multipart: Multipart) -> ServerResult<Self> {
        let mut form = VerifyForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                IMAGE1_FIELD | IMAGE2_FIELD => {
                    let filename = field.file_name().map(str::to_string);
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await?;
                    let upload = UploadedImage {
                        field: name.clone(),
                        filename,
                        content_type,
                        bytes,
                    };
                    if name == IMAGE1_FIELD {
                        form.image1 = Some(upload);
                    } else {
                        form.image2 = Some(upload);
                    }
                }
                THRESHOLD_FIELD => form.threshold = Some(field.text().await?),
                other => tracing::debug!(field = %other, "ignoring unknown form field"),
            }
        }

        Ok(form)
    }

    fn into_request(self, default_threshold: f64) -> ServerResult<VerificationRequest> {
        let image1 = self.image1.ok_or_else(|| missing(IMAGE1_FIELD))?;
        let image2 = self.image2.ok_or_else(|| missing(IMAGE2_FIELD))?;
        let threshold = match self.threshold.as_deref().map(str::trim) {
            None | Some("") => default_threshold,
            Some(raw) => raw.parse::<f64>().map_err(|_| {
                VerifyError::InvalidInput(format!(
                    "{THRESHOLD_FIELD} must be a number between 0 and 100, got '{raw}'"
                ))
            })?,
        };

        Ok(VerificationRequest {
            image1,
            image2,
            threshold,
        })
    }
}

fn missing(field: &str) -> ServerError {
    ServerError::BadRequest(format!("Missing required form field '{field}'"))
}

/// Compare the faces in two uploaded images (POST /verify-faces)
///
/// Multipart fields:
/// - `image1`, `image2`: JPEG or PNG files
/// - `similarity_threshold`: optional number in `0..=100`, default from config (80)
///
/// # Response
///
/// ```json
/// {"verified": true, "similarity": 99.87, "confidence": 99.9,
///  "source_face_confidence": 99.99, "threshold_used": 80.0,
///  "face_details": {"bounding_box": {"width": 0.4, "height": 0.5, "left": 0.3, "top": 0.2}}}
/// ```
///
/// ```json
/// {"verified": false, "similarity": 0.0, "threshold_used": 95.0, "unmatched_faces_count": 2}
/// ```
pub async fn verify_faces(
    State(state): State<Arc<ServerState>>,
    multipart: Multipart,
) -> ServerResult<Json<VerificationResponse>> {
    let start = Instant::now();

    let outcome = async {
        let form = VerifyForm::read(multipart).await?;
        let request = form.into_request(state.verifier.config().default_threshold)?;
        let result = state.verifier.verify(request).await?;
        Ok::<_, ServerError>(result)
    }
    .await;

    let label = match &outcome {
        Ok(result) if result.is_verified() => "verified",
        Ok(_) => "not_verified",
        Err(err) => err.error_code(),
    };
    metrics::counter!("face_verify_requests_total", "outcome" => label).increment(1);
    metrics::histogram!("face_verify_duration_seconds").record(start.elapsed().as_secs_f64());

    Ok(Json(outcome?.into()))
}
