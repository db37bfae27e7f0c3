use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};
use tracing::{debug, warn};
use verify::{Comparison, FaceComparer, ProviderError};

use crate::config::{ConfigError, Credentials, RekognitionConfig};
use crate::model::{CompareFacesRequest, CompareFacesResponse, ErrorDocument, ImageBlob};
use crate::sigv4::RequestSigner;

const SERVICE: &str = "rekognition";
const TARGET: &str = "RekognitionService.CompareFaces";
const JSON_1_1: &str = "application/x-amz-json-1.1";

/// `CompareFaces` over the AWS JSON protocol.
///
/// Build once at startup and share; the inner `reqwest::Client` pools
/// connections. Each comparison is exactly one HTTP request.
#[derive(Debug, Clone)]
pub struct RekognitionClient {
    http: reqwest::Client,
    endpoint: Url,
    region: String,
    credentials: Option<Credentials>,
    config: RekognitionConfig,
}

impl RekognitionClient {
    /// Builds a client, resolving region and credentials from the process environment.
    pub fn from_config(config: RekognitionConfig) -> Result<Self, ConfigError> {
        Self::from_config_with_env(config, |key| std::env::var(key).ok())
    }

    pub fn from_config_with_env(
        config: RekognitionConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let region = config.resolved_region(&env);
        let credentials = config.resolved_credentials(&env);
        if credentials.is_none() {
            warn!(region = %region, "no AWS credentials found; comparisons will fail until they are provided");
        }

        let raw_endpoint = config.endpoint_url(&region);
        let endpoint = Url::parse(&raw_endpoint)
            .map_err(|e| ConfigError::InvalidEndpoint(raw_endpoint.clone(), e.to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| ConfigError::InvalidEndpoint(raw_endpoint, e.to_string()))?;

        Ok(Self {
            http,
            endpoint,
            region,
            credentials,
            config,
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    fn host_header(&self) -> String {
        let host = self.endpoint.host_str().unwrap_or_default();
        match self.endpoint.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    async fn send(&self, body: Vec<u8>) -> Result<CompareFacesResponse, ProviderError> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            ProviderError::Credentials(
                "set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY or configure rekognition credentials"
                    .into(),
            )
        })?;

        let signer = RequestSigner {
            credentials,
            region: &self.region,
            service: SERVICE,
        };
        let signed = signer.sign(
            "POST",
            &self.host_header(),
            self.endpoint.path(),
            &[("content-type", JSON_1_1), ("x-amz-target", TARGET)],
            &body,
            chrono::Utc::now(),
        );

        let mut request = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, JSON_1_1)
            .header("x-amz-target", TARGET)
            .header("x-amz-date", &signed.amz_date)
            .header("authorization", &signed.authorization);
        if let Some(token) = &signed.security_token {
            request = request.header("x-amz-security-token", token);
        }

        let response = request
            .body(body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(service_error(status, &bytes));
        }

        serde_json::from_slice(&bytes).map_err(|e| ProviderError::MalformedResponse(e.to_string()))
    }
}

fn service_error(status: StatusCode, body: &[u8]) -> ProviderError {
    match serde_json::from_slice::<ErrorDocument>(body) {
        Ok(doc) if doc.kind.is_some() || doc.message.is_some() => ProviderError::Service {
            code: doc.code().unwrap_or_else(|| status.as_u16().to_string()),
            message: doc
                .message
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string()),
        },
        _ => ProviderError::Service {
            code: status.as_u16().to_string(),
            message: String::from_utf8_lossy(body).trim().to_string(),
        },
    }
}

#[async_trait]
impl FaceComparer for RekognitionClient {
    async fn compare_faces(
        &self,
        source: &[u8],
        target: &[u8],
        similarity_threshold: f64,
    ) -> Result<Comparison, ProviderError> {
        let start = Instant::now();
        let payload = CompareFacesRequest {
            source_image: ImageBlob::encode(source),
            target_image: ImageBlob::encode(target),
            similarity_threshold,
            quality_filter: self.config.quality_filter,
        };
        let body = serde_json::to_vec(&payload)
            .map_err(|e| ProviderError::MalformedResponse(format!("request encoding: {e}")))?;

        let response = self.send(body).await?;
        let comparison = Comparison::from(response);

        debug!(
            region = %self.region,
            matches = comparison.matches.len(),
            unmatched = comparison.unmatched_faces,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "compare_faces"
        );
        Ok(comparison)
    }

    fn name(&self) -> &str {
        "aws-rekognition"
    }
}
