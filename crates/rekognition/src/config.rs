use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_REGION: &str = "us-east-1";

/// Connection and credential settings for the Rekognition client.
///
/// Credential fields left empty fall back to the standard `AWS_*` environment
/// variables when the client is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RekognitionConfig {
    /// AWS region, e.g. `eu-west-1`. Empty means `AWS_REGION`, then `AWS_DEFAULT_REGION`, then `us-east-1`.
    pub region: String,
    /// Full endpoint URL override (VPC endpoints, local mocks).
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    #[serde(skip_serializing)]
    pub secret_access_key: Option<String>,
    #[serde(skip_serializing)]
    pub session_token: Option<String>,
    /// Overall request timeout.
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Server-side filter applied to low quality faces before matching.
    pub quality_filter: Option<QualityFilter>,
}

impl Default for RekognitionConfig {
    fn default() -> Self {
        Self {
            region: String::new(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
            timeout_secs: 30,
            connect_timeout_secs: 10,
            quality_filter: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualityFilter {
    None,
    Auto,
    Low,
    Medium,
    High,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("invalid endpoint '{0}': {1}")]
    InvalidEndpoint(String, String),

    #[error("access_key_id and secret_access_key must be set together")]
    PartialCredentials,
}

impl RekognitionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if let Some(endpoint) = &self.endpoint {
            reqwest::Url::parse(endpoint)
                .map_err(|e| ConfigError::InvalidEndpoint(endpoint.clone(), e.to_string()))?;
        }
        if self.access_key_id.is_some() != self.secret_access_key.is_some() {
            return Err(ConfigError::PartialCredentials);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Region after applying the environment fallbacks.
    pub fn resolved_region(&self, env: impl Fn(&str) -> Option<String>) -> String {
        non_empty(Some(self.region.clone()))
            .or_else(|| non_empty(env("AWS_REGION")))
            .or_else(|| non_empty(env("AWS_DEFAULT_REGION")))
            .unwrap_or_else(|| DEFAULT_REGION.to_string())
    }

    /// Endpoint URL for `region`, honoring the override.
    pub fn endpoint_url(&self, region: &str) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("https://rekognition.{region}.amazonaws.com/"))
    }

    /// Credentials from the config, else from `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`.
    pub fn resolved_credentials(&self, env: impl Fn(&str) -> Option<String>) -> Option<Credentials> {
        if let (Some(id), Some(secret)) = (
            non_empty(self.access_key_id.clone()),
            non_empty(self.secret_access_key.clone()),
        ) {
            return Some(Credentials {
                access_key_id: id,
                secret_access_key: secret,
                session_token: non_empty(self.session_token.clone()),
            });
        }

        Some(Credentials {
            access_key_id: non_empty(env("AWS_ACCESS_KEY_ID"))?,
            secret_access_key: non_empty(env("AWS_SECRET_ACCESS_KEY"))?,
            session_token: non_empty(env("AWS_SESSION_TOKEN")),
        })
    }
}

/// Static AWS credentials used for SigV4 signing.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
