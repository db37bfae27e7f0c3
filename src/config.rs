//! YAML configuration file support for the `facecheck` CLI
//!
//! One file carries the validation limits and the Rekognition connection
//! settings, so a local comparison runs with the same rules as the server.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "kyc-staging"
//!
//! verify:
//!   max_image_bytes: 5242880
//!   default_threshold: 90.0
//!   accepted_content_types: ["image/jpeg", "image/png"]
//!
//! rekognition:
//!   region: "eu-west-1"
//!   timeout_secs: 20
//!   quality_filter: "AUTO"
//! ```
//!
//! Credentials are normally left out of the file and read from `AWS_*`.

use std::fs;
use std::path::Path;

use rekognition::RekognitionConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use verify::VerifyConfig;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceCheckConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Upload validation limits and default threshold
    #[serde(default)]
    pub verify: VerifyConfig,

    /// Provider connection settings
    #[serde(default)]
    pub rekognition: RekognitionConfig,
}

impl FaceCheckConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: FaceCheckConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.verify
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("verify: {e}")))?;
        self.rekognition
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("rekognition: {e}")))?;

        Ok(())
    }
}

impl Default for FaceCheckConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            verify: VerifyConfig::default(),
            rekognition: RekognitionConfig::default(),
        }
    }
}
