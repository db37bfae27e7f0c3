//! AWS Rekognition provider for the face verification handler.
//!
//! [`RekognitionClient`] implements [`verify::FaceComparer`] by calling
//! `CompareFaces` with both images inlined as base64 bytes. Requests are
//! signed with SigV4; credentials come from [`RekognitionConfig`] or the
//! standard `AWS_*` environment variables.
//!
//! ```no_run
//! use std::sync::Arc;
//! use rekognition::{RekognitionClient, RekognitionConfig};
//! use verify::{Verifier, VerifyConfig};
//!
//! let client = RekognitionClient::from_config(RekognitionConfig {
//!     region: "eu-west-1".into(),
//!     ..Default::default()
//! })?;
//! let verifier = Verifier::new(Arc::new(client), VerifyConfig::default());
//! # Ok::<(), rekognition::ConfigError>(())
//! ```

mod client;
mod config;
mod model;
mod sigv4;

pub use crate::client::RekognitionClient;
pub use crate::config::{ConfigError, Credentials, QualityFilter, RekognitionConfig, DEFAULT_REGION};
pub use crate::sigv4::{RequestSigner, SignedHeaders};
