use rekognition::RekognitionConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use verify::VerifyConfig;

/// Multipart framing and the threshold field on top of the two images.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whole-request timeout in seconds; must exceed `rekognition.timeout_secs`
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Enable CORS (any origin, method, header)
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level / `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Expose `/metrics` in Prometheus text format
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Upload validation settings
    #[serde(default)]
    pub verify: VerifyConfig,

    /// Face comparison provider settings
    #[serde(default)]
    pub rekognition: RekognitionConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            metrics_enabled: default_true(),
            verify: VerifyConfig::default(),
            rekognition: RekognitionConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, an optional `server.*` file, and environment variables
    ///
    /// Environment keys use the `FACE_VERIFY` prefix with `__` between levels,
    /// e.g. `FACE_VERIFY__PORT=9000` or `FACE_VERIFY__REKOGNITION__REGION=eu-west-1`.
    pub fn load() -> anyhow::Result<Self> {
        // A missing .env is the normal case outside development.
        let _ = dotenvy::dotenv();

        let builder = config::Config::builder()
            .add_source(config::File::with_name("server").required(false))
            .add_source(config::Environment::with_prefix("FACE_VERIFY").separator("__"));

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than zero");
        }
        if self.timeout_secs <= self.rekognition.timeout_secs {
            anyhow::bail!(
                "timeout_secs ({}) must be greater than rekognition.timeout_secs ({})",
                self.timeout_secs,
                self.rekognition.timeout_secs
            );
        }
        self.verify.validate()?;
        self.rekognition.validate()?;
        Ok(())
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Request body limit: two images at the per-image maximum plus form overhead.
    ///
    /// Anything between one image's limit and this value still reaches the
    /// handler, so the caller gets the per-field 413 message.
    pub fn max_body_size(&self) -> usize {
        self.verify
            .max_image_bytes
            .saturating_mul(2)
            .saturating_add(FORM_OVERHEAD_BYTES)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.timeout_secs, 60);
        assert!(cfg.timeout_secs > cfg.rekognition.timeout_secs);
        assert!(cfg.enable_cors);
        assert!(cfg.metrics_enabled);
        assert_eq!(cfg.verify.max_image_bytes, 5 * 1024 * 1024);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let cfg = ServerConfig::default();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 8000);
    }

    #[test]
    fn test_body_limit_covers_two_images() {
        let cfg = ServerConfig::default();
        assert_eq!(
            cfg.max_body_size(),
            2 * 5 * 1024 * 1024 + FORM_OVERHEAD_BYTES
        );
    }

    #[test]
    fn test_nested_sections_deserialize() {
        let cfg: ServerConfig = serde_json::from_str(
            r#"{"port": 9000, "verify": {"max_image_bytes": 1024}, "rekognition": {"region": "eu-west-1"}}"#,
        )
        .unwrap();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.verify.max_image_bytes, 1024);
        assert_eq!(cfg.verify.default_threshold, 80.0);
        assert_eq!(cfg.rekognition.region, "eu-west-1");
    }

    #[test]
    fn test_request_timeout_must_outlast_provider_timeout() {
        let mut cfg = ServerConfig::default();
        cfg.timeout_secs = 30;
        cfg.rekognition.timeout_secs = 30;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("rekognition.timeout_secs"));

        cfg.timeout_secs = 31;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_invalid_nested_config_is_rejected() {
        let mut cfg = ServerConfig::default();
        cfg.verify.max_image_bytes = 0;
        assert!(cfg.validate().is_err());
    }
}
