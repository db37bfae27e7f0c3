use crate::config::ServerConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use verify::{FaceComparer, Verifier};

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Verification handler with its provider handle (shared across requests)
    pub verifier: Verifier,

    /// Prometheus renderer, present when a recorder was installed
    pub metrics: Option<PrometheusHandle>,
}

impl ServerState {
    /// Create new server state around an already-constructed provider
    pub fn new(config: ServerConfig, comparer: Arc<dyn FaceComparer>) -> Self {
        let verifier = Verifier::new(comparer, config.verify.clone());
        Self {
            config: Arc::new(config),
            verifier,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
