//! Face Verification Server - HTTP API for two-image face comparison
//!
//! Accepts two uploaded images, validates them, and asks AWS Rekognition
//! whether they show the same person.
//!
//! # Features
//!
//! - **Validation before spend**: content type, size, and decodability are
//!   checked before the provider is called
//! - **Middleware**: Compression, CORS, request ID tracking, structured logging
//! - **Configuration**: Environment variable and file-based configuration
//! - **Error Handling**: JSON error bodies with a `detail` message and error code
//! - **Graceful Shutdown**: Proper signal handling for production deployments
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - Service descriptor
//! - `GET /health` - Liveness probe
//! - `GET /info` - Supported formats, size limit, threshold range
//! - `GET /metrics` - Prometheus metrics
//! - `POST /verify-faces` - Compare `image1` and `image2` (multipart)

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
