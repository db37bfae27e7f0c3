//! Face Verification Server - HTTP API comparing two uploaded face images
//!
//! Configuration comes from `server.{toml,yaml,json}` and `FACE_VERIFY__*`
//! environment variables; AWS credentials from the usual `AWS_*` variables.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Start server
    server::start_server(config).await?;

    Ok(())
}
