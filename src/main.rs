use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use facecheck::{
    build_verifier, read_upload, FaceCheckConfig, VerificationRequest, VerificationResponse,
};
use tracing_subscriber::EnvFilter;

/// Compare two face images with AWS Rekognition
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check whether two local images show the same person
    Compare {
        /// Source image (JPEG or PNG)
        #[arg(value_name = "IMAGE1")]
        image1: PathBuf,

        /// Target image (JPEG or PNG)
        #[arg(value_name = "IMAGE2")]
        image2: PathBuf,

        /// Similarity threshold (0 - 100), defaults to the configured value
        #[arg(long, value_name = "THRESHOLD")]
        threshold: Option<f64>,

        /// YAML configuration file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Compare {
            image1,
            image2,
            threshold,
            config,
        } => {
            let config = match config {
                Some(path) => FaceCheckConfig::from_file(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => FaceCheckConfig::default(),
            };
            let verifier = build_verifier(&config)?;

            let image1 = read_upload("image1", &image1)
                .await
                .with_context(|| format!("reading {}", image1.display()))?;
            let image2 = read_upload("image2", &image2)
                .await
                .with_context(|| format!("reading {}", image2.display()))?;

            let mut request = VerificationRequest::new(image1, image2, &config.verify);
            if let Some(threshold) = threshold {
                request = request.with_threshold(threshold);
            }

            let result = verifier.verify(request).await?;
            let response = VerificationResponse::from(result);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
