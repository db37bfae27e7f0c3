//! Example client for the face verification API
//!
//! ```text
//! cargo run -p face-verification-server --example api_client -- a.jpg b.png 90
//! ```

use reqwest::multipart::{Form, Part};
use reqwest::Client;

const SERVER_URL: &str = "http://localhost:8000";

fn mime_for(path: &str) -> &'static str {
    if path.to_ascii_lowercase().ends_with(".png") {
        "image/png"
    } else {
        "image/jpeg"
    }
}

async fn file_part(path: &str) -> anyhow::Result<Part> {
    let bytes = tokio::fs::read(path).await?;
    let name = std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(Part::bytes(bytes).file_name(name).mime_str(mime_for(path))?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let client = Client::new();

    // Example 1: Health check
    println!("1. Health Check:");
    let resp = client.get(format!("{SERVER_URL}/health")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 2: Capabilities
    println!("2. Service Info:");
    let resp = client.get(format!("{SERVER_URL}/info")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    let (Some(image1), Some(image2)) = (args.first(), args.get(1)) else {
        println!("Pass two image paths (and optionally a threshold) to run a verification.");
        return Ok(());
    };

    // Example 3: Verify two faces
    println!("3. Verify Faces:");
    let mut form = Form::new()
        .part("image1", file_part(image1).await?)
        .part("image2", file_part(image2).await?);
    if let Some(threshold) = args.get(2) {
        form = form.text("similarity_threshold", threshold.clone());
    }
    let resp = client
        .post(format!("{SERVER_URL}/verify-faces"))
        .multipart(form)
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);

    Ok(())
}
