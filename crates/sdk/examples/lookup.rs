//! Look up a reference and print its reshaped text and links.
//!
//! ```sh
//! cargo run -p sefaria-sdk --example lookup -- "Genesis 1:1"
//! ```

use sefaria_core::reshape;
use sefaria_sdk::{LinkText, SefariaClient, VersionLanguage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let reference = std::env::args().nth(1).unwrap_or_else(|| "Genesis 1:1".to_string());

    let client = SefariaClient::builder()
        .base_url(std::env::var("SEFARIA_API_BASE_URL").unwrap_or_else(|_| sefaria_sdk::DEFAULT_BASE_URL.to_string()))
        .build()?;

    println!("=== Text ===");
    let text = client.texts().get(&reference, Some(VersionLanguage::Both)).await?;
    println!("{}", serde_json::to_string_pretty(&reshape::optimize_text(&text))?);

    println!("\n=== Links ===");
    let links = client.links().get(&reference, LinkText::Exclude).await?;
    let links = reshape::optimize_links(&links);
    println!("Found {} links", links.as_array().map(Vec::len).unwrap_or(0));

    Ok(())
}
