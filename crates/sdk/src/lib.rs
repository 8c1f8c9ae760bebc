//! # Sefaria SDK
//!
//! Async Rust client for the [Sefaria](https://www.sefaria.org) API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sefaria_sdk::{SefariaClient, SefariaResult, VersionLanguage};
//!
//! #[tokio::main]
//! async fn main() -> SefariaResult<()> {
//!     // Build client against the public instance
//!     let client = SefariaClient::builder().build()?;
//!
//!     // Fetch a verse in both languages
//!     let text = client
//!         .texts()
//!         .get("Genesis 1:1", Some(VersionLanguage::Both))
//!         .await?;
//!     println!("{}", text["ref"]);
//!
//!     // Resolve a book into a search filter
//!     let filter = client.search().path_filter("Berakhot").await?;
//!     println!("{:?}", filter);
//!
//!     Ok(())
//! }
//! ```
//!
//! Responses are returned as `serde_json::Value`; reshaping for language
//! models lives in `sefaria_core::reshape`.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

// Re-export main client
pub use client::{SefariaClient, SefariaClientBuilder};
pub use config::{ClientConfig, RetryConfig, DEFAULT_BASE_URL, DEFAULT_MAX_DOWNLOAD_BYTES};
pub use error::{SefariaError, SefariaResult};
pub use transport::Download;

// Re-export the API option types
pub use api::{LinkText, NameQuery, TopicOptions};

// Re-export core types for convenience
pub use sefaria_core::{SearchQuery, VersionLanguage};
