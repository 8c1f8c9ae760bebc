// Manuscript tools: metadata lookup and image download

use crate::protocol::{CallToolResult, ToolContent, ToolSchema};
use crate::tools::{json_schema_object, json_schema_string, parse_args, Tool};
use anyhow::{Context, Result};
use sefaria_core::manuscript::{normalize_mime, shrink_to_limit};
use sefaria_core::ManuscriptImage;
use sefaria_sdk::SefariaClient;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Tool to list manuscripts covering a reference
pub struct GetManuscriptInfoTool {
    client: Arc<SefariaClient>,
}

impl GetManuscriptInfoTool {
    pub fn new(client: Arc<SefariaClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ManuscriptInfoArgs {
    reference: String,
}

fn is_empty_payload(data: &Value) -> bool {
    match data {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

#[async_trait::async_trait]
impl Tool for GetManuscriptInfoTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_manuscript_info".to_string(),
            description: "Retrieves historical manuscript metadata and image URLs for text passages.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "reference": json_schema_string("Specific text reference to find manuscripts for")
                }),
                vec!["reference"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: ManuscriptInfoArgs = parse_args("get_manuscript_info", arguments)?;

        let data = self
            .client
            .manuscripts()
            .get(&args.reference)
            .await
            .with_context(|| format!("Failed to fetch manuscripts for '{}'", args.reference))?;

        if is_empty_payload(&data) {
            return Ok(CallToolResult::text(format!(
                "No manuscripts found for reference '{}'",
                args.reference
            )));
        }

        Ok(CallToolResult::json(&data)?)
    }
}

/// Tool to download a manuscript image, scaled down when too large
pub struct GetManuscriptTool {
    client: Arc<SefariaClient>,
    max_image_bytes: usize,
}

impl GetManuscriptTool {
    pub fn new(client: Arc<SefariaClient>, max_image_bytes: usize) -> Self {
        Self {
            client,
            max_image_bytes,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ManuscriptArgs {
    image_url: String,
    #[serde(default)]
    manuscript_title: Option<String>,
}

#[async_trait::async_trait]
impl Tool for GetManuscriptTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_manuscript".to_string(),
            description: "Downloads and returns a specific manuscript image from a given image URL.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "image_url": json_schema_string("The URL of the manuscript image to download"),
                    "manuscript_title": json_schema_string("Title or description for the manuscript")
                }),
                vec!["image_url"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: ManuscriptArgs = parse_args("get_manuscript", arguments)?;

        let download = self
            .client
            .manuscripts()
            .download(&args.image_url)
            .await
            .with_context(|| format!("Failed to download manuscript image from {}", args.image_url))?;

        let mime_type = normalize_mime(download.content_type.as_deref());
        let original_size = download.bytes.len();
        let limit = self.max_image_bytes;
        debug!(url = %args.image_url, original_size, mime_type = %mime_type, "Downloaded manuscript image");

        // Decoding and re-encoding is CPU bound
        let shrunk = tokio::task::spawn_blocking(move || {
            shrink_to_limit(download.bytes, &mime_type, limit)
        })
        .await
        .context("Image processing task failed")?;

        let image = ManuscriptImage::new(
            &args.image_url,
            args.manuscript_title.as_deref(),
            original_size,
            shrunk,
        );

        let mut metadata = serde_json::to_value(&image)?;
        if let Some(fields) = metadata.as_object_mut() {
            fields.remove("image_data");
        }

        Ok(CallToolResult {
            content: vec![
                ToolContent::image(image.image_data, image.mime_type),
                ToolContent::text(serde_json::to_string_pretty(&metadata)?),
            ],
            is_error: None,
        })
    }
}
