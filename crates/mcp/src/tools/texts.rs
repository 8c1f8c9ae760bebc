// Text retrieval tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_enum, json_schema_object, json_schema_string, parse_args, Tool};
use anyhow::{Context, Result};
use sefaria_core::{reshape, VersionLanguage};
use sefaria_sdk::SefariaClient;
use serde::Deserialize;
use std::sync::Arc;

const REFERENCE_HELP: &str = "Specific text reference (e.g. 'Genesis 1:1', 'Berakhot 2a')";

/// Tool to fetch the text at a reference
pub struct GetTextTool {
    client: Arc<SefariaClient>,
}

impl GetTextTool {
    pub fn new(client: Arc<SefariaClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetTextArgs {
    reference: String,
    #[serde(default)]
    version_language: Option<VersionLanguage>,
}

#[async_trait::async_trait]
impl Tool for GetTextTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_text".to_string(),
            description: "Retrieves the actual text content from a specific reference in the Jewish library.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "reference": json_schema_string(REFERENCE_HELP),
                    "version_language": json_schema_enum(
                        &["source", "english", "both"],
                        "Which language version to retrieve. Omit for the default versions."
                    )
                }),
                vec!["reference"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetTextArgs = parse_args("get_text", arguments)?;

        let data = self
            .client
            .texts()
            .get(&args.reference, args.version_language)
            .await
            .with_context(|| format!("Failed to fetch text for '{}'", args.reference))?;

        Ok(CallToolResult::json(&reshape::optimize_text(&data))?)
    }
}

/// Tool to list every English translation of a reference
pub struct GetEnglishTranslationsTool {
    client: Arc<SefariaClient>,
}

impl GetEnglishTranslationsTool {
    pub fn new(client: Arc<SefariaClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ReferenceArgs {
    reference: String,
}

#[async_trait::async_trait]
impl Tool for GetEnglishTranslationsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_english_translations".to_string(),
            description: "Retrieves all available English translations for a specific text reference.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "reference": json_schema_string(REFERENCE_HELP)
                }),
                vec!["reference"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ReferenceArgs = parse_args("get_english_translations", arguments)?;

        let data = self
            .client
            .texts()
            .english_versions(&args.reference)
            .await
            .with_context(|| format!("Failed to fetch English translations for '{}'", args.reference))?;

        Ok(CallToolResult::json(&reshape::english_translations(
            &args.reference,
            &data,
        ))?)
    }
}
