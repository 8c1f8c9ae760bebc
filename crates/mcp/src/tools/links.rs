// Cross-reference tool

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_enum, json_schema_object, json_schema_string, parse_args, Tool};
use anyhow::{Context, Result};
use sefaria_core::reshape;
use sefaria_sdk::{LinkText, SefariaClient};
use serde::Deserialize;
use std::sync::Arc;

/// Tool to find links to a passage
pub struct GetLinksTool {
    client: Arc<SefariaClient>,
}

impl GetLinksTool {
    pub fn new(client: Arc<SefariaClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetLinksArgs {
    reference: String,
    #[serde(default)]
    with_text: Option<String>,
}

#[async_trait::async_trait]
impl Tool for GetLinksTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_links".to_string(),
            description: "Finds all cross-references and connections to a specific text passage.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "reference": json_schema_string("Specific text reference (e.g. 'Genesis 1:1', 'Berakhot 2a')"),
                    "with_text": json_schema_enum(
                        &["0", "1"],
                        "Whether to include the actual text content ('0' or '1', default '0')"
                    )
                }),
                vec!["reference"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetLinksArgs = parse_args("get_links", arguments)?;

        let with_text = match args.with_text.as_deref() {
            Some("1") => LinkText::Include,
            _ => LinkText::Exclude,
        };
        let data = self
            .client
            .links()
            .get(&args.reference, with_text)
            .await
            .with_context(|| format!("Failed to fetch links for '{}'", args.reference))?;

        Ok(CallToolResult::json(&reshape::optimize_links(&data))?)
    }
}
