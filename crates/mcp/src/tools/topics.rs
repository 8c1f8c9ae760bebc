// Topic lookup tool

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_boolean, json_schema_object, json_schema_string, parse_args, Tool};
use anyhow::{Context, Result};
use sefaria_core::reshape;
use sefaria_sdk::{SefariaClient, TopicOptions};
use serde::Deserialize;
use std::sync::Arc;

/// Tool to describe a topic in Jewish thought
pub struct GetTopicsTool {
    client: Arc<SefariaClient>,
}

impl GetTopicsTool {
    pub fn new(client: Arc<SefariaClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetTopicsArgs {
    topic_slug: String,
    #[serde(default)]
    with_links: Option<bool>,
    #[serde(default)]
    with_refs: Option<bool>,
}

#[async_trait::async_trait]
impl Tool for GetTopicsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_topics".to_string(),
            description: "Retrieves detailed information about specific topics in Jewish thought and texts.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "topic_slug": json_schema_string("Topic identifier slug (e.g. 'moses', 'sabbath')"),
                    "with_links": json_schema_boolean("Include links to related topics"),
                    "with_refs": json_schema_boolean("Include text references tagged with this topic")
                }),
                vec!["topic_slug"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetTopicsArgs = parse_args("get_topics", arguments)?;

        let options = TopicOptions {
            with_links: args.with_links.unwrap_or(false),
            with_refs: args.with_refs.unwrap_or(false),
        };
        let data = self
            .client
            .topics()
            .get(&args.topic_slug, options)
            .await
            .with_context(|| format!("Failed to fetch topic '{}'", args.topic_slug))?;

        Ok(CallToolResult::json(&reshape::optimize_topics(&data))?)
    }
}
