pub mod calendar;
pub mod library;
pub mod links;
pub mod manuscripts;
mod registry;
pub mod search;
pub mod texts;
pub mod topics;

pub use calendar::SituationalInfoTool;
pub use library::{GetIndexTool, GetNameTool, GetShapeTool};
pub use links::GetLinksTool;
pub use manuscripts::{GetManuscriptInfoTool, GetManuscriptTool};
pub use registry::{
    json_schema_array, json_schema_boolean, json_schema_enum, json_schema_integer,
    json_schema_object, json_schema_string, validate_arguments, ArgumentError, Tool, ToolRegistry,
};
pub use search::{SearchDictionariesTool, SearchInBookTool, SearchPathFilterTool, SearchTextsTool};
pub use texts::{GetEnglishTranslationsTool, GetTextTool};
pub use topics::GetTopicsTool;

use anyhow::{Context, Result};
use sefaria_core::manuscript::MAX_IMAGE_BYTES;
use sefaria_sdk::SefariaClient;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Settings shared by tools that need more than an API client
#[derive(Debug, Clone)]
pub struct ToolSettings {
    /// Largest manuscript image returned without resizing
    pub max_image_bytes: usize,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            max_image_bytes: MAX_IMAGE_BYTES,
        }
    }
}

/// Build a registry holding every Sefaria tool
pub fn sefaria_registry(client: Arc<SefariaClient>, settings: ToolSettings) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    // Texts
    registry.register(Arc::new(GetTextTool::new(client.clone())));
    registry.register(Arc::new(GetEnglishTranslationsTool::new(client.clone())));

    // Library structure
    registry.register(Arc::new(GetIndexTool::new(client.clone())));
    registry.register(Arc::new(GetNameTool::new(client.clone())));
    registry.register(Arc::new(GetShapeTool::new(client.clone())));
    registry.register(Arc::new(GetLinksTool::new(client.clone())));
    registry.register(Arc::new(GetTopicsTool::new(client.clone())));

    // Manuscripts
    registry.register(Arc::new(GetManuscriptInfoTool::new(client.clone())));
    registry.register(Arc::new(GetManuscriptTool::new(
        client.clone(),
        settings.max_image_bytes,
    )));

    // Search
    registry.register(Arc::new(SearchTextsTool::new(client.clone())));
    registry.register(Arc::new(SearchInBookTool::new(client.clone())));
    registry.register(Arc::new(SearchDictionariesTool::new(client.clone())));
    registry.register(Arc::new(SearchPathFilterTool::new(client.clone())));

    // Calendar
    registry.register(Arc::new(SituationalInfoTool::new(client)));

    registry
}

/// Deserialize validated tool arguments, treating absent arguments as `{}`
pub(crate) fn parse_args<T: DeserializeOwned>(tool: &str, arguments: serde_json::Value) -> Result<T> {
    let arguments = if arguments.is_null() {
        serde_json::Value::Object(Default::default())
    } else {
        arguments
    };
    serde_json::from_value(arguments).with_context(|| format!("Invalid arguments for {}", tool))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::protocol::{CallToolResult, ToolContent};
    use sefaria_sdk::SefariaClient;
    use std::sync::Arc;
    use wiremock::MockServer;

    pub async fn mock_client() -> (MockServer, Arc<SefariaClient>) {
        let server = MockServer::start().await;
        let client = SefariaClient::builder()
            .base_url(server.uri())
            .build()
            .unwrap();
        (server, Arc::new(client))
    }

    /// Text of the first text content block
    pub fn text_of(result: &CallToolResult) -> &str {
        result
            .content
            .iter()
            .find_map(|content| match content {
                ToolContent::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn json_of(result: &CallToolResult) -> serde_json::Value {
        serde_json::from_str(text_of(result)).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_registry_lists_every_tool_sorted() {
        let client = Arc::new(SefariaClient::new().unwrap());
        let registry = sefaria_registry(client, ToolSettings::default());

        let names: Vec<String> = registry.list_schemas().into_iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "get_english_translations",
                "get_index",
                "get_links",
                "get_manuscript",
                "get_manuscript_info",
                "get_name",
                "get_search_path_filter",
                "get_shape",
                "get_situational_info",
                "get_text",
                "get_topics",
                "search_dictionaries",
                "search_in_book",
                "search_texts",
            ]
        );
    }

    #[tokio::test]
    async fn test_every_schema_is_a_closed_object() {
        let client = Arc::new(SefariaClient::new().unwrap());
        let registry = sefaria_registry(client, ToolSettings::default());

        for schema in registry.list_schemas() {
            assert_eq!(schema.input_schema["type"], "object", "{}", schema.name);
            assert_eq!(schema.input_schema["additionalProperties"], false, "{}", schema.name);
            assert!(!schema.description.is_empty(), "{}", schema.name);
        }
    }
}
