// Library structure tools: index records, name lookup and shapes

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_integer, json_schema_object, json_schema_string, parse_args, Tool};
use anyhow::{Context, Result};
use sefaria_core::reshape;
use sefaria_sdk::{NameQuery, SefariaClient};
use serde::Deserialize;
use std::sync::Arc;

/// Tool to fetch the bibliographic index of a work
pub struct GetIndexTool {
    client: Arc<SefariaClient>,
}

impl GetIndexTool {
    pub fn new(client: Arc<SefariaClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetIndexArgs {
    title: String,
}

#[async_trait::async_trait]
impl Tool for GetIndexTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_index".to_string(),
            description: "Retrieves the bibliographic and structural information (index) for a text or work.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "title": json_schema_string("Title of the text or work (e.g. 'Genesis', 'Mishnah Berakhot')")
                }),
                vec!["title"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetIndexArgs = parse_args("get_index", arguments)?;

        let data = self
            .client
            .index()
            .get(&args.title)
            .await
            .with_context(|| format!("Failed to fetch index for '{}'", args.title))?;

        Ok(CallToolResult::json(&reshape::optimize_index(&data))?)
    }
}

/// Tool to validate and autocomplete names
pub struct GetNameTool {
    client: Arc<SefariaClient>,
}

impl GetNameTool {
    pub fn new(client: Arc<SefariaClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetNameArgs {
    name: String,
    #[serde(default)]
    limit: Option<u64>,
    #[serde(default)]
    type_filter: Option<String>,
}

#[async_trait::async_trait]
impl Tool for GetNameTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_name".to_string(),
            description: "Validates and autocompletes text names, book titles, references, and topic slugs.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "name": json_schema_string("Partial or complete name to validate/complete"),
                    "limit": json_schema_integer(0, "Maximum number of suggestions to return (0 for no limit)"),
                    "type_filter": json_schema_string("Filter results by type (e.g. 'ref', 'Topic')")
                }),
                vec!["name"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetNameArgs = parse_args("get_name", arguments)?;

        let query = NameQuery {
            limit: args.limit,
            type_filter: args.type_filter,
        };
        let data = self
            .client
            .names()
            .get(&args.name, &query)
            .await
            .with_context(|| format!("Failed to look up name '{}'", args.name))?;

        Ok(CallToolResult::json(&data)?)
    }
}

/// Tool to fetch the shape of a text or category
pub struct GetShapeTool {
    client: Arc<SefariaClient>,
}

impl GetShapeTool {
    pub fn new(client: Arc<SefariaClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetShapeArgs {
    name: String,
}

#[async_trait::async_trait]
impl Tool for GetShapeTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_shape".to_string(),
            description: "Retrieves the hierarchical structure and organization of texts or categories.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "name": json_schema_string("Text title or category name")
                }),
                vec!["name"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetShapeArgs = parse_args("get_shape", arguments)?;

        let data = self
            .client
            .shape()
            .get(&args.name)
            .await
            .with_context(|| format!("Failed to fetch shape of '{}'", args.name))?;

        Ok(CallToolResult::json(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{json_of, mock_client, text_of};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn test_get_index_keeps_structural_fields() {
        let (server, client) = mock_client().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/raw/index/Genesis"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "title": "Genesis",
                "categories": ["Tanakh", "Torah"],
                "schema": {"nodeType": "JaggedArrayNode"},
                "order": [1],
                "enDesc": "A very long description"
            })))
            .mount(&server)
            .await;

        let result = GetIndexTool::new(client)
            .execute(json!({"title": "Genesis"}))
            .await
            .unwrap();

        let body = json_of(&result);
        assert_eq!(body["categories"], json!(["Tanakh", "Torah"]));
        assert!(body.get("order").is_none());
        assert!(body.get("enDesc").is_none());
    }

    #[tokio::test]
    async fn test_get_name_passes_filters_through() {
        let (server, client) = mock_client().await;

        Mock::given(method("GET"))
            .and(path("/api/name/Mishnah%20Ber"))
            .and(query_param("limit", "3"))
            .and(query_param("type", "ref"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "completions": ["Mishnah Berakhot"],
                "is_ref": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = GetNameTool::new(client)
            .execute(json!({"name": "Mishnah Ber", "limit": 3, "type_filter": "ref"}))
            .await
            .unwrap();

        assert_eq!(json_of(&result)["completions"][0], "Mishnah Berakhot");
    }

    #[tokio::test]
    async fn test_get_shape_raw_output_is_pretty() {
        let (server, client) = mock_client().await;

        Mock::given(method("GET"))
            .and(path("/api/shape/Tanakh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"title": "בראשית"}])))
            .mount(&server)
            .await;

        let result = GetShapeTool::new(client)
            .execute(json!({"name": "Tanakh"}))
            .await
            .unwrap();

        let text = text_of(&result);
        assert!(text.contains('\n'));
        assert!(text.contains("בראשית"));
    }
}
