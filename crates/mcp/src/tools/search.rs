// Search tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    json_schema_array, json_schema_integer, json_schema_object, json_schema_string, parse_args,
    Tool,
};
use anyhow::{Context, Result};
use sefaria_core::search::{
    dictionary_entries, format_hits, has_hits, lexicon_filters, total_hits,
    DICTIONARY_RESULT_SIZE,
};
use sefaria_core::{SearchQuery, SearchResult};
use sefaria_sdk::SefariaClient;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Results returned when the caller gives no size
pub const DEFAULT_RESULT_SIZE: u32 = 10;

fn default_size() -> u32 {
    DEFAULT_RESULT_SIZE
}

/// Search with `filters`, retrying once without them when nothing matches
async fn search_with_fallback(
    client: &SefariaClient,
    query: &str,
    filters: Vec<String>,
    size: u32,
) -> Result<Vec<SearchResult>> {
    let request = SearchQuery::new(query, filters, size);
    let mut response = client
        .search()
        .query(&request)
        .await
        .with_context(|| format!("Search for '{}' failed", query))?;

    let mut filters_dropped = false;
    if !has_hits(&response) && !request.filters.is_empty() {
        info!(query, filters = ?request.filters, "No results with filters, retrying without");
        response = client
            .search()
            .query(&request.without_filters())
            .await
            .with_context(|| format!("Unfiltered search for '{}' failed", query))?;
        filters_dropped = true;
    }

    debug!(query, total = total_hits(&response), "Search complete");
    Ok(format_hits(&response, &request.filters, filters_dropped))
}

/// Tool to search the whole library
pub struct SearchTextsTool {
    client: Arc<SefariaClient>,
}

impl SearchTextsTool {
    pub fn new(client: Arc<SefariaClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct SearchTextsArgs {
    query: String,
    #[serde(default)]
    filters: Option<Vec<String>>,
    #[serde(default = "default_size")]
    size: u32,
}

#[async_trait::async_trait]
impl Tool for SearchTextsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search_texts".to_string(),
            description: "Searches across the entire Jewish library for passages containing specific terms.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "query": json_schema_string("Search terms"),
                    "filters": json_schema_array(
                        json_schema_string("Category path such as 'Tanakh', 'Talmud/Bavli' or 'Tanakh/Torah'"),
                        "Category paths to limit search scope"
                    ),
                    "size": json_schema_integer(1, "Maximum number of results to return (default 10)")
                }),
                vec!["query"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: SearchTextsArgs = parse_args("search_texts", arguments)?;

        let results = search_with_fallback(
            &self.client,
            &args.query,
            args.filters.unwrap_or_default(),
            args.size,
        )
        .await?;

        Ok(CallToolResult::json(&results)?)
    }
}

/// Tool to search within one book
pub struct SearchInBookTool {
    client: Arc<SefariaClient>,
}

impl SearchInBookTool {
    pub fn new(client: Arc<SefariaClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct SearchInBookArgs {
    query: String,
    book_name: String,
    #[serde(default = "default_size")]
    size: u32,
}

#[async_trait::async_trait]
impl Tool for SearchInBookTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search_in_book".to_string(),
            description: "Searches for content within one specific book or text work.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "query": json_schema_string("Search terms to find within the specified book"),
                    "book_name": json_schema_string("Exact name of the book to search within"),
                    "size": json_schema_integer(1, "Maximum number of results to return (default 10)")
                }),
                vec!["query", "book_name"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: SearchInBookArgs = parse_args("search_in_book", arguments)?;

        let filter = self
            .client
            .search()
            .path_filter(&args.book_name)
            .await
            .with_context(|| format!("Failed to resolve search path for '{}'", args.book_name))?;

        let Some(filter) = filter else {
            return Ok(CallToolResult::error(format!(
                "Could not find valid filter path for book '{}'",
                args.book_name
            )));
        };

        let results =
            search_with_fallback(&self.client, &args.query, vec![filter], args.size).await?;

        Ok(CallToolResult::json(&results)?)
    }
}

/// Tool to search the lexicons
pub struct SearchDictionariesTool {
    client: Arc<SefariaClient>,
}

impl SearchDictionariesTool {
    pub fn new(client: Arc<SefariaClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct SearchDictionariesArgs {
    query: String,
}

#[async_trait::async_trait]
impl Tool for SearchDictionariesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search_dictionaries".to_string(),
            description: "Searches specifically within Jewish reference dictionaries.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "query": json_schema_string("Hebrew, Aramaic, or English term to look up")
                }),
                vec!["query"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: SearchDictionariesArgs = parse_args("search_dictionaries", arguments)?;

        let request = SearchQuery::new(&args.query, lexicon_filters(), DICTIONARY_RESULT_SIZE);
        let response = self
            .client
            .search()
            .query(&request)
            .await
            .with_context(|| format!("Dictionary search for '{}' failed", args.query))?;

        Ok(CallToolResult::json(&dictionary_entries(&response))?)
    }
}

/// Tool to turn a book name into a search filter path
pub struct SearchPathFilterTool {
    client: Arc<SefariaClient>,
}

impl SearchPathFilterTool {
    pub fn new(client: Arc<SefariaClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct SearchPathFilterArgs {
    book_name: String,
}

#[async_trait::async_trait]
impl Tool for SearchPathFilterTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_search_path_filter".to_string(),
            description: "Converts a book name into a proper search filter path.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "book_name": json_schema_string("Name of the book to convert")
                }),
                vec!["book_name"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: SearchPathFilterArgs = parse_args("get_search_path_filter", arguments)?;

        let filter = self
            .client
            .search()
            .path_filter(&args.book_name)
            .await
            .with_context(|| format!("Failed to resolve search path for '{}'", args.book_name))?;

        Ok(match filter {
            Some(path) => CallToolResult::text(path),
            None => CallToolResult::error(format!(
                "Could not find valid filter path for book '{}'",
                args.book_name
            )),
        })
    }
}
