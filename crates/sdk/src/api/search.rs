//! Search API endpoints.

use crate::client::SefariaClient;
use crate::error::SefariaResult;
use sefaria_core::SearchQuery;
use serde_json::Value;
use tracing::debug;

/// Search API backed by Sefaria's Elasticsearch wrapper.
pub struct SearchApi<'a> {
    client: &'a SefariaClient,
}

impl<'a> SearchApi<'a> {
    pub(crate) fn new(client: &'a SefariaClient) -> Self {
        Self { client }
    }

    /// Run a search query.
    pub async fn query(&self, query: &SearchQuery) -> SefariaResult<Value> {
        self.client.http.post("api/search-wrapper/es8", query).await
    }

    /// Resolve a book name to its search filter path.
    ///
    /// Returns `None` when the API has no path for the book.
    pub async fn path_filter(&self, book_name: &str) -> SefariaResult<Option<String>> {
        let body = self
            .client
            .http
            .get_text("api/search-path-filter", Some(book_name))
            .await?;

        let path = match serde_json::from_str::<Value>(&body) {
            Ok(Value::String(path)) => path,
            Ok(Value::Object(_)) | Ok(Value::Null) => String::new(),
            _ => body.trim().to_string(),
        };
        debug!(book = book_name, path = %path, "Resolved search path filter");

        let path = path.trim();
        Ok((!path.is_empty()).then(|| path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::mock_client;
    use sefaria_core::SearchQuery;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn test_query_posts_body() {
        let (server, client) = mock_client().await;

        Mock::given(method("POST"))
            .and(path("/api/search-wrapper/es8"))
            .and(body_partial_json(json!({
                "query": "light",
                "filters": ["Tanakh"],
                "filter_fields": [null],
                "type": "text",
                "size": 5
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": {"hits": []}})))
            .expect(1)
            .mount(&server)
            .await;

        let query = SearchQuery::new("light", vec!["Tanakh".to_string()], 5);
        let response = client.search().query(&query).await.unwrap();
        assert!(response["hits"]["hits"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_path_filter_plain_text() {
        let (server, client) = mock_client().await;

        Mock::given(method("GET"))
            .and(path("/api/search-path-filter/Genesis"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Tanakh/Torah/Genesis\n"))
            .mount(&server)
            .await;

        let filter = client.search().path_filter("Genesis").await.unwrap();
        assert_eq!(filter.as_deref(), Some("Tanakh/Torah/Genesis"));
    }

    #[tokio::test]
    async fn test_path_filter_json_string() {
        let (server, client) = mock_client().await;

        Mock::given(method("GET"))
            .and(path("/api/search-path-filter/Berakhot"))
            .respond_with(ResponseTemplate::new(200).set_body_string("\"Talmud/Bavli/Seder Zeraim/Berakhot\""))
            .mount(&server)
            .await;

        let filter = client.search().path_filter("Berakhot").await.unwrap();
        assert_eq!(filter.as_deref(), Some("Talmud/Bavli/Seder Zeraim/Berakhot"));
    }

    #[tokio::test]
    async fn test_path_filter_empty() {
        let (server, client) = mock_client().await;

        Mock::given(method("GET"))
            .and(path("/api/search-path-filter/Nothing"))
            .respond_with(ResponseTemplate::new(200).set_body_string("  "))
            .mount(&server)
            .await;

        assert_eq!(client.search().path_filter("Nothing").await.unwrap(), None);
    }
}
