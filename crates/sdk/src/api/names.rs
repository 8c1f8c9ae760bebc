//! Name (autocomplete) API endpoints.

use crate::client::SefariaClient;
use crate::error::SefariaResult;
use serde::Serialize;
use serde_json::Value;

/// Optional parameters of a name lookup.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NameQuery {
    /// Number of results to return, 0 for no limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Restrict results to one type such as `ref`, `Topic` or `Collection`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_filter: Option<String>,
}

/// Names API for resolving free text into references, topics and authors.
pub struct NamesApi<'a> {
    client: &'a SefariaClient,
}

impl<'a> NamesApi<'a> {
    pub(crate) fn new(client: &'a SefariaClient) -> Self {
        Self { client }
    }

    /// Look up a name.
    pub async fn get(&self, name: &str, query: &NameQuery) -> SefariaResult<Value> {
        self.client
            .http
            .get_with_query("api/name", Some(name), query)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::NameQuery;
    use crate::api::test_support::mock_client;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn test_name_with_filters() {
        let (server, client) = mock_client().await;

        Mock::given(method("GET"))
            .and(path("/api/name/Rashi"))
            .and(query_param("limit", "5"))
            .and(query_param("type", "Topic"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"is_ref": false})))
            .expect(1)
            .mount(&server)
            .await;

        let query = NameQuery {
            limit: Some(5),
            type_filter: Some("Topic".to_string()),
        };
        let result = client.names().get("Rashi", &query).await.unwrap();
        assert_eq!(result["is_ref"], false);
    }

    #[tokio::test]
    async fn test_name_without_filters() {
        let (server, client) = mock_client().await;

        Mock::given(method("GET"))
            .and(path("/api/name/%D7%A9%D7%91%D7%AA"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"completions": []})))
            .mount(&server)
            .await;

        client.names().get("שבת", &NameQuery::default()).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), None);
    }
}
