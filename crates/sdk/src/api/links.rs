//! Links API endpoints.

use crate::client::SefariaClient;
use crate::error::SefariaResult;
use serde_json::Value;

/// Whether linked passages should carry their text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkText {
    #[default]
    Exclude,
    Include,
}

impl LinkText {
    /// The `with_text` flag value.
    pub fn as_flag(&self) -> &'static str {
        match self {
            Self::Exclude => "0",
            Self::Include => "1",
        }
    }
}

/// Links API for cross-references between texts.
pub struct LinksApi<'a> {
    client: &'a SefariaClient,
}

impl<'a> LinksApi<'a> {
    pub(crate) fn new(client: &'a SefariaClient) -> Self {
        Self { client }
    }

    /// Get links for a reference.
    pub async fn get(&self, reference: &str, with_text: LinkText) -> SefariaResult<Value> {
        self.client
            .http
            .get_with_query("api/links", Some(reference), &[("with_text", with_text.as_flag())])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::LinkText;
    use crate::api::test_support::mock_client;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn test_get_links_with_text() {
        let (server, client) = mock_client().await;

        Mock::given(method("GET"))
            .and(path("/api/links/Genesis%201:1"))
            .and(query_param("with_text", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"ref": "Rashi on Genesis 1:1:1", "category": "Commentary"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let links = client.links().get("Genesis 1:1", LinkText::Include).await.unwrap();
        assert_eq!(links.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_links_default_flag() {
        let (server, client) = mock_client().await;

        Mock::given(method("GET"))
            .and(path("/api/links/Genesis%201:1"))
            .and(query_param("with_text", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        client.links().get("Genesis 1:1", LinkText::default()).await.unwrap();
    }
}
