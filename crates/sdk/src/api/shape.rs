//! Shape API endpoints.

use crate::client::SefariaClient;
use crate::error::SefariaResult;
use serde_json::Value;

/// Shape API for the structure of books and categories.
pub struct ShapeApi<'a> {
    client: &'a SefariaClient,
}

impl<'a> ShapeApi<'a> {
    pub(crate) fn new(client: &'a SefariaClient) -> Self {
        Self { client }
    }

    /// Get the shape of a book or category path.
    pub async fn get(&self, name: &str) -> SefariaResult<Value> {
        self.client.http.get("api/shape", Some(name)).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::mock_client;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn test_shape_of_category_path() {
        let (server, client) = mock_client().await;

        Mock::given(method("GET"))
            .and(path("/api/shape/Tanakh/Torah"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"title": "Genesis", "length": 50}])))
            .expect(1)
            .mount(&server)
            .await;

        let shape = client.shape().get("Tanakh/Torah").await.unwrap();
        assert_eq!(shape[0]["length"], 50);
    }
}
