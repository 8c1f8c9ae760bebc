//! Manuscripts API endpoints.

use crate::client::SefariaClient;
use crate::error::SefariaResult;
use crate::transport::Download;
use serde_json::Value;

/// Manuscripts API for scanned pages and their images.
pub struct ManuscriptsApi<'a> {
    client: &'a SefariaClient,
}

impl<'a> ManuscriptsApi<'a> {
    pub(crate) fn new(client: &'a SefariaClient) -> Self {
        Self { client }
    }

    /// Get manuscript records for a reference.
    pub async fn get(&self, reference: &str) -> SefariaResult<Value> {
        self.client.http.get("api/manuscripts", Some(reference)).await
    }

    /// Download a manuscript image from its absolute URL.
    pub async fn download(&self, image_url: &str) -> SefariaResult<Download> {
        self.client.http.download(image_url).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::mock_client;
    use crate::error::SefariaError;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn test_get_manuscripts() {
        let (server, client) = mock_client().await;

        Mock::given(method("GET"))
            .and(path("/api/manuscripts/Berakhot%202a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"manuscript_slug": "munich-95", "image_url": "https://example.org/leaf.jpg"}
            ])))
            .mount(&server)
            .await;

        let manuscripts = client.manuscripts().get("Berakhot 2a").await.unwrap();
        assert_eq!(manuscripts[0]["manuscript_slug"], "munich-95");
    }

    #[tokio::test]
    async fn test_download_image() {
        let (server, client) = mock_client().await;

        Mock::given(method("GET"))
            .and(path("/static/munich-95/leaf.jpg"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/jpeg")
                    .set_body_bytes(vec![0xFFu8, 0xD8, 0xFF]),
            )
            .mount(&server)
            .await;

        let download = client
            .manuscripts()
            .download(&format!("{}/static/munich-95/leaf.jpg", server.uri()))
            .await
            .unwrap();
        assert_eq!(download.bytes.len(), 3);
        assert_eq!(download.content_type.as_deref(), Some("image/jpeg"));
    }

    #[tokio::test]
    async fn test_download_failure_status() {
        let (server, client) = mock_client().await;

        Mock::given(method("GET"))
            .and(path("/missing.jpg"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client
            .manuscripts()
            .download(&format!("{}/missing.jpg", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, SefariaError::Api { status: 404, .. }));
    }
}
