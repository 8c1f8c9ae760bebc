//! Calendars API endpoints.

use crate::client::SefariaClient;
use crate::error::SefariaResult;
use serde_json::Value;

/// Calendars API for today's learning schedule.
pub struct CalendarsApi<'a> {
    client: &'a SefariaClient,
}

impl<'a> CalendarsApi<'a> {
    pub(crate) fn new(client: &'a SefariaClient) -> Self {
        Self { client }
    }

    /// Get today's calendar entries (weekly portion, daily learning and so on).
    pub async fn today(&self) -> SefariaResult<Value> {
        self.client.http.get("api/calendars", None).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::mock_client;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn test_today() {
        let (server, client) = mock_client().await;

        Mock::given(method("GET"))
            .and(path("/api/calendars"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "date": "2024-10-03",
                "calendar_items": [{"title": {"en": "Parashat Hashavua"}}]
            })))
            .mount(&server)
            .await;

        let calendars = client.calendars().today().await.unwrap();
        assert_eq!(calendars["date"], "2024-10-03");
    }
}
