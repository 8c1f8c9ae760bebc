//! Index API endpoints.

use crate::client::SefariaClient;
use crate::error::SefariaResult;
use serde_json::Value;

/// Index API for bibliographic records.
pub struct IndexApi<'a> {
    client: &'a SefariaClient,
}

impl<'a> IndexApi<'a> {
    pub(crate) fn new(client: &'a SefariaClient) -> Self {
        Self { client }
    }

    /// Get the raw index record of a book.
    pub async fn get(&self, title: &str) -> SefariaResult<Value> {
        self.client.http.get("api/v2/raw/index", Some(title)).await
    }
}
