//! Text API endpoints.

use crate::client::SefariaClient;
use crate::error::{SefariaError, SefariaResult};
use sefaria_core::VersionLanguage;
use serde_json::Value;

const TEXTS_ENDPOINT: &str = "api/v3/texts";

/// Texts API for retrieving passages and their versions.
pub struct TextsApi<'a> {
    client: &'a SefariaClient,
}

impl<'a> TextsApi<'a> {
    pub(crate) fn new(client: &'a SefariaClient) -> Self {
        Self { client }
    }

    /// Get the text at a reference.
    ///
    /// Without a version language the API picks its default versions.
    pub async fn get(&self, reference: &str, version: Option<VersionLanguage>) -> SefariaResult<Value> {
        ensure_reference(reference)?;

        let query: Vec<(&str, &str)> = version
            .map(|v| v.query_values().iter().map(|value| ("version", *value)).collect())
            .unwrap_or_default();

        self.client
            .http
            .get_with_query(TEXTS_ENDPOINT, Some(reference), &query)
            .await
    }

    /// Get every English version available for a reference.
    pub async fn english_versions(&self, reference: &str) -> SefariaResult<Value> {
        ensure_reference(reference)?;

        self.client
            .http
            .get_with_query(TEXTS_ENDPOINT, Some(reference), &[("version", "english|all")])
            .await
    }
}

fn ensure_reference(reference: &str) -> SefariaResult<()> {
    if reference.trim().is_empty() {
        return Err(SefariaError::InvalidInput("reference must not be empty".to_string()));
    }
    Ok(())
}
