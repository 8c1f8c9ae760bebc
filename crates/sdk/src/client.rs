//! Main client for the Sefaria SDK.

use crate::api::*;
use crate::config::{
    default_user_agent, ClientConfig, RetryConfig, DEFAULT_BASE_URL, DEFAULT_MAX_DOWNLOAD_BYTES,
};
use crate::error::SefariaResult;
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main client for interacting with the Sefaria API.
#[derive(Debug, Clone)]
pub struct SefariaClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl SefariaClient {
    /// Create a new client builder.
    pub fn builder() -> SefariaClientBuilder {
        SefariaClientBuilder::new()
    }

    /// Create a client for the public Sefaria instance.
    pub fn new() -> SefariaResult<Self> {
        Self::builder().build()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> SefariaResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// Configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the texts API.
    pub fn texts(&self) -> TextsApi<'_> {
        TextsApi::new(self)
    }

    /// Get the index API.
    pub fn index(&self) -> IndexApi<'_> {
        IndexApi::new(self)
    }

    /// Get the links API.
    pub fn links(&self) -> LinksApi<'_> {
        LinksApi::new(self)
    }

    /// Get the name (autocomplete) API.
    pub fn names(&self) -> NamesApi<'_> {
        NamesApi::new(self)
    }

    /// Get the shape API.
    pub fn shape(&self) -> ShapeApi<'_> {
        ShapeApi::new(self)
    }

    /// Get the topics API.
    pub fn topics(&self) -> TopicsApi<'_> {
        TopicsApi::new(self)
    }

    /// Get the manuscripts API.
    pub fn manuscripts(&self) -> ManuscriptsApi<'_> {
        ManuscriptsApi::new(self)
    }

    /// Get the search API.
    pub fn search(&self) -> SearchApi<'_> {
        SearchApi::new(self)
    }

    /// Get the calendars API.
    pub fn calendars(&self) -> CalendarsApi<'_> {
        CalendarsApi::new(self)
    }
}

/// Builder for creating a SefariaClient.
pub struct SefariaClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
    download_timeout: Duration,
    max_download_bytes: usize,
    user_agent: Option<String>,
    retry_config: RetryConfig,
}

impl SefariaClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            download_timeout: Duration::from_secs(30),
            max_download_bytes: DEFAULT_MAX_DOWNLOAD_BYTES,
            user_agent: None,
            retry_config: RetryConfig::no_retry(),
        }
    }

    /// Set the base URL of the Sefaria deployment.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the timeout for image downloads.
    pub fn download_timeout(mut self, timeout: Duration) -> Self {
        self.download_timeout = timeout;
        self
    }

    /// Set the largest image body a download may buffer.
    pub fn max_download_bytes(mut self, limit: usize) -> Self {
        self.max_download_bytes = limit;
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the retry configuration.
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Build the client.
    pub fn build(self) -> SefariaResult<SefariaClient> {
        let base_url_str = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);

        // A trailing slash keeps any path prefix when endpoints are joined
        let mut base_url = Url::parse(base_url_str)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let config = ClientConfig {
            base_url,
            timeout: self.timeout,
            download_timeout: self.download_timeout,
            max_download_bytes: self.max_download_bytes,
            user_agent: self.user_agent.unwrap_or_else(default_user_agent),
            retry_config: self.retry_config,
        };

        SefariaClient::from_config(config)
    }
}

impl Default for SefariaClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = SefariaClient::builder().build().unwrap();
        assert_eq!(client.config().base_url.as_str(), "https://www.sefaria.org/");
        assert_eq!(client.config().retry_config.max_retries, 0);
        assert!(client.config().user_agent.starts_with("sefaria-mcp/"));
    }

    #[test]
    fn test_builder_keeps_path_prefix() {
        let client = SefariaClient::builder()
            .base_url("http://localhost:8000/mirror")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(client.config().base_url.as_str(), "http://localhost:8000/mirror/");
        assert_eq!(client.config().timeout, Duration::from_secs(5));

        let url = client.http.build_url("api/shape", Some("Tanakh")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/mirror/api/shape/Tanakh");
    }

    #[test]
    fn test_builder_rejects_bad_url() {
        assert!(SefariaClient::builder().base_url("not a url").build().is_err());
    }
}
