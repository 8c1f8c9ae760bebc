//! HTTP transport layer for the Sefaria SDK.

use crate::config::ClientConfig;
use crate::error::{SefariaError, SefariaResult};
use reqwest::{header, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// A downloaded binary resource.
#[derive(Debug, Clone)]
pub struct Download {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// HTTP transport for making API requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> SefariaResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Build a URL for an endpoint, optionally followed by a resource name.
    ///
    /// The resource is percent-encoded one path segment at a time, so a `/`
    /// inside it still separates segments.
    pub(crate) fn build_url(&self, endpoint: &str, resource: Option<&str>) -> SefariaResult<Url> {
        let mut url = self.config.base_url.join(endpoint.trim_start_matches('/'))?;

        if let Some(resource) = resource {
            url.path_segments_mut()
                .map_err(|_| SefariaError::Config("Base URL cannot carry a path".to_string()))?
                .pop_if_empty()
                .extend(resource.split('/'));
        }

        Ok(url)
    }

    /// Execute a request with retries.
    async fn execute_with_retry(&self, request_builder: RequestBuilder) -> SefariaResult<Response> {
        let retry_config = &self.config.retry_config;
        let mut attempts = 0;

        loop {
            let request = request_builder
                .try_clone()
                .ok_or_else(|| SefariaError::Config("Request cannot be cloned".to_string()))?;

            match request.send().await {
                Ok(response) => {
                    let status = response.status().as_u16();

                    if response.status().is_success() {
                        return Ok(response);
                    }

                    if attempts < retry_config.max_retries
                        && retry_config.should_retry_status(status)
                    {
                        let backoff = retry_config.backoff_for_attempt(attempts);
                        warn!(
                            status = status,
                            attempt = attempts + 1,
                            backoff_ms = backoff.as_millis(),
                            "Sefaria request failed, retrying"
                        );
                        tokio::time::sleep(backoff).await;
                        attempts += 1;
                        continue;
                    }

                    let body = response.text().await.unwrap_or_default();
                    warn!(status = status, "Sefaria request failed");
                    return Err(SefariaError::from_response(status, &body));
                }
                Err(e) => {
                    if attempts < retry_config.max_retries && e.is_timeout() {
                        let backoff = retry_config.backoff_for_attempt(attempts);
                        warn!(
                            attempt = attempts + 1,
                            backoff_ms = backoff.as_millis(),
                            "Sefaria request timed out, retrying"
                        );
                        tokio::time::sleep(backoff).await;
                        attempts += 1;
                        continue;
                    }
                    if e.is_timeout() {
                        return Err(SefariaError::Timeout);
                    }
                    return Err(e.into());
                }
            }
        }
    }

    /// Read a JSON body, surfacing in-band `{"error": ...}` payloads.
    async fn read_json<T: DeserializeOwned>(response: Response) -> SefariaResult<T> {
        let text = response.text().await?;
        let value: Value = serde_json::from_str(&text)?;

        if let Some(message) = value
            .as_object()
            .and_then(|object| object.get("error"))
            .and_then(Value::as_str)
        {
            return Err(SefariaError::Rejected(message.to_string()));
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Execute a GET request.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        resource: Option<&str>,
    ) -> SefariaResult<T> {
        let url = self.build_url(endpoint, resource)?;
        debug!(url = %url, "GET request");

        let response = self.execute_with_retry(self.client.get(url)).await?;
        Self::read_json(response).await
    }

    /// Execute a GET request with query parameters.
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        resource: Option<&str>,
        query: &Q,
    ) -> SefariaResult<T> {
        let url = self.build_url(endpoint, resource)?;
        debug!(url = %url, "GET request with query");

        let response = self
            .execute_with_retry(self.client.get(url).query(query))
            .await?;
        Self::read_json(response).await
    }

    /// Execute a GET request whose body is plain text.
    pub async fn get_text(&self, endpoint: &str, resource: Option<&str>) -> SefariaResult<String> {
        let url = self.build_url(endpoint, resource)?;
        debug!(url = %url, "GET request (text)");

        let response = self.execute_with_retry(self.client.get(url)).await?;
        Ok(response.text().await?)
    }

    /// Execute a POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> SefariaResult<T> {
        let url = self.build_url(endpoint, None)?;
        debug!(url = %url, "POST request");

        let response = self
            .execute_with_retry(self.client.post(url).json(body))
            .await?;
        Self::read_json(response).await
    }

    /// Download an absolute http(s) URL as raw bytes.
    pub async fn download(&self, url: &str) -> SefariaResult<Download> {
        let url = Url::parse(url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SefariaError::InvalidInput(format!(
                "Only HTTP/HTTPS URLs are supported, got: {}",
                url.scheme()
            )));
        }
        debug!(url = %url, "Downloading");

        let request = self
            .client
            .get(url)
            .header(header::ACCEPT, "image/*")
            .timeout(self.config.download_timeout);
        let mut response = self.execute_with_retry(request).await?;

        let limit = self.config.max_download_bytes;
        if response
            .content_length()
            .is_some_and(|length| length > limit as u64)
        {
            warn!(url = %response.url(), limit, "Download refused, declared size over limit");
            return Err(SefariaError::TooLarge { limit });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        // Content-Length may be absent or wrong, so count while reading
        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if bytes.len() + chunk.len() > limit {
                warn!(url = %response.url(), limit, "Download aborted, body over limit");
                return Err(SefariaError::TooLarge { limit });
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(Download {
            bytes,
            content_type,
        })
    }
}
