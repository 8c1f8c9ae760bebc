use crate::api::HEALTH_PATH;
use crate::session::SessionManager;
use anyhow::{Context, Result};
use sefaria_mcp::{sefaria_registry, McpServer, ToolSettings};
use sefaria_sdk::{RetryConfig, SefariaClient, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Downloads may be this many times larger than the image size limit before shrinking
const DOWNLOAD_LIMIT_FACTOR: usize = 32;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub sefaria: SefariaConfig,

    #[serde(default)]
    pub transport: TransportConfig,

    #[serde(default)]
    pub manuscripts: ManuscriptConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SefariaConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries for 429/5xx responses and timeouts, off unless set
    #[serde(default)]
    pub max_retries: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    #[serde(default = "default_sse_path")]
    pub sse_path: String,

    #[serde(default = "default_message_path")]
    pub message_path: String,

    #[serde(default = "default_keep_alive_secs")]
    pub keep_alive_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManuscriptConfig {
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,

    #[serde(default = "default_timeout_secs")]
    pub download_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_sse_path() -> String {
    "/sse".to_string()
}

fn default_message_path() -> String {
    "/messages/".to_string()
}

fn default_keep_alive_secs() -> u64 {
    15
}

fn default_max_image_bytes() -> usize {
    sefaria_core::manuscript::MAX_IMAGE_BYTES
}

impl Default for SefariaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: 0,
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            sse_path: default_sse_path(),
            message_path: default_message_path(),
            keep_alive_secs: default_keep_alive_secs(),
        }
    }
}

impl Default for ManuscriptConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: default_max_image_bytes(),
            download_timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServerConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        // Load config file if it exists, otherwise use defaults
        let config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .context("Failed to read configuration file")?;
            toml::from_str(&content).context("Failed to parse configuration file")?
        } else {
            tracing::info!(
                path = %config_path.display(),
                "Configuration file not found, using defaults"
            );
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (name, path) in [
            ("transport.sse_path", &self.transport.sse_path),
            ("transport.message_path", &self.transport.message_path),
        ] {
            if !path.starts_with('/') {
                anyhow::bail!("{} must start with '/', got '{}'", name, path);
            }
            if path.as_str() == HEALTH_PATH {
                anyhow::bail!("{} must not be {}", name, HEALTH_PATH);
            }
        }
        if self.transport.sse_path == self.transport.message_path {
            anyhow::bail!("transport.sse_path and transport.message_path must differ");
        }
        if self.transport.keep_alive_secs == 0 {
            anyhow::bail!("transport.keep_alive_secs must be positive");
        }
        if self.sefaria.timeout_secs == 0 {
            anyhow::bail!("sefaria.timeout_secs must be positive");
        }
        if self.manuscripts.download_timeout_secs == 0 {
            anyhow::bail!("manuscripts.download_timeout_secs must be positive");
        }
        Ok(())
    }

    /// Build the Sefaria API client described by this configuration
    pub fn client(&self) -> Result<SefariaClient> {
        let retry_config = if self.sefaria.max_retries == 0 {
            RetryConfig::no_retry()
        } else {
            RetryConfig {
                max_retries: self.sefaria.max_retries,
                ..RetryConfig::default()
            }
        };

        SefariaClient::builder()
            .base_url(&self.sefaria.base_url)
            .timeout(Duration::from_secs(self.sefaria.timeout_secs))
            .download_timeout(Duration::from_secs(self.manuscripts.download_timeout_secs))
            .max_download_bytes(
                self.manuscripts
                    .max_image_bytes
                    .saturating_mul(DOWNLOAD_LIMIT_FACTOR),
            )
            .retry_config(retry_config)
            .build()
            .with_context(|| format!("Invalid Sefaria API base URL: {}", self.sefaria.base_url))
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub mcp: McpServer,
    pub sessions: SessionManager,
    pub transport: TransportConfig,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let client = Arc::new(config.client()?);

        let settings = ToolSettings {
            max_image_bytes: config.manuscripts.max_image_bytes,
        };
        let registry = sefaria_registry(client, settings);
        tracing::info!("Registered {} tools", registry.len());

        Ok(Self {
            mcp: McpServer::new(registry),
            sessions: SessionManager::new(),
            transport: config.transport.clone(),
        })
    }
}
