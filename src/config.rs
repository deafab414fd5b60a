//! Client configuration.

use crate::error::{Result, StudioError};
use std::time::Duration;
use url::Url;

/// Backend origin used when neither the builder nor the environment names one.
pub const DEFAULT_BASE_URL: &str = "https://adamai-image-kb7e.onrender.com";

/// Environment variable consulted for the backend origin.
pub const BASE_URL_ENV: &str = "PROMPTBOARD_API_URL";

/// Author name a fresh draft starts with.
pub const DEFAULT_AUTHOR: &str = "AdamAi";

/// Quiet period before a search filter runs.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Resolved configuration shared by the HTTP client and the views.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Url,
    default_author: String,
    search_debounce: Duration,
    request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a new `ClientConfigBuilder`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Backend origin.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Author name a fresh draft starts with.
    pub fn default_author(&self) -> &str {
        &self.default_author
    }

    /// Debounce delay for gallery search.
    pub fn search_debounce(&self) -> Duration {
        self.search_debounce
    }

    /// Per-request timeout, if any. Requests never time out by default.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Joins an API path (e.g. `api/v1/post`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let mut base = self.base_url.clone();
        // Url::join drops the last segment unless the base ends with '/'.
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path.trim_start_matches('/'))
            .map_err(|e| StudioError::Config(format!("bad endpoint {path}: {e}")))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            default_author: DEFAULT_AUTHOR.to_string(),
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
            request_timeout: None,
        }
    }
}

/// Builder for `ClientConfig`.
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    default_author: Option<String>,
    search_debounce: Option<Duration>,
    request_timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the backend origin. Falls back to `PROMPTBOARD_API_URL`, then
    /// [`DEFAULT_BASE_URL`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the author name new drafts start with.
    pub fn default_author(mut self, name: impl Into<String>) -> Self {
        self.default_author = Some(name.into());
        self
    }

    /// Sets the search debounce delay.
    pub fn search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce = Some(delay);
        self
    }

    /// Sets a per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Builds the configuration, resolving and validating the base URL.
    pub fn build(self) -> Result<ClientConfig> {
        let raw = self
            .base_url
            .or_else(|| std::env::var(BASE_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let base_url = Url::parse(raw.trim())
            .map_err(|e| StudioError::Config(format!("invalid base URL {raw:?}: {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(StudioError::Config(format!(
                "base URL must be http or https, got {}",
                base_url.scheme()
            )));
        }

        Ok(ClientConfig {
            base_url,
            default_author: self
                .default_author
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            search_debounce: self.search_debounce.unwrap_or(DEFAULT_SEARCH_DEBOUNCE),
            request_timeout: self.request_timeout,
        })
    }
}
