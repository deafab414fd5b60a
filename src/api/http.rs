//! reqwest-backed implementation of [`StudioApi`].

use crate::api::client::StudioApi;
use crate::config::ClientConfig;
use crate::error::{Result, StudioError};
use crate::types::{decode_base64_lenient, Draft, Post};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use url::Url;

/// Image generation endpoint.
pub const GENERATE_PATH: &str = "api/v1/dalle";
/// Post collection endpoint (GET lists, POST creates).
pub const POSTS_PATH: &str = "api/v1/post";

/// Longest error body kept in an [`StudioError::Api`] message.
const MAX_ERROR_LEN: usize = 300;

/// HTTP client for the studio backend.
pub struct HttpStudioClient {
    client: reqwest::Client,
    generate_url: Url,
    posts_url: Url,
}

impl HttpStudioClient {
    /// Creates a client for the configured backend.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            generate_url: config.endpoint(GENERATE_PATH)?,
            posts_url: config.endpoint(POSTS_PATH)?,
        })
    }

    /// Creates a client from `PROMPTBOARD_API_URL` or the default origin.
    pub fn from_env() -> Result<Self> {
        Self::new(&ClientConfig::builder().build()?)
    }

    fn parse_error(status: u16, text: &str) -> StudioError {
        // The backend reports failures as `{ "success": false, "message": ... }`.
        let message = serde_json::from_str::<ErrorBody>(text)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| text.trim().to_string());

        let message = if message.chars().count() > MAX_ERROR_LEN {
            let cut: String = message.chars().take(MAX_ERROR_LEN).collect();
            format!("{cut}...")
        } else if message.is_empty() {
            "empty response body".to_string()
        } else {
            message
        };

        StudioError::Api { status, message }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        Err(Self::parse_error(status.as_u16(), &text))
    }
}

#[async_trait]
impl StudioApi for HttpStudioClient {
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let start = Instant::now();
        tracing::debug!(url = %self.generate_url, prompt_len = prompt.len(), "requesting image generation");

        let response = self
            .client
            .post(self.generate_url.clone())
            .header("Content-Type", "application/json")
            .json(&GenerateRequest { prompt })
            .send()
            .await?;
        let response = Self::check(response).await?;

        let body: GenerateResponse = response.json().await?;
        if body.photo.is_empty() {
            return Err(StudioError::Decode(
                "generation response contained no image data".into(),
            ));
        }

        tracing::debug!(
            duration_ms = start.elapsed().as_millis() as u64,
            payload_len = body.photo.len(),
            "image generation complete"
        );
        Ok(body.photo)
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        tracing::debug!(url = %self.posts_url, "fetching posts");

        let response = self
            .client
            .get(self.posts_url.clone())
            .header("Content-Type", "application/json")
            .send()
            .await?;
        let response = Self::check(response).await?;

        let body: PostListResponse = response.json().await?;
        for post in &body.data {
            post.validate()?;
        }

        tracing::debug!(count = body.data.len(), "fetched posts");
        Ok(body.data)
    }

    async fn create_post(&self, draft: &Draft) -> Result<()> {
        tracing::debug!(url = %self.posts_url, author = %draft.author_name, "publishing post");

        let response = self
            .client
            .post(self.posts_url.clone())
            .header("Content-Type", "application/json")
            .json(draft)
            .send()
            .await?;
        let response = Self::check(response).await?;

        // Body is awaited but its content is not used.
        let _ = response.bytes().await?;
        tracing::debug!("post published");
        Ok(())
    }

    async fn image_bytes(&self, post: &Post) -> Result<Vec<u8>> {
        if post.is_inline() {
            return decode_base64_lenient(&post.image_payload);
        }

        let url = Url::parse(&post.image_payload).map_err(|e| {
            StudioError::InvalidRecord(format!("post {} has a bad photo URL: {e}", post.id))
        })?;
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(StudioError::Api {
                status: response.status().as_u16(),
                message: "Failed to download image from URL".into(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    photo: String,
}

#[derive(Debug, Deserialize)]
struct PostListResponse {
    data: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}
