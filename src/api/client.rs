//! The backend trait the views are written against.

use crate::error::{Result, StudioError};
use crate::types::{decode_base64_lenient, Draft, Post};
use async_trait::async_trait;

/// Operations the studio backend offers.
#[async_trait]
pub trait StudioApi: Send + Sync {
    /// Generates an image for `prompt`, returning the bare base64 payload.
    async fn generate_image(&self, prompt: &str) -> Result<String>;

    /// Fetches every post, in server order.
    async fn fetch_posts(&self) -> Result<Vec<Post>>;

    /// Publishes a draft.
    async fn create_post(&self, draft: &Draft) -> Result<()>;

    /// Returns the raw bytes of a post's image.
    ///
    /// Inline payloads are decoded locally. Implementations that can reach
    /// the network override this to fetch URL payloads.
    async fn image_bytes(&self, post: &Post) -> Result<Vec<u8>> {
        if post.is_inline() {
            return decode_base64_lenient(&post.image_payload);
        }
        Err(StudioError::Decode(format!(
            "post {} has a remote image and this backend cannot fetch it",
            post.id
        )))
    }
}
