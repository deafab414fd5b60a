#![warn(missing_docs)]
//! Promptboard - client for a prompt-to-image studio.
//!
//! A user writes a prompt, the studio backend generates an image, and the
//! prompt/image pair can be published to a shared gallery. This crate holds
//! the client side: a typed HTTP client behind the [`StudioApi`] trait and
//! the state of the two views, [`CreationView`] and [`GalleryView`].
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use promptboard::{ClientConfig, DraftField, GalleryView, HttpStudioClient};
//!
//! #[tokio::main]
//! async fn main() -> promptboard::Result<()> {
//!     let config = ClientConfig::builder().build()?;
//!     let api = Arc::new(HttpStudioClient::new(&config)?);
//!     let gallery = GalleryView::new(api, &config);
//!     gallery.mount().await?;
//!
//!     let form = gallery.creation();
//!     form.update_field(DraftField::Prompt, "riding a dragon over a volcano");
//!     form.generate_image().await?;
//!     gallery.submit_post().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `cli` (default): the `promptboard` command-line front end.

pub mod api;
pub mod config;
mod error;
pub mod prompts;
pub mod types;
pub mod views;

// Re-export error types at crate root
pub use error::{Result, StudioError};

pub use api::{HttpStudioClient, StudioApi};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use prompts::random_prompt;
pub use types::{Draft, DraftField, ImageData, ImageFormat, Post};
pub use views::{
    CreationRender, CreationView, GalleryRender, GalleryView, Key, Preview, SearchBox,
    SearchState,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::api::{HttpStudioClient, StudioApi};
    pub use crate::config::ClientConfig;
    pub use crate::error::{Result, StudioError};
    pub use crate::types::{Draft, DraftField, Post};
    pub use crate::views::{CreationView, GalleryRender, GalleryView};
}
