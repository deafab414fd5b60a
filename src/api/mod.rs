//! Backend access: the `StudioApi` seam and its HTTP implementation.

mod client;
mod http;

pub use client::StudioApi;
pub use http::{HttpStudioClient, GENERATE_PATH, POSTS_PATH};
