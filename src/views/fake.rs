//! In-memory backend for view tests.

use crate::api::StudioApi;
use crate::error::{Result, StudioError};
use crate::types::{Draft, Post};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub(crate) struct FakeStudio {
    pub photo: Mutex<String>,
    pub posts: Mutex<Vec<Post>>,
    pub published: Mutex<Vec<Draft>>,
    /// Status returned by `fetch_posts` instead of data.
    pub fetch_status: Mutex<Option<u16>>,
    pub fail_generate: AtomicBool,
    pub fail_fetch: AtomicBool,
    pub fail_create: AtomicBool,
    /// Held by a test to park calls mid-flight.
    pub gate: tokio::sync::Mutex<()>,
    pub generate_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
}

impl FakeStudio {
    pub fn with_photo(photo: &str) -> Self {
        let fake = Self::default();
        *fake.photo.lock().unwrap() = photo.to_string();
        fake
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        let fake = Self::with_photo("abc");
        *fake.posts.lock().unwrap() = posts;
        fake
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

pub(crate) fn post(id: &str, name: &str, prompt: &str) -> Post {
    Post {
        id: id.into(),
        author_name: name.into(),
        prompt: prompt.into(),
        image_payload: format!("https://img.example.com/{id}.jpg"),
    }
}

#[async_trait]
impl StudioApi for FakeStudio {
    async fn generate_image(&self, _prompt: &str) -> Result<String> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        let _open = self.gate.lock().await;
        if self.fail_generate.load(Ordering::SeqCst) {
            return Err(StudioError::Decode("connection reset".into()));
        }
        Ok(self.photo.lock().unwrap().clone())
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let _open = self.gate.lock().await;
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(StudioError::Decode("connection reset".into()));
        }
        if let Some(status) = *self.fetch_status.lock().unwrap() {
            return Err(StudioError::Api {
                status,
                message: "unavailable".into(),
            });
        }
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn create_post(&self, draft: &Draft) -> Result<()> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let _open = self.gate.lock().await;
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(StudioError::Api {
                status: 500,
                message: "database down".into(),
            });
        }
        let mut posts = self.posts.lock().unwrap();
        let id = (posts.len() + 1).to_string();
        posts.push(Post {
            id,
            author_name: draft.author_name.clone(),
            prompt: draft.prompt.clone(),
            image_payload: draft.image.as_str().to_string(),
        });
        self.published.lock().unwrap().push(draft.clone());
        Ok(())
    }
}
