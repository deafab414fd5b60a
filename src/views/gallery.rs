//! The gallery: loads posts once, filters them, and owns the creation form.

use crate::api::StudioApi;
use crate::config::ClientConfig;
use crate::error::{Result, StudioError};
use crate::types::{Draft, Post};
use crate::views::creation::CreationView;
use crate::views::inflight::InFlight;
use crate::views::search::SearchBox;
use crate::views::{replace, snapshot, SharedPosts};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// Heading shown when the gallery has nothing to display.
pub const NO_POSTS_TITLE: &str = "No Posts Yet";
/// Heading shown when a search matched nothing.
pub const NO_RESULTS_TITLE: &str = "No Search Results Found";

/// View model for the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryRender {
    /// A fetch is outstanding.
    Loading,
    /// One card per post, newest first.
    Cards(Vec<Post>),
    /// Placeholder heading.
    Empty {
        /// Heading text.
        title: &'static str,
    },
}

/// Gallery of published posts.
pub struct GalleryView {
    api: Arc<dyn StudioApi>,
    posts: SharedPosts,
    loading: InFlight,
    mounted: AtomicBool,
    creation: CreationView,
    search: SearchBox,
}

impl GalleryView {
    /// Creates an unmounted gallery; nothing is fetched until [`mount`](Self::mount).
    pub fn new(api: Arc<dyn StudioApi>, config: &ClientConfig) -> Self {
        let posts: SharedPosts = Arc::new(RwLock::new(None));
        Self {
            creation: CreationView::new(Arc::clone(&api), config),
            search: SearchBox::new(Arc::clone(&posts), config.search_debounce()),
            api,
            posts,
            loading: InFlight::new(),
            mounted: AtomicBool::new(false),
        }
    }

    /// The child creation form.
    pub fn creation(&self) -> &CreationView {
        &self.creation
    }

    /// The search box.
    pub fn search(&self) -> &SearchBox {
        &self.search
    }

    /// True while a fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading.is_set()
    }

    /// Last-fetched posts, newest first. `None` before the first fetch.
    pub fn posts(&self) -> Option<Arc<[Post]>> {
        snapshot(&self.posts)
    }

    /// Loads posts on the first call; later calls do nothing.
    pub async fn mount(&self) -> Result<()> {
        if self.mounted.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        self.load_posts().await
    }

    /// Fetches the collection and stores it newest first.
    ///
    /// A non-success status keeps the current list and is only logged;
    /// transport and decode failures are returned.
    pub async fn load_posts(&self) -> Result<()> {
        let _loading = self.loading.acquire();

        match self.api.fetch_posts().await {
            Ok(mut posts) => {
                posts.reverse();
                tracing::debug!(count = posts.len(), "gallery loaded");
                replace(&self.posts, Some(posts.into()));
                self.search.refresh();
                Ok(())
            }
            Err(StudioError::Api { status, message }) => {
                tracing::warn!(status, %message, "gallery fetch returned non-success status");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "gallery fetch failed");
                Err(e)
            }
        }
    }

    /// Drops the cached posts and fetches them again.
    pub async fn refresh(&self) -> Result<()> {
        replace(&self.posts, None);
        // Results filtered from the dropped snapshot go with it.
        self.search.refresh();
        self.load_posts().await
    }

    /// Publishes the child's draft, then refreshes the gallery so the new
    /// post shows up. Returns the published draft.
    pub async fn submit_post(&self) -> Result<Draft> {
        let published = self.creation.submit_post().await?;
        self.refresh().await?;
        Ok(published)
    }

    /// Forwards search input to the debounced filter.
    pub fn on_search_input(&self, text: impl Into<String>) {
        self.search.on_input(text);
    }

    /// Builds the gallery's view model.
    pub fn render(&self) -> GalleryRender {
        if self.is_loading() {
            return GalleryRender::Loading;
        }

        if let Some(results) = self.search.results() {
            return if results.is_empty() {
                GalleryRender::Empty {
                    title: NO_RESULTS_TITLE,
                }
            } else {
                GalleryRender::Cards(results)
            };
        }

        match self.posts() {
            Some(posts) if !posts.is_empty() => GalleryRender::Cards(posts.to_vec()),
            _ => GalleryRender::Empty {
                title: NO_POSTS_TITLE,
            },
        }
    }
}
