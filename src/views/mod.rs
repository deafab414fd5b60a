//! View state for the creation form and the gallery.

mod creation;
mod gallery;
mod inflight;
mod search;

pub use creation::{CreationRender, CreationView, Key, Preview};
pub use gallery::{GalleryRender, GalleryView, NO_POSTS_TITLE, NO_RESULTS_TITLE};
pub use inflight::{InFlight, InFlightGuard};
pub use search::{filter_posts, SearchBox, SearchState};

use crate::types::Post;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

/// Last-fetched post snapshot, shared by the gallery and its search box.
/// `None` until the first successful fetch.
pub(crate) type SharedPosts = Arc<RwLock<Option<Arc<[Post]>>>>;

// View state stays usable after a panic elsewhere; a poisoned lock only
// means another holder panicked mid-update of plain data.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn snapshot(posts: &SharedPosts) -> Option<Arc<[Post]>> {
    posts
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

pub(crate) fn replace(posts: &SharedPosts, value: Option<Arc<[Post]>>) {
    *posts.write().unwrap_or_else(PoisonError::into_inner) = value;
}

#[cfg(test)]
pub(crate) mod fake;
