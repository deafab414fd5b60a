//! Debounced text search over the gallery's last-fetched posts.

use crate::types::Post;
use crate::views::{lock, snapshot, SharedPosts};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Returns the posts whose author or prompt contains `query`, ignoring case.
pub fn filter_posts(posts: &[Post], query: &str) -> Vec<Post> {
    let needle = query.to_lowercase();
    posts.iter().filter(|p| p.matches(&needle)).cloned().collect()
}

/// Current filter text and the last computed results.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Filter text as typed.
    pub text: String,
    /// `None` when no filter has been applied (or the text was cleared).
    pub results: Option<Vec<Post>>,
}

struct Shared {
    posts: SharedPosts,
    state: Mutex<SearchState>,
    computations: AtomicUsize,
}

impl Shared {
    // Reads the text at execution time, not at schedule time.
    fn apply(&self) {
        let text = lock(&self.state).text.clone();
        let results = if text.is_empty() {
            None
        } else {
            let posts = snapshot(&self.posts);
            Some(filter_posts(posts.as_deref().unwrap_or_default(), &text))
        };

        self.computations.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(
            query = %text,
            matches = results.as_ref().map(Vec::len),
            "search filter applied"
        );

        let mut state = lock(&self.state);
        // Input that arrived while filtering has its own task scheduled.
        if state.text == text {
            state.results = results;
        }
    }
}

/// Search input with a cancellable debounce task.
///
/// Each input aborts the pending filter and schedules a new one; dropping
/// the box aborts whatever is still pending.
pub struct SearchBox {
    shared: Arc<Shared>,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl SearchBox {
    pub(crate) fn new(posts: SharedPosts, delay: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                posts,
                state: Mutex::new(SearchState::default()),
                computations: AtomicUsize::new(0),
            }),
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Records `text` immediately and schedules the filter after the delay.
    ///
    /// Outside a Tokio runtime there is nothing to schedule on, so the filter
    /// runs at once.
    pub fn on_input(&self, text: impl Into<String>) {
        lock(&self.shared.state).text = text.into();
        self.cancel();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let shared = Arc::clone(&self.shared);
                let delay = self.delay;
                let task = handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    shared.apply();
                });
                *lock(&self.pending) = Some(task);
            }
            Err(_) => self.shared.apply(),
        }
    }

    /// Cancels any pending filter and runs it now.
    pub fn apply_now(&self) {
        self.cancel();
        self.shared.apply();
    }

    /// Re-runs the filter against fresh posts if a query is active.
    pub(crate) fn refresh(&self) {
        if !lock(&self.shared.state).text.is_empty() {
            self.apply_now();
        }
    }

    /// Aborts the pending filter, if any.
    pub fn cancel(&self) {
        if let Some(task) = lock(&self.pending).take() {
            task.abort();
        }
    }

    /// Current filter text.
    pub fn text(&self) -> String {
        lock(&self.shared.state).text.clone()
    }

    /// Last computed results; `None` when no filter is active.
    pub fn results(&self) -> Option<Vec<Post>> {
        lock(&self.shared.state).results.clone()
    }

    /// Copy of the whole search state.
    pub fn state(&self) -> SearchState {
        lock(&self.shared.state).clone()
    }

    /// Number of filter computations that have run.
    pub fn computations(&self) -> usize {
        self.shared.computations.load(Ordering::SeqCst)
    }
}

impl Drop for SearchBox {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fake::post;
    use crate::views::replace;
    use std::sync::RwLock;

    const DELAY: Duration = Duration::from_millis(500);

    fn posts() -> SharedPosts {
        let list: Arc<[Post]> = vec![
            post("1", "A", "zombie attack"),
            post("2", "B", "dragon ride"),
        ]
        .into();
        Arc::new(RwLock::new(Some(list)))
    }

    async fn settle() {
        // Let the woken task run after the clock moves.
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[test]
    fn test_filter_posts_matches_prompt() {
        let list = [post("1", "A", "zombie attack"), post("2", "B", "dragon ride")];
        let found = filter_posts(&list, "zombie");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");
    }

    #[test]
    fn test_filter_posts_matches_author_ignoring_case() {
        let list = [post("1", "Alice", "zombie attack"), post("2", "Bob", "dragon ride")];
        let found = filter_posts(&list, "BOB");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "2");
        assert!(filter_posts(&list, "unicorn").is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_filter_runs_after_delay() {
        let search = SearchBox::new(posts(), DELAY);
        search.on_input("zombie");
        assert_eq!(search.text(), "zombie");
        assert!(search.results().is_none());

        tokio::time::sleep(Duration::from_millis(499)).await;
        settle().await;
        assert_eq!(search.computations(), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        settle().await;
        assert_eq!(search.computations(), 1);
        let results = search.results().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].prompt, "zombie attack");
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_then_clearing_runs_once_with_final_text() {
        let search = SearchBox::new(posts(), DELAY);
        search.on_input("z");
        tokio::time::sleep(Duration::from_millis(100)).await;
        search.on_input("zo");
        tokio::time::sleep(Duration::from_millis(100)).await;
        search.on_input("");

        tokio::time::sleep(DELAY * 2).await;
        settle().await;

        assert_eq!(search.computations(), 1);
        assert_eq!(search.text(), "");
        assert!(search.results().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_filter_reads_latest_posts() {
        let shared = posts();
        let search = SearchBox::new(shared.clone(), DELAY);
        search.on_input("dragon");

        let newer: Arc<[Post]> = vec![
            post("3", "C", "dragon nap"),
            post("2", "B", "dragon ride"),
        ]
        .into();
        replace(&shared, Some(newer));

        tokio::time::sleep(DELAY + Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(search.results().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_filter() {
        let search = SearchBox::new(posts(), DELAY);
        let shared = Arc::clone(&search.shared);
        search.on_input("zombie");
        drop(search);

        tokio::time::sleep(DELAY * 2).await;
        settle().await;
        assert_eq!(shared.computations.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_without_runtime_filters_immediately() {
        let search = SearchBox::new(posts(), DELAY);
        search.on_input("dragon");
        assert_eq!(search.computations(), 1);
        assert_eq!(search.results().unwrap()[0].id, "2");
    }

    #[test]
    fn test_apply_now_and_clear() {
        let search = SearchBox::new(posts(), DELAY);
        search.on_input("ride");
        search.apply_now();
        assert_eq!(search.results().unwrap().len(), 1);

        search.on_input("");
        assert!(search.results().is_none());
    }
}
