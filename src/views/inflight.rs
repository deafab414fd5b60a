//! In-flight flags for outstanding async operations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Boolean marking an outstanding operation. Cloning shares the flag.
#[derive(Debug, Clone, Default)]
pub struct InFlight(Arc<AtomicBool>);

impl InFlight {
    /// Creates a cleared flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while an operation holds the flag.
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Sets the flag until the returned guard is dropped.
    pub fn acquire(&self) -> InFlightGuard {
        self.0.store(true, Ordering::Release);
        InFlightGuard(Arc::clone(&self.0))
    }
}

/// Clears its flag on drop, on every exit path.
#[must_use = "the flag is cleared as soon as the guard is dropped"]
#[derive(Debug)]
pub struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
