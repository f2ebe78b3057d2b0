//! Time-windowed coalescing of free-text query edits
//!
//! A rapid sequence of keystrokes should invoke the filter engine at most
//! once per window, always with the most recent query. The debouncer models
//! exactly that, independent of any UI event semantics: every submission
//! starts a window, and only the submission still newest when its window
//! closes settles.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Default window between the last keystroke and the filter invocation
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(300);

/// Coalesces a stream of query submissions down to the last one per window
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    generation: Arc<AtomicU64>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Submit a query edit and wait out the window
    ///
    /// Resolves `Some(query)` only if no newer submission arrived while
    /// waiting; superseded submissions resolve `None`. "Last keystroke wins"
    /// falls out: of any burst of submissions, exactly the final one settles.
    pub async fn settle(&self, query: impl Into<String>) -> Option<String> {
        let query = query.into();
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.window).await;
        if self.generation.load(Ordering::SeqCst) == ticket {
            Some(query)
        } else {
            None
        }
    }
}
