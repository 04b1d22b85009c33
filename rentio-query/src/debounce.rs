//! Debounced search-as-you-type.
//!
//! A generation counter stands in for timer cancellation: each call bumps
//! the generation, sleeps out the debounce window, and dispatches only if
//! no newer call arrived meanwhile. A request already handed to the
//! transport is never cancelled.

use crate::engine::QueryEngine;
use crate::error::QueryResult;
use crate::filter::FilterSet;
use rentio_types::{Page, Resource};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

/// Default debounce window for incremental search.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Debounce coordinator for one engine's incremental search.
pub struct DebouncedSearch {
    delay: Duration,
    generation: AtomicU64,
}

impl DebouncedSearch {
    /// Creates a coordinator with the given debounce window.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    /// Waits out the debounce window, then sets the query and fetches.
    ///
    /// Returns `Ok(None)` when a newer call superseded this one before its
    /// timer fired (nothing was dispatched).
    pub async fn search<T: Resource>(
        &self,
        engine: &QueryEngine<T>,
        query: impl Into<String>,
    ) -> QueryResult<Option<Page<T>>> {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        engine.set_searching(true).await;

        tokio::time::sleep(self.delay).await;

        if self.generation.load(Ordering::SeqCst) != my_generation {
            debug!(generation = my_generation, "debounced call superseded");
            return Ok(None);
        }

        engine.set_search_query(query).await;
        let result = engine.fetch_list(FilterSet::new(), true).await;
        engine.set_searching(false).await;
        result.map(Some)
    }
}

impl Default for DebouncedSearch {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
