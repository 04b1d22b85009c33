//! Search and filter state.
//!
//! Owns the current query string, active filter set, and search history
//! for one resource engine. Pagination and sort-control keys are
//! mechanism, not user-facing filter intent, so they never count as
//! active filters.

use crate::filter::{FilterSet, FilterValue};
use std::collections::{BTreeSet, VecDeque};

/// Filter keys that drive fetching mechanics rather than filter intent.
pub const MECHANISM_KEYS: [&str; 3] = ["page", "page_size", "ordering"];

/// Maximum number of remembered search queries.
pub const SEARCH_HISTORY_LIMIT: usize = 10;

/// Per-engine search and filter state.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    query: String,
    filters: FilterSet,
    active_filter_names: BTreeSet<String>,
    is_searching: bool,
    search_history: VecDeque<String>,
}

impl SearchState {
    /// Creates empty search state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current query string.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The current filter set.
    #[must_use]
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Names of user-facing active filters (mechanism keys excluded).
    #[must_use]
    pub fn active_filter_names(&self) -> &BTreeSet<String> {
        &self.active_filter_names
    }

    /// Whether a debounced search is currently pending or in flight.
    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.is_searching
    }

    /// Marks a search as pending/in flight.
    pub fn set_searching(&mut self, searching: bool) {
        self.is_searching = searching;
    }

    /// Recent search queries, most recent first.
    #[must_use]
    pub fn search_history(&self) -> Vec<&str> {
        self.search_history.iter().map(String::as_str).collect()
    }

    /// Sets the query string, recording it in the search history.
    ///
    /// Non-empty queries are front-inserted, deduplicated by exact string,
    /// and capped at [`SEARCH_HISTORY_LIMIT`]. Re-setting the most recent
    /// query leaves the history untouched.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if !query.is_empty() && self.search_history.front() != Some(&query) {
            self.search_history.retain(|past| past != &query);
            self.search_history.push_front(query.clone());
            self.search_history.truncate(SEARCH_HISTORY_LIMIT);
        }
        self.query = query;
    }

    /// Merges a partial filter set into the current one (override wins).
    /// A key whose value normalizes to nothing clears that filter.
    pub fn update_filters(&mut self, partial: FilterSet) {
        self.filters.merge(&partial);
        self.filters.purge_empty();
        self.recompute_active();
    }

    /// Removes a single filter.
    pub fn clear_filter(&mut self, name: &str) {
        self.filters.remove(name);
        self.recompute_active();
    }

    /// Resets filters and query. Search history is deliberately kept.
    pub fn clear_all_filters(&mut self) {
        self.filters = FilterSet::new();
        self.query.clear();
        self.recompute_active();
    }

    /// Sets the sort order, stored under the `ordering` mechanism key.
    pub fn set_sort(&mut self, ordering: impl Into<String>) {
        self.filters
            .insert("ordering", FilterValue::Text(ordering.into()));
        self.recompute_active();
    }

    /// Whether any user-facing filter or query is in effect.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.active_filter_names.is_empty() || !self.query.is_empty()
    }

    // Invariant: active_filter_names == keys(filters) - MECHANISM_KEYS,
    // maintained after every mutating call.
    fn recompute_active(&mut self) {
        self.active_filter_names = self
            .filters
            .names()
            .filter(|name| !MECHANISM_KEYS.contains(name))
            .map(String::from)
            .collect();
    }
}
