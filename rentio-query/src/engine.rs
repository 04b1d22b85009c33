//! Resource query engine — stateful query logic over an abstract transport.
//!
//! One engine instance per resource type. The engine owns the query cache,
//! the search state, and the observable view (list, pagination, focused
//! entity, error, fetch status); the transport performs all I/O.
//!
//! Overlapping list fetches are resolved with a monotonically increasing
//! request sequence: a completed fetch updates the observable view only if
//! it is the latest-issued request, so a slow early response can never
//! clobber a newer one.

use crate::cache::QueryCache;
use crate::envelope::{FeaturePageMapper, PageMapper, RecordPageMapper};
use crate::error::{QueryError, QueryResult};
use crate::filter::{FilterSet, FilterValue};
use crate::state::SearchState;
use crate::transport::{ApiRequest, AuthProvider, Transport};
use rentio_types::{
    Enquiry, Favourite, Page, PageInfo, Property, Resource, ResourceId, ResourceKind, Review,
    UserProfile,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Default page size assumed when the caller has not set `page_size`.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Configuration for a query engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// API endpoint path for the resource's list operations.
    pub endpoint: String,
    /// How long cached lists stay valid.
    pub cache_ttl: Duration,
    /// Page size assumed for `total_pages` when none is set.
    pub default_page_size: u64,
}

impl EngineConfig {
    /// The standard configuration for a resource kind.
    #[must_use]
    pub fn for_kind(kind: ResourceKind) -> Self {
        Self {
            endpoint: kind.endpoint().to_string(),
            cache_ttl: kind.cache_ttl(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Fetch/mutate lifecycle state. `Success` and `Error` are both ready
/// states; there is no cancelled state because operations already
/// dispatched to the transport are never cancelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Observable state for one resource engine.
#[derive(Debug, Clone)]
pub struct ResourceView<T> {
    /// The currently loaded list, in backend order.
    pub items: Vec<T>,
    /// Pagination cursors for the loaded list.
    pub page: PageInfo,
    /// The currently focused single entity, if any.
    pub focused: Option<T>,
    /// The last surfaced error message, until cleared.
    pub error: Option<String>,
    /// Fetch lifecycle state.
    pub status: FetchStatus,
}

impl<T> Default for ResourceView<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: PageInfo::default(),
            focused: None,
            error: None,
            status: FetchStatus::Idle,
        }
    }
}

/// The query engine — turns declarative filter state into requests,
/// memoizes results, and exposes derived pagination queries.
pub struct QueryEngine<T: Resource> {
    pub(crate) config: EngineConfig,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) auth: Arc<dyn AuthProvider>,
    pub(crate) mapper: Arc<dyn PageMapper<T>>,
    pub(crate) cache: RwLock<QueryCache<T>>,
    pub(crate) search: RwLock<SearchState>,
    pub(crate) view: RwLock<ResourceView<T>>,
    pub(crate) seq: AtomicU64,
}

impl<T: Resource> QueryEngine<T> {
    /// Creates an engine with an explicit envelope mapper and the standard
    /// configuration for `T`'s resource kind.
    pub fn with_mapper(
        transport: Arc<dyn Transport>,
        auth: Arc<dyn AuthProvider>,
        mapper: Arc<dyn PageMapper<T>>,
    ) -> Self {
        Self::with_config(EngineConfig::for_kind(T::KIND), transport, auth, mapper)
    }

    /// Creates an engine with a custom configuration.
    pub fn with_config(
        config: EngineConfig,
        transport: Arc<dyn Transport>,
        auth: Arc<dyn AuthProvider>,
        mapper: Arc<dyn PageMapper<T>>,
    ) -> Self {
        let cache = QueryCache::new(config.cache_ttl);
        Self {
            config,
            transport,
            auth,
            mapper,
            cache: RwLock::new(cache),
            search: RwLock::new(SearchState::new()),
            view: RwLock::new(ResourceView::default()),
            seq: AtomicU64::new(0),
        }
    }

    /// The resource kind this engine serves.
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        T::KIND
    }

    // ── List and single-entity fetches ───────────────────────────

    /// Fetches the resource list for the current search state.
    ///
    /// `overrides` win per key over the stored filters; a non-empty query
    /// is injected as the `search` filter. With `use_cache`, a valid cache
    /// entry short-circuits the transport entirely.
    ///
    /// A superseded fetch (one issued before a newer fetch completed) still
    /// returns its page to its own caller but leaves both the observable
    /// view and the cache untouched.
    pub async fn fetch_list(&self, overrides: FilterSet, use_cache: bool) -> QueryResult<Page<T>> {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        let (signature, params) = {
            let search = self.search.read().await;
            let mut merged = search.filters().clone();
            merged.merge(&overrides);
            if !search.query().is_empty() && !merged.contains("search") {
                merged.insert("search", search.query());
            }
            let normalized = merged.normalize();
            (normalized.signature(), normalized.into_map())
        };

        if use_cache {
            let cache = self.cache.read().await;
            if let Some(entry) = cache.get_fresh(&signature) {
                debug!(resource = %self.kind(), "query cache hit");
                let page = Page {
                    items: entry.items.clone(),
                    count: entry.page.count,
                    next: entry.page.next.clone(),
                    previous: entry.page.previous.clone(),
                };
                drop(cache);
                self.apply_page(seq, &page).await;
                return Ok(page);
            }
        }

        self.set_status(FetchStatus::Loading).await;
        debug!(resource = %self.kind(), params = ?params, "fetching list");

        let request = ApiRequest::get(&self.config.endpoint)
            .with_query(params)
            .with_headers(self.auth.auth_headers());
        let response = self.transport.request(request).await;

        if !response.success {
            let message = response
                .error
                .unwrap_or_else(|| "request failed".to_string());
            warn!(resource = %self.kind(), %message, "list fetch failed");
            self.apply_failure(seq, &message).await;
            return Err(QueryError::Transport(message));
        }

        let page = match self.mapper.map_page(&response.data) {
            Ok(page) => page,
            Err(e) => {
                self.apply_failure(seq, &e.to_string()).await;
                return Err(e);
            }
        };

        // A superseded result must not be cached either: under the same
        // signature it would overwrite fresher data with an older payload
        // and a newer timestamp, and the next cached fetch would serve it.
        if self.apply_page(seq, &page).await {
            self.cache
                .write()
                .await
                .put(signature, page.items.clone(), page.info());
        } else {
            debug!(resource = %self.kind(), seq, "fetch superseded; view and cache left untouched");
        }
        Ok(page)
    }

    /// Fetches a single entity by id, always bypassing the cache, and sets
    /// the single-entity focus. On failure the focus is cleared and the
    /// error surfaced.
    pub async fn fetch_by_id(&self, id: ResourceId) -> QueryResult<T> {
        self.set_status(FetchStatus::Loading).await;

        let endpoint = format!("{}{}/", self.config.endpoint, id);
        let request = ApiRequest::get(endpoint).with_headers(self.auth.auth_headers());
        let response = self.transport.request(request).await;

        if !response.success {
            let message = response
                .error
                .unwrap_or_else(|| "request failed".to_string());
            warn!(resource = %self.kind(), %id, %message, "entity fetch failed");
            let mut view = self.view.write().await;
            view.focused = None;
            view.error = Some(message.clone());
            view.status = FetchStatus::Error;
            return Err(QueryError::Transport(message));
        }

        let item = match self.mapper.map_item(&response.data) {
            Ok(item) => item,
            Err(e) => {
                let mut view = self.view.write().await;
                view.focused = None;
                view.error = Some(e.to_string());
                view.status = FetchStatus::Error;
                return Err(e);
            }
        };

        let mut view = self.view.write().await;
        view.focused = Some(item.clone());
        view.error = None;
        view.status = FetchStatus::Success;
        Ok(item)
    }

    /// Fetches the next page, or returns `None` without any network call
    /// when there is no next cursor.
    pub async fn fetch_next_page(&self) -> QueryResult<Option<Page<T>>> {
        let token = self.view.read().await.page.next_page_token();
        let Some(token) = token else {
            return Ok(None);
        };
        let overrides = FilterSet::new().with("page", token);
        Ok(Some(self.fetch_list(overrides, true).await?))
    }

    /// Fetches the previous page, or returns `None` without any network
    /// call when there is no previous cursor.
    pub async fn fetch_previous_page(&self) -> QueryResult<Option<Page<T>>> {
        let token = self.view.read().await.page.previous_page_token();
        let Some(token) = token else {
            return Ok(None);
        };
        let overrides = FilterSet::new().with("page", token);
        Ok(Some(self.fetch_list(overrides, true).await?))
    }

    // ── Search state operations ──────────────────────────────────

    /// Sets the search query, recording it in the search history.
    pub async fn set_search_query(&self, query: impl Into<String>) {
        self.search.write().await.set_query(query);
    }

    /// Merges a partial filter set into the current filters.
    pub async fn update_filters(&self, partial: FilterSet) {
        self.search.write().await.update_filters(partial);
    }

    /// Removes a single filter.
    pub async fn clear_filter(&self, name: &str) {
        self.search.write().await.clear_filter(name);
    }

    /// Resets filters and query; search history is kept.
    pub async fn clear_all_filters(&self) {
        self.search.write().await.clear_all_filters();
    }

    /// Sets the sort order (the `ordering` mechanism key).
    pub async fn set_sorting(&self, ordering: impl Into<String>) {
        self.search.write().await.set_sort(ordering);
    }

    /// A snapshot of the current search state.
    pub async fn search_state(&self) -> SearchState {
        self.search.read().await.clone()
    }

    pub(crate) async fn set_searching(&self, searching: bool) {
        self.search.write().await.set_searching(searching);
    }

    // ── Derived read-only queries ────────────────────────────────

    /// Whether any user-facing filter or query is in effect.
    pub async fn has_active_filters(&self) -> bool {
        self.search.read().await.has_active_filters()
    }

    /// Whether a next page exists.
    pub async fn can_fetch_next_page(&self) -> bool {
        self.view.read().await.page.has_next()
    }

    /// Whether a previous page exists.
    pub async fn can_fetch_previous_page(&self) -> bool {
        self.view.read().await.page.has_previous()
    }

    /// The 1-based page number currently loaded, derived from the cursors.
    ///
    /// A display heuristic only: it relies on the backend's observed
    /// `?page=N` cursor shape, which is not otherwise part of the cursor
    /// contract. A cursor that carries no parsable page number degrades
    /// to page 1.
    pub async fn current_page(&self) -> u64 {
        let page = self.view.read().await.page.clone();
        if let Some(previous) = page.previous_page_token() {
            previous.parse::<u64>().map(|p| p + 1).unwrap_or(1)
        } else if let Some(next) = page.next_page_token() {
            next.parse::<u64>()
                .map(|n| n.saturating_sub(1).max(1))
                .unwrap_or(1)
        } else {
            1
        }
    }

    /// Total page count for the current result set.
    pub async fn total_pages(&self) -> u64 {
        let count = self.view.read().await.page.count;
        let page_size = self
            .search
            .read()
            .await
            .filters()
            .get("page_size")
            .and_then(|value| match value {
                FilterValue::Int(i) => u64::try_from(*i).ok(),
                FilterValue::Text(s) => s.parse().ok(),
                _ => None,
            })
            .unwrap_or(self.config.default_page_size);
        count.div_ceil(page_size.max(1))
    }

    // ── Observable view access ───────────────────────────────────

    /// A snapshot of the observable view.
    pub async fn view(&self) -> ResourceView<T> {
        self.view.read().await.clone()
    }

    /// The currently loaded items.
    pub async fn items(&self) -> Vec<T> {
        self.view.read().await.items.clone()
    }

    /// The currently focused entity.
    pub async fn focused(&self) -> Option<T> {
        self.view.read().await.focused.clone()
    }

    /// The last surfaced error message, if any.
    pub async fn error(&self) -> Option<String> {
        self.view.read().await.error.clone()
    }

    /// Clears the surfaced error.
    pub async fn clear_error(&self) {
        self.view.write().await.error = None;
    }

    /// The current fetch status.
    pub async fn status(&self) -> FetchStatus {
        self.view.read().await.status
    }

    /// Pagination descriptor for the loaded list.
    pub async fn page_info(&self) -> PageInfo {
        self.view.read().await.page.clone()
    }

    /// Drops every cache entry. Called after successful mutations; also
    /// available to callers that know the server state moved underneath.
    pub async fn invalidate_cache(&self) {
        self.cache.write().await.clear();
    }

    // ── Internals ────────────────────────────────────────────────

    fn latest_seq(&self) -> u64 {
        self.seq.load(Ordering::SeqCst)
    }

    async fn set_status(&self, status: FetchStatus) {
        self.view.write().await.status = status;
    }

    pub(crate) async fn record_error(&self, message: impl Into<String>) {
        let mut view = self.view.write().await;
        view.error = Some(message.into());
        view.status = FetchStatus::Error;
    }

    /// Applies a completed list fetch to the view, unless superseded.
    /// Returns whether the result was applied.
    async fn apply_page(&self, seq: u64, page: &Page<T>) -> bool {
        if self.latest_seq() != seq {
            return false;
        }
        let mut view = self.view.write().await;
        view.items = page.items.clone();
        view.page = page.info();
        view.error = None;
        view.status = FetchStatus::Success;

        // A fresher copy of the focused entity in the list wins.
        if let Some(focused) = &view.focused {
            let focused_id = focused.id();
            if let Some(fresher) = page.items.iter().find(|item| item.id() == focused_id) {
                view.focused = Some(fresher.clone());
            }
        }
        true
    }

    /// Applies a failed list fetch to the view, unless superseded.
    async fn apply_failure(&self, seq: u64, message: &str) {
        if self.latest_seq() != seq {
            return;
        }
        let mut view = self.view.write().await;
        view.items.clear();
        view.page = PageInfo::default();
        view.error = Some(message.to_string());
        view.status = FetchStatus::Error;
    }
}

// ── Per-resource constructors ────────────────────────────────────

impl QueryEngine<Property> {
    /// Engine for property listings (GeoJSON feature-collection envelope).
    pub fn properties(transport: Arc<dyn Transport>, auth: Arc<dyn AuthProvider>) -> Self {
        Self::with_mapper(transport, auth, Arc::new(FeaturePageMapper))
    }
}

impl QueryEngine<UserProfile> {
    /// Engine for the user directory.
    pub fn users(transport: Arc<dyn Transport>, auth: Arc<dyn AuthProvider>) -> Self {
        Self::with_mapper(transport, auth, Arc::new(RecordPageMapper))
    }
}

impl QueryEngine<Enquiry> {
    /// Engine for enquiries/messaging.
    pub fn enquiries(transport: Arc<dyn Transport>, auth: Arc<dyn AuthProvider>) -> Self {
        Self::with_mapper(transport, auth, Arc::new(RecordPageMapper))
    }
}

impl QueryEngine<Review> {
    /// Engine for reviews.
    pub fn reviews(transport: Arc<dyn Transport>, auth: Arc<dyn AuthProvider>) -> Self {
        Self::with_mapper(transport, auth, Arc::new(RecordPageMapper))
    }
}

impl QueryEngine<Favourite> {
    /// Engine for favourites.
    pub fn favourites(transport: Arc<dyn Transport>, auth: Arc<dyn AuthProvider>) -> Self {
        Self::with_mapper(transport, auth, Arc::new(RecordPageMapper))
    }
}
