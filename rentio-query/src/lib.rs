//! Resource query and cache engine for the Rentio marketplace client.
//!
//! One [`QueryEngine`] instance per resource type turns a declarative
//! filter/sort/pagination description into transport requests, memoizes
//! results with time-based invalidation, reconciles mutations against
//! locally held state, and exposes derived pagination and filter-state
//! queries.
//!
//! # Architecture
//!
//! - **Filter**: loosely-typed filter sets and their canonical,
//!   sorted-key normalization
//! - **Cache**: TTL-invalidated result store keyed by filter signature
//! - **State**: query string, active filters, and search history
//! - **Transport**: abstract request/response envelope (plus a mock)
//! - **Envelope**: backend payload → uniform page transforms
//! - **Engine**: orchestrates the above per resource type
//! - **Mutation**: create/update/patch/delete with reconciliation
//! - **Favourites**: the one optimistic, rollback-capable mutation path
//!
//! # Example
//!
//! ```no_run
//! use rentio_query::{AnonymousAuth, FilterSet, QueryEngine};
//! use rentio_query::transport::mock::MockTransport;
//! use std::sync::Arc;
//!
//! # async fn run() -> rentio_query::QueryResult<()> {
//! let transport = Arc::new(MockTransport::new());
//! let engine = QueryEngine::properties(transport, Arc::new(AnonymousAuth));
//!
//! engine.set_search_query("apartment").await;
//! engine
//!     .update_filters(FilterSet::new().with("city", "Lisbon"))
//!     .await;
//! let page = engine.fetch_list(FilterSet::new(), true).await?;
//! println!("{} properties", page.count);
//! # Ok(())
//! # }
//! ```

mod cache;
mod debounce;
mod engine;
mod envelope;
mod error;
mod favourites;
mod filter;
mod mutation;
mod state;
pub mod transport;

pub use cache::{CacheEntry, QueryCache};
pub use debounce::{DebouncedSearch, DEFAULT_DEBOUNCE};
pub use engine::{
    EngineConfig, FetchStatus, QueryEngine, ResourceView, DEFAULT_PAGE_SIZE,
};
pub use envelope::{FeaturePageMapper, PageMapper, RecordPageMapper};
pub use error::{QueryError, QueryResult};
pub use favourites::FavouriteStore;
pub use filter::{FilterSet, FilterValue, NormalizedFilters};
pub use state::{SearchState, MECHANISM_KEYS, SEARCH_HISTORY_LIMIT};
pub use transport::{
    AnonymousAuth, ApiRequest, AuthProvider, HttpMethod, Transport, TransportResponse,
};
