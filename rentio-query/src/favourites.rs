//! Optimistic favourite toggling.
//!
//! The only reconcile-then-call path in the system: membership is applied
//! locally before the network call, with an explicit snapshot taken
//! first. Confirmed success commits (discards the snapshot and clears the
//! engine's cache); failure restores the snapshot and surfaces the error.
//!
//! Toggles are idempotent: adding an already-favourited property or
//! removing an absent one is a local no-op with no network call.

use crate::engine::QueryEngine;
use crate::error::{QueryError, QueryResult};
use crate::filter::FilterSet;
use crate::transport::ApiRequest;
use rentio_types::{Favourite, ResourceId};
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Pre-mutation membership, restored on rollback.
struct Snapshot(BTreeSet<ResourceId>);

/// Locally held favourite membership with optimistic mutation.
///
/// Keyed by property id; the backend addresses favourite records by the
/// property they mark.
pub struct FavouriteStore {
    engine: Arc<QueryEngine<Favourite>>,
    ids: RwLock<BTreeSet<ResourceId>>,
}

impl FavouriteStore {
    /// Creates a store over a favourites engine with empty membership.
    pub fn new(engine: Arc<QueryEngine<Favourite>>) -> Self {
        Self {
            engine,
            ids: RwLock::new(BTreeSet::new()),
        }
    }

    /// Rebuilds the membership set from the server list.
    pub async fn refresh(&self) -> QueryResult<()> {
        let page = self.engine.fetch_list(FilterSet::new(), false).await?;
        let ids = page.items.iter().map(|fav| fav.property).collect();
        *self.ids.write().await = ids;
        Ok(())
    }

    /// Whether a property is currently favourited.
    pub async fn contains(&self, property: ResourceId) -> bool {
        self.ids.read().await.contains(&property)
    }

    /// The current membership set.
    pub async fn ids(&self) -> BTreeSet<ResourceId> {
        self.ids.read().await.clone()
    }

    /// Favourites a property optimistically.
    ///
    /// Returns `Ok(false)` without any network call when the property is
    /// already favourited.
    pub async fn add(&self, property: ResourceId) -> QueryResult<bool> {
        if self.ids.read().await.contains(&property) {
            debug!(%property, "already favourited; skipping network call");
            return Ok(false);
        }

        let snapshot = self.snapshot().await;
        self.ids.write().await.insert(property);

        let request = ApiRequest::post(&self.engine.config.endpoint)
            .with_body(json!({ "property": property }))
            .with_headers(self.engine.auth.auth_headers());
        let response = self.engine.transport.request(request).await;

        if response.success {
            self.commit().await;
            debug!(%property, "favourite added");
            Ok(true)
        } else {
            self.rollback(snapshot, response.error, "favourite add failed")
                .await
        }
    }

    /// Removes a favourite optimistically.
    ///
    /// Returns `Ok(false)` without any network call when the property is
    /// not favourited.
    pub async fn remove(&self, property: ResourceId) -> QueryResult<bool> {
        if !self.ids.read().await.contains(&property) {
            debug!(%property, "not favourited; skipping network call");
            return Ok(false);
        }

        let snapshot = self.snapshot().await;
        self.ids.write().await.remove(&property);

        let request = ApiRequest::delete(format!("{}{}/", self.engine.config.endpoint, property))
            .with_headers(self.engine.auth.auth_headers());
        let response = self.engine.transport.request(request).await;

        if response.success {
            self.commit().await;
            debug!(%property, "favourite removed");
            Ok(true)
        } else {
            self.rollback(snapshot, response.error, "favourite remove failed")
                .await
        }
    }

    // ── Snapshot protocol ────────────────────────────────────────

    async fn snapshot(&self) -> Snapshot {
        Snapshot(self.ids.read().await.clone())
    }

    async fn commit(&self) {
        // Server state moved: cached favourite lists are no longer
        // trustworthy. The snapshot is simply dropped.
        self.engine.invalidate_cache().await;
    }

    async fn rollback(
        &self,
        snapshot: Snapshot,
        error: Option<String>,
        context: &str,
    ) -> QueryResult<bool> {
        let message = error.unwrap_or_else(|| "request failed".to_string());
        warn!(%message, "{context}; rolling back");
        *self.ids.write().await = snapshot.0;
        self.engine.record_error(message.clone()).await;
        Err(QueryError::Transport(message))
    }
}
