//! Mutation coordinator — create/update/patch/delete with reconciliation.
//!
//! Every successful mutation invalidates the query cache wholesale and
//! reconciles locally held list and single-entity state. Failures surface
//! the transport's message as observable error state and leave local
//! state untouched. These operations are call-then-reconcile; the only
//! reconcile-then-call path in the system is the optimistic favourite
//! store.

use crate::engine::{FetchStatus, QueryEngine};
use crate::error::{QueryError, QueryResult};
use crate::transport::ApiRequest;
use rentio_types::{Resource, ResourceId};
use serde_json::Value;
use tracing::{debug, warn};

impl<T: Resource> QueryEngine<T> {
    /// Creates a new entity. On success the cache is cleared and the new
    /// entity is prepended to the loaded list.
    pub async fn create(&self, body: Value) -> QueryResult<T> {
        let request = ApiRequest::post(&self.config.endpoint)
            .with_body(body)
            .with_headers(self.auth.auth_headers());
        let item = self.dispatch_mutation(request).await?;

        self.cache.write().await.clear();
        let mut view = self.view.write().await;
        view.items.insert(0, item.clone());
        view.page.count += 1;
        view.error = None;
        view.status = FetchStatus::Success;
        debug!(resource = %self.kind(), id = %item.id(), "created");
        Ok(item)
    }

    /// Replaces an entity in full. On success the cache is cleared and the
    /// fresh copy replaces the matching-id item in the loaded list and the
    /// focus.
    pub async fn update(&self, id: ResourceId, body: Value) -> QueryResult<T> {
        let request = ApiRequest::put(self.entity_endpoint(id))
            .with_body(body)
            .with_headers(self.auth.auth_headers());
        let item = self.dispatch_mutation(request).await?;
        self.reconcile_replacement(&item).await;
        Ok(item)
    }

    /// Partially updates an entity. Reconciliation matches [`update`].
    ///
    /// [`update`]: QueryEngine::update
    pub async fn patch(&self, id: ResourceId, body: Value) -> QueryResult<T> {
        let request = ApiRequest::patch(self.entity_endpoint(id))
            .with_body(body)
            .with_headers(self.auth.auth_headers());
        let item = self.dispatch_mutation(request).await?;
        self.reconcile_replacement(&item).await;
        Ok(item)
    }

    /// Deletes an entity. On success the cache is cleared, the entity is
    /// removed from the loaded list, and a matching focus is cleared.
    pub async fn delete(&self, id: ResourceId) -> QueryResult<()> {
        let request =
            ApiRequest::delete(self.entity_endpoint(id)).with_headers(self.auth.auth_headers());
        self.set_loading().await;
        let response = self.transport.request(request).await;

        if !response.success {
            let message = response
                .error
                .unwrap_or_else(|| "request failed".to_string());
            warn!(resource = %self.kind(), %id, %message, "delete failed");
            self.record_error(message.clone()).await;
            return Err(QueryError::Transport(message));
        }

        self.cache.write().await.clear();
        let mut view = self.view.write().await;
        let before = view.items.len();
        view.items.retain(|item| item.id() != id);
        if view.items.len() < before {
            view.page.count = view.page.count.saturating_sub(1);
        }
        if view.focused.as_ref().is_some_and(|f| f.id() == id) {
            view.focused = None;
        }
        view.error = None;
        view.status = FetchStatus::Success;
        debug!(resource = %self.kind(), %id, "deleted");
        Ok(())
    }

    // ── Internals ────────────────────────────────────────────────

    fn entity_endpoint(&self, id: ResourceId) -> String {
        format!("{}{}/", self.config.endpoint, id)
    }

    async fn set_loading(&self) {
        self.view.write().await.status = FetchStatus::Loading;
    }

    /// Runs a mutating request and maps the returned entity. Failures are
    /// surfaced as observable error state without touching local data.
    async fn dispatch_mutation(&self, request: ApiRequest) -> QueryResult<T> {
        self.set_loading().await;
        let response = self.transport.request(request).await;

        if !response.success {
            let message = response
                .error
                .unwrap_or_else(|| "request failed".to_string());
            warn!(resource = %self.kind(), %message, "mutation failed");
            self.record_error(message.clone()).await;
            return Err(QueryError::Transport(message));
        }

        match self.mapper.map_item(&response.data) {
            Ok(item) => Ok(item),
            Err(e) => {
                self.record_error(e.to_string()).await;
                Err(e)
            }
        }
    }

    /// Replaces the matching-id item in the loaded list and the focus.
    async fn reconcile_replacement(&self, item: &T) {
        self.cache.write().await.clear();
        let mut view = self.view.write().await;
        for held in &mut view.items {
            if held.id() == item.id() {
                *held = item.clone();
            }
        }
        if view.focused.as_ref().is_some_and(|f| f.id() == item.id()) {
            view.focused = Some(item.clone());
        }
        view.error = None;
        view.status = FetchStatus::Success;
        debug!(resource = %self.kind(), id = %item.id(), "reconciled");
    }
}
