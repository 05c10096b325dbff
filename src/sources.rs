//! Data source adapters bridging the API client and the in-memory store.
//!
//! Each feature area exposes one refetch entry point. The `silent` flag is
//! the non-intrusive mode prefetching uses: the store's loading flag stays
//! untouched, so an in-progress background fetch is invisible to the view
//! layer. Refetches are idempotent reads and safe to run concurrently.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use tracing::debug;

use crate::api::ApiClient;
use crate::cache::DataStore;
use crate::models::group_by_age;
use crate::prefetch::FeatureArea;

/// Per-feature-area refetch operations.
///
/// Implemented by `ApiSources` in production; tests substitute doubles.
/// Methods return boxed futures so the preloader can hold the adapters as a
/// trait object and the returned work can outlive the call site.
pub trait DataSources: Send + Sync {
    fn refetch_growth(&self, child_id: &str, silent: bool) -> BoxFuture<'static, Result<()>>;

    fn refetch_milestones(&self, child_id: &str, silent: bool) -> BoxFuture<'static, Result<()>>;

    /// Photos additionally need the child's birth date to bucket the album
    /// chronologically.
    fn refetch_photos(
        &self,
        child_id: &str,
        silent: bool,
        birth_date: DateTime<Utc>,
    ) -> BoxFuture<'static, Result<()>>;
}

/// Production adapters: fetch through the API client, publish to the store.
/// Clone-cheap captures - the client shares its connection pool and the
/// store is shared behind an `Arc`.
pub struct ApiSources {
    api: ApiClient,
    store: Arc<DataStore>,
}

impl ApiSources {
    pub fn new(api: ApiClient, store: Arc<DataStore>) -> Self {
        Self { api, store }
    }
}

impl DataSources for ApiSources {
    fn refetch_growth(&self, child_id: &str, silent: bool) -> BoxFuture<'static, Result<()>> {
        let api = self.api.clone();
        let store = Arc::clone(&self.store);
        let child_id = child_id.to_string();
        Box::pin(async move {
            if !silent {
                store.set_loading(FeatureArea::Growth, true).await;
            }
            match api.fetch_growth_records(&child_id).await {
                Ok(records) => {
                    debug!(count = records.len(), "Growth records refreshed");
                    store.put_growth(records).await;
                    Ok(())
                }
                Err(e) => {
                    if !silent {
                        store.set_loading(FeatureArea::Growth, false).await;
                    }
                    Err(e)
                }
            }
        })
    }

    fn refetch_milestones(&self, child_id: &str, silent: bool) -> BoxFuture<'static, Result<()>> {
        let api = self.api.clone();
        let store = Arc::clone(&self.store);
        let child_id = child_id.to_string();
        Box::pin(async move {
            if !silent {
                store.set_loading(FeatureArea::Milestones, true).await;
            }
            match api.fetch_milestones(&child_id).await {
                Ok(milestones) => {
                    debug!(count = milestones.len(), "Milestones refreshed");
                    store.put_milestones(milestones).await;
                    Ok(())
                }
                Err(e) => {
                    if !silent {
                        store.set_loading(FeatureArea::Milestones, false).await;
                    }
                    Err(e)
                }
            }
        })
    }

    fn refetch_photos(
        &self,
        child_id: &str,
        silent: bool,
        birth_date: DateTime<Utc>,
    ) -> BoxFuture<'static, Result<()>> {
        let api = self.api.clone();
        let store = Arc::clone(&self.store);
        let child_id = child_id.to_string();
        Box::pin(async move {
            if !silent {
                store.set_loading(FeatureArea::Photos, true).await;
            }
            match api.fetch_media(&child_id).await {
                Ok(items) => {
                    let groups = group_by_age(items, birth_date);
                    debug!(groups = groups.len(), "Photo album refreshed");
                    store.put_photos(groups).await;
                    Ok(())
                }
                Err(e) => {
                    if !silent {
                        store.set_loading(FeatureArea::Photos, false).await;
                    }
                    Err(e)
                }
            }
        })
    }
}
