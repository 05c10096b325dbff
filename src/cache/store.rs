use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::models::{GrowthRecord, Milestone, PhotoGroup};
use crate::prefetch::FeatureArea;

/// Consider stored data stale after 1 hour.
/// Balances freshness with reducing unnecessary refetches for slowly-changing data.
const STALE_MINUTES: i64 = 60;

/// A fetched payload together with when it arrived.
#[derive(Debug, Clone)]
pub struct CachedData<T> {
    pub data: T,
    pub fetched_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            fetched_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.fetched_at).num_minutes()
    }

    pub fn is_stale(&self) -> bool {
        self.age_minutes() > STALE_MINUTES
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Covers clock skew as well
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }
}

#[derive(Debug)]
struct Slot<T> {
    cached: Option<CachedData<T>>,
    loading: bool,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            cached: None,
            loading: false,
        }
    }
}

impl<T> Slot<T> {
    fn fill(&mut self, data: T) {
        self.cached = Some(CachedData::new(data));
        self.loading = false;
    }
}

/// Shared in-memory store, one slot per feature area.
///
/// Adapters write through `put_*`; the view layer reads snapshots. The store
/// holds nothing across process restarts.
#[derive(Debug, Default)]
pub struct DataStore {
    growth: RwLock<Slot<Vec<GrowthRecord>>>,
    milestones: RwLock<Slot<Vec<Milestone>>>,
    photos: RwLock<Slot<Vec<PhotoGroup>>>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Growth records =====

    pub async fn put_growth(&self, records: Vec<GrowthRecord>) {
        self.growth.write().await.fill(records);
    }

    pub async fn growth(&self) -> Option<CachedData<Vec<GrowthRecord>>> {
        self.growth.read().await.cached.clone()
    }

    // ===== Milestones =====

    pub async fn put_milestones(&self, milestones: Vec<Milestone>) {
        self.milestones.write().await.fill(milestones);
    }

    pub async fn milestones(&self) -> Option<CachedData<Vec<Milestone>>> {
        self.milestones.read().await.cached.clone()
    }

    // ===== Photos =====

    pub async fn put_photos(&self, groups: Vec<PhotoGroup>) {
        self.photos.write().await.fill(groups);
    }

    pub async fn photos(&self) -> Option<CachedData<Vec<PhotoGroup>>> {
        self.photos.read().await.cached.clone()
    }

    // ===== Loading flags =====

    /// Mark an area as loading. Silent refetches never call this, which is
    /// what keeps a prefetch invisible to the view layer.
    pub async fn set_loading(&self, area: FeatureArea, loading: bool) {
        match area {
            FeatureArea::Growth => self.growth.write().await.loading = loading,
            FeatureArea::Milestones => self.milestones.write().await.loading = loading,
            FeatureArea::Photos => self.photos.write().await.loading = loading,
        }
    }

    pub async fn is_loading(&self, area: FeatureArea) -> bool {
        match area {
            FeatureArea::Growth => self.growth.read().await.loading,
            FeatureArea::Milestones => self.milestones.read().await.loading,
            FeatureArea::Photos => self.photos.read().await.loading,
        }
    }

    // ===== Warm state =====

    pub async fn is_warmed(&self, area: FeatureArea) -> bool {
        match area {
            FeatureArea::Growth => self.growth.read().await.cached.is_some(),
            FeatureArea::Milestones => self.milestones.read().await.cached.is_some(),
            FeatureArea::Photos => self.photos.read().await.cached.is_some(),
        }
    }

    /// Areas that currently hold data. Feeds tab-change prediction.
    pub async fn warmed_areas(&self) -> HashSet<FeatureArea> {
        let mut warmed = HashSet::new();
        for area in FeatureArea::ALL {
            if self.is_warmed(area).await {
                warmed.insert(area);
            }
        }
        warmed
    }

    // ===== Age information =====

    pub async fn ages(&self) -> StoreAges {
        StoreAges {
            growth: self.growth.read().await.cached.as_ref().map(|c| c.age_display()),
            milestones: self
                .milestones
                .read()
                .await
                .cached
                .as_ref()
                .map(|c| c.age_display()),
            photos: self.photos.read().await.cached.as_ref().map(|c| c.age_display()),
        }
    }
}

/// Per-area data ages for the status line.
#[derive(Debug, Default)]
pub struct StoreAges {
    pub growth: Option<String>,
    pub milestones: Option<String>,
    pub photos: Option<String>,
}

impl StoreAges {
    /// First available age across areas, or "never".
    pub fn last_updated(&self) -> String {
        [&self.growth, &self.milestones, &self.photos]
            .iter()
            .copied()
            .flatten()
            .next()
            .cloned()
            .unwrap_or_else(|| "never".to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_cached_data_age_display_just_now() {
        let cached = CachedData::new(vec![1, 2, 3]);
        assert_eq!(cached.age_display(), "just now");
    }

    #[test]
    fn test_cached_data_is_stale() {
        let fresh = CachedData::new(vec![1]);
        assert!(!fresh.is_stale());

        let mut old = CachedData::new(vec![1]);
        old.fetched_at = Utc::now() - Duration::minutes(61);
        assert!(old.is_stale());
    }

    #[test]
    fn test_store_ages_last_updated_with_values() {
        let ages = StoreAges {
            growth: Some("5m ago".to_string()),
            milestones: None,
            photos: None,
        };
        assert_eq!(ages.last_updated(), "5m ago");
    }

    #[test]
    fn test_store_ages_last_updated_empty() {
        let ages = StoreAges::default();
        assert_eq!(ages.last_updated(), "never");
    }

    #[tokio::test]
    async fn test_warmed_areas_tracks_fills() {
        let store = DataStore::new();
        assert!(store.warmed_areas().await.is_empty());

        store.put_milestones(Vec::new()).await;
        let warmed = store.warmed_areas().await;
        assert_eq!(warmed.len(), 1);
        assert!(warmed.contains(&FeatureArea::Milestones));
        assert!(!store.is_warmed(FeatureArea::Growth).await);
    }

    #[tokio::test]
    async fn test_fill_clears_loading_flag() {
        let store = DataStore::new();
        store.set_loading(FeatureArea::Growth, true).await;
        assert!(store.is_loading(FeatureArea::Growth).await);

        store.put_growth(Vec::new()).await;
        assert!(!store.is_loading(FeatureArea::Growth).await);
    }
}
