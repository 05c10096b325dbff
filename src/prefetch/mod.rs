//! Adaptive data prefetching.
//!
//! Warms secondary data (growth records, milestones, photos) before the
//! user navigates to the tabs that need it, without blocking the initial
//! render and without letting one failed fetch affect the others.
//!
//! Four pieces cooperate:
//!
//! - `tasks`: builds one silent-refetch task per enabled feature area
//! - `schedule`: decides when an armed pass runs (now / idle slot / delay)
//! - `executor`: runs a pass settle-all, isolating per-task failures
//! - `predictor`: warms the next likely tab on navigation events
//!
//! `Preloader` ties them together and is the host view's handle. Prefetch
//! state lives only for the process lifetime; nothing is persisted.

pub mod executor;
pub mod predictor;
pub mod schedule;
pub mod tasks;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::Child;
use crate::sources::DataSources;

pub use executor::{run_all, TaskOutcome};
pub use predictor::predicted_next;
pub use schedule::{IdleSignal, Priority};
pub use tasks::{build_tasks, FeatureArea, PrefetchTask};

use schedule::ScheduledPass;

/// Configuration for the scheduled preload pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreloadSettings {
    pub enabled_areas: HashSet<FeatureArea>,
    pub delay_ms: u64,
    pub priority: Priority,
}

impl Default for PreloadSettings {
    fn default() -> Self {
        Self {
            enabled_areas: HashSet::from([FeatureArea::Growth, FeatureArea::Milestones]),
            delay_ms: 1000,
            priority: Priority::Idle,
        }
    }
}

impl PreloadSettings {
    /// Tuning used by the dashboard view: photos stay out of the pass (the
    /// album payload dwarfs the other areas) and the pass starts well after
    /// first render.
    pub fn dashboard() -> Self {
        Self {
            delay_ms: 1500,
            ..Self::default()
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Schedules background warming of secondary data for the tracked child.
///
/// The preloader reacts to two inputs: the child becoming available (or
/// changing) and the settings changing. Either one re-arms the scheduled
/// pass, cancelling a pending one so passes never stack. A pass that has
/// already started is never interrupted.
pub struct Preloader {
    sources: Arc<dyn DataSources>,
    settings: PreloadSettings,
    idle: Option<IdleSignal>,
    child: Option<Child>,
    armed: Option<ScheduledPass>,
}

impl Preloader {
    pub fn new(sources: Arc<dyn DataSources>, settings: PreloadSettings) -> Self {
        Self {
            sources,
            settings,
            idle: None,
            child: None,
            armed: None,
        }
    }

    /// Wire the host's idle signal so `idle` priority can use real idle
    /// slots instead of the fixed-delay fallback.
    pub fn with_idle_signal(mut self, signal: IdleSignal) -> Self {
        self.idle = Some(signal);
        self
    }

    /// Whether a child is set, i.e. whether passes can run at all.
    pub fn is_ready(&self) -> bool {
        self.child.is_some()
    }

    /// Whether a pass has been armed for the current (child, settings)
    /// epoch. The armed pass may have fired already; it is dropped only on
    /// the next re-arm.
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn child(&self) -> Option<&Child> {
        self.child.as_ref()
    }

    pub fn settings(&self) -> &PreloadSettings {
        &self.settings
    }

    /// Reactive input: the tracked child became available or changed.
    pub fn set_child(&mut self, child: Option<Child>) {
        self.child = child;
        self.rearm();
    }

    /// Reactive input: the preload configuration changed.
    pub fn set_settings(&mut self, settings: PreloadSettings) {
        self.settings = settings;
        self.rearm();
    }

    /// Run one pass right now, bypassing the scheduling strategy.
    ///
    /// Used for explicit user actions ("refresh everything"). Returns the
    /// per-task settlement records; with no child set this is a no-op.
    pub async fn preload_data(&self) -> Vec<TaskOutcome> {
        let tasks = build_tasks(self.child.as_ref(), &self.settings.enabled_areas, &self.sources);
        run_all(tasks).await
    }

    /// Tab-change hook. Warms the next likely area after a short delay,
    /// unless it is already warm or the active tab is terminal. Returns the
    /// area scheduled for warming, if any.
    ///
    /// Repeated navigation to the same tab re-schedules; the redundant pass
    /// is an idempotent refetch, so no dedup guard is kept.
    pub fn on_navigate(
        &self,
        active: FeatureArea,
        warmed: &HashSet<FeatureArea>,
    ) -> Option<FeatureArea> {
        let child = self.child.as_ref()?;
        let next = predictor::plan_followup(active, warmed)?;
        debug!(active = %active, next = %next, "Scheduling predicted prefetch");

        let sources = Arc::clone(&self.sources);
        let child = child.clone();
        let enabled = HashSet::from([next]);
        tokio::spawn(async move {
            tokio::time::sleep(predictor::PREDICT_DELAY).await;
            let tasks = build_tasks(Some(&child), &enabled, &sources);
            run_all(tasks).await;
        });

        Some(next)
    }

    fn rearm(&mut self) {
        // Dropping the previous guard aborts any pending (unfired) pass.
        self.armed = None;

        let Some(child) = self.child.clone() else {
            return;
        };

        let sources = Arc::clone(&self.sources);
        let enabled = self.settings.enabled_areas.clone();
        let pass = async move {
            let tasks = build_tasks(Some(&child), &enabled, &sources);
            let outcomes = run_all(tasks).await;
            let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
            info!(total = outcomes.len(), failed, "Preload pass complete");
        };

        self.armed = Some(schedule::schedule(
            self.settings.priority,
            self.settings.delay(),
            self.idle.clone(),
            pass,
        ));
    }
}

// ============================================================================
// Test support
// ============================================================================


// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::testing::{test_child, FakeSources};
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::advance;

    fn all_areas() -> HashSet<FeatureArea> {
        HashSet::from(FeatureArea::ALL)
    }

    fn visible_settings(delay_ms: u64) -> PreloadSettings {
        PreloadSettings {
            enabled_areas: all_areas(),
            delay_ms,
            priority: Priority::Visible,
        }
    }

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    fn count(counter: &Arc<AtomicUsize>) -> usize {
        counter.load(Ordering::SeqCst)
    }

    #[tokio::test]
    async fn test_preload_data_without_child_is_a_noop() {
        let fake = FakeSources::new();
        let growth = Arc::clone(&fake.growth_calls);
        let preloader = Preloader::new(Arc::new(fake), visible_settings(0));

        assert!(!preloader.is_ready());
        assert!(preloader.preload_data().await.is_empty());
        assert_eq!(count(&growth), 0);
    }

    #[tokio::test]
    async fn test_preload_data_passes_are_independent() {
        let fake = FakeSources::failing(FeatureArea::Milestones);
        let growth = Arc::clone(&fake.growth_calls);
        let photos = Arc::clone(&fake.photo_calls);
        // A long delay keeps the armed pass from firing inside this test.
        let mut preloader = Preloader::new(Arc::new(fake), visible_settings(60_000));
        preloader.set_child(Some(test_child()));
        assert!(preloader.is_ready());

        for _ in 0..2 {
            let outcomes = preloader.preload_data().await;
            assert_eq!(outcomes.len(), 3);
            assert!(outcomes[0].is_ok());
            assert!(!outcomes[1].is_ok());
            assert_eq!(outcomes[1].area, FeatureArea::Milestones);
            assert!(outcomes[2].is_ok());
        }

        // The milestones failure never bled into the sibling areas.
        assert_eq!(count(&growth), 2);
        assert_eq!(count(&photos), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_child_arms_a_delayed_pass() {
        let fake = FakeSources::new();
        let growth = Arc::clone(&fake.growth_calls);
        let mut preloader = Preloader::new(Arc::new(fake), visible_settings(1000));
        preloader.set_child(Some(test_child()));
        settle().await;

        advance(Duration::from_millis(999)).await;
        settle().await;
        assert_eq!(count(&growth), 0);

        advance(Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(count(&growth), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_replaces_pending_pass() {
        let fake = FakeSources::new();
        let growth = Arc::clone(&fake.growth_calls);
        let mut preloader = Preloader::new(Arc::new(fake), visible_settings(1000));

        preloader.set_child(Some(test_child()));
        settle().await;
        advance(Duration::from_millis(500)).await;

        // Re-trigger before the first pass fires: the pending one is dropped.
        preloader.set_child(Some(test_child()));
        settle().await;
        advance(Duration::from_millis(2000)).await;
        settle().await;
        assert_eq!(count(&growth), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_child_disarms() {
        let fake = FakeSources::new();
        let growth = Arc::clone(&fake.growth_calls);
        let mut preloader = Preloader::new(Arc::new(fake), visible_settings(1000));

        preloader.set_child(Some(test_child()));
        assert!(preloader.is_armed());
        preloader.set_child(None);
        assert!(!preloader.is_armed());

        advance(Duration::from_millis(2000)).await;
        settle().await;
        assert_eq!(count(&growth), 0);
        assert!(!preloader.is_ready());
    }

    #[tokio::test(start_paused = true)]
    async fn test_settings_change_rearms_with_new_delay() {
        let fake = FakeSources::new();
        let growth = Arc::clone(&fake.growth_calls);
        let mut preloader = Preloader::new(Arc::new(fake), visible_settings(5000));

        preloader.set_child(Some(test_child()));
        preloader.set_settings(visible_settings(100));
        settle().await;

        advance(Duration::from_millis(100)).await;
        settle().await;
        assert_eq!(count(&growth), 1);

        // The original 5000ms pass was cancelled, not deferred.
        advance(Duration::from_millis(10_000)).await;
        settle().await;
        assert_eq!(count(&growth), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_priority_is_bounded_by_deadline() {
        let fake = FakeSources::new();
        let growth = Arc::clone(&fake.growth_calls);
        let settings = PreloadSettings {
            enabled_areas: all_areas(),
            delay_ms: 1000,
            priority: Priority::Idle,
        };
        let mut preloader =
            Preloader::new(Arc::new(fake), settings).with_idle_signal(IdleSignal::new());
        preloader.set_child(Some(test_child()));
        settle().await;

        // No idle slot is ever signalled; the pass still fires at 5000ms.
        advance(Duration::from_millis(4999)).await;
        settle().await;
        assert_eq!(count(&growth), 0);

        advance(Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(count(&growth), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_on_navigate_schedules_exactly_the_predicted_area() {
        let fake = FakeSources::new();
        let growth = Arc::clone(&fake.growth_calls);
        let milestones = Arc::clone(&fake.milestone_calls);
        let photos = Arc::clone(&fake.photo_calls);
        let mut preloader = Preloader::new(Arc::new(fake), visible_settings(0));
        preloader.child = Some(test_child());

        let scheduled = preloader.on_navigate(FeatureArea::Growth, &HashSet::new());
        assert_eq!(scheduled, Some(FeatureArea::Milestones));
        settle().await;

        advance(Duration::from_millis(2000)).await;
        settle().await;
        assert_eq!(count(&milestones), 1);
        assert_eq!(count(&growth), 0);
        assert_eq!(count(&photos), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_on_navigate_skips_warmed_and_terminal_areas() {
        let fake = FakeSources::new();
        let milestones = Arc::clone(&fake.milestone_calls);
        let photos = Arc::clone(&fake.photo_calls);
        let mut preloader = Preloader::new(Arc::new(fake), visible_settings(0));
        preloader.child = Some(test_child());

        let warmed = HashSet::from([FeatureArea::Milestones]);
        assert_eq!(preloader.on_navigate(FeatureArea::Growth, &warmed), None);
        assert_eq!(preloader.on_navigate(FeatureArea::Photos, &HashSet::new()), None);

        advance(Duration::from_millis(5000)).await;
        settle().await;
        assert_eq!(count(&milestones), 0);
        assert_eq!(count(&photos), 0);
    }

    #[tokio::test]
    async fn test_on_navigate_without_child_schedules_nothing() {
        let preloader = Preloader::new(FakeSources::arced(), visible_settings(0));
        assert_eq!(preloader.on_navigate(FeatureArea::Growth, &HashSet::new()), None);
    }

    #[test]
    fn test_default_settings_match_dashboard_contract() {
        let settings = PreloadSettings::default();
        assert_eq!(
            settings.enabled_areas,
            HashSet::from([FeatureArea::Growth, FeatureArea::Milestones])
        );
        assert_eq!(settings.delay_ms, 1000);
        assert_eq!(settings.priority, Priority::Idle);

        let dashboard = PreloadSettings::dashboard();
        assert_eq!(dashboard.delay_ms, 1500);
        assert!(!dashboard.enabled_areas.contains(&FeatureArea::Photos));
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let settings: PreloadSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, PreloadSettings::default());

        let settings: PreloadSettings =
            serde_json::from_str(r#"{"enabledAreas": ["photos"], "priority": "immediate"}"#)
                .unwrap();
        assert_eq!(settings.enabled_areas, HashSet::from([FeatureArea::Photos]));
        assert_eq!(settings.priority, Priority::Immediate);
    }
}
