//! Prefetch task construction.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::models::Child;
use crate::sources::DataSources;

/// Secondary data categories that can be warmed ahead of navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureArea {
    Growth,
    Milestones,
    Photos,
}

impl FeatureArea {
    /// Canonical dispatch order for one preload pass.
    pub const ALL: [FeatureArea; 3] = [
        FeatureArea::Growth,
        FeatureArea::Milestones,
        FeatureArea::Photos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureArea::Growth => "growth",
            FeatureArea::Milestones => "milestones",
            FeatureArea::Photos => "photos",
        }
    }
}

impl fmt::Display for FeatureArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scheduled invocation of a feature area's background refetch.
///
/// Built once per scheduling pass and consumed by the executor; the future
/// closes over the adapter call in silent mode.
pub struct PrefetchTask {
    pub area: FeatureArea,
    pub(crate) fetch: BoxFuture<'static, anyhow::Result<()>>,
}

impl PrefetchTask {
    pub(crate) fn new(area: FeatureArea, fetch: BoxFuture<'static, anyhow::Result<()>>) -> Self {
        Self { area, fetch }
    }
}

impl fmt::Debug for PrefetchTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefetchTask")
            .field("area", &self.area)
            .finish_non_exhaustive()
    }
}

/// Build at most one task per enabled area, in canonical order.
///
/// Without a child there is nothing to key the fetches on, so the result is
/// empty and nothing is invoked.
pub fn build_tasks(
    child: Option<&Child>,
    enabled: &HashSet<FeatureArea>,
    sources: &Arc<dyn DataSources>,
) -> Vec<PrefetchTask> {
    let Some(child) = child else {
        return Vec::new();
    };

    let mut tasks = Vec::new();
    for area in FeatureArea::ALL {
        if !enabled.contains(&area) {
            continue;
        }
        let fetch = match area {
            FeatureArea::Growth => sources.refetch_growth(&child.id, true),
            FeatureArea::Milestones => sources.refetch_milestones(&child.id, true),
            // The birth date drives the album's chronological bucketing.
            FeatureArea::Photos => sources.refetch_photos(&child.id, true, child.birth_date),
        };
        tasks.push(PrefetchTask::new(area, fetch));
    }
    tasks
}
