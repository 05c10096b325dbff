//! Settle-all execution of prefetch tasks.

use futures::future;
use tracing::{debug, warn};

use super::tasks::{FeatureArea, PrefetchTask};

/// Outcome of a single task within one pass.
#[derive(Debug)]
pub struct TaskOutcome {
    pub area: FeatureArea,
    pub result: anyhow::Result<()>,
}

impl TaskOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run every task to settlement, concurrently.
///
/// The aggregate preserves dispatch order regardless of which adapter
/// finishes first. A failing task is recorded and logged as a warning; it
/// never cancels its siblings and never surfaces to the caller - the areas
/// will be fetched again, with user-visible error states, when the user
/// actually navigates to them.
pub async fn run_all(tasks: Vec<PrefetchTask>) -> Vec<TaskOutcome> {
    if tasks.is_empty() {
        return Vec::new();
    }

    debug!(count = tasks.len(), "Running prefetch pass");

    future::join_all(tasks.into_iter().map(|task| async move {
        let result = task.fetch.await;
        if let Err(ref e) = result {
            warn!(area = %task.area, error = %e, "Prefetch failed");
        }
        TaskOutcome {
            area: task.area,
            result,
        }
    }))
    .await
}
