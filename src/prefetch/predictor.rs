//! Navigation-aware prefetch prediction.
//!
//! Observed usage is linear: people check growth records, then milestones,
//! then the album. The transition table encodes that path so the next
//! likely tab is warmed while the current one is being read. Photos is
//! terminal; nothing follows it.

use std::collections::HashSet;
use std::time::Duration;

use super::tasks::FeatureArea;

/// Delay between landing on a tab and warming the predicted next one.
pub(crate) const PREDICT_DELAY: Duration = Duration::from_millis(2000);

/// Fixed transition table.
pub fn predicted_next(area: FeatureArea) -> Option<FeatureArea> {
    match area {
        FeatureArea::Growth => Some(FeatureArea::Milestones),
        FeatureArea::Milestones => Some(FeatureArea::Photos),
        FeatureArea::Photos => None,
    }
}

/// Which area, if any, should be warmed after a tab change.
pub(crate) fn plan_followup(
    active: FeatureArea,
    warmed: &HashSet<FeatureArea>,
) -> Option<FeatureArea> {
    predicted_next(active).filter(|next| !warmed.contains(next))
}
