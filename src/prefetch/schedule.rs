//! Scheduling strategy for preload passes.
//!
//! The strategy decides *when* an armed pass runs: right away, on the next
//! idle slot the host signals (bounded by a deadline), or after a fixed
//! delay. tokio has no idle callback, so idleness is a host-supplied
//! `IdleSignal`; hosts that never signal still get the deadline behavior.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

/// Upper bound on waiting for an idle slot before running anyway.
pub(crate) const IDLE_TIMEOUT: Duration = Duration::from_millis(5000);

/// When a preload pass executes relative to its trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Dispatch on the current runtime turn, no timer.
    Immediate,
    /// Wait for the host's idle signal, bounded by `IDLE_TIMEOUT`; with no
    /// signal configured, fall back to the fixed delay.
    #[default]
    Idle,
    /// Run after the configured delay. Unknown configuration values land
    /// here as the safe default.
    Visible,
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mode = String::deserialize(deserializer)?;
        Ok(match mode.as_str() {
            "immediate" => Priority::Immediate,
            "idle" => Priority::Idle,
            // Unrecognized modes get the fixed-delay behavior.
            _ => Priority::Visible,
        })
    }
}

/// Handle the host runtime uses to report spare capacity.
///
/// `notify_idle` wakes whatever pass is currently waiting; a signal sent
/// while nothing is armed is dropped rather than banked, so it cannot fire
/// a later pass early.
#[derive(Clone, Debug, Default)]
pub struct IdleSignal {
    notify: Arc<Notify>,
}

impl IdleSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal one idle slot.
    pub fn notify_idle(&self) {
        self.notify.notify_waiters();
    }

    pub(crate) async fn wait(&self) {
        self.notify.notified().await;
    }
}

/// An armed, not-yet-fired pass.
///
/// Owns the spawned timer task and aborts it on drop, so re-arming replaces
/// the pending pass instead of stacking another one: at most one pending
/// pass exists per (subject, configuration) epoch. Aborting a pass that has
/// already started running is a no-op.
#[derive(Debug)]
pub(crate) struct ScheduledPass {
    handle: JoinHandle<()>,
}

impl Drop for ScheduledPass {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Arm one pass according to `priority`.
pub(crate) fn schedule<F>(
    priority: Priority,
    delay: Duration,
    idle: Option<IdleSignal>,
    pass: F,
) -> ScheduledPass
where
    F: Future<Output = ()> + Send + 'static,
{
    let handle = tokio::spawn(async move {
        match priority {
            Priority::Immediate => {}
            Priority::Idle => match idle {
                Some(signal) => {
                    tokio::select! {
                        _ = signal.wait() => debug!("Idle slot granted"),
                        _ = sleep(IDLE_TIMEOUT) => {
                            debug!("No idle slot within deadline, running anyway")
                        }
                    }
                }
                None => sleep(delay).await,
            },
            Priority::Visible => sleep(delay).await,
        }
        pass.await;
    });

    ScheduledPass { handle }
}
