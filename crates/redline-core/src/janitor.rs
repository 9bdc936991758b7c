//! TaskJanitor: age-based eviction of task records.

use std::sync::Arc;

use chrono::Duration;

use crate::ports::Clock;
use crate::store::TaskStore;

/// Evicts records older than a retention window.
///
/// The reference timestamp is `completed_at` when the task finished, else
/// `start_time` — so zombie records that never reached a terminal state age
/// out too. Idempotent, and safe to run concurrently with runners: eviction
/// uses the store's per-key delete, and a runner's subsequent update on an
/// evicted task resolves as a no-op.
///
/// The core does not schedule sweeps itself; an external scheduler is
/// expected to call [`TaskJanitor::sweep`] periodically.
pub struct TaskJanitor {
    store: Arc<dyn TaskStore>,
    clock: Arc<dyn Clock>,
}

impl TaskJanitor {
    pub fn new(store: Arc<dyn TaskStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Delete every record older than `max_age_hours`. Returns the count.
    pub async fn sweep(&self, max_age_hours: u64) -> usize {
        let now = self.clock.now();
        let max_age = Duration::seconds((max_age_hours * 3600) as i64);

        let mut evicted = 0;
        for (task_id, record) in self.store.list_all().await {
            let reference = record.completed_at.unwrap_or(record.start_time);
            if now - reference > max_age && self.store.delete(&task_id).await {
                evicted += 1;
            }
        }

        if evicted > 0 {
            tracing::info!(evicted, "cleaned up old task records");
        }
        evicted
    }
}
