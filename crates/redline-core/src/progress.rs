//! ProgressRecorder: phase writes plus the cooperative checkpoint.

use std::sync::Arc;

use crate::domain::TaskId;
use crate::store::{TaskPatch, TaskStore};

/// Records a task's progress at each phase boundary.
///
/// `advance` is a designated suspension point: after the write it yields to
/// the scheduler so status-polling readers (and other tasks) run before the
/// owning task proceeds to its next phase. That is what makes progress
/// observable mid-run instead of only at completion.
#[derive(Clone)]
pub struct ProgressRecorder {
    store: Arc<dyn TaskStore>,
}

impl ProgressRecorder {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// Set progress and message, then yield.
    ///
    /// No-op if the record no longer exists (evicted mid-run): the store's
    /// update contract already swallows that case.
    pub async fn advance(&self, task_id: &TaskId, progress: u8, message: &str) {
        self.store
            .update(task_id, TaskPatch::progress(progress, message))
            .await;
        tokio::task::yield_now().await;
    }
}
