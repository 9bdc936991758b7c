//! In-memory task store implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{TaskPatch, TaskStore};
use crate::domain::{TaskId, TaskRecord, TaskStatus};
use crate::observability::StoreCounts;
use crate::ports::Clock;

/// Process-wide map from task id to record.
///
/// The mutex is never held across a collaborator await: every method locks,
/// mutates, and releases. That keeps the single-owner-per-task access
/// pattern race-free under cooperative scheduling, and makes the janitor's
/// delete-during-update interleaving resolve as a no-op on the update.
pub struct InMemoryTaskStore {
    tasks: Mutex<HashMap<TaskId, TaskRecord>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryTaskStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            tasks: Mutex::new(HashMap::new()),
            clock,
        }
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn create(&self, task_id: TaskId, record: TaskRecord) {
        // Duplicate create overwrites: no merge of old and new state.
        self.tasks.lock().await.insert(task_id, record);
    }

    async fn get(&self, task_id: &TaskId) -> Option<TaskRecord> {
        self.tasks.lock().await.get(task_id).cloned()
    }

    async fn update(&self, task_id: &TaskId, patch: TaskPatch) {
        let mut tasks = self.tasks.lock().await;
        let Some(record) = tasks.get_mut(task_id) else {
            // Deleted concurrently (evicted mid-run): the task is gone.
            return;
        };
        patch.apply_to(record);
        record.last_updated = self.clock.now();
    }

    async fn delete(&self, task_id: &TaskId) -> bool {
        self.tasks.lock().await.remove(task_id).is_some()
    }

    async fn list_all(&self) -> Vec<(TaskId, TaskRecord)> {
        self.tasks
            .lock()
            .await
            .iter()
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect()
    }

    async fn counts_by_status(&self) -> StoreCounts {
        let tasks = self.tasks.lock().await;
        let mut counts = StoreCounts::default();
        for record in tasks.values() {
            match record.status {
                TaskStatus::Pending => counts.pending += 1,
                TaskStatus::Processing => counts.processing += 1,
                TaskStatus::Completed => counts.completed += 1,
                TaskStatus::Failed => counts.failed += 1,
            }
        }
        counts
    }
}
