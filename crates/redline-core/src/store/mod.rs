//! Task store: the single shared mutable structure of the core.

mod memory;

pub use memory::InMemoryTaskStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{TaskId, TaskOutput, TaskRecord, TaskStatus};
use crate::observability::StoreCounts;

/// Partial update merged into an existing record.
///
/// Only set fields are applied; `last_updated` is stamped by the store on
/// every successful merge. The three constructors cover the canonical writes
/// a runner performs.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub status: Option<TaskStatus>,
    pub progress: Option<u8>,
    pub message: Option<String>,
    pub result: Option<TaskOutput>,
    pub error: Option<String>,
    pub error_trace: Option<String>,
    pub processing_time: Option<f64>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskPatch {
    /// Phase write: re-enters `processing` with new progress and message.
    pub fn progress(progress: u8, message: impl Into<String>) -> Self {
        Self {
            status: Some(TaskStatus::Processing),
            progress: Some(progress),
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Terminal write for success: progress is forced to 100.
    pub fn completed(
        output: TaskOutput,
        message: impl Into<String>,
        processing_time: f64,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            status: Some(TaskStatus::Completed),
            progress: Some(100),
            message: Some(message.into()),
            result: Some(output),
            processing_time: Some(processing_time),
            completed_at: Some(at),
            ..Self::default()
        }
    }

    /// Terminal write for failure.
    ///
    /// Progress is deliberately left untouched: a failed record freezes at
    /// its last pre-failure value, which tells an operator how far it got.
    pub fn failed(
        error: impl Into<String>,
        error_trace: impl Into<String>,
        message: impl Into<String>,
        processing_time: f64,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            status: Some(TaskStatus::Failed),
            message: Some(message.into()),
            error: Some(error.into()),
            error_trace: Some(error_trace.into()),
            processing_time: Some(processing_time),
            completed_at: Some(at),
            ..Self::default()
        }
    }

    /// Merge the set fields into `record`. `start_time` is never touched.
    pub fn apply_to(self, record: &mut TaskRecord) {
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(progress) = self.progress {
            record.progress = progress;
        }
        if let Some(message) = self.message {
            record.message = message;
        }
        if let Some(result) = self.result {
            record.result = Some(result);
        }
        if let Some(error) = self.error {
            record.error = Some(error);
        }
        if let Some(error_trace) = self.error_trace {
            record.error_trace = Some(error_trace);
        }
        if let Some(processing_time) = self.processing_time {
            record.processing_time = Some(processing_time);
        }
        if let Some(completed_at) = self.completed_at {
            record.completed_at = Some(completed_at);
        }
    }
}

/// Task store port.
///
/// The in-memory implementation is the v1 default; this trait is the seam
/// for swapping in a persistent store later.
///
/// Contract notes:
/// - `get` on an absent id returns `None` — callers must be able to tell
///   "never existed / evicted" apart without an error path.
/// - `update` on an absent id is a no-op (the record was deleted
///   concurrently, e.g. by the janitor; the task is simply gone).
/// - Per-task updates are linearized because each task has a single owning
///   runner; no ordering is guaranteed across different tasks.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert a record. A duplicate id overwrites the prior record whole.
    async fn create(&self, task_id: TaskId, record: TaskRecord);

    async fn get(&self, task_id: &TaskId) -> Option<TaskRecord>;

    /// Merge `patch` into the record, stamping `last_updated`.
    async fn update(&self, task_id: &TaskId, patch: TaskPatch);

    /// Remove a record. Returns whether it existed.
    async fn delete(&self, task_id: &TaskId) -> bool;

    async fn list_all(&self) -> Vec<(TaskId, TaskRecord)>;

    /// Observability hook: record counts per status.
    async fn counts_by_status(&self) -> StoreCounts;
}
