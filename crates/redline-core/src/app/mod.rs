//! Application facade: the surface the calling layer (HTTP, CLI) talks to.

pub mod builder;

pub use builder::{AppBuilder, BuildError};

use std::sync::Arc;

use crate::domain::{MergeRequest, StatusReport, TaskId, TaskResult};
use crate::janitor::TaskJanitor;
use crate::observability::StoreCounts;
use crate::ports::Clock;
use crate::runner::{DiffTaskRunner, MergeTaskRunner};
use crate::store::TaskStore;

/// Retention window handed to the janitor when the caller has no opinion.
pub const DEFAULT_RETENTION_HOURS: u64 = 24;

/// One wired process: store, runners, janitor.
///
/// Built by [`AppBuilder`]. All methods run the work on the caller's task;
/// backgrounding (spawning) is the calling layer's choice, as is scheduling
/// periodic [`App::sweep_old_tasks`] calls.
pub struct App {
    store: Arc<dyn TaskStore>,
    diff_runner: DiffTaskRunner,
    merge_runner: MergeTaskRunner,
    janitor: TaskJanitor,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App").finish_non_exhaustive()
    }
}

impl App {
    pub(crate) fn new(
        store: Arc<dyn TaskStore>,
        diff_runner: DiffTaskRunner,
        merge_runner: MergeTaskRunner,
        janitor: TaskJanitor,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            diff_runner,
            merge_runner,
            janitor,
            clock,
        }
    }

    /// Compare two documents, optionally tracked under `task_id`.
    ///
    /// Without a task id this is a bare synchronous computation; with one,
    /// every phase transition is observable via [`App::task_status`].
    pub async fn start_diff_task(
        &self,
        doc_a: &str,
        doc_b: &str,
        task_id: Option<TaskId>,
    ) -> TaskResult {
        self.diff_runner.run(doc_a, doc_b, task_id).await
    }

    /// Merge two documents. Always tracked: merges are long enough that
    /// callers poll for them.
    pub async fn start_merge_task(&self, request: &MergeRequest, task_id: TaskId) -> TaskResult {
        self.merge_runner.run(request, task_id).await
    }

    /// Current state of a task, or a structured not-found value.
    pub async fn task_status(&self, task_id: &TaskId) -> StatusReport {
        match self.store.get(task_id).await {
            Some(record) => StatusReport::Found(record),
            None => StatusReport::not_found(task_id),
        }
    }

    /// Evict records older than `max_age_hours`; returns the eviction count.
    pub async fn sweep_old_tasks(&self, max_age_hours: u64) -> usize {
        self.janitor.sweep(max_age_hours).await
    }

    pub async fn counts(&self) -> StoreCounts {
        self.store.counts_by_status().await
    }

    /// Mint a task id with the given purpose prefix (`diff_task_`, ...).
    pub fn new_task_id(&self, prefix: &str) -> TaskId {
        TaskId::generate(prefix, self.clock.now())
    }
}
