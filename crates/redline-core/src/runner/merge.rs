//! Merge task runner: prepare, invoke the AI merge, finalize.

use std::sync::Arc;

use crate::domain::{MergeRequest, MergeResult, TaskId, TaskOutput, TaskRecord, TaskResult};
use crate::error::RedlineError;
use crate::ports::{AiAnalyzer, Clock};
use crate::progress::ProgressRecorder;
use crate::store::{TaskPatch, TaskStore};

use super::processing_seconds;

/// Orchestrates the AI-driven merge workflow for one task.
///
/// Unlike the diff runner there is no untracked mode and no degrade branch:
/// a merge is always a trackable job, and a merge failure has no meaningful
/// fallback output, so any error inside the merge invocation fails the task.
pub struct MergeTaskRunner {
    analyzer: Arc<dyn AiAnalyzer>,
    store: Arc<dyn TaskStore>,
    recorder: ProgressRecorder,
    clock: Arc<dyn Clock>,
}

impl MergeTaskRunner {
    pub fn new(
        analyzer: Arc<dyn AiAnalyzer>,
        store: Arc<dyn TaskStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            analyzer,
            recorder: ProgressRecorder::new(store.clone()),
            store,
            clock,
        }
    }

    /// Run the merge to completion and return the final outcome.
    pub async fn run(&self, request: &MergeRequest, task_id: TaskId) -> TaskResult {
        let started = self.clock.now();
        tracing::info!(task_id = %task_id, "starting merge task");
        self.store
            .create(
                task_id.clone(),
                TaskRecord::pending("Preparing document merge", started),
            )
            .await;

        match self.execute(request, &task_id).await {
            Ok(merged) => {
                let finished = self.clock.now();
                let elapsed = processing_seconds(started, finished);
                self.store
                    .update(
                        &task_id,
                        TaskPatch::completed(
                            TaskOutput::Merge(merged.clone()),
                            "Merge completed successfully",
                            elapsed,
                            finished,
                        ),
                    )
                    .await;
                tracing::info!(task_id = %task_id, "completed merge task");
                TaskResult::completed(TaskOutput::Merge(merged), Some(elapsed))
            }
            Err(err) => {
                let trace = err.trace();
                tracing::error!(task_id = %task_id, error = %err, "merge task failed");
                let finished = self.clock.now();
                let elapsed = processing_seconds(started, finished);
                self.store
                    .update(
                        &task_id,
                        TaskPatch::failed(
                            err.to_string(),
                            trace.clone(),
                            format!("Merge failed: {err}"),
                            elapsed,
                            finished,
                        ),
                    )
                    .await;
                TaskResult::failed(err.to_string(), trace, Some(elapsed))
            }
        }
    }

    async fn execute(
        &self,
        request: &MergeRequest,
        task_id: &TaskId,
    ) -> Result<MergeResult, RedlineError> {
        self.recorder
            .advance(task_id, 10, "Analyzing document differences")
            .await;
        self.recorder
            .advance(task_id, 20, "Applying AI-powered merge strategy")
            .await;

        self.recorder
            .advance(task_id, 40, "Merging documents with AI assistance")
            .await;
        let merged = self.analyzer.smart_merge(request).await?;

        self.recorder
            .advance(task_id, 80, "Merge completed, post-processing")
            .await;
        self.recorder
            .advance(task_id, 90, "Finalizing merged document")
            .await;
        Ok(merged)
    }
}
