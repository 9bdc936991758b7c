//! Diff task runner: compute diff, enrich with an AI summary, finalize.

use std::sync::Arc;

use crate::domain::{DiffResult, TaskId, TaskOutput, TaskRecord, TaskResult};
use crate::error::RedlineError;
use crate::ports::{AiAnalyzer, Clock, DiffEngine};
use crate::progress::ProgressRecorder;
use crate::store::{TaskPatch, TaskStore};

use super::processing_seconds;

/// Orchestrates the diff-then-summarize workflow for one task.
///
/// Serves two kinds of callers with one implementation: a bare synchronous
/// call (`task_id = None`, nothing touches the store) and a tracked job
/// (`task_id = Some`, every phase transition is written for pollers).
pub struct DiffTaskRunner {
    engine: Arc<dyn DiffEngine>,
    analyzer: Arc<dyn AiAnalyzer>,
    store: Arc<dyn TaskStore>,
    recorder: ProgressRecorder,
    clock: Arc<dyn Clock>,
}

impl DiffTaskRunner {
    pub fn new(
        engine: Arc<dyn DiffEngine>,
        analyzer: Arc<dyn AiAnalyzer>,
        store: Arc<dyn TaskStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            engine,
            analyzer,
            recorder: ProgressRecorder::new(store.clone()),
            store,
            clock,
        }
    }

    /// Run the workflow to completion and return the final outcome.
    ///
    /// Failures outside the AI-summarize phase are fatal: they are caught
    /// here, converted into a failed record (when tracked), and also
    /// returned to the caller. No code path leaves the record `processing`.
    pub async fn run(&self, doc_a: &str, doc_b: &str, task_id: Option<TaskId>) -> TaskResult {
        let started = self.clock.now();
        if let Some(id) = &task_id {
            tracing::info!(task_id = %id, "starting diff task");
            self.store
                .create(id.clone(), TaskRecord::pending("Task started", started))
                .await;
        }

        match self.execute(doc_a, doc_b, task_id.as_ref()).await {
            Ok(diff) => {
                let finished = self.clock.now();
                let elapsed = task_id
                    .as_ref()
                    .map(|_| processing_seconds(started, finished));
                if let Some(id) = &task_id {
                    self.store
                        .update(
                            id,
                            TaskPatch::completed(
                                TaskOutput::Diff(diff.clone()),
                                "Task completed successfully",
                                elapsed.unwrap_or_default(),
                                finished,
                            ),
                        )
                        .await;
                    tracing::info!(task_id = %id, "completed diff task");
                }
                TaskResult::completed(TaskOutput::Diff(diff), elapsed)
            }
            Err(err) => {
                let trace = err.trace();
                tracing::error!(task_id = ?task_id, error = %err, "diff task failed");
                let finished = self.clock.now();
                let elapsed = task_id
                    .as_ref()
                    .map(|_| processing_seconds(started, finished));
                if let Some(id) = &task_id {
                    self.store
                        .update(
                            id,
                            TaskPatch::failed(
                                err.to_string(),
                                trace.clone(),
                                format!("Task failed: {err}"),
                                elapsed.unwrap_or_default(),
                                finished,
                            ),
                        )
                        .await;
                }
                TaskResult::failed(err.to_string(), trace, elapsed)
            }
        }
    }

    /// The phase sequence. Progress writes happen only when tracked.
    async fn execute(
        &self,
        doc_a: &str,
        doc_b: &str,
        task_id: Option<&TaskId>,
    ) -> Result<DiffResult, RedlineError> {
        self.checkpoint(task_id, 10, "Computing document differences")
            .await;
        let mut diff = self.engine.compute_diff(doc_a, doc_b).await?;
        self.checkpoint(task_id, 30, "Basic diff completed, performing AI analysis")
            .await;

        // Summary is optional enrichment: an analyzer failure degrades the
        // result instead of failing the task.
        if diff.ai_summary.is_none() {
            self.checkpoint(task_id, 40, "Generating AI-powered analysis")
                .await;
            match self.analyzer.analyze_diff(doc_a, doc_b, &diff.stats).await {
                Ok(summary) => {
                    diff.ai_summary = Some(summary);
                    self.checkpoint(task_id, 70, "AI analysis completed").await;
                }
                Err(err) => {
                    tracing::error!(error = %err, "AI analysis failed in diff task");
                    self.checkpoint(task_id, 70, "AI analysis unavailable, using basic summary")
                        .await;
                }
            }
        }

        self.checkpoint(task_id, 90, "Finalizing results").await;
        Ok(diff)
    }

    async fn checkpoint(&self, task_id: Option<&TaskId>, progress: u8, message: &str) {
        if let Some(id) = task_id {
            self.recorder.advance(id, progress, message).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};

    use crate::domain::{DiffStats, MergeRequest, MergeResult, TaskStatus};
    use crate::impls::TextDiffEngine;
    use crate::ports::FixedClock;
    use crate::store::InMemoryTaskStore;

    struct StubAnalyzer {
        summary: &'static str,
    }

    #[async_trait]
    impl AiAnalyzer for StubAnalyzer {
        async fn analyze_diff(
            &self,
            _doc_a: &str,
            _doc_b: &str,
            _stats: &DiffStats,
        ) -> Result<String, RedlineError> {
            Ok(self.summary.to_string())
        }

        async fn smart_merge(&self, _request: &MergeRequest) -> Result<MergeResult, RedlineError> {
            Err(RedlineError::Other("not under test".to_string()))
        }
    }

    struct FailingAnalyzer;

    #[async_trait]
    impl AiAnalyzer for FailingAnalyzer {
        async fn analyze_diff(
            &self,
            _doc_a: &str,
            _doc_b: &str,
            _stats: &DiffStats,
        ) -> Result<String, RedlineError> {
            Err(RedlineError::Analysis("model unavailable".to_string()))
        }

        async fn smart_merge(&self, _request: &MergeRequest) -> Result<MergeResult, RedlineError> {
            Err(RedlineError::Merge("model unavailable".to_string()))
        }
    }

    struct BrokenEngine;

    #[async_trait]
    impl DiffEngine for BrokenEngine {
        async fn compute_diff(
            &self,
            _doc_a: &str,
            _doc_b: &str,
        ) -> Result<DiffResult, RedlineError> {
            Err(RedlineError::Diff("documents too large".to_string()))
        }
    }

    fn runner_with(
        analyzer: Arc<dyn AiAnalyzer>,
    ) -> (DiffTaskRunner, Arc<InMemoryTaskStore>, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        ));
        let store = Arc::new(InMemoryTaskStore::new(clock.clone()));
        let runner = DiffTaskRunner::new(
            Arc::new(TextDiffEngine),
            analyzer,
            store.clone(),
            clock.clone(),
        );
        (runner, store, clock)
    }

    #[tokio::test]
    async fn untracked_run_returns_result_without_touching_store() {
        let (runner, store, _clock) =
            runner_with(Arc::new(StubAnalyzer { summary: "Summary X" }));

        let result = runner.run("line1\nline2", "line1\nline2 changed", None).await;

        assert!(result.is_completed());
        assert!(result.processing_time.is_none());
        assert!(store.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn tracked_run_completes_with_ai_summary() {
        let (runner, store, clock) =
            runner_with(Arc::new(StubAnalyzer { summary: "Summary X" }));
        let id = TaskId::new("diff_task_1");

        let result = runner
            .run("Document A", "Document B", Some(id.clone()))
            .await;

        assert!(result.is_completed());
        let diff = result.result.as_ref().unwrap().as_diff().unwrap();
        assert_eq!(diff.ai_summary.as_deref(), Some("Summary X"));

        let record = store.get(&id).await.unwrap();
        assert_eq!(record.status, TaskStatus::Completed);
        assert_eq!(record.progress, 100);
        assert_eq!(record.message, "Task completed successfully");
        assert_eq!(record.completed_at, Some(clock.now()));
        assert!(record.error.is_none());
        assert!(record.result.is_some());
    }

    #[tokio::test]
    async fn processing_time_comes_from_the_clock() {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        ));
        let store = Arc::new(InMemoryTaskStore::new(clock.clone()));

        struct SlowEngine {
            clock: Arc<FixedClock>,
        }

        #[async_trait]
        impl DiffEngine for SlowEngine {
            async fn compute_diff(
                &self,
                doc_a: &str,
                doc_b: &str,
            ) -> Result<DiffResult, RedlineError> {
                self.clock.advance(Duration::seconds(4));
                TextDiffEngine.compute_diff(doc_a, doc_b).await
            }
        }

        let runner = DiffTaskRunner::new(
            Arc::new(SlowEngine {
                clock: clock.clone(),
            }),
            Arc::new(StubAnalyzer { summary: "s" }),
            store.clone(),
            clock.clone(),
        );

        let id = TaskId::new("diff_task_timed");
        let result = runner.run("a", "b", Some(id.clone())).await;

        assert_eq!(result.processing_time, Some(4.0));
        assert_eq!(store.get(&id).await.unwrap().processing_time, Some(4.0));
    }

    #[tokio::test]
    async fn analyzer_failure_degrades_instead_of_failing() {
        let (runner, store, _clock) = runner_with(Arc::new(FailingAnalyzer));
        let id = TaskId::new("diff_task_degraded");

        let result = runner
            .run("line1\nline2", "line1\nline3", Some(id.clone()))
            .await;

        assert!(result.is_completed());
        let diff = result.result.as_ref().unwrap().as_diff().unwrap();
        assert!(diff.ai_summary.is_none());

        let record = store.get(&id).await.unwrap();
        assert_eq!(record.status, TaskStatus::Completed);
        assert_eq!(record.progress, 100);
        assert!(record.error.is_none());
    }

    #[tokio::test]
    async fn engine_failure_is_fatal_and_recorded() {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        ));
        let store = Arc::new(InMemoryTaskStore::new(clock.clone()));
        let runner = DiffTaskRunner::new(
            Arc::new(BrokenEngine),
            Arc::new(StubAnalyzer { summary: "s" }),
            store.clone(),
            clock.clone(),
        );
        let id = TaskId::new("diff_task_broken");

        let result = runner.run("a", "b", Some(id.clone())).await;

        assert_eq!(result.status, TaskStatus::Failed);
        assert!(result.result.is_none());
        assert!(result.error.as_deref().unwrap().contains("documents too large"));
        assert!(!result.error_trace.as_deref().unwrap().is_empty());

        let record = store.get(&id).await.unwrap();
        assert_eq!(record.status, TaskStatus::Failed);
        assert!(record.result.is_none());
        assert!(record.error.is_some());
        assert!(record.message.starts_with("Task failed:"));
    }

    #[tokio::test]
    async fn completed_record_is_stable_across_repeated_reads() {
        let (runner, store, _clock) =
            runner_with(Arc::new(StubAnalyzer { summary: "Summary X" }));
        let id = TaskId::new("diff_task_stable");

        runner.run("a", "b", Some(id.clone())).await;

        let first = store.get(&id).await.unwrap();
        let second = store.get(&id).await.unwrap();
        let third = store.get(&id).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[tokio::test]
    async fn concurrent_poller_observes_intermediate_progress() {
        let (runner, store, _clock) = runner_with(Arc::new(FailingAnalyzer));
        let runner = Arc::new(runner);
        let id = TaskId::new("diff_task_watched");

        let handle = {
            let runner = Arc::clone(&runner);
            let id = id.clone();
            tokio::spawn(async move { runner.run("line1\nline2", "line1\nline3", Some(id)).await })
        };

        // Poll on every scheduler turn until the record turns terminal. The
        // recorder yields after each phase write, so a current-thread runtime
        // interleaves this loop with every phase.
        let mut observed = Vec::new();
        loop {
            if let Some(record) = store.get(&id).await {
                let entry = (record.progress, record.message.clone());
                if observed.last() != Some(&entry) {
                    observed.push(entry);
                }
                if record.status.is_terminal() {
                    break;
                }
            }
            tokio::task::yield_now().await;
        }
        handle.await.unwrap();

        assert!(observed.contains(&(10, "Computing document differences".to_string())));
        assert!(observed.contains(&(
            70,
            "AI analysis unavailable, using basic summary".to_string()
        )));
        assert_eq!(
            observed.last().unwrap(),
            &(100, "Task completed successfully".to_string())
        );

        // Progress never decreased while the task ran.
        assert!(observed.windows(2).all(|w| w[0].0 <= w[1].0));
    }
}
