use std::sync::Arc;

use tokio::time::{Duration, sleep};

use redline_core::app::{AppBuilder, DEFAULT_RETENTION_HOURS};
use redline_core::domain::{ConflictResolution, MergeRequest, StatusReport, TaskId};
use redline_core::impls::{RuleBasedAnalyzer, TextDiffEngine};

const DOC_A: &str = "The project ships in March.\n\
The budget is 40k.\n\
Alice owns the rollout.";

const DOC_B: &str = "The project ships in April.\n\
The budget is 40k.\n\
Alice owns the rollout.\n\
Bob owns the retrospective.";

/// Poll a task until it leaves the processing states, printing each update.
async fn watch(app: &redline_core::app::App, task_id: &TaskId) {
    let mut last_progress = None;
    let mut seen = false;
    loop {
        match app.task_status(task_id).await {
            StatusReport::Found(record) => {
                seen = true;
                if last_progress != Some(record.progress) {
                    println!(
                        "  [{}] {:>3}% {:?}: {}",
                        task_id, record.progress, record.status, record.message
                    );
                    last_progress = Some(record.progress);
                }
                if record.status.is_terminal() {
                    println!(
                        "  final: {}",
                        serde_json::to_string_pretty(&record).expect("record serializes")
                    );
                    break;
                }
            }
            StatusReport::NotFound(report) => {
                // Not visible yet if the spawned task has not created the
                // record; gone for good if it was evicted.
                if seen {
                    println!("  {}", report.message);
                    break;
                }
            }
        }
        sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // (A) Wire the app with the built-in offline collaborators.
    let app = Arc::new(
        AppBuilder::new()
            .diff_engine(Arc::new(TextDiffEngine))
            .analyzer(Arc::new(RuleBasedAnalyzer))
            .build()
            .expect("both collaborators are registered"),
    );
    tracing::info!("wired app with built-in offline collaborators");

    // (B) Tracked diff task: run in the background, poll its status.
    let diff_id = app.new_task_id("diff_task_");
    println!("submitted diff task: {diff_id}");
    let diff_run = {
        let app = Arc::clone(&app);
        let id = diff_id.clone();
        tokio::spawn(async move { app.start_diff_task(DOC_A, DOC_B, Some(id)).await })
    };
    watch(&app, &diff_id).await;
    diff_run.await.expect("diff task panicked");

    // (C) Tracked merge task.
    let merge_id = app.new_task_id("merge_task_");
    println!("submitted merge task: {merge_id}");
    let request = MergeRequest {
        doc_a: DOC_A.to_string(),
        doc_b: DOC_B.to_string(),
        conflict_resolution: ConflictResolution::Both,
        ..MergeRequest::default()
    };
    let merge_run = {
        let app = Arc::clone(&app);
        let id = merge_id.clone();
        tokio::spawn(async move { app.start_merge_task(&request, id).await })
    };
    watch(&app, &merge_id).await;
    merge_run.await.expect("merge task panicked");

    // (D) Untracked one-shot diff: returns directly, leaves no record.
    let oneshot = app.start_diff_task(DOC_A, DOC_B, None).await;
    println!(
        "one-shot diff: status={:?} processing_time={:?}",
        oneshot.status, oneshot.processing_time
    );

    // (E) Maintenance: nothing is old enough yet, so nothing is evicted.
    let evicted = app.sweep_old_tasks(DEFAULT_RETENTION_HOURS).await;
    println!(
        "sweep evicted {evicted} record(s); counts: {:?}",
        app.counts().await
    );
}
