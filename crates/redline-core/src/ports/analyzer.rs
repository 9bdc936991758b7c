//! AiAnalyzer port.

use async_trait::async_trait;

use crate::domain::{DiffStats, MergeRequest, MergeResult};
use crate::error::RedlineError;

/// AI-backed document analysis and merging.
///
/// The two operations fail differently by design:
/// - `analyze_diff` is optional enrichment; the diff runner treats an error
///   as a soft failure and completes with the unenriched diff.
/// - `smart_merge` has no meaningful fallback output; the merge runner treats
///   an error as fatal to the task.
///
/// These calls are expected to dominate task latency and are awaited without
/// blocking other tasks' progress.
#[async_trait]
pub trait AiAnalyzer: Send + Sync {
    /// Produce a human-readable summary of the changes between two documents.
    async fn analyze_diff(
        &self,
        doc_a: &str,
        doc_b: &str,
        stats: &DiffStats,
    ) -> Result<String, RedlineError>;

    /// Merge two documents under the request's conflict resolution strategy.
    async fn smart_merge(&self, request: &MergeRequest) -> Result<MergeResult, RedlineError>;
}
