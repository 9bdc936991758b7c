//! DiffEngine port.

use async_trait::async_trait;

use crate::domain::DiffResult;
use crate::error::RedlineError;

/// Computes the line-level comparison of two documents.
///
/// The engine may pre-fill `ai_summary` on its result; when it leaves the
/// field empty the diff runner asks the analyzer for one. A failure here is
/// fatal to the whole task.
#[async_trait]
pub trait DiffEngine: Send + Sync {
    async fn compute_diff(&self, doc_a: &str, doc_b: &str) -> Result<DiffResult, RedlineError>;
}
