//! Rule-based analyzer: offline stand-in for the AI backend.

use async_trait::async_trait;

use crate::domain::{
    ChangeKind, ConflictResolution, DiffStats, MergeReport, MergeRequest, MergeResult,
};
use crate::error::RedlineError;
use crate::ports::AiAnalyzer;

use super::text_diff::line_diff;

/// [`AiAnalyzer`] that works without any model.
///
/// `analyze_diff` renders a summary from the statistics alone, and
/// `smart_merge` applies the mechanical strategies. `custom` needs real
/// guidance interpretation and is refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedAnalyzer;

#[async_trait]
impl AiAnalyzer for RuleBasedAnalyzer {
    async fn analyze_diff(
        &self,
        _doc_a: &str,
        _doc_b: &str,
        stats: &DiffStats,
    ) -> Result<String, RedlineError> {
        Ok(summarize_stats(stats))
    }

    async fn smart_merge(&self, request: &MergeRequest) -> Result<MergeResult, RedlineError> {
        let merged_content = match request.conflict_resolution {
            ConflictResolution::Latest => request.doc_b.clone(),
            ConflictResolution::Original => request.doc_a.clone(),
            ConflictResolution::Both => merge_both(&request.doc_a, &request.doc_b),
            ConflictResolution::Custom => {
                return Err(RedlineError::UnsupportedStrategy(
                    "custom merges require an AI-backed analyzer".to_string(),
                ));
            }
        };

        Ok(MergeResult {
            merged_content,
            report: MergeReport {
                conflicts_resolved: 0,
                strategy_applied: request.conflict_resolution.as_str().to_string(),
                summary: "Applied rule-based merge without AI assistance.".to_string(),
                truncated: None,
            },
        })
    }
}

/// Statistics-only change summary, used when no AI is available.
fn summarize_stats(stats: &DiffStats) -> String {
    if stats.added_lines == 0 && stats.removed_lines == 0 {
        return "The documents are identical with no detectable changes.".to_string();
    }

    let significance = if stats.change_ratio < 5.0 {
        "minor"
    } else if stats.change_ratio < 20.0 {
        "moderate"
    } else {
        "significant"
    };

    format!(
        "The comparison shows {} line(s) added and {} line(s) removed, \
         representing a {} change ({}% of the document). \
         {} line(s) remained unchanged.",
        stats.added_lines, stats.removed_lines, significance, stats.change_ratio,
        stats.unchanged_lines
    )
}

/// Keep both versions: unchanged and added lines pass through, removed lines
/// are kept under an explicit marker.
fn merge_both(doc_a: &str, doc_b: &str) -> String {
    line_diff(doc_a, doc_b)
        .into_iter()
        .map(|entry| match entry.kind {
            ChangeKind::Unchanged | ChangeKind::Added => entry.line,
            ChangeKind::Removed => format!("<<<ORIGINAL>>> {}", entry.line),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request(strategy: ConflictResolution) -> MergeRequest {
        MergeRequest {
            doc_a: "line1\nline2\nline3".to_string(),
            doc_b: "line1\nline2 modified\nline3\nline4".to_string(),
            conflict_resolution: strategy,
            ..MergeRequest::default()
        }
    }

    #[rstest]
    #[case(ConflictResolution::Latest, "line1\nline2 modified\nline3\nline4")]
    #[case(ConflictResolution::Original, "line1\nline2\nline3")]
    #[tokio::test]
    async fn mechanical_strategies_pick_one_side(
        #[case] strategy: ConflictResolution,
        #[case] expected: &str,
    ) {
        let result = RuleBasedAnalyzer
            .smart_merge(&request(strategy))
            .await
            .unwrap();

        assert_eq!(result.merged_content, expected);
        assert_eq!(result.report.strategy_applied, strategy.as_str());
        assert_eq!(result.report.conflicts_resolved, 0);
    }

    #[tokio::test]
    async fn both_strategy_keeps_both_versions_with_markers() {
        let result = RuleBasedAnalyzer
            .smart_merge(&request(ConflictResolution::Both))
            .await
            .unwrap();

        assert!(result.merged_content.contains("line1"));
        assert!(result.merged_content.contains("line2 modified"));
        assert!(result.merged_content.contains("line4"));
        assert!(result.merged_content.contains("<<<ORIGINAL>>> line2"));
    }

    #[tokio::test]
    async fn custom_strategy_is_refused() {
        let err = RuleBasedAnalyzer
            .smart_merge(&request(ConflictResolution::Custom))
            .await
            .unwrap_err();

        assert!(matches!(err, RedlineError::UnsupportedStrategy(_)));
    }

    #[rstest]
    #[case(3.0, "minor")]
    #[case(12.5, "moderate")]
    #[case(45.0, "significant")]
    fn significance_buckets_follow_change_ratio(#[case] ratio: f64, #[case] expected: &str) {
        let stats = DiffStats {
            total_lines: 10,
            added_lines: 1,
            removed_lines: 1,
            unchanged_lines: 8,
            change_ratio: ratio,
            ..DiffStats::default()
        };

        assert!(summarize_stats(&stats).contains(expected));
    }

    #[test]
    fn identical_documents_get_the_no_change_summary() {
        let stats = DiffStats {
            total_lines: 4,
            unchanged_lines: 4,
            ..DiffStats::default()
        };

        assert_eq!(
            summarize_stats(&stats),
            "The documents are identical with no detectable changes."
        );
    }
}
