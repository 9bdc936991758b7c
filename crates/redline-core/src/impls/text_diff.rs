//! Line-level text diff engine.

use async_trait::async_trait;

use crate::domain::{ChangeKind, DiffLine, DiffResult, DiffStats};
use crate::error::RedlineError;
use crate::ports::DiffEngine;

/// Default [`DiffEngine`]: LCS line diff plus aggregate statistics.
///
/// Leaves `ai_summary` empty — enrichment belongs to the analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextDiffEngine;

#[async_trait]
impl DiffEngine for TextDiffEngine {
    async fn compute_diff(&self, doc_a: &str, doc_b: &str) -> Result<DiffResult, RedlineError> {
        let diff_lines = line_diff(doc_a, doc_b);

        let added_lines = diff_lines
            .iter()
            .filter(|l| l.kind == ChangeKind::Added)
            .count();
        let removed_lines = diff_lines
            .iter()
            .filter(|l| l.kind == ChangeKind::Removed)
            .count();
        let unchanged_lines = diff_lines.len() - added_lines - removed_lines;

        let words_a = word_count(doc_a);
        let words_b = word_count(doc_b);

        let stats = DiffStats {
            total_lines: diff_lines.len(),
            added_lines,
            removed_lines,
            unchanged_lines,
            words_added: words_b.saturating_sub(words_a),
            words_removed: words_a.saturating_sub(words_b),
            change_ratio: change_ratio(added_lines, removed_lines, diff_lines.len()),
        };

        Ok(DiffResult::new(diff_lines, stats))
    }
}

/// Classify every line of both documents as added, removed, or unchanged.
///
/// Standard LCS walk: lines on the common subsequence are unchanged, the
/// rest are removals from A or additions from B, in document order.
pub(crate) fn line_diff(doc_a: &str, doc_b: &str) -> Vec<DiffLine> {
    let a: Vec<&str> = doc_a.lines().collect();
    let b: Vec<&str> = doc_b.lines().collect();
    let (n, m) = (a.len(), b.len());

    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if a[i] == b[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut out = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a[i] == b[j] {
            out.push(DiffLine::unchanged(a[i]));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            out.push(DiffLine::removed(a[i]));
            i += 1;
        } else {
            out.push(DiffLine::added(b[j]));
            j += 1;
        }
    }
    out.extend(a[i..].iter().map(|line| DiffLine::removed(*line)));
    out.extend(b[j..].iter().map(|line| DiffLine::added(*line)));
    out
}

fn word_count(doc: &str) -> usize {
    doc.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .count()
}

/// Changed share of the diff as a percentage, rounded to 2 decimals.
fn change_ratio(added: usize, removed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let ratio = (added + removed) as f64 / total as f64 * 100.0;
    (ratio * 100.0).round() / 100.0
}
