//! Diff payload types: per-line changes plus aggregate statistics.

use serde::{Deserialize, Serialize};

/// How one line of the comparison was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Removed,
    Unchanged,
}

/// One line of diff output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub line: String,
}

impl DiffLine {
    pub fn added(line: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Added,
            line: line.into(),
        }
    }

    pub fn removed(line: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Removed,
            line: line.into(),
        }
    }

    pub fn unchanged(line: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Unchanged,
            line: line.into(),
        }
    }
}

/// Aggregate change statistics, fed to the AI analyzer as context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffStats {
    pub total_lines: usize,
    pub added_lines: usize,
    pub removed_lines: usize,
    pub unchanged_lines: usize,
    pub words_added: usize,
    pub words_removed: usize,
    /// Changed share of the document as a percentage, rounded to 2 decimals.
    pub change_ratio: f64,
}

/// Result of one document comparison.
///
/// `ai_summary` is optional enrichment: the engine may leave it empty and the
/// diff runner fills it in, or degrades gracefully when the analyzer fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffResult {
    pub diff_lines: Vec<DiffLine>,
    pub stats: DiffStats,
    pub ai_summary: Option<String>,
}

impl DiffResult {
    pub fn new(diff_lines: Vec<DiffLine>, stats: DiffStats) -> Self {
        Self {
            diff_lines,
            stats,
            ai_summary: None,
        }
    }
}
