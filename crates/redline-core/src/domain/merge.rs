//! Merge payload types: the request handed to the analyzer and its result.

use serde::{Deserialize, Serialize};

use super::diff::DiffStats;

/// Strategy for resolving conflicting lines during a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictResolution {
    /// Prefer document B (the modified version).
    #[default]
    Latest,
    /// Prefer document A (the original version).
    Original,
    /// Keep both versions, with conflict markers on the original lines.
    Both,
    /// Follow the caller-supplied guidance rules.
    Custom,
}

impl ConflictResolution {
    pub fn as_str(self) -> &'static str {
        match self {
            ConflictResolution::Latest => "latest",
            ConflictResolution::Original => "original",
            ConflictResolution::Both => "both",
            ConflictResolution::Custom => "custom",
        }
    }
}

/// Optional caller guidance for the AI merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeGuidance {
    #[serde(default)]
    pub priorities: Vec<String>,
    #[serde(default)]
    pub preserve_sections: Vec<String>,
    #[serde(default)]
    pub custom_rules: Vec<String>,
    pub notes: Option<String>,
}

/// Everything the analyzer needs to merge two documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergeRequest {
    pub doc_a: String,
    pub doc_b: String,
    /// Pre-computed diff statistics, when the caller already has them.
    pub diff_data: Option<DiffStats>,
    #[serde(default)]
    pub conflict_resolution: ConflictResolution,
    pub guidance: Option<MergeGuidance>,
}

/// How the merge was performed, for display next to the merged content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    pub conflicts_resolved: u32,
    pub strategy_applied: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncated: Option<bool>,
}

/// Result of one merge operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeResult {
    pub merged_content: String,
    pub report: MergeReport,
}
