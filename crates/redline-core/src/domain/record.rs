//! Task records: the pollable state of one tracked unit of work.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::diff::DiffResult;
use super::ids::TaskId;
use super::merge::MergeResult;

/// Lifecycle status of a task.
///
/// Transitions: `Pending -> Processing -> (Completed | Failed)`.
/// `Processing` is re-entered on every phase write; the terminal states are
/// final and mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

/// Payload of a completed task. Opaque to the status-query layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskOutput {
    Diff(DiffResult),
    Merge(MergeResult),
}

impl TaskOutput {
    pub fn as_diff(&self) -> Option<&DiffResult> {
        match self {
            TaskOutput::Diff(diff) => Some(diff),
            TaskOutput::Merge(_) => None,
        }
    }

    pub fn as_merge(&self) -> Option<&MergeResult> {
        match self {
            TaskOutput::Merge(merge) => Some(merge),
            TaskOutput::Diff(_) => None,
        }
    }
}

/// One task's pollable record.
///
/// Mutated only by the owning runner (through the store); concurrent readers
/// may observe any state between two phase writes. Field names are the wire
/// contract with status-polling clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub status: TaskStatus,
    pub progress: u8,
    pub message: String,
    pub start_time: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TaskOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_trace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<f64>,
}

impl TaskRecord {
    /// Fresh record at task creation: pending, zero progress.
    pub fn pending(message: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            status: TaskStatus::Pending,
            progress: 0,
            message: message.into(),
            start_time: now,
            last_updated: now,
            completed_at: None,
            result: None,
            error: None,
            error_trace: None,
            processing_time: None,
        }
    }
}

/// Final outcome returned synchronously to the caller that started the task.
///
/// Mirrors the terminal record fields; `processing_time` is present only when
/// the run was tracked under a task id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskResult {
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TaskOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_trace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<f64>,
}

impl TaskResult {
    pub fn completed(output: TaskOutput, processing_time: Option<f64>) -> Self {
        Self {
            status: TaskStatus::Completed,
            result: Some(output),
            error: None,
            error_trace: None,
            processing_time,
        }
    }

    pub fn failed(error: String, error_trace: String, processing_time: Option<f64>) -> Self {
        Self {
            status: TaskStatus::Failed,
            result: None,
            error: Some(error),
            error_trace: Some(error_trace),
            processing_time,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

/// Answer to a status query.
///
/// An unknown or evicted task id is an expected condition for pollers, so it
/// is a first-class value here, never an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatusReport {
    Found(TaskRecord),
    NotFound(NotFoundReport),
}

/// Serializes as `{"status": "not_found", "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFoundReport {
    pub status: String,
    pub message: String,
}

impl StatusReport {
    pub fn not_found(task_id: &TaskId) -> Self {
        StatusReport::NotFound(NotFoundReport {
            status: "not_found".to_string(),
            message: format!("No task found with ID {task_id}"),
        })
    }

    pub fn record(&self) -> Option<&TaskRecord> {
        match self {
            StatusReport::Found(record) => Some(record),
            StatusReport::NotFound(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StatusReport::NotFound(_))
    }
}
