//! Domain model (task ids, records, diff and merge payloads).

pub mod diff;
pub mod ids;
pub mod merge;
pub mod record;

pub use diff::{ChangeKind, DiffLine, DiffResult, DiffStats};
pub use ids::TaskId;
pub use merge::{ConflictResolution, MergeGuidance, MergeReport, MergeRequest, MergeResult};
pub use record::{NotFoundReport, StatusReport, TaskOutput, TaskRecord, TaskResult, TaskStatus};
