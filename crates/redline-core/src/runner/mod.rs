//! Task runners: the phase state machines that own a task's record.

mod diff;
mod merge;

pub use diff::DiffTaskRunner;
pub use merge::MergeTaskRunner;

use chrono::{DateTime, Utc};

/// Elapsed seconds between creation and the terminal write.
fn processing_seconds(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 1000.0
}
