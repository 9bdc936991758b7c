//! Domain identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Identifier of one tracked unit of diff or merge work.
///
/// The calling layer may supply its own identifier, or mint one with
/// [`TaskId::generate`]. Either way it is the sole lookup key in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh identifier with a purpose prefix, e.g. `diff_task_01J...`.
    ///
    /// The suffix is a ULID built from the caller's clock plus random
    /// entropy, so generated ids sort by creation time and tests can pin the
    /// timestamp half.
    pub fn generate(prefix: &str, now: DateTime<Utc>) -> Self {
        let ulid = Ulid::from_parts(now.timestamp_millis() as u64, rand::random());
        Self(format!("{prefix}{ulid}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn generated_ids_carry_prefix_and_are_unique() {
        let now = Utc::now();
        let a = TaskId::generate("diff_task_", now);
        let b = TaskId::generate("diff_task_", now);

        assert!(a.as_str().starts_with("diff_task_"));
        assert_ne!(a, b);
    }

    #[test]
    fn generated_ids_sort_by_creation_time() {
        let earlier = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 1).unwrap();

        let a = TaskId::generate("merge_task_", earlier);
        let b = TaskId::generate("merge_task_", later);
        assert!(a < b);
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = TaskId::new("ghost");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"ghost\"");
    }
}
