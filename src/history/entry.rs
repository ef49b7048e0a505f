//! Launch history records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One remembered launch
///
/// Entries are value snapshots. The store replaces an entry wholesale when
/// its key is recorded again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Coordinate group used for lookup, stable across version bumps
    pub key: String,

    /// When this key was last resolved successfully
    pub last_refresh_time: DateTime<Utc>,

    /// Fully resolved coordinate, including the version
    pub resolved_artifact: String,

    /// Resolved file locations, kept verbatim
    pub class_path: String,

    /// Human-readable name for listings
    pub display_name: String,

    /// Optional description; `None` and `Some("")` are distinct
    pub description: Option<String>,
}

impl HistoryEntry {
    /// Create a new entry stamped with the current time
    pub fn new(
        key: impl Into<String>,
        resolved_artifact: impl Into<String>,
        class_path: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            last_refresh_time: Utc::now(),
            resolved_artifact: resolved_artifact.into(),
            class_path: class_path.into(),
            display_name: display_name.into(),
            description: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Copy of this entry refreshed at `now`
    pub(crate) fn refreshed_at(self, now: DateTime<Utc>) -> Self {
        Self {
            last_refresh_time: now,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_new() {
        let entry = HistoryEntry::new(
            "com.github.spotbugs",
            "com.github.spotbugs:spotbugs:jar:1.2.3",
            "zzz.jar:xxx.jar",
            "zzz app",
        );

        assert_eq!(entry.key, "com.github.spotbugs");
        assert!(entry.description.is_none());
    }

    #[test]
    fn refreshed_keeps_fields() {
        let entry = HistoryEntry::new("k", "k:a:1", "a.jar", "app").with_description("");
        let later = entry.last_refresh_time + chrono::Duration::hours(3);

        let refreshed = entry.clone().refreshed_at(later);

        assert_eq!(refreshed.last_refresh_time, later);
        assert_eq!(refreshed.description.as_deref(), Some(""));
        assert_eq!(refreshed.resolved_artifact, entry.resolved_artifact);
    }

    #[test]
    fn entry_serialize_distinguishes_missing_description() {
        let entry = HistoryEntry::new("k", "k:a:1", "a.jar", "app");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"description\":null"));

        let parsed: HistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }
}
