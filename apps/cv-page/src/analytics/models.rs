use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped interaction, as persisted and exported.
///
/// `label` always serializes, as `null` when absent, so consumers of the
/// exported file can rely on the field being present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventRecord {
    // Older logs name this field `time`.
    #[serde(alias = "time")]
    pub timestamp: DateTime<Utc>,
    pub category: String,
    pub action: String,
    pub label: Option<String>,
}

impl EventRecord {
    /// Builds a record stamped with the current time, at millisecond precision.
    pub fn now(category: &str, action: &str, label: Option<&str>) -> Self {
        Self::at(Utc::now().trunc_subsecs(3), category, action, label)
    }

    pub fn at(timestamp: DateTime<Utc>, category: &str, action: &str, label: Option<&str>) -> Self {
        EventRecord {
            timestamp,
            category: category.to_string(),
            action: action.to_string(),
            label: label.map(str::to_string),
        }
    }

    pub fn matches(&self, category: &str, action: &str) -> bool {
        self.category == category && self.action == action
    }
}
