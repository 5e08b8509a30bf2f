//! The task record and its persisted form.
//!
//! A task is serialized as
//! `{"id": 1, "text": "Buy milk", "completed": false, "createdAt": "2024-05-01T09:30:00Z"}`.
//! `createdAt` is always written as RFC 3339 in UTC; when reading, a number of
//! milliseconds since the Unix epoch is accepted as well.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub type TaskId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates an incomplete task. `text` is expected to be already trimmed and non-empty.
    pub fn new(id: TaskId, text: &str, created_at: DateTime<Utc>) -> Self {
        Task {
            id,
            text: text.to_string(),
            completed: false,
            created_at,
        }
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// Next free identifier for a collection: one past the largest id, or 1 when empty.
///
/// `None` when the largest id is already `TaskId::MAX`.
pub fn next_id(tasks: &[Task]) -> Option<TaskId> {
    tasks.iter().map(|task| task.id).max().unwrap_or(0).checked_add(1)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Millis(i64),
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(&text)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|e| D::Error::custom(format!("invalid createdAt '{}': {}", text, e))),
        RawTimestamp::Millis(millis) => Utc
            .timestamp_millis_opt(millis)
            .single()
            .ok_or_else(|| D::Error::custom(format!("createdAt out of range: {}", millis))),
    }
}
