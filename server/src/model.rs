//! Todo record and the inputs the store accepts.
//!
//! # Design
//! `NewTodo` and `TodoPatch` are produced by the validation layer, never
//! deserialized straight off the wire. Every optional field is an `Option`
//! so "absent" is distinct from any concrete value, and the store applies a
//! patch field by field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Urgency of a todo. Serialized in lowercase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }
}

/// A single todo item as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub starred: bool,
    pub priority: Priority,
    pub tags: Vec<String>,
    #[serde(with = "timestamp")]
    pub created: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated: DateTime<Utc>,
}

/// Validated input for `TodoStore::create`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub starred: Option<bool>,
    pub priority: Option<Priority>,
    pub tags: Option<Vec<String>>,
}

impl NewTodo {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Sparse set of field assignments for `TodoStore::update`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub starred: Option<bool>,
    pub priority: Option<Priority>,
    pub tags: Option<Vec<String>>,
}

impl TodoPatch {
    /// Copy every present field onto `todo`. Does not touch `id`, `created`
    /// or `updated`.
    pub fn apply_to(self, todo: &mut Todo) {
        if let Some(title) = self.title {
            todo.title = title;
        }
        if let Some(description) = self.description {
            todo.description = description;
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
        if let Some(starred) = self.starred {
            todo.starred = starred;
        }
        if let Some(priority) = self.priority {
            todo.priority = priority;
        }
        if let Some(tags) = self.tags {
            todo.tags = tags;
        }
    }
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix.
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
