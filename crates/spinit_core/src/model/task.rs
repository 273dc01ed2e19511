//! Task domain model.
//!
//! # Invariants
//! - `id` is generated once and never reused for another task.
//! - `title` is non-empty for user-created tasks (enforced by the caller).
//! - `date` is a calendar day without time-of-day; `None` means "to-do".

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Task urgency bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            other => Err(format!(
                "unsupported priority `{other}`; expected low|normal|high"
            )),
        }
    }
}

/// Persisted task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub done: bool,
    pub created: DateTime<Utc>,
}

impl Task {
    /// Materializes a draft with the given identity and creation time.
    pub fn from_draft(id: TaskId, created: DateTime<Utc>, draft: TaskDraft) -> Self {
        Self {
            id,
            title: draft.title,
            date: draft.date,
            label: draft.label,
            priority: draft.priority,
            done: draft.done,
            created,
        }
    }

    /// Applies every field set in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(label) = &patch.label {
            self.label = label.clone();
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(done) = patch.done {
            self.done = done;
        }
    }
}

/// User-supplied fields for a new task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub date: Option<NaiveDate>,
    pub label: String,
    pub priority: Priority,
    pub done: bool,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Shallow field patch for `TaskRepository::update_task`.
///
/// `date` is doubly optional: `Some(None)` clears the date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub date: Option<Option<NaiveDate>>,
    pub label: Option<String>,
    pub priority: Option<Priority>,
    pub done: Option<bool>,
}

impl TaskPatch {
    /// Patch that only flips the completion flag.
    pub fn done(done: bool) -> Self {
        Self {
            done: Some(done),
            ..Self::default()
        }
    }
}
