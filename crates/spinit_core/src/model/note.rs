//! Note domain model.
//!
//! # Invariants
//! - A persisted note has a non-empty title or non-empty content.
//! - `tags` keep the order in which the user typed them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a note.
pub type NoteId = Uuid;

/// Persisted note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created: DateTime<Utc>,
}

/// User-supplied fields for a new note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl NoteDraft {
    /// Builds a draft from raw form input, trimming text and splitting tags.
    pub fn from_input(title: &str, content: &str, tags: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            content: content.trim().to_string(),
            tags: parse_tags(tags),
        }
    }

    /// Returns whether the draft carries any text worth persisting.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }
}

/// Splits comma-separated tag input, trimming and dropping empty segments.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_tags, NoteDraft};

    #[test]
    fn parse_tags_trims_and_keeps_order() {
        assert_eq!(
            parse_tags(" work, ,ideas ,, Home"),
            vec!["work".to_string(), "ideas".to_string(), "Home".to_string()]
        );
        assert!(parse_tags("  ").is_empty());
    }

    #[test]
    fn draft_is_empty_only_without_title_and_content() {
        assert!(NoteDraft::from_input("  ", "\n", "a,b").is_empty());
        assert!(!NoteDraft::from_input("", "body", "").is_empty());
        assert!(!NoteDraft::from_input("title", "", "").is_empty());
    }
}
