//! Pure task/note filter predicates.
//!
//! # Invariants
//! - Task filtering is a conjunction: a task is visible only when every
//!   active predicate accepts it.
//! - Search matching is a case-insensitive substring test on normalized
//!   (trimmed, lowercased) query text; an empty query matches everything.
//! - Output keeps the collection's order.

use crate::model::note::Note;
use crate::model::task::{Priority, Task};
use chrono::NaiveDate;

/// Inbox filter state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Exact label match when non-empty.
    pub label: String,
    /// Exact priority match when set.
    pub priority: Option<Priority>,
    /// Include completed tasks.
    pub show_completed: bool,
    /// Raw search text; normalized on use.
    pub search: String,
}

impl TaskFilter {
    /// Returns whether `task` passes every active predicate.
    pub fn matches(&self, task: &Task) -> bool {
        if !self.show_completed && task.done {
            return false;
        }
        if !self.label.is_empty() && task.label != self.label {
            return false;
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        task_matches_search(task, &normalize_query(&self.search))
    }
}

/// Trims and lowercases raw search input.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Substring test on title or label. `query` must already be normalized.
pub fn task_matches_search(task: &Task, query: &str) -> bool {
    query.is_empty()
        || task.title.to_lowercase().contains(query)
        || task.label.to_lowercase().contains(query)
}

/// Substring test on title or content. `query` must already be normalized.
pub fn note_matches_search(note: &Note, query: &str) -> bool {
    query.is_empty()
        || note.title.to_lowercase().contains(query)
        || note.content.to_lowercase().contains(query)
}

/// Inbox view: all tasks passing `filter`.
pub fn filter_inbox<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    tasks.iter().filter(|task| filter.matches(task)).collect()
}

/// To-do view: undated tasks matching `search`.
pub fn filter_todo<'a>(tasks: &'a [Task], search: &str) -> Vec<&'a Task> {
    let query = normalize_query(search);
    tasks
        .iter()
        .filter(|task| task.date.is_none())
        .filter(|task| task_matches_search(task, &query))
        .collect()
}

/// Tasks scheduled exactly on `day`.
pub fn filter_day(tasks: &[Task], day: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|task| task.date == Some(day)).collect()
}

/// Tasks scheduled strictly after `today`.
pub fn filter_upcoming(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| task.date.is_some_and(|date| date > today))
        .collect()
}

/// Notes whose title or content match `search`.
pub fn filter_notes<'a>(notes: &'a [Note], search: &str) -> Vec<&'a Note> {
    let query = normalize_query(search);
    notes
        .iter()
        .filter(|note| note_matches_search(note, &query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{filter_inbox, filter_notes, filter_upcoming, TaskFilter};
    use crate::model::note::Note;
    use crate::model::task::{Priority, Task, TaskDraft};
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn task(draft: TaskDraft) -> Task {
        Task::from_draft(Uuid::new_v4(), Utc::now(), draft)
    }

    #[test]
    fn task_must_pass_every_active_predicate() {
        let matching = task(
            TaskDraft::new("Pay rent")
                .with_label("home")
                .with_priority(Priority::High),
        );
        let filter = TaskFilter {
            label: "home".to_string(),
            priority: Some(Priority::High),
            show_completed: false,
            search: "  RENT ".to_string(),
        };
        assert!(filter.matches(&matching));

        let mut done = matching.clone();
        done.done = true;
        assert!(!filter.matches(&done));

        let mut wrong_label = matching.clone();
        wrong_label.label = "work".to_string();
        assert!(!filter.matches(&wrong_label));

        let mut wrong_priority = matching.clone();
        wrong_priority.priority = Priority::Low;
        assert!(!filter.matches(&wrong_priority));

        let mut wrong_title = matching.clone();
        wrong_title.title = "Call mom".to_string();
        assert!(!filter.matches(&wrong_title));
    }

    #[test]
    fn search_matches_label_as_well_as_title() {
        let tasks = vec![
            task(TaskDraft::new("Buy milk").with_label("errand")),
            task(TaskDraft::new("Read book")),
        ];
        let filter = TaskFilter {
            search: "ERR".to_string(),
            ..TaskFilter::default()
        };
        let visible = filter_inbox(&tasks, &filter);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Buy milk");
    }

    #[test]
    fn upcoming_excludes_today_and_undated() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let tasks = vec![
            task(TaskDraft::new("today").with_date(Some(today))),
            task(TaskDraft::new("tomorrow").with_date(today.succ_opt())),
            task(TaskDraft::new("someday")),
        ];
        let upcoming = filter_upcoming(&tasks, today);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].title, "tomorrow");
    }

    #[test]
    fn note_search_checks_title_and_content() {
        let note = |title: &str, content: &str| Note {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: content.to_string(),
            tags: Vec::new(),
            created: Utc::now(),
        };
        let notes = vec![note("Groceries", "eggs"), note("", "Trip to Lisbon")];
        assert_eq!(filter_notes(&notes, "lisbon").len(), 1);
        assert_eq!(filter_notes(&notes, "GROC").len(), 1);
        assert_eq!(filter_notes(&notes, "").len(), 2);
    }
}
