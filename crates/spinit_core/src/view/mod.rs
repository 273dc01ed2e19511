//! Pure view-model derivation.
//!
//! # Responsibility
//! - Project repository + filter state into display records.
//! - Define the `ViewSink` seam, the only place that touches presentation.
//!
//! # Invariants
//! - Functions in this module never mutate state and never cache.

pub mod calendar;
pub mod charts;

use crate::model::note::{Note, NoteId};
use crate::model::stats::Stats;
use crate::model::task::{Task, TaskId};
use crate::timer::{format_clock, TimerController, TimerState};
use chrono::NaiveDate;

pub use calendar::{CalendarCell, CalendarMonth, DayPanel};
pub use charts::{BarSeries, PieSeries};

/// Display record for one task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: TaskId,
    pub title: String,
    pub done: bool,
    /// Secondary line, e.g. `errand • normal`; empty when nothing to show.
    pub meta: String,
    /// ISO date or empty for undated tasks.
    pub date: String,
}

/// Display record for one note card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
    pub id: NoteId,
    /// Title, or `(no title)` when the note has none.
    pub heading: String,
    pub content: String,
    /// `Tags: a, b`, or empty when the note has no tags.
    pub tags_line: String,
}

/// Timer readout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerView {
    pub state: TimerState,
    pub display: String,
    pub minutes: u32,
}

/// Every view of the application, fully materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub inbox: Vec<TaskItem>,
    pub todo: Vec<TaskItem>,
    pub today: Vec<TaskItem>,
    pub upcoming: Vec<TaskItem>,
    pub notes: Vec<NoteCard>,
    pub calendar: CalendarMonth,
    pub day_panel: DayPanel,
    pub timer: TimerView,
    pub stats: Stats,
    pub pie: PieSeries,
    pub bar: BarSeries,
}

/// Receiver of rendered snapshots.
pub trait ViewSink {
    fn render(&mut self, snapshot: &ViewSnapshot);
}

fn label_priority_meta(task: &Task) -> String {
    format!("{} • {}", task.label, task.priority)
}

fn date_text(date: Option<NaiveDate>) -> String {
    date.map(|date| date.to_string()).unwrap_or_default()
}

/// Inbox rows: meta is shown only for labelled tasks.
pub fn inbox_items(tasks: &[&Task]) -> Vec<TaskItem> {
    tasks
        .iter()
        .map(|task| TaskItem {
            id: task.id,
            title: task.title.clone(),
            done: task.done,
            meta: if task.label.is_empty() {
                String::new()
            } else {
                label_priority_meta(task)
            },
            date: date_text(task.date),
        })
        .collect()
}

/// To-do and today rows: always `label • priority`.
pub fn list_items(tasks: &[&Task]) -> Vec<TaskItem> {
    tasks
        .iter()
        .map(|task| TaskItem {
            id: task.id,
            title: task.title.clone(),
            done: task.done,
            meta: label_priority_meta(task),
            date: date_text(task.date),
        })
        .collect()
}

/// Upcoming rows: `date • label`.
pub fn upcoming_items(tasks: &[&Task]) -> Vec<TaskItem> {
    tasks
        .iter()
        .map(|task| TaskItem {
            id: task.id,
            title: task.title.clone(),
            done: task.done,
            meta: format!("{} • {}", date_text(task.date), task.label),
            date: date_text(task.date),
        })
        .collect()
}

pub fn note_cards(notes: &[&Note]) -> Vec<NoteCard> {
    notes
        .iter()
        .map(|note| NoteCard {
            id: note.id,
            heading: if note.title.is_empty() {
                "(no title)".to_string()
            } else {
                note.title.clone()
            },
            content: note.content.clone(),
            tags_line: if note.tags.is_empty() {
                String::new()
            } else {
                format!("Tags: {}", note.tags.join(", "))
            },
        })
        .collect()
}

pub fn timer_view(timer: &TimerController) -> TimerView {
    TimerView {
        state: timer.state(),
        display: format_clock(timer.remaining()),
        minutes: timer.configured_minutes(),
    }
}

#[cfg(test)]
mod tests {
    use super::{inbox_items, note_cards};
    use crate::model::note::Note;
    use crate::model::task::{Task, TaskDraft};
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn inbox_meta_hidden_for_unlabelled_tasks() {
        let plain = Task::from_draft(Uuid::new_v4(), Utc::now(), TaskDraft::new("plain"));
        let labelled = Task::from_draft(
            Uuid::new_v4(),
            Utc::now(),
            TaskDraft::new("labelled").with_label("errand"),
        );
        let items = inbox_items(&[&plain, &labelled]);
        assert_eq!(items[0].meta, "");
        assert_eq!(items[1].meta, "errand • normal");
    }

    #[test]
    fn note_card_defaults_heading_and_joins_tags() {
        let note = Note {
            id: Uuid::new_v4(),
            title: String::new(),
            content: "body".to_string(),
            tags: vec!["a".to_string(), "b".to_string()],
            created: Utc::now(),
        };
        let cards = note_cards(&[&note]);
        assert_eq!(cards[0].heading, "(no title)");
        assert_eq!(cards[0].tags_line, "Tags: a, b");
    }
}
