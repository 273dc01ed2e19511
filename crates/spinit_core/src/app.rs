//! Application controller.
//!
//! # Responsibility
//! - Own every piece of mutable state: repositories, filters, calendar
//!   reference, timer.
//! - Translate user intents into repository mutations, then push a fresh
//!   snapshot to the attached view sink.
//!
//! # Invariants
//! - State is mutated only through repository operations.
//! - Persistence happens before the refresh that follows a mutation.
//! - Invalid input (blank titles, empty notes) is ignored without error.

use crate::clock::{Clock, SystemClock};
use crate::model::note::{Note, NoteDraft, NoteId};
use crate::model::stats::{SessionMap, Stats};
use crate::model::task::{Priority, Task, TaskDraft, TaskId, TaskPatch};
use crate::repo::note_repo::NoteRepository;
use crate::repo::session_repo::SessionTracker;
use crate::repo::task_repo::TaskRepository;
use crate::search::filter::{
    filter_day, filter_inbox, filter_notes, filter_todo, filter_upcoming, TaskFilter,
};
use crate::store::{KvStore, StoreError};
use crate::timer::{TickOutcome, TimerController};
use crate::view::calendar::{build_day_panel, build_month, month_start, shift_month};
use crate::view::charts::{task_completion, trailing_focus_minutes};
use crate::view::{
    inbox_items, list_items, note_cards, timer_view, upcoming_items, ViewSink, ViewSnapshot,
};
use chrono::NaiveDate;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use uuid::Uuid;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    Store(StoreError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Single-threaded application state plus its intent handlers.
pub struct App<S: KvStore> {
    tasks: TaskRepository<S>,
    notes: NoteRepository<S>,
    sessions: SessionTracker<S>,
    timer: TimerController,
    filter: TaskFilter,
    note_search: String,
    calendar_ref: NaiveDate,
    selected_day: Option<NaiveDate>,
    clock: Box<dyn Clock>,
    sink: Option<Box<dyn ViewSink>>,
}

impl<S: KvStore> App<S> {
    /// Loads all persisted state from `store` using the system clock.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, Box::new(SystemClock))
    }

    pub fn with_clock(store: S, clock: Box<dyn Clock>) -> Self {
        let store = Rc::new(store);
        let today = clock.today();
        Self {
            tasks: TaskRepository::load(Rc::clone(&store)),
            notes: NoteRepository::load(Rc::clone(&store)),
            sessions: SessionTracker::load(store),
            timer: TimerController::new(),
            filter: TaskFilter::default(),
            note_search: String::new(),
            calendar_ref: month_start(today),
            selected_day: None,
            clock,
            sink: None,
        }
    }

    /// Attaches the view sink and renders the initial snapshot.
    pub fn attach_sink(&mut self, sink: Box<dyn ViewSink>) {
        self.sink = Some(sink);
        self.refresh();
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    pub fn notes(&self) -> &[Note] {
        self.notes.notes()
    }

    pub fn sessions(&self) -> &SessionMap {
        self.sessions.sessions()
    }

    pub fn stats(&self) -> Stats {
        self.sessions.stats()
    }

    pub fn timer(&self) -> &TimerController {
        &self.timer
    }

    /// Selected calendar day, defaulting to today.
    pub fn selected_day(&self) -> NaiveDate {
        self.selected_day.unwrap_or_else(|| self.today())
    }

    // ---- tasks ----

    /// Creates a task from user input. Blank titles are ignored.
    pub fn submit_task(&mut self, mut draft: TaskDraft) -> AppResult<Option<TaskId>> {
        draft.title = draft.title.trim().to_string();
        if draft.title.is_empty() {
            debug!("event=task_submit module=app status=ignored reason=blank_title");
            return Ok(None);
        }

        let id = self.tasks.add_task(draft)?;
        self.refresh();
        Ok(Some(id))
    }

    /// Creates a task on the selected calendar day with default metadata.
    pub fn submit_day_task(&mut self, title: &str) -> AppResult<Option<TaskId>> {
        let draft = TaskDraft::new(title)
            .with_date(Some(self.selected_day()))
            .with_priority(Priority::Normal);
        self.submit_task(draft)
    }

    pub fn update_task(&mut self, id: TaskId, patch: &TaskPatch) -> AppResult<bool> {
        let changed = self.tasks.update_task(id, patch)?;
        if changed {
            self.refresh();
        }
        Ok(changed)
    }

    pub fn set_task_done(&mut self, id: TaskId, done: bool) -> AppResult<bool> {
        self.update_task(id, &TaskPatch::done(done))
    }

    pub fn delete_task(&mut self, id: TaskId) -> AppResult<bool> {
        let removed = self.tasks.delete_task(id)?;
        if removed {
            self.refresh();
        }
        Ok(removed)
    }

    /// Resolves a unique id prefix (as typed by a user) to a task id.
    pub fn find_task_id(&self, prefix: &str) -> Option<TaskId> {
        unique_prefix_match(self.tasks().iter().map(|task| task.id), prefix)
    }

    // ---- notes ----

    /// Creates a note. Drafts without title and content are ignored.
    pub fn submit_note(&mut self, draft: NoteDraft) -> AppResult<Option<NoteId>> {
        if draft.is_empty() {
            debug!("event=note_submit module=app status=ignored reason=empty_note");
            return Ok(None);
        }

        let id = self.notes.add_note(draft)?;
        self.refresh();
        Ok(Some(id))
    }

    pub fn delete_note(&mut self, id: NoteId) -> AppResult<bool> {
        let removed = self.notes.delete_note(id)?;
        if removed {
            self.refresh();
        }
        Ok(removed)
    }

    pub fn find_note_id(&self, prefix: &str) -> Option<NoteId> {
        unique_prefix_match(self.notes().iter().map(|note| note.id), prefix)
    }

    // ---- filters ----

    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
        self.refresh();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
        self.refresh();
    }

    /// Note-specific search; when blank the global search applies to notes.
    pub fn set_note_search(&mut self, search: impl Into<String>) {
        self.note_search = search.into();
        self.refresh();
    }

    // ---- calendar ----

    pub fn previous_month(&mut self) {
        self.calendar_ref = shift_month(self.calendar_ref, -1);
        self.refresh();
    }

    pub fn next_month(&mut self) {
        self.calendar_ref = shift_month(self.calendar_ref, 1);
        self.refresh();
    }

    /// Jumps the calendar to the month containing `date`.
    pub fn show_month(&mut self, date: NaiveDate) {
        self.calendar_ref = month_start(date);
        self.refresh();
    }

    pub fn select_day(&mut self, date: NaiveDate) {
        self.selected_day = Some(date);
        self.refresh();
    }

    // ---- timer ----

    pub fn set_timer_input(&mut self, input: Option<String>) {
        self.timer.set_custom_input(input);
    }

    pub fn start_timer(&mut self) -> bool {
        let started = self.timer.start();
        if started {
            self.refresh();
        }
        started
    }

    /// Delivers one elapsed second; records the session on completion.
    pub fn tick_timer(&mut self) -> AppResult<TickOutcome> {
        let outcome = self.timer.tick();
        match outcome {
            TickOutcome::Ignored => return Ok(outcome),
            TickOutcome::Running { .. } => {}
            TickOutcome::Completed { minutes } => {
                let today = self.today();
                self.sessions.record_session(today, minutes)?;
            }
        }
        self.refresh();
        Ok(outcome)
    }

    pub fn pause_timer(&mut self) {
        self.timer.pause();
        self.refresh();
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
        self.refresh();
    }

    // ---- views ----

    /// Derives every view from the current state.
    pub fn snapshot(&self) -> ViewSnapshot {
        let today = self.today();
        let tasks = self.tasks();
        let note_query = if self.note_search.trim().is_empty() {
            self.filter.search.as_str()
        } else {
            self.note_search.as_str()
        };

        ViewSnapshot {
            inbox: inbox_items(&filter_inbox(tasks, &self.filter)),
            todo: list_items(&filter_todo(tasks, &self.filter.search)),
            today: list_items(&filter_day(tasks, today)),
            upcoming: upcoming_items(&filter_upcoming(tasks, today)),
            notes: note_cards(&filter_notes(self.notes(), note_query)),
            calendar: build_month(self.calendar_ref, tasks),
            day_panel: build_day_panel(self.selected_day(), tasks),
            timer: timer_view(&self.timer),
            stats: self.stats(),
            pie: task_completion(tasks),
            bar: trailing_focus_minutes(self.sessions(), today),
        }
    }

    fn refresh(&mut self) {
        if self.sink.is_none() {
            return;
        }
        let snapshot = self.snapshot();
        if let Some(sink) = self.sink.as_mut() {
            sink.render(&snapshot);
        }
    }
}

fn unique_prefix_match(ids: impl Iterator<Item = Uuid>, prefix: &str) -> Option<Uuid> {
    let prefix = prefix.trim().to_ascii_lowercase();
    if prefix.is_empty() {
        return None;
    }

    let mut matches = ids.filter(|id| id.to_string().starts_with(&prefix));
    let first = matches.next()?;
    if matches.next().is_some() {
        return None;
    }
    Some(first)
}

#[cfg(test)]
mod tests {
    use super::unique_prefix_match;
    use uuid::Uuid;

    #[test]
    fn prefix_match_requires_uniqueness() {
        let a = Uuid::parse_str("aaaa1111-0000-4000-8000-000000000000").unwrap();
        let b = Uuid::parse_str("aaaa2222-0000-4000-8000-000000000000").unwrap();
        let ids = [a, b];

        assert_eq!(unique_prefix_match(ids.iter().copied(), "AAAA1"), Some(a));
        assert_eq!(unique_prefix_match(ids.iter().copied(), "aaaa"), None);
        assert_eq!(unique_prefix_match(ids.iter().copied(), "b"), None);
        assert_eq!(unique_prefix_match(ids.iter().copied(), " "), None);
    }
}
