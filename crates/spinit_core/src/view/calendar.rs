//! Month grid generation for the calendar view.
//!
//! # Invariants
//! - Leading blanks equal the weekday of day 1, Sunday = 0.
//! - One cell per day of the month, in order.
//! - Month navigation is unbounded; the reference is always day 1.

use super::{list_items, TaskItem};
use crate::model::task::Task;
use crate::search::filter::filter_day;
use chrono::{Datelike, Months, NaiveDate};

/// One day cell of the month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCell {
    pub day: u32,
    pub date: NaiveDate,
    pub task_count: usize,
    /// `1 task` / `N tasks`, `None` when the day has no tasks.
    pub badge: Option<String>,
}

/// Grid for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    /// e.g. `October 2026`.
    pub label: String,
    pub leading_blanks: u32,
    pub cells: Vec<CalendarCell>,
}

/// Detail panel for one selected day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPanel {
    pub date: NaiveDate,
    /// e.g. `Sat Oct 17 2026`.
    pub label: String,
    pub tasks: Vec<TaskItem>,
}

/// Normalizes any date to the first day of its month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Moves a month reference by `delta` months.
///
/// Out-of-range results (beyond chrono's representable years) leave the
/// reference unchanged.
pub fn shift_month(reference: NaiveDate, delta: i32) -> NaiveDate {
    let start = month_start(reference);
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        start.checked_add_months(months)
    } else {
        start.checked_sub_months(months)
    };
    shifted.unwrap_or(start)
}

/// Number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let start = month_start(date);
    start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day())
}

fn badge_text(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("1 task".to_string()),
        n => Some(format!("{n} tasks")),
    }
}

/// Builds the grid for the month containing `reference`.
pub fn build_month(reference: NaiveDate, tasks: &[Task]) -> CalendarMonth {
    let start = month_start(reference);
    let leading_blanks = start.weekday().num_days_from_sunday();
    let cells = start
        .iter_days()
        .take(days_in_month(start) as usize)
        .map(|date| {
            let task_count = tasks.iter().filter(|task| task.date == Some(date)).count();
            CalendarCell {
                day: date.day(),
                date,
                task_count,
                badge: badge_text(task_count),
            }
        })
        .collect();

    CalendarMonth {
        year: start.year(),
        month: start.month(),
        label: start.format("%B %Y").to_string(),
        leading_blanks,
        cells,
    }
}

/// Builds the day panel listing tasks scheduled on `date`.
pub fn build_day_panel(date: NaiveDate, tasks: &[Task]) -> DayPanel {
    DayPanel {
        date,
        label: date.format("%a %b %d %Y").to_string(),
        tasks: list_items(&filter_day(tasks, date)),
    }
}
