//! Analytics series for the pie and bar charts.

use crate::model::stats::SessionMap;
use crate::model::task::Task;
use chrono::{Duration, NaiveDate};

/// Number of trailing days shown in the focus bar chart.
pub const BAR_DAYS: i64 = 7;

/// Completed vs pending task counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PieSeries {
    pub completed: usize,
    pub pending: usize,
}

/// Focus minutes for the trailing week, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BarSeries {
    /// `MM-DD` labels.
    pub labels: Vec<String>,
    pub minutes: Vec<u32>,
}

pub fn task_completion(tasks: &[Task]) -> PieSeries {
    let completed = tasks.iter().filter(|task| task.done).count();
    PieSeries {
        completed,
        pending: tasks.len() - completed,
    }
}

pub fn trailing_focus_minutes(sessions: &SessionMap, today: NaiveDate) -> BarSeries {
    let mut series = BarSeries::default();
    for offset in (0..BAR_DAYS).rev() {
        let day = today - Duration::days(offset);
        series.labels.push(day.format("%m-%d").to_string());
        series
            .minutes
            .push(sessions.get(&day).copied().unwrap_or(0));
    }
    series
}

#[cfg(test)]
mod tests {
    use super::trailing_focus_minutes;
    use crate::model::stats::SessionMap;
    use chrono::NaiveDate;

    #[test]
    fn bar_series_covers_trailing_week_ending_today() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let mut sessions = SessionMap::new();
        sessions.insert(today, 50);
        sessions.insert(NaiveDate::from_ymd_opt(2026, 2, 24).unwrap(), 25);
        sessions.insert(NaiveDate::from_ymd_opt(2026, 2, 23).unwrap(), 99);

        let series = trailing_focus_minutes(&sessions, today);
        assert_eq!(
            series.labels,
            vec!["02-24", "02-25", "02-26", "02-27", "02-28", "03-01", "03-02"]
        );
        assert_eq!(series.minutes, vec![25, 0, 0, 0, 0, 0, 50]);
    }
}
