//! Focus-session tracker backed by the `spinit_sessions` and
//! `spinit_stats` blobs.
//!
//! # Invariants
//! - Only completed timer sessions mutate this state.
//! - `Stats::minutes` grows by exactly the amount added to the session map.
//! - Counters saturate at `u32::MAX` instead of wrapping.
//! - Streak counts consecutive days with focus time, ending on the day of
//!   the latest completed session.

use crate::model::stats::{SessionMap, Stats};
use crate::store::{load, save, KvStore, StoreResult, SESSIONS_KEY, STATS_KEY};
use chrono::NaiveDate;
use log::info;
use std::rc::Rc;

/// Per-day focus minutes plus cumulative counters.
pub struct SessionTracker<S: KvStore> {
    store: Rc<S>,
    sessions: SessionMap,
    stats: Stats,
}

impl<S: KvStore> SessionTracker<S> {
    pub fn load(store: Rc<S>) -> Self {
        let sessions = load(store.as_ref(), SESSIONS_KEY, SessionMap::new());
        let stats = load(store.as_ref(), STATS_KEY, Stats::default());
        Self {
            store,
            sessions,
            stats,
        }
    }

    pub fn sessions(&self) -> &SessionMap {
        &self.sessions
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Records one completed session of `minutes` on `day` and persists.
    pub fn record_session(&mut self, day: NaiveDate, minutes: u32) -> StoreResult<Stats> {
        let entry = self.sessions.entry(day).or_insert(0);
        *entry = entry.saturating_add(minutes);
        self.stats.sessions = self.stats.sessions.saturating_add(1);
        self.stats.minutes = self.stats.minutes.saturating_add(minutes);
        self.stats.streak = streak_ending_on(&self.sessions, day);

        save(self.store.as_ref(), SESSIONS_KEY, &self.sessions)?;
        save(self.store.as_ref(), STATS_KEY, &self.stats)?;
        info!(
            "event=session_record module=session_repo status=ok day={} minutes={} total_sessions={} streak={}",
            day, minutes, self.stats.sessions, self.stats.streak
        );
        Ok(self.stats)
    }
}

/// Counts consecutive days with recorded minutes, walking back from `day`.
pub fn streak_ending_on(sessions: &SessionMap, day: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut cursor = Some(day);
    while let Some(current) = cursor {
        if sessions.get(&current).copied().unwrap_or(0) == 0 {
            break;
        }
        streak += 1;
        cursor = current.pred_opt();
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::streak_ending_on;
    use crate::model::stats::SessionMap;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn streak_stops_at_first_gap() {
        let mut sessions = SessionMap::new();
        sessions.insert(day(10), 25);
        sessions.insert(day(12), 25);
        sessions.insert(day(13), 5);
        sessions.insert(day(14), 50);

        assert_eq!(streak_ending_on(&sessions, day(14)), 3);
        assert_eq!(streak_ending_on(&sessions, day(10)), 1);
        assert_eq!(streak_ending_on(&sessions, day(11)), 0);
    }
}
