//! Focus-session aggregates.
//!
//! # Invariants
//! - `Stats::minutes` equals the sum of every increment added to the
//!   session map.
//! - Session-map entries are never decremented.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Accumulated focus minutes keyed by calendar day.
pub type SessionMap = BTreeMap<NaiveDate, u32>;

/// Cumulative focus counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub sessions: u32,
    #[serde(default)]
    pub minutes: u32,
    /// Consecutive days, ending on the last completed session, with focus time.
    #[serde(default)]
    pub streak: u32,
}
