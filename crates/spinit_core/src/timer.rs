//! Countdown focus timer state machine.
//!
//! # Responsibility
//! - Track IDLE / RUNNING / PAUSED state and remaining seconds.
//! - Report a completed session when the countdown reaches zero.
//!
//! # Invariants
//! - At most one countdown runs at a time; `start` while running is a no-op.
//! - `tick` has no effect unless the timer is running.
//! - After completion the timer is IDLE with the full duration restored.
//!
//! The controller owns no clock: the caller delivers one `tick` per
//! elapsed second.

use log::{debug, info};

/// Minutes used when the custom input is absent or invalid.
pub const DEFAULT_MINUTES: u32 = 25;
/// Smallest accepted custom duration.
pub const MIN_MINUTES: u32 = 1;
/// Largest accepted custom duration.
pub const MAX_MINUTES: u32 = 480;

/// Resolves the custom-minutes input to a duration in minutes.
///
/// Only the leading integer counts, so `"10min"` is 10 and `"12.5"` is 12.
/// Absent, non-numeric and below-minimum values fall back to
/// [`DEFAULT_MINUTES`]; values above [`MAX_MINUTES`] are clamped, including
/// digit runs too long for any integer type.
pub fn resolve_custom_minutes(input: Option<&str>) -> u32 {
    match input.and_then(leading_integer) {
        Some(value) if value < i64::from(MIN_MINUTES) => DEFAULT_MINUTES,
        Some(value) => value.min(i64::from(MAX_MINUTES)) as u32,
        None => DEFAULT_MINUTES,
    }
}

/// Parses an optional sign followed by at least one digit, ignoring the rest.
///
/// Digit runs that overflow saturate toward the sign.
fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(byte - b'0'));
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Renders seconds as `MM:SS`.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Result of delivering one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer was not running; nothing changed.
    Ignored,
    /// Countdown continues with this many seconds left.
    Running { remaining: u32 },
    /// Countdown reached zero; one session of `minutes` completed.
    Completed { minutes: u32 },
}

/// Single countdown driven by external one-second ticks.
#[derive(Debug, Clone)]
pub struct TimerController {
    state: TimerState,
    configured_minutes: u32,
    remaining: u32,
    custom_input: Option<String>,
}

impl Default for TimerController {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerController {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            configured_minutes: DEFAULT_MINUTES,
            remaining: DEFAULT_MINUTES * 60,
            custom_input: None,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn configured_minutes(&self) -> u32 {
        self.configured_minutes
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Stores the raw custom-minutes input; it is resolved on start/reset.
    pub fn set_custom_input(&mut self, input: Option<String>) {
        self.custom_input = input;
    }

    /// IDLE/PAUSED → RUNNING. Returns `false` when already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }

        if self.state == TimerState::Idle || self.remaining == self.configured_minutes * 60 {
            self.configure_from_input();
        }
        self.state = TimerState::Running;
        info!(
            "event=timer_start module=timer status=ok minutes={} remaining_s={}",
            self.configured_minutes, self.remaining
        );
        true
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Ignored;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return TickOutcome::Running {
                remaining: self.remaining,
            };
        }

        let minutes = self.configured_minutes;
        self.state = TimerState::Idle;
        self.configure_from_input();
        info!("event=timer_complete module=timer status=ok minutes={minutes}");
        TickOutcome::Completed { minutes }
    }

    /// RUNNING → PAUSED, keeping the remaining time.
    pub fn pause(&mut self) {
        if self.is_running() {
            self.state = TimerState::Paused;
            debug!(
                "event=timer_pause module=timer status=ok remaining_s={}",
                self.remaining
            );
        }
    }

    /// Any state → IDLE with the full configured duration.
    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.configure_from_input();
        debug!(
            "event=timer_reset module=timer status=ok minutes={}",
            self.configured_minutes
        );
    }

    fn configure_from_input(&mut self) {
        self.configured_minutes = resolve_custom_minutes(self.custom_input.as_deref());
        self.remaining = self.configured_minutes * 60;
    }
}

#[cfg(test)]
mod tests {
    use super::{format_clock, resolve_custom_minutes, TickOutcome, TimerController, TimerState};

    #[test]
    fn custom_minutes_fall_back_and_clamp() {
        assert_eq!(resolve_custom_minutes(Some("0")), 25);
        assert_eq!(resolve_custom_minutes(Some("-3")), 25);
        assert_eq!(resolve_custom_minutes(Some("abc")), 25);
        assert_eq!(resolve_custom_minutes(None), 25);
        assert_eq!(resolve_custom_minutes(Some("9999")), 480);
        assert_eq!(resolve_custom_minutes(Some(" 10 ")), 10);
    }

    #[test]
    fn custom_minutes_read_the_leading_integer() {
        assert_eq!(resolve_custom_minutes(Some("10min")), 10);
        assert_eq!(resolve_custom_minutes(Some("12.5")), 12);
        assert_eq!(resolve_custom_minutes(Some("+7")), 7);
        assert_eq!(resolve_custom_minutes(Some("min10")), 25);
        assert_eq!(resolve_custom_minutes(Some("-")), 25);
        assert_eq!(resolve_custom_minutes(Some("")), 25);
    }

    #[test]
    fn oversized_digit_runs_clamp_to_maximum() {
        assert_eq!(resolve_custom_minutes(Some("99999999999999999999")), 480);
        assert_eq!(resolve_custom_minutes(Some("99999999999999999999999999 minutes")), 480);
        assert_eq!(resolve_custom_minutes(Some("-99999999999999999999")), 25);
    }

    #[test]
    fn start_while_running_is_a_noop() {
        let mut timer = TimerController::new();
        assert!(timer.start());
        timer.tick();
        assert!(!timer.start());
        assert_eq!(timer.remaining(), 25 * 60 - 1);
    }

    #[test]
    fn pause_keeps_remaining_and_resume_continues() {
        let mut timer = TimerController::new();
        timer.set_custom_input(Some("2".to_string()));
        timer.start();
        for _ in 0..30 {
            timer.tick();
        }
        timer.pause();
        assert_eq!(timer.state(), TimerState::Paused);
        assert_eq!(timer.tick(), TickOutcome::Ignored);

        timer.set_custom_input(Some("10".to_string()));
        timer.start();
        assert_eq!(timer.remaining(), 90);
        assert_eq!(timer.configured_minutes(), 2);
    }

    #[test]
    fn countdown_completes_and_returns_to_idle() {
        let mut timer = TimerController::new();
        timer.set_custom_input(Some("1".to_string()));
        timer.start();
        let mut outcome = TickOutcome::Ignored;
        for _ in 0..60 {
            outcome = timer.tick();
        }
        assert_eq!(outcome, TickOutcome::Completed { minutes: 1 });
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining(), 60);
    }

    #[test]
    fn reset_restores_full_duration() {
        let mut timer = TimerController::new();
        timer.set_custom_input(Some("5".to_string()));
        timer.start();
        timer.tick();
        timer.reset();
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining(), 300);
    }

    #[test]
    fn clock_format_pads_minutes_and_seconds() {
        assert_eq!(format_clock(25 * 60), "25:00");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(480 * 60), "480:00");
    }
}
