//! Wall-clock-aligned refresh scheduling.
//!
//! Refreshes land on interval boundaries (:00, :05, :10 … for the default
//! five minutes) rather than "interval after start", so the dashboard's
//! snapshots line up with the exchange's own OI publication cadence.

use chrono::{Duration, NaiveDateTime, Timelike};

/// The next interval boundary strictly after `now`.
///
/// Seconds are truncated first, so 10:02:45 with a 5-minute interval maps
/// to 10:05:00, and an exact boundary (10:05:00) maps to the *next* one
/// (10:10:00). An interval of 0 (reachable from `--interval 0` or a bad
/// config file) is clamped to the one-minute floor instead of dividing by
/// zero.
pub fn next_aligned(now: NaiveDateTime, interval_mins: u32) -> NaiveDateTime {
    let interval = interval_mins.max(1);
    let base = now
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .expect("zero is a valid second");
    let minutes_to_add = interval - (now.minute() % interval);
    base + Duration::minutes(i64::from(minutes_to_add))
}

/// Step a deadline forward in whole intervals until it is strictly after
/// `now`. Used after a missed tick (suspended laptop, long fetch) so the
/// schedule never loops on a stale deadline. A zero interval is clamped
/// to one minute; a zero step here would never terminate.
pub fn advance(mut next: NaiveDateTime, now: NaiveDateTime, interval_mins: u32) -> NaiveDateTime {
    let step = Duration::minutes(i64::from(interval_mins.max(1)));
    while next <= now {
        next += step;
    }
    next
}

/// Whole seconds until the deadline, clamped at zero for the countdown.
pub fn seconds_until(next: NaiveDateTime, now: NaiveDateTime) -> i64 {
    (next - now).num_seconds().max(0)
}
