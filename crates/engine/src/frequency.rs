//! Rolling-window frequency policy.
//!
//! A notification may be emitted only when the hour cap, the day cap, and
//! the minimum inter-ad spacing all hold. Pure functions over the shown
//! history so the policy is testable without a clock.

use crate::constants::{ONE_DAY_SECONDS, ONE_HOUR_SECONDS};

/// Count history entries `t` with `now - t < window_seconds`.
fn recent(history: &[u64], now: u64, window_seconds: u64) -> u64 {
    history
        .iter()
        .filter(|&&t| now.checked_sub(t).is_some_and(|age| age < window_seconds))
        .count() as u64
}

/// Whether no more than `allowed` ads were shown inside the window.
pub fn respects_rolling_constraint(
    history: &[u64],
    now: u64,
    window_seconds: u64,
    allowed: u64,
) -> bool {
    recent(history, now, window_seconds) <= allowed
}

/// The full gate: hour cap, day cap, and minimum spacing of
/// `ONE_HOUR / ads_per_hour` seconds since the last shown ad.
///
/// The day window really is one day; an `ads_per_hour` of zero permits
/// nothing.
pub fn is_allowed(history: &[u64], now: u64, ads_per_hour: u64, ads_per_day: u64) -> bool {
    if ads_per_hour == 0 {
        return false;
    }

    let respects_hour = respects_rolling_constraint(history, now, ONE_HOUR_SECONDS, ads_per_hour);
    let respects_day = respects_rolling_constraint(history, now, ONE_DAY_SECONDS, ads_per_day);

    let minimum_wait = ONE_HOUR_SECONDS / ads_per_hour;
    let respects_spacing = respects_rolling_constraint(history, now, minimum_wait, 0);

    respects_hour && respects_day && respects_spacing
}
