//! Wall-clock helpers. Time-sensitive policy functions take `now` as a
//! parameter; these are the only places the engine reads the clock.

use chrono::{SecondsFormat, Utc};

/// Current unix time in whole seconds.
pub fn now_timestamp() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

/// ISO-8601 stamp for reporting events.
pub fn timestamp_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
