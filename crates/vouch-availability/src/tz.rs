//! Timezone resolution and local/UTC conversion.
//!
//! Slots store instants in UTC but repeat on the host's local calendar, so
//! expansion round-trips through the slot's IANA zone. Conversion back to
//! UTC is total: DST folds take the earlier instant (RFC 5545 semantics)
//! and DST gaps shift forward to the next valid wall-clock time.

use std::str::FromStr;

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::trace;

use crate::error::{SlotError, SlotResult};

/// ## Summary
/// Resolves an IANA timezone name to a `chrono_tz::Tz`.
///
/// ## Errors
/// Returns `SlotError::UnknownTimezone` if the name is not a known IANA
/// identifier.
pub fn resolve(name: &str) -> SlotResult<Tz> {
    Tz::from_str(name).map_err(|_e| SlotError::UnknownTimezone(name.to_owned()))
}

/// ## Summary
/// Converts a local wall-clock time in the given zone to UTC.
///
/// Handles both DST edge cases:
/// - Fold (time occurs twice): the earlier instant wins.
/// - Gap (time does not exist): shifted forward to the next valid time,
///   one hour for every contemporary DST rule.
#[must_use]
pub fn local_to_utc(local: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(first, _second) => {
            trace!(%local, %tz, "ambiguous local time, taking the earlier instant");
            first.with_timezone(&Utc)
        }
        LocalResult::None => next_valid_local(local, tz),
    }
}

/// Walks forward out of a DST gap in one-hour steps.
///
/// Contemporary gaps are one hour, but a few historical transitions skipped
/// more (Pacific/Apia skipped an entire day in 2011), so the walk is bounded
/// at 48 hours with a UTC reinterpretation as the unreachable last resort.
fn next_valid_local(local: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    for hours in 1..=48 {
        let candidate = local + TimeDelta::hours(hours);
        if let Some(dt) = tz.from_local_datetime(&candidate).earliest() {
            trace!(%local, %tz, hours, "local time in a DST gap, shifted forward");
            return dt.with_timezone(&Utc);
        }
    }
    Utc.from_utc_datetime(&local)
}
