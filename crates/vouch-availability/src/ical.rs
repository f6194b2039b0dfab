//! iCalendar RRULE export.
//!
//! Calendar invites carry recurrence as RFC 5545 RRULE text. This module
//! renders a pattern to that text and, for interop checks, builds a
//! validated `rrule::RRuleSet` anchored on the slot's zoned start.

use chrono::{DateTime, Utc};
use rrule::{RRule, RRuleSet, Unvalidated};

use crate::error::{SlotError, SlotResult};
use crate::model::{AvailabilitySlot, RecurrencePattern, Weekday};

/// UNTIL values must be rendered in UTC basic format.
const UNTIL_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// ## Summary
/// Renders a pattern as RFC 5545 RRULE text.
///
/// `FREQ` and `INTERVAL` are always present; `BYDAY` for weekly patterns,
/// `BYMONTHDAY` for monthly ones, and `UNTIL` when an end date is set.
#[must_use]
pub fn rrule_string(pattern: &RecurrencePattern, end_date: Option<DateTime<Utc>>) -> String {
    let mut parts = vec![
        format!("FREQ={}", pattern.frequency().ical_code()),
        format!("INTERVAL={}", pattern.interval()),
    ];

    match pattern {
        RecurrencePattern::Daily { .. } => {}
        RecurrencePattern::Weekly { weekdays, .. } => {
            let days: Vec<&str> = weekdays.iter().map(Weekday::byday_code).collect();
            parts.push(format!("BYDAY={}", days.join(",")));
        }
        RecurrencePattern::Monthly { day_of_month, .. } => {
            parts.push(format!("BYMONTHDAY={day_of_month}"));
        }
    }

    if let Some(until) = end_date {
        parts.push(format!("UNTIL={}", until.format(UNTIL_FORMAT)));
    }

    parts.join(";")
}

/// ## Summary
/// Builds a validated `RRuleSet` for a recurring slot.
///
/// The rule is anchored on the slot's start in the slot's own timezone, so
/// the set expands with the same wall-clock semantics the expander uses.
///
/// ## Errors
/// Returns `SlotError::RRuleExport` when the slot has no recurrence or the
/// rendered rule fails `rrule` validation.
pub fn to_rrule_set(slot: &AvailabilitySlot) -> SlotResult<RRuleSet> {
    let Some(recurrence) = slot.recurrence else {
        return Err(SlotError::RRuleExport(format!(
            "slot {} has no recurrence",
            slot.id
        )));
    };

    let text = rrule_string(&recurrence.pattern, recurrence.end_date);
    let rrule = text
        .parse::<RRule<Unvalidated>>()
        .map_err(|err| SlotError::RRuleExport(err.to_string()))?;

    let dt_start = slot.start.with_timezone(&rrule::Tz::from(slot.timezone));
    rrule
        .build(dt_start)
        .map_err(|err| SlotError::RRuleExport(err.to_string()))
}
