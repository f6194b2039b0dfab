//! Recurrence expansion.
//!
//! `expand_at` turns one slot into the finite set of concrete occurrences it
//! stands for, bounded by the pattern's end date or the policy horizon and
//! by the policy occurrence cap. Expansion is a pure function of its
//! arguments; callers that want "now" semantics use [`expand`].
//!
//! Recurring slots repeat on the host's local calendar: the anchor is the
//! slot's start date and wall-clock time in `slot.timezone`, and every
//! occurrence keeps that wall-clock start even when a DST transition moves
//! the corresponding UTC instant.

use std::num::NonZeroU32;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeDelta, Utc};
use tracing::trace;

use vouch_core::types::ExpansionPolicy;

use crate::model::{
    AvailabilitySlot, Occurrence, OccurrenceId, RecurrencePattern, Weekday, WeekdaySet,
};
use crate::tz;

/// ## Summary
/// Expands a slot into its occurrences, measuring the default horizon from
/// the current instant.
#[must_use]
pub fn expand(slot: &AvailabilitySlot, policy: ExpansionPolicy) -> Vec<Occurrence> {
    expand_at(slot, policy, Utc::now())
}

/// ## Summary
/// Expands a slot into its occurrences, measuring the default horizon from
/// `now`.
///
/// A non-recurring slot yields exactly one occurrence mirroring the slot.
/// A recurring slot yields occurrences whose start is not after the
/// pattern's end date (or `now + policy.default_horizon` without one), up
/// to `policy.cap` of them. Identifiers are deterministic, so expanding the
/// same slot twice yields the same id sequence.
///
/// Output is in generation order: by iteration, and within one weekly
/// iteration by ascending weekday index. Callers that need chronological
/// order sort afterwards.
#[must_use]
pub fn expand_at(
    slot: &AvailabilitySlot,
    policy: ExpansionPolicy,
    now: DateTime<Utc>,
) -> Vec<Occurrence> {
    let Some(recurrence) = slot.recurrence else {
        trace!(slot = %slot.id, "non-recurring slot passes through");
        return vec![mirror_occurrence(slot)];
    };

    let horizon = recurrence.end_date.unwrap_or_else(|| {
        now.checked_add_signed(policy.default_horizon)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    });

    let anchor = slot.start.with_timezone(&slot.timezone);
    let expansion = Expansion {
        slot,
        start_date: anchor.date_naive(),
        start_time: anchor.time(),
        duration: slot.duration(),
        horizon,
        cap: policy.cap,
    };

    trace!(
        slot = %slot.id,
        frequency = %recurrence.pattern.frequency(),
        horizon = %horizon,
        "expanding recurring slot"
    );

    let occurrences = match recurrence.pattern {
        RecurrencePattern::Daily { interval } => expansion.daily(interval),
        RecurrencePattern::Weekly { interval, weekdays } => expansion.weekly(interval, weekdays),
        RecurrencePattern::Monthly {
            interval,
            day_of_month,
        } => expansion.monthly(interval, day_of_month),
    };

    trace!(slot = %slot.id, count = occurrences.len(), "expansion complete");
    occurrences
}

/// The single occurrence of a non-recurring slot.
fn mirror_occurrence(slot: &AvailabilitySlot) -> Occurrence {
    Occurrence {
        id: OccurrenceId::base(&slot.id),
        slot_id: slot.id.clone(),
        start: slot.start,
        end: slot.end,
        kind: slot.kind,
        timezone: slot.timezone,
        description: slot.description.clone(),
    }
}

/// Per-call expansion state: the local anchor plus the bounds.
struct Expansion<'a> {
    slot: &'a AvailabilitySlot,
    /// Slot start date on the local calendar of `slot.timezone`.
    start_date: NaiveDate,
    /// Slot start wall-clock time in `slot.timezone`.
    start_time: NaiveTime,
    duration: TimeDelta,
    horizon: DateTime<Utc>,
    cap: u32,
}

impl Expansion<'_> {
    /// UTC start instant for an occurrence on the given local date.
    fn start_at(&self, date: NaiveDate) -> DateTime<Utc> {
        tz::local_to_utc(date.and_time(self.start_time), self.slot.timezone)
    }

    fn occurrence(&self, id: OccurrenceId, start: DateTime<Utc>) -> Occurrence {
        Occurrence {
            id,
            slot_id: self.slot.id.clone(),
            start,
            end: start
                .checked_add_signed(self.duration)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            kind: self.slot.kind,
            timezone: self.slot.timezone,
            description: self.slot.description.clone(),
        }
    }

    /// One candidate per iteration, `interval` days apart.
    fn daily(&self, interval: NonZeroU32) -> Vec<Occurrence> {
        let mut occurrences = Vec::new();
        for iteration in 0..self.cap {
            let days = u64::from(interval.get()) * u64::from(iteration);
            let Some(date) = self.start_date.checked_add_days(Days::new(days)) else {
                break;
            };
            let start = self.start_at(date);
            if start > self.horizon {
                break;
            }
            occurrences
                .push(self.occurrence(OccurrenceId::indexed(&self.slot.id, iteration), start));
        }
        occurrences
    }

    /// Per iteration, one candidate per selected weekday, offset from the
    /// anchor date by `(target - anchor_weekday + 7) % 7` days plus whole
    /// weeks. Candidates never precede the anchor, so iteration 0 covers
    /// the anchor's own week starting at the anchor.
    fn weekly(&self, interval: NonZeroU32, weekdays: WeekdaySet) -> Vec<Occurrence> {
        if weekdays.is_empty() {
            trace!(slot = %self.slot.id, "weekly pattern with empty weekday set yields nothing");
            return Vec::new();
        }

        let anchor_weekday = Weekday::from(self.start_date.weekday());
        let mut occurrences = Vec::new();
        let mut emitted: u32 = 0;

        for iteration in 0..self.cap {
            let week_days = 7 * u64::from(interval.get()) * u64::from(iteration);
            let mut emitted_this_iteration = false;

            for day in weekdays.iter() {
                let offset = (day.index() + 7 - anchor_weekday.index()) % 7;
                let Some(date) = self
                    .start_date
                    .checked_add_days(Days::new(week_days + u64::from(offset)))
                else {
                    continue;
                };
                let start = self.start_at(date);
                if start > self.horizon {
                    continue;
                }
                occurrences.push(self.occurrence(
                    OccurrenceId::weekly(&self.slot.id, iteration, day),
                    start,
                ));
                emitted_this_iteration = true;
                emitted += 1;
                if emitted == self.cap {
                    trace!(slot = %self.slot.id, emitted, "occurrence cap reached");
                    return occurrences;
                }
            }

            // Candidates only move later with each iteration, so a whole
            // iteration past the horizon means every later one is too.
            if !emitted_this_iteration {
                break;
            }
        }
        occurrences
    }

    /// Same day of month every `interval` months. Months lacking the day
    /// produce nothing but still consume their iteration index, as do
    /// candidates before the slot's own start.
    fn monthly(&self, interval: NonZeroU32, day_of_month: u8) -> Vec<Occurrence> {
        let mut occurrences = Vec::new();
        for iteration in 0..self.cap {
            let months = u64::from(interval.get()) * u64::from(iteration);
            let Some(date) = nth_month_day(self.start_date, months, day_of_month) else {
                continue;
            };
            let start = self.start_at(date);
            if start < self.slot.start {
                continue;
            }
            if start > self.horizon {
                break;
            }
            occurrences
                .push(self.occurrence(OccurrenceId::indexed(&self.slot.id, iteration), start));
        }
        occurrences
    }
}

/// The `day_of_month`-th day of the month `months_ahead` months after
/// `start`'s month, or `None` when that month has no such day.
fn nth_month_day(start: NaiveDate, months_ahead: u64, day_of_month: u8) -> Option<NaiveDate> {
    let months_ahead = i64::try_from(months_ahead).ok()?;
    let total = i64::from(start.year()) * 12 + i64::from(start.month0()) + months_ahead;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month0 = u32::try_from(total.rem_euclid(12)).ok()?;
    NaiveDate::from_ymd_opt(year, month0 + 1, u32::from(day_of_month))
}
