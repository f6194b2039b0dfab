//! Wire representation of slots.
//!
//! The persistence/API layer exchanges slots as JSON with camelCase keys, a
//! recurring flag, and a loosely-typed pattern object. This module is the
//! validation chokepoint between that shape and the domain model: decoding
//! rejects degenerate patterns outright instead of letting them silently
//! produce empty or truncated expansions.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PatternError, SlotError, SlotResult};
use crate::model::{
    AvailabilitySlot, Frequency, Recurrence, RecurrencePattern, SlotId, SlotKind, WeekdaySet,
};
use crate::tz;

/// One slot as carried on the wire.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SlotRecord {
    pub id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: SlotKind,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_pattern: Option<PatternRecord>,
    pub timezone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The recurrence object nested in a [`SlotRecord`].
///
/// Every field except `frequency` is optional on the wire; `interval`
/// defaults to 1. There is no day-of-month field: monthly patterns repeat
/// on the slot's own start day, resolved in the slot's timezone.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PatternRecord {
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

impl TryFrom<SlotRecord> for AvailabilitySlot {
    type Error = SlotError;

    /// Decodes and validates a wire record.
    ///
    /// A recurring flag without a pattern, or a pattern without the flag,
    /// is tolerated and yields a non-recurring slot; everything else that
    /// is malformed is an error.
    fn try_from(record: SlotRecord) -> SlotResult<Self> {
        let timezone = tz::resolve(&record.timezone)?;
        if record.end <= record.start {
            return Err(SlotError::InvalidTimeRange {
                start: record.start,
                end: record.end,
            });
        }

        let recurrence = match (record.is_recurring, record.recurring_pattern) {
            (true, Some(pattern)) => Some(decode_pattern(pattern, record.start, timezone)?),
            (true, None) => {
                debug!(slot = %record.id, "recurring flag without a pattern, treating as one-off");
                None
            }
            (false, Some(_ignored)) => {
                debug!(slot = %record.id, "pattern on a non-recurring slot ignored");
                None
            }
            (false, None) => None,
        };

        Ok(Self {
            id: SlotId::new(record.id),
            start: record.start,
            end: record.end,
            kind: record.kind,
            recurrence,
            timezone,
            description: record.description,
        })
    }
}

fn decode_pattern(
    record: PatternRecord,
    start: DateTime<Utc>,
    timezone: chrono_tz::Tz,
) -> SlotResult<Recurrence> {
    let raw_interval = record.interval.unwrap_or(1);
    if raw_interval <= 0 {
        return Err(PatternError::NonPositiveInterval(raw_interval).into());
    }
    // Positive but absurdly large intervals clamp; the occurrence cap
    // bounds their effect regardless.
    let interval = u32::try_from(raw_interval).unwrap_or(u32::MAX);

    let pattern = match record.frequency {
        Frequency::Daily => RecurrencePattern::daily(interval)?,
        Frequency::Weekly => {
            let weekdays = WeekdaySet::from_indices(record.days_of_week.unwrap_or_default())?;
            RecurrencePattern::weekly(interval, weekdays)?
        }
        Frequency::Monthly => {
            let day_of_month =
                u8::try_from(start.with_timezone(&timezone).day()).unwrap_or(u8::MAX);
            RecurrencePattern::monthly(interval, day_of_month)?
        }
    };

    let mut recurrence = Recurrence::new(pattern);
    if let Some(end_date) = record.end_date {
        recurrence = recurrence.with_end_date(end_date);
    }
    Ok(recurrence)
}

impl From<&AvailabilitySlot> for SlotRecord {
    /// Re-encodes a slot for transport.
    ///
    /// The monthly day-of-month is not carried explicitly (the wire derives
    /// it from the start), so a hand-built monthly pattern whose day differs
    /// from the slot's start day does not survive a round trip.
    fn from(slot: &AvailabilitySlot) -> Self {
        let recurring_pattern = slot.recurrence.map(|recurrence| {
            let days_of_week = match recurrence.pattern {
                RecurrencePattern::Weekly { weekdays, .. } => Some(
                    weekdays
                        .iter()
                        .map(|day| i64::from(day.index()))
                        .collect(),
                ),
                RecurrencePattern::Daily { .. } | RecurrencePattern::Monthly { .. } => None,
            };
            PatternRecord {
                frequency: recurrence.pattern.frequency(),
                days_of_week,
                interval: Some(i64::from(recurrence.pattern.interval().get())),
                end_date: recurrence.end_date,
            }
        });

        Self {
            id: slot.id.to_string(),
            start: slot.start,
            end: slot.end,
            kind: slot.kind,
            is_recurring: slot.is_recurring(),
            recurring_pattern,
            timezone: slot.timezone.name().to_owned(),
            description: slot.description.clone(),
        }
    }
}
