//! Concrete slot instances produced by expansion.
//!
//! Occurrences are always derived, never stored. Regenerating them from the
//! same slot yields the same identifiers, which is what lets downstream
//! consumers key on them across refreshes.

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::model::pattern::Weekday;
use crate::model::slot::{SlotId, SlotKind};

/// Deterministic occurrence identifier.
///
/// Non-recurring slots reuse the slot id. Recurring expansions append the
/// iteration index, and weekly expansions additionally append the weekday
/// index so several occurrences inside one iteration stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct OccurrenceId(String);

impl OccurrenceId {
    pub(crate) fn base(slot_id: &SlotId) -> Self {
        Self(slot_id.as_str().to_owned())
    }

    pub(crate) fn indexed(slot_id: &SlotId, iteration: u32) -> Self {
        Self(format!("{slot_id}-{iteration}"))
    }

    pub(crate) fn weekly(slot_id: &SlotId, iteration: u32, day: Weekday) -> Self {
        Self(format!("{slot_id}-{iteration}-{}", day.index()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OccurrenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One concrete, bookable (or blocked) interval on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub id: OccurrenceId,
    /// The slot this occurrence was expanded from.
    pub slot_id: SlotId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub kind: SlotKind,
    pub timezone: Tz,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Occurrence {
    /// Length of this occurrence.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}
