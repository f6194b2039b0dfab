//! Availability slots as stored and edited by hosts.

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{SlotError, SlotResult};
use crate::model::pattern::Recurrence;

/// Opaque slot identifier.
///
/// Freshly created slots get a UUID; identifiers handed in by callers are
/// preserved as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(String);

impl SlotId {
    /// Wraps an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a slot means for scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    /// Open time a guest may book.
    Available,
    /// Blocked time.
    Busy,
    /// A one-off override carving time out of a recurring series.
    Exception,
}

impl SlotKind {
    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Busy => "busy",
            Self::Exception => "exception",
        }
    }
}

impl std::fmt::Display for SlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A block of host time, possibly repeating.
///
/// Instants are stored in UTC; `timezone` is the host's IANA zone and drives
/// how recurring occurrences land on the local calendar (including across
/// DST transitions).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilitySlot {
    pub id: SlotId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub kind: SlotKind,
    pub recurrence: Option<Recurrence>,
    pub timezone: Tz,
    pub description: Option<String>,
}

impl AvailabilitySlot {
    /// ## Summary
    /// Creates a non-recurring slot with a fresh identifier.
    ///
    /// ## Errors
    /// Returns `SlotError::InvalidTimeRange` when `end` is not after `start`.
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        kind: SlotKind,
        timezone: Tz,
    ) -> SlotResult<Self> {
        if end <= start {
            return Err(SlotError::InvalidTimeRange { start, end });
        }
        Ok(Self {
            id: SlotId::generate(),
            start,
            end,
            kind,
            recurrence: None,
            timezone,
            description: None,
        })
    }

    /// Replaces the generated identifier.
    #[must_use]
    pub fn with_id(mut self, id: SlotId) -> Self {
        self.id = id;
        self
    }

    /// ## Summary
    /// Attaches a recurrence after validating its pattern.
    ///
    /// ## Errors
    /// Returns `SlotError::InvalidPattern` when the pattern fails validation.
    pub fn with_recurrence(mut self, recurrence: Recurrence) -> SlotResult<Self> {
        recurrence.pattern.validate()?;
        self.recurrence = Some(recurrence);
        Ok(self)
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Length of one occurrence of this slot.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Returns whether the slot carries a recurrence.
    #[must_use]
    pub const fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    /// ## Summary
    /// Re-checks the slot invariants.
    ///
    /// Covers both the time range and, when present, the recurrence pattern,
    /// so values built as struct literals can be validated after the fact.
    ///
    /// ## Errors
    /// Returns `SlotError::InvalidTimeRange` or `SlotError::InvalidPattern`.
    pub fn validate(&self) -> SlotResult<()> {
        if self.end <= self.start {
            return Err(SlotError::InvalidTimeRange {
                start: self.start,
                end: self.end,
            });
        }
        if let Some(recurrence) = &self.recurrence {
            recurrence.pattern.validate()?;
        }
        Ok(())
    }
}
