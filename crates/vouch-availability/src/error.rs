use chrono::{DateTime, Utc};
use thiserror::Error;

/// Recurrence pattern validation errors.
///
/// Degenerate patterns are rejected when a slot enters the system instead of
/// silently expanding to nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("interval must be a positive integer (got {0})")]
    NonPositiveInterval(i64),

    #[error("weekly pattern selects no weekdays")]
    EmptyWeekdaySet,

    #[error("weekday index out of range 0..=6 (got {0})")]
    InvalidWeekday(i64),

    #[error("day of month out of range 1..=31 (got {0})")]
    DayOfMonthOutOfRange(i64),
}

/// Slot-level errors
#[derive(Error, Debug)]
pub enum SlotError {
    #[error("invalid time range: end {end} must be after start {start}")]
    InvalidTimeRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error(transparent)]
    InvalidPattern(#[from] PatternError),

    #[error("RRULE export failed: {0}")]
    RRuleExport(String),
}

pub type SlotResult<T> = std::result::Result<T, SlotError>;
