//! Domain model for host availability.
//!
//! These types are the input and output shapes of expansion:
//! - Slots: host-authored blocks of time, optionally recurring
//! - Patterns: how a slot repeats, as a tagged union keyed on frequency
//! - Occurrences: the concrete instances expansion derives from a slot

mod occurrence;
mod pattern;
mod slot;

pub use occurrence::{Occurrence, OccurrenceId};
pub use pattern::{Frequency, Recurrence, RecurrencePattern, Weekday, WeekdaySet};
pub use slot::{AvailabilitySlot, SlotId, SlotKind};
