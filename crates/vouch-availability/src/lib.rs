//! Vouch availability core - recurring slot expansion and window filtering.
//!
//! Hosts describe when they are free as [`model::AvailabilitySlot`] values,
//! optionally carrying a recurrence pattern. This crate turns those slots
//! into the concrete [`model::Occurrence`] list a calendar renders:
//!
//! - [`expand()`] derives the bounded, deterministic occurrence set of one
//!   slot.
//! - [`window`] restricts occurrences to the visible calendar week.
//! - [`store`] holds the editable slot list and serves expand-then-filter
//!   queries over it.
//! - [`wire`] decodes and validates the JSON shape the API layer speaks.
//! - [`ical`] renders patterns as RFC 5545 RRULE text for calendar invites.

pub mod error;
pub mod expand;
pub mod ical;
pub mod model;
pub mod store;
pub mod tz;
pub mod window;
pub mod wire;

pub use error::{PatternError, SlotError, SlotResult};
pub use expand::{expand, expand_at};
pub use model::{
    AvailabilitySlot, Frequency, Occurrence, OccurrenceId, Recurrence, RecurrencePattern, SlotId,
    SlotKind, Weekday, WeekdaySet,
};
pub use store::SlotStore;
pub use window::{VisibleWindow, filter_occurrences};
