//! Expansion policy defaults shared across crates.

/// Hard ceiling on occurrences generated from a single base slot. Bounds both
/// the outer iteration count and the number of emitted occurrences, so
/// expansion terminates even for degenerate patterns.
pub const OCCURRENCE_CAP: u32 = 100;

/// Days of look-ahead used when a recurrence carries no explicit end date.
pub const DEFAULT_HORIZON_DAYS: i64 = 30;
