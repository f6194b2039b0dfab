//! Shared value types without domain dependencies.

use chrono::TimeDelta;

use crate::constants::{DEFAULT_HORIZON_DAYS, OCCURRENCE_CAP};

/// Bounds applied to a single recurrence expansion.
///
/// Threaded explicitly through the expander so expansion stays a pure
/// function of its arguments; `Settings::expansion_policy` lowers loaded
/// configuration into this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionPolicy {
    /// Look-ahead applied when a pattern has no explicit end date.
    pub default_horizon: TimeDelta,
    /// Ceiling on outer iterations and on emitted occurrences.
    pub cap: u32,
}

impl ExpansionPolicy {
    /// Creates a policy with the given horizon and occurrence cap.
    #[must_use]
    pub const fn new(default_horizon: TimeDelta, cap: u32) -> Self {
        Self {
            default_horizon,
            cap,
        }
    }
}

impl Default for ExpansionPolicy {
    fn default() -> Self {
        Self {
            default_horizon: TimeDelta::days(DEFAULT_HORIZON_DAYS),
            cap: OCCURRENCE_CAP,
        }
    }
}
