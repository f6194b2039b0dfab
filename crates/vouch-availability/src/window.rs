//! Visible-window filtering.
//!
//! The calendar view never shows a full expansion; it shows the slice whose
//! occurrence starts fall inside the currently displayed week. Filtering is
//! a pure predicate pass over an already-bounded expansion, recomputed on
//! every navigation change, so no windowed generation is needed.

use chrono::{DateTime, Datelike, Days, NaiveTime, TimeDelta, Utc};
use chrono_tz::Tz;

use crate::model::Occurrence;
use crate::tz;

/// Inclusive UTC interval the calendar currently displays.
///
/// Inverted bounds are tolerated and simply match nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl VisibleWindow {
    /// Creates a window from explicit UTC bounds.
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// ## Summary
    /// The calendar week containing `moment`, reckoned in `tz`.
    ///
    /// Weeks run Sunday 00:00:00 through Saturday 23:59:59.999 local time,
    /// converted to UTC bounds. A week spanning a DST transition is shorter
    /// or longer than 168 hours in UTC accordingly. Near the edges of the
    /// representable time range the bounds clamp instead of overflowing.
    #[must_use]
    pub fn week_of(moment: DateTime<Utc>, tz: Tz) -> Self {
        let local_date = moment.with_timezone(&tz).date_naive();
        let days_from_sunday = u64::from(local_date.weekday().num_days_from_sunday());
        let week_start = local_date
            .checked_sub_days(Days::new(days_from_sunday))
            .unwrap_or(local_date);

        let start_local = week_start.and_time(NaiveTime::MIN);
        let week_span = TimeDelta::days(7) - TimeDelta::milliseconds(1);
        let end = start_local
            .checked_add_signed(week_span)
            .map_or(DateTime::<Utc>::MAX_UTC, |end_local| tz::local_to_utc(end_local, tz));

        Self {
            start: tz::local_to_utc(start_local, tz),
            end,
        }
    }

    /// Whether an instant lies within the window, bounds included.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// ## Summary
/// Retains the occurrences whose start lies inside the window.
///
/// Order is preserved and nothing is mutated, so applying the same window
/// twice returns the same sequence.
#[must_use]
pub fn filter_occurrences(occurrences: &[Occurrence], window: &VisibleWindow) -> Vec<Occurrence> {
    occurrences
        .iter()
        .filter(|occurrence| window.contains(occurrence.start))
        .cloned()
        .collect()
}
