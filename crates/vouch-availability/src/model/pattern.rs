//! Recurrence patterns for availability slots.
//!
//! A pattern is a tagged union keyed on frequency, so each variant carries
//! only the fields that frequency interprets. Weekday indices follow the
//! calendar convention 0 = Sunday .. 6 = Saturday.

use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PatternError;

/// Day of week, indexed 0 = Sunday through 6 = Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All weekdays in index order.
    pub const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Returns the 0 = Sunday .. 6 = Saturday index.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Sunday => 0,
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
        }
    }

    /// ## Summary
    /// Parses a raw weekday index as carried on the wire.
    ///
    /// ## Errors
    /// Returns `PatternError::InvalidWeekday` for values outside `0..=6`.
    pub const fn from_index(index: i64) -> Result<Self, PatternError> {
        match index {
            0 => Ok(Self::Sunday),
            1 => Ok(Self::Monday),
            2 => Ok(Self::Tuesday),
            3 => Ok(Self::Wednesday),
            4 => Ok(Self::Thursday),
            5 => Ok(Self::Friday),
            6 => Ok(Self::Saturday),
            _ => Err(PatternError::InvalidWeekday(index)),
        }
    }

    /// Returns the RFC 5545 BYDAY code for this weekday.
    #[must_use]
    pub const fn byday_code(self) -> &'static str {
        match self {
            Self::Sunday => "SU",
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
        }
    }

    /// Returns the lowercase English name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "sunday",
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day.num_days_from_sunday() {
            0 => Self::Sunday,
            1 => Self::Monday,
            2 => Self::Tuesday,
            3 => Self::Wednesday,
            4 => Self::Thursday,
            5 => Self::Friday,
            _ => Self::Saturday,
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of weekdays, stored as a bitmask over the 0..=6 indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Monday through Friday.
    #[must_use]
    pub const fn weekdays() -> Self {
        Self(0b011_1110)
    }

    /// Builds a set from weekdays, collapsing duplicates.
    #[must_use]
    pub fn new(days: impl IntoIterator<Item = Weekday>) -> Self {
        let mut set = Self::empty();
        for day in days {
            set.insert(day);
        }
        set
    }

    /// ## Summary
    /// Builds a set from raw wire indices, collapsing duplicates.
    ///
    /// An empty input yields the empty set; whether that is acceptable is
    /// decided by the pattern constructor, not here.
    ///
    /// ## Errors
    /// Returns `PatternError::InvalidWeekday` for indices outside `0..=6`.
    pub fn from_indices(indices: impl IntoIterator<Item = i64>) -> Result<Self, PatternError> {
        let mut set = Self::empty();
        for index in indices {
            set.insert(Weekday::from_index(index)?);
        }
        Ok(set)
    }

    /// Adds a weekday to the set.
    pub const fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.index();
    }

    /// Returns whether the set contains the given weekday.
    #[must_use]
    pub const fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day.index()) != 0
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of weekdays in the set.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterates the weekdays in ascending index order (Sunday first).
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        Weekday::ALL.into_iter().filter(move |day| self.contains(*day))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Recurrence frequency tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Returns the RFC 5545 FREQ code.
    #[must_use]
    pub const fn ical_code(self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a slot repeats.
///
/// Each variant carries exactly the fields its frequency needs, which makes
/// an unhandled frequency a compile error rather than a silent runtime gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrencePattern {
    /// Every `interval` days.
    Daily { interval: NonZeroU32 },
    /// The selected weekdays, every `interval` weeks.
    Weekly {
        interval: NonZeroU32,
        weekdays: WeekdaySet,
    },
    /// The same day of month, every `interval` months. Months lacking that
    /// day (e.g. day 31 in April) produce no occurrence.
    Monthly { interval: NonZeroU32, day_of_month: u8 },
}

impl RecurrencePattern {
    /// ## Summary
    /// Builds a daily pattern.
    ///
    /// ## Errors
    /// Returns `PatternError::NonPositiveInterval` when `interval` is zero.
    pub fn daily(interval: u32) -> Result<Self, PatternError> {
        Ok(Self::Daily {
            interval: checked_interval(interval)?,
        })
    }

    /// ## Summary
    /// Builds a weekly pattern over the given weekday set.
    ///
    /// ## Errors
    /// Returns `PatternError::NonPositiveInterval` when `interval` is zero,
    /// or `PatternError::EmptyWeekdaySet` when no weekday is selected.
    pub fn weekly(interval: u32, weekdays: WeekdaySet) -> Result<Self, PatternError> {
        if weekdays.is_empty() {
            return Err(PatternError::EmptyWeekdaySet);
        }
        Ok(Self::Weekly {
            interval: checked_interval(interval)?,
            weekdays,
        })
    }

    /// ## Summary
    /// Builds a monthly pattern anchored on a day of month.
    ///
    /// ## Errors
    /// Returns `PatternError::NonPositiveInterval` when `interval` is zero,
    /// or `PatternError::DayOfMonthOutOfRange` when the day is outside `1..=31`.
    pub fn monthly(interval: u32, day_of_month: u8) -> Result<Self, PatternError> {
        if !(1..=31).contains(&day_of_month) {
            return Err(PatternError::DayOfMonthOutOfRange(i64::from(day_of_month)));
        }
        Ok(Self::Monthly {
            interval: checked_interval(interval)?,
            day_of_month,
        })
    }

    /// Returns the frequency tag of this pattern.
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        match self {
            Self::Daily { .. } => Frequency::Daily,
            Self::Weekly { .. } => Frequency::Weekly,
            Self::Monthly { .. } => Frequency::Monthly,
        }
    }

    /// Returns the repetition interval.
    #[must_use]
    pub const fn interval(&self) -> NonZeroU32 {
        match self {
            Self::Daily { interval }
            | Self::Weekly { interval, .. }
            | Self::Monthly { interval, .. } => *interval,
        }
    }

    /// ## Summary
    /// Re-checks the invariants the constructors enforce.
    ///
    /// Useful for values built as struct literals rather than through the
    /// fallible constructors.
    ///
    /// ## Errors
    /// Returns the same errors as the corresponding constructor.
    pub fn validate(&self) -> Result<(), PatternError> {
        match self {
            Self::Daily { .. } => Ok(()),
            Self::Weekly { weekdays, .. } => {
                if weekdays.is_empty() {
                    Err(PatternError::EmptyWeekdaySet)
                } else {
                    Ok(())
                }
            }
            Self::Monthly { day_of_month, .. } => {
                if (1..=31).contains(day_of_month) {
                    Ok(())
                } else {
                    Err(PatternError::DayOfMonthOutOfRange(i64::from(*day_of_month)))
                }
            }
        }
    }
}

fn checked_interval(interval: u32) -> Result<NonZeroU32, PatternError> {
    NonZeroU32::new(interval).ok_or(PatternError::NonPositiveInterval(i64::from(interval)))
}

/// A pattern together with its optional expiry.
///
/// The end date applies to every frequency; without one, expansion is bounded
/// by the policy horizon instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recurrence {
    pub pattern: RecurrencePattern,
    /// No occurrence starts after this instant.
    pub end_date: Option<DateTime<Utc>>,
}

impl Recurrence {
    /// Creates an open-ended recurrence.
    #[must_use]
    pub const fn new(pattern: RecurrencePattern) -> Self {
        Self {
            pattern,
            end_date: None,
        }
    }

    /// Sets the end date.
    #[must_use]
    pub const fn with_end_date(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_index_round_trip() {
        for day in Weekday::ALL {
            let parsed = Weekday::from_index(i64::from(day.index())).expect("valid index");
            assert_eq!(parsed, day);
        }
    }

    #[test]
    fn weekday_rejects_out_of_range_index() {
        assert_eq!(Weekday::from_index(7), Err(PatternError::InvalidWeekday(7)));
        assert_eq!(
            Weekday::from_index(-1),
            Err(PatternError::InvalidWeekday(-1))
        );
    }

    #[test]
    fn weekday_from_chrono_agrees_on_indices() {
        assert_eq!(Weekday::from(chrono::Weekday::Sun), Weekday::Sunday);
        assert_eq!(Weekday::from(chrono::Weekday::Mon), Weekday::Monday);
        assert_eq!(Weekday::from(chrono::Weekday::Sat), Weekday::Saturday);
    }

    #[test]
    fn weekday_set_insert_and_contains() {
        let mut set = WeekdaySet::empty();
        assert!(set.is_empty());

        set.insert(Weekday::Tuesday);
        set.insert(Weekday::Tuesday);
        assert!(set.contains(Weekday::Tuesday));
        assert!(!set.contains(Weekday::Monday));
        assert_eq!(set.count(), 1);
    }

    #[test]
    fn weekday_set_iterates_in_index_order() {
        let set = WeekdaySet::new([Weekday::Friday, Weekday::Sunday, Weekday::Tuesday]);
        let days: Vec<Weekday> = set.iter().collect();
        assert_eq!(days, vec![Weekday::Sunday, Weekday::Tuesday, Weekday::Friday]);
    }

    #[test]
    fn weekday_set_from_indices_rejects_invalid() {
        assert_eq!(
            WeekdaySet::from_indices([1, 9]),
            Err(PatternError::InvalidWeekday(9))
        );
    }

    #[test]
    fn weekday_set_weekdays_preset() {
        let set = WeekdaySet::weekdays();
        assert_eq!(set.count(), 5);
        assert!(!set.contains(Weekday::Sunday));
        assert!(set.contains(Weekday::Monday));
        assert!(set.contains(Weekday::Friday));
        assert!(!set.contains(Weekday::Saturday));
    }

    #[test]
    fn daily_rejects_zero_interval() {
        assert_eq!(
            RecurrencePattern::daily(0),
            Err(PatternError::NonPositiveInterval(0))
        );
    }

    #[test]
    fn weekly_rejects_empty_set() {
        assert_eq!(
            RecurrencePattern::weekly(1, WeekdaySet::empty()),
            Err(PatternError::EmptyWeekdaySet)
        );
    }

    #[test]
    fn monthly_rejects_day_out_of_range() {
        assert_eq!(
            RecurrencePattern::monthly(1, 0),
            Err(PatternError::DayOfMonthOutOfRange(0))
        );
        assert_eq!(
            RecurrencePattern::monthly(1, 32),
            Err(PatternError::DayOfMonthOutOfRange(32))
        );
    }

    #[test]
    fn constructors_accept_valid_input() {
        let daily = RecurrencePattern::daily(2).expect("valid daily");
        assert_eq!(daily.frequency(), Frequency::Daily);
        assert_eq!(daily.interval().get(), 2);

        let weekly =
            RecurrencePattern::weekly(1, WeekdaySet::weekdays()).expect("valid weekly");
        assert_eq!(weekly.frequency(), Frequency::Weekly);

        let monthly = RecurrencePattern::monthly(3, 15).expect("valid monthly");
        assert_eq!(monthly.frequency(), Frequency::Monthly);
    }

    #[test]
    fn validate_mirrors_constructor_checks() {
        let literal = RecurrencePattern::Weekly {
            interval: NonZeroU32::MIN,
            weekdays: WeekdaySet::empty(),
        };
        assert_eq!(literal.validate(), Err(PatternError::EmptyWeekdaySet));

        let valid = RecurrencePattern::Daily {
            interval: NonZeroU32::MIN,
        };
        assert_eq!(valid.validate(), Ok(()));
    }

    #[test]
    fn frequency_codes() {
        assert_eq!(Frequency::Daily.as_str(), "daily");
        assert_eq!(Frequency::Weekly.ical_code(), "WEEKLY");
        assert_eq!(Weekday::Monday.byday_code(), "MO");
        assert_eq!(Weekday::Sunday.byday_code(), "SU");
    }
}
