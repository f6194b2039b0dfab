use chrono::{DateTime, FixedOffset, Utc};

use vouch_availability::expand::expand_at;
use vouch_availability::model::AvailabilitySlot;
use vouch_availability::wire::SlotRecord;
use vouch_core::types::ExpansionPolicy;

pub struct ExpansionCase {
    pub name: &'static str,
    /// Slot as the API layer would deliver it.
    pub slot: &'static str,
    /// Instant the default horizon is measured from.
    pub now: &'static str,
    pub expected_starts: Option<&'static [&'static str]>,
    pub expected_ids: Option<&'static [&'static str]>,
    pub expected_len: Option<usize>,
}

#[expect(clippy::too_many_lines)]
pub fn expansion_cases() -> Vec<ExpansionCase> {
    vec![
        ExpansionCase {
            name: "non_recurring_passthrough",
            slot: r#"{"id": "one-off", "start": "2026-02-03T15:00:00Z", "end": "2026-02-03T16:00:00Z", "type": "busy", "isRecurring": false, "timezone": "UTC"}"#,
            now: "2026-02-01T00:00:00Z",
            expected_starts: Some(&["2026-02-03T15:00:00+00:00"]),
            expected_ids: Some(&["one-off"]),
            expected_len: Some(1),
        },
        ExpansionCase {
            name: "daily_every_other_day_until",
            slot: r#"{"id": "gym", "start": "2026-01-01T10:00:00Z", "end": "2026-01-01T10:30:00Z", "type": "available", "isRecurring": true, "recurringPattern": {"frequency": "daily", "interval": 2, "endDate": "2026-01-10T00:00:00Z"}, "timezone": "UTC"}"#,
            now: "2026-01-01T10:00:00Z",
            expected_starts: Some(&[
                "2026-01-01T10:00:00+00:00",
                "2026-01-03T10:00:00+00:00",
                "2026-01-05T10:00:00+00:00",
                "2026-01-07T10:00:00+00:00",
                "2026-01-09T10:00:00+00:00",
            ]),
            expected_ids: Some(&["gym-0", "gym-1", "gym-2", "gym-3", "gym-4"]),
            expected_len: Some(5),
        },
        ExpansionCase {
            name: "weekday_grid_over_default_horizon",
            // Mondays through Fridays, 09:00-17:00 New York, open-ended.
            // Four full weeks fit the horizon plus Mon-Wed of the fifth.
            slot: r#"{"id": "office-hours", "start": "2026-03-02T14:00:00Z", "end": "2026-03-02T22:00:00Z", "type": "available", "isRecurring": true, "recurringPattern": {"frequency": "weekly", "daysOfWeek": [1, 2, 3, 4, 5]}, "timezone": "America/New_York"}"#,
            now: "2026-03-02T14:00:00Z",
            expected_starts: Some(&[
                "2026-03-02T09:00:00-05:00",
                "2026-03-03T09:00:00-05:00",
                "2026-03-04T09:00:00-05:00",
                "2026-03-05T09:00:00-05:00",
                "2026-03-06T09:00:00-05:00",
                "2026-03-09T09:00:00-04:00",
                "2026-03-10T09:00:00-04:00",
                "2026-03-11T09:00:00-04:00",
                "2026-03-12T09:00:00-04:00",
                "2026-03-13T09:00:00-04:00",
                "2026-03-16T09:00:00-04:00",
                "2026-03-17T09:00:00-04:00",
                "2026-03-18T09:00:00-04:00",
                "2026-03-19T09:00:00-04:00",
                "2026-03-20T09:00:00-04:00",
                "2026-03-23T09:00:00-04:00",
                "2026-03-24T09:00:00-04:00",
                "2026-03-25T09:00:00-04:00",
                "2026-03-26T09:00:00-04:00",
                "2026-03-27T09:00:00-04:00",
                "2026-03-30T09:00:00-04:00",
                "2026-03-31T09:00:00-04:00",
                "2026-04-01T09:00:00-04:00",
            ]),
            expected_ids: None,
            expected_len: Some(23),
        },
        ExpansionCase {
            name: "weekly_generation_order_not_chronological",
            // Anchor is a Wednesday; Monday (offset 5) is generated before
            // Friday (offset 2) within each iteration.
            slot: r#"{"id": "split", "start": "2026-03-04T10:00:00Z", "end": "2026-03-04T11:00:00Z", "type": "available", "isRecurring": true, "recurringPattern": {"frequency": "weekly", "daysOfWeek": [1, 5], "endDate": "2026-03-18T23:59:00Z"}, "timezone": "UTC"}"#,
            now: "2026-03-04T10:00:00Z",
            expected_starts: Some(&[
                "2026-03-09T10:00:00+00:00",
                "2026-03-06T10:00:00+00:00",
                "2026-03-16T10:00:00+00:00",
                "2026-03-13T10:00:00+00:00",
            ]),
            expected_ids: Some(&["split-0-1", "split-0-5", "split-1-1", "split-1-5"]),
            expected_len: Some(4),
        },
        ExpansionCase {
            name: "biweekly_single_day",
            slot: r#"{"id": "payday", "start": "2026-01-05T10:00:00Z", "end": "2026-01-05T10:15:00Z", "type": "busy", "isRecurring": true, "recurringPattern": {"frequency": "weekly", "daysOfWeek": [1], "interval": 2, "endDate": "2026-02-16T23:59:59Z"}, "timezone": "UTC"}"#,
            now: "2026-01-05T10:00:00Z",
            expected_starts: Some(&[
                "2026-01-05T10:00:00+00:00",
                "2026-01-19T10:00:00+00:00",
                "2026-02-02T10:00:00+00:00",
                "2026-02-16T10:00:00+00:00",
            ]),
            expected_ids: Some(&["payday-0-1", "payday-1-1", "payday-2-1", "payday-3-1"]),
            expected_len: Some(4),
        },
        ExpansionCase {
            name: "monthly_31st_skips_short_months",
            slot: r#"{"id": "rent", "start": "2026-01-31T09:00:00Z", "end": "2026-01-31T09:30:00Z", "type": "busy", "isRecurring": true, "recurringPattern": {"frequency": "monthly", "endDate": "2026-07-01T00:00:00Z"}, "timezone": "UTC"}"#,
            now: "2026-01-31T09:00:00Z",
            expected_starts: Some(&[
                "2026-01-31T09:00:00+00:00",
                "2026-03-31T09:00:00+00:00",
                "2026-05-31T09:00:00+00:00",
            ]),
            expected_ids: Some(&["rent-0", "rent-2", "rent-4"]),
            expected_len: Some(3),
        },
        ExpansionCase {
            name: "dst_spring_forward_new_york",
            slot: r#"{"id": "standup", "start": "2026-03-06T14:00:00Z", "end": "2026-03-06T15:00:00Z", "type": "available", "isRecurring": true, "recurringPattern": {"frequency": "daily", "endDate": "2026-03-10T23:59:00Z"}, "timezone": "America/New_York"}"#,
            now: "2026-03-06T14:00:00Z",
            expected_starts: Some(&[
                "2026-03-06T09:00:00-05:00",
                "2026-03-07T09:00:00-05:00",
                "2026-03-08T09:00:00-04:00",
                "2026-03-09T09:00:00-04:00",
                "2026-03-10T09:00:00-04:00",
            ]),
            expected_ids: None,
            expected_len: Some(5),
        },
        ExpansionCase {
            name: "dst_fall_back_new_york",
            slot: r#"{"id": "brunch", "start": "2026-10-25T13:00:00Z", "end": "2026-10-25T15:00:00Z", "type": "available", "isRecurring": true, "recurringPattern": {"frequency": "weekly", "daysOfWeek": [0], "endDate": "2026-11-08T23:59:59Z"}, "timezone": "America/New_York"}"#,
            now: "2026-10-25T13:00:00Z",
            expected_starts: Some(&[
                "2026-10-25T09:00:00-04:00",
                "2026-11-01T09:00:00-05:00",
                "2026-11-08T09:00:00-05:00",
            ]),
            expected_ids: Some(&["brunch-0-0", "brunch-1-0", "brunch-2-0"]),
            expected_len: Some(3),
        },
        ExpansionCase {
            name: "open_ended_daily_stops_at_horizon",
            slot: r#"{"id": "daily", "start": "2026-01-01T08:00:00Z", "end": "2026-01-01T09:00:00Z", "type": "available", "isRecurring": true, "recurringPattern": {"frequency": "daily"}, "timezone": "UTC"}"#,
            now: "2026-01-01T08:00:00Z",
            expected_starts: None,
            expected_ids: None,
            expected_len: Some(31),
        },
        ExpansionCase {
            name: "far_future_until_stops_at_cap",
            slot: r#"{"id": "forever", "start": "2026-01-01T08:00:00Z", "end": "2026-01-01T09:00:00Z", "type": "available", "isRecurring": true, "recurringPattern": {"frequency": "daily", "endDate": "2030-01-01T00:00:00Z"}, "timezone": "UTC"}"#,
            now: "2026-01-01T08:00:00Z",
            expected_starts: None,
            expected_ids: None,
            expected_len: Some(100),
        },
        ExpansionCase {
            name: "every_day_weekly_stops_at_cap",
            // Seven emissions per week, so the cap cuts partway through an
            // iteration rather than on a week boundary.
            slot: r#"{"id": "always", "start": "2026-01-04T10:00:00Z", "end": "2026-01-04T11:00:00Z", "type": "available", "isRecurring": true, "recurringPattern": {"frequency": "weekly", "daysOfWeek": [0, 1, 2, 3, 4, 5, 6], "endDate": "2030-01-01T00:00:00Z"}, "timezone": "UTC"}"#,
            now: "2026-01-04T10:00:00Z",
            expected_starts: None,
            expected_ids: None,
            expected_len: Some(100),
        },
    ]
}

pub fn decode_slot(case: &ExpansionCase) -> AvailabilitySlot {
    let record: SlotRecord = serde_json::from_str(case.slot)
        .unwrap_or_else(|err| panic!("failed to decode case {}: {err}", case.name));
    AvailabilitySlot::try_from(record)
        .unwrap_or_else(|err| panic!("failed to validate case {}: {err}", case.name))
}

pub fn assert_case(case: &ExpansionCase) {
    let slot = decode_slot(case);
    let now = parse_rfc3339(case.now).with_timezone(&Utc);
    let occurrences = expand_at(&slot, ExpansionPolicy::default(), now);

    if let Some(expected) = case.expected_starts {
        let actual: Vec<i64> = occurrences
            .iter()
            .map(|occurrence| occurrence.start.timestamp())
            .collect();
        let expected_timestamps: Vec<i64> = expected
            .iter()
            .map(|value| parse_rfc3339(value).timestamp())
            .collect();
        assert_eq!(
            actual, expected_timestamps,
            "case {} starts did not match",
            case.name
        );
    }

    if let Some(expected_ids) = case.expected_ids {
        let actual: Vec<&str> = occurrences
            .iter()
            .map(|occurrence| occurrence.id.as_str())
            .collect();
        assert_eq!(actual, expected_ids, "case {} ids did not match", case.name);
    }

    if let Some(expected_len) = case.expected_len {
        assert_eq!(
            occurrences.len(),
            expected_len,
            "case {} expected {} occurrences",
            case.name,
            expected_len
        );
    }
}

pub fn parse_rfc3339(value: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(value)
        .unwrap_or_else(|err| panic!("failed to parse rfc3339 value {value}: {err}"))
}
