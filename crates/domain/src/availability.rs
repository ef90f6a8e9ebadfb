// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Date and time slot generation.
//!
//! Slots are derived from a reference date and a handful of sets
//! describing existing reservations. Generation is pure and deterministic:
//! the same inputs always produce the same ordered slots.
//!
//! ## Invariants
//!
//! - Date slots cover offsets `1..=window_days` from today; today itself is never offered
//! - Weekend dates are flagged but remain selectable
//! - Time slots cover 08:00 through 18:00 inclusive in 30 minute steps (21 entries)

use std::collections::BTreeSet;
use time::{Date, Duration, Time, Weekday};

/// Number of calendar days offered after today.
pub const DEFAULT_WINDOW_DAYS: u16 = 14;

/// First bookable hour of the day.
pub const OPENING_HOUR: u8 = 8;

/// Last bookable hour of the day. Only the top of the hour is offered.
pub const CLOSING_HOUR: u8 = 18;

/// Spacing between consecutive time slots.
pub const SLOT_INTERVAL_MINUTES: u8 = 30;

/// A bookable calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSlot {
    /// The calendar date.
    pub date: Date,
    /// Days after today (1-based).
    pub offset: u16,
    /// Display label (e.g. "Mon, Oct 20").
    pub label: String,
    /// Operational blackout; the date cannot be selected.
    pub unavailable: bool,
    /// Saturday or Sunday. Informational only.
    pub weekend: bool,
}

/// A bookable time of day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    /// The time of day.
    pub time: Time,
    /// Display label (e.g. "8:00 AM").
    pub label: String,
    /// An existing reservation occupies this time; it cannot be selected.
    pub booked: bool,
    /// Frequently chosen time. Informational only.
    pub popular: bool,
}

/// The slot pools captured when a booking session starts.
///
/// Availability is a snapshot: it is not refreshed while the session runs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AvailabilitySnapshot {
    /// Date slots in calendar order.
    pub date_slots: Vec<DateSlot>,
    /// Time slots in time-of-day order.
    pub time_slots: Vec<TimeSlot>,
}

impl AvailabilitySnapshot {
    /// Creates a snapshot from already generated slots.
    #[must_use]
    pub const fn new(date_slots: Vec<DateSlot>, time_slots: Vec<TimeSlot>) -> Self {
        Self {
            date_slots,
            time_slots,
        }
    }

    /// Finds the slot for a calendar date.
    #[must_use]
    pub fn date_slot(&self, date: Date) -> Option<&DateSlot> {
        self.date_slots.iter().find(|slot| slot.date == date)
    }

    /// Finds the slot for a time of day.
    #[must_use]
    pub fn time_slot(&self, time: Time) -> Option<&TimeSlot> {
        self.time_slots.iter().find(|slot| slot.time == time)
    }
}

/// Generates the forward window of date slots.
///
/// # Arguments
///
/// * `today` - The reference date; the first slot is the following day
/// * `window_days` - How many days to generate
/// * `blackout_offsets` - Offsets (days after today) that are unavailable
///
/// # Returns
///
/// One `DateSlot` per day in ascending order. Dates that would overflow the
/// representable calendar range are not produced.
#[must_use]
pub fn generate_date_slots(
    today: Date,
    window_days: u16,
    blackout_offsets: &BTreeSet<u16>,
) -> Vec<DateSlot> {
    (1..=window_days)
        .filter_map(|offset| {
            let date: Date = today.checked_add(Duration::days(i64::from(offset)))?;
            Some(DateSlot {
                date,
                offset,
                label: date_label(date),
                unavailable: blackout_offsets.contains(&offset),
                weekend: is_weekend(date),
            })
        })
        .collect()
}

/// Generates the operating-hours time slots.
///
/// # Arguments
///
/// * `booked_times` - Times already taken by existing reservations
/// * `popular_times` - Times to flag as popular
#[must_use]
pub fn generate_time_slots(
    booked_times: &BTreeSet<Time>,
    popular_times: &BTreeSet<Time>,
) -> Vec<TimeSlot> {
    operating_times()
        .into_iter()
        .map(|time| TimeSlot {
            time,
            label: time_label(time),
            booked: booked_times.contains(&time),
            popular: popular_times.contains(&time),
        })
        .collect()
}

/// Returns the fixed catalog of bookable times of day.
#[must_use]
pub fn operating_times() -> Vec<Time> {
    (OPENING_HOUR..=CLOSING_HOUR)
        .flat_map(|hour| {
            (0..60)
                .step_by(usize::from(SLOT_INTERVAL_MINUTES))
                .map(move |minute| (hour, minute))
        })
        .filter(|&(hour, minute)| hour < CLOSING_HOUR || minute == 0)
        .filter_map(|(hour, minute)| Time::from_hms(hour, minute, 0).ok())
        .collect()
}

/// Returns whether the date falls on a Saturday or Sunday.
#[must_use]
pub fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}

fn date_label(date: Date) -> String {
    date.format(time::macros::format_description!(
        "[weekday repr:short], [month repr:short] [day padding:none]"
    ))
    .unwrap_or_else(|_| date.to_string())
}

fn time_label(time: Time) -> String {
    time.format(time::macros::format_description!(
        "[hour repr:12 padding:none]:[minute] [period]"
    ))
    .unwrap_or_else(|_| time.to_string())
}
