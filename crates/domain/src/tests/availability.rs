// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AvailabilitySnapshot, DEFAULT_WINDOW_DAYS, DateSlot, TimeSlot, generate_date_slots,
    generate_time_slots, is_weekend, operating_times,
};
use std::collections::BTreeSet;
use time::macros::{date, time};

#[test]
fn test_date_slots_cover_window_starting_tomorrow() {
    let slots: Vec<DateSlot> =
        generate_date_slots(date!(2026 - 10 - 19), DEFAULT_WINDOW_DAYS, &BTreeSet::new());

    assert_eq!(slots.len(), 14);
    assert_eq!(slots[0].date, date!(2026 - 10 - 20));
    assert_eq!(slots[0].offset, 1);
    assert_eq!(slots[13].date, date!(2026 - 11 - 02));
    assert_eq!(slots[13].offset, 14);
    assert!(slots.iter().all(|slot| !slot.unavailable));
}

#[test]
fn test_date_slots_mark_blackout_offsets() {
    let blackout: BTreeSet<u16> = BTreeSet::from([3, 9]);
    let slots: Vec<DateSlot> = generate_date_slots(date!(2026 - 10 - 19), 14, &blackout);

    let unavailable: Vec<u16> = slots
        .iter()
        .filter(|slot| slot.unavailable)
        .map(|slot| slot.offset)
        .collect();
    assert_eq!(unavailable, vec![3, 9]);
    assert_eq!(slots[2].date, date!(2026 - 10 - 22));
}

#[test]
fn test_date_slots_flag_weekends_without_blocking() {
    let slots: Vec<DateSlot> = generate_date_slots(date!(2026 - 10 - 19), 7, &BTreeSet::new());

    // 2026-10-24 and 2026-10-25 are a Saturday and Sunday.
    let weekend: Vec<u16> = slots
        .iter()
        .filter(|slot| slot.weekend)
        .map(|slot| slot.offset)
        .collect();
    assert_eq!(weekend, vec![5, 6]);
    assert!(slots.iter().all(|slot| !slot.unavailable));
}

#[test]
fn test_date_slot_labels() {
    let slots: Vec<DateSlot> = generate_date_slots(date!(2026 - 10 - 19), 1, &BTreeSet::new());
    assert_eq!(slots[0].label, "Tue, Oct 20");
}

#[test]
fn test_date_slots_are_deterministic() {
    let blackout: BTreeSet<u16> = BTreeSet::from([2]);
    let first: Vec<DateSlot> = generate_date_slots(date!(2026 - 12 - 25), 14, &blackout);
    let second: Vec<DateSlot> = generate_date_slots(date!(2026 - 12 - 25), 14, &blackout);
    assert_eq!(first, second);
    assert_eq!(first[13].date, date!(2027 - 01 - 08));
}

#[test]
fn test_zero_window_produces_no_dates() {
    let slots: Vec<DateSlot> = generate_date_slots(date!(2026 - 10 - 19), 0, &BTreeSet::new());
    assert!(slots.is_empty());
}

#[test]
fn test_operating_times_are_half_hourly_from_eight_to_six() {
    let times = operating_times();

    assert_eq!(times.len(), 21);
    assert_eq!(times[0], time!(8:00));
    assert_eq!(times[1], time!(8:30));
    assert_eq!(times[19], time!(17:30));
    assert_eq!(times[20], time!(18:00));
    assert!(times.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_time_slots_mark_booked_and_popular() {
    let booked = BTreeSet::from([time!(9:30), time!(13:00)]);
    let popular = BTreeSet::from([time!(10:00)]);
    let slots: Vec<TimeSlot> = generate_time_slots(&booked, &popular);

    assert_eq!(slots.len(), 21);
    let booked_labels: Vec<&str> = slots
        .iter()
        .filter(|slot| slot.booked)
        .map(|slot| slot.label.as_str())
        .collect();
    assert_eq!(booked_labels, vec!["9:30 AM", "1:00 PM"]);
    let popular_slot: &TimeSlot = slots.iter().find(|slot| slot.popular).unwrap();
    assert_eq!(popular_slot.time, time!(10:00));
    assert!(!popular_slot.booked);
}

#[test]
fn test_time_slots_ignore_times_outside_catalog() {
    let booked = BTreeSet::from([time!(7:00), time!(8:15)]);
    let slots: Vec<TimeSlot> = generate_time_slots(&booked, &BTreeSet::new());
    assert!(slots.iter().all(|slot| !slot.booked));
}

#[test]
fn test_is_weekend() {
    assert!(is_weekend(date!(2026 - 10 - 24)));
    assert!(is_weekend(date!(2026 - 10 - 25)));
    assert!(!is_weekend(date!(2026 - 10 - 26)));
}

#[test]
fn test_snapshot_lookup() {
    let snapshot: AvailabilitySnapshot = AvailabilitySnapshot::new(
        generate_date_slots(date!(2026 - 10 - 19), 14, &BTreeSet::from([1])),
        generate_time_slots(&BTreeSet::new(), &BTreeSet::new()),
    );

    assert!(snapshot.date_slot(date!(2026 - 10 - 20)).unwrap().unavailable);
    assert!(snapshot.date_slot(date!(2026 - 10 - 19)).is_none());
    assert!(snapshot.time_slot(time!(12:30)).is_some());
    assert!(snapshot.time_slot(time!(12:15)).is_none());
}
