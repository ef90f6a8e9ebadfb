// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Addon, AddonId, BookingDraft, DateSlot, Provider, ProviderId, Rating, Service, ServiceId,
    TimeSlot,
};
use time::macros::{date, time};

pub fn create_test_service() -> Service {
    Service {
        id: ServiceId::new("deep-cleaning"),
        name: String::from("Deep Cleaning"),
        category: String::from("cleaning"),
        description: String::from("Full home deep clean"),
        price: 1200,
        duration_minutes: 180,
        icon: String::from("sparkles"),
    }
}

pub fn create_test_addon(id: &str, price: u32) -> Addon {
    Addon {
        id: AddonId::new(id),
        name: format!("Addon {id}"),
        description: String::from("Extra work"),
        price,
        duration_delta_minutes: 30,
    }
}

pub fn create_test_provider(id: &str, available: bool) -> Provider {
    Provider {
        id: ProviderId::new(id),
        name: format!("Provider {id}"),
        rating: Rating::from_tenths(48).unwrap(),
        review_count: 120,
        specialties: vec![String::from("Kitchens"), String::from("Bathrooms")],
        available,
    }
}

pub fn create_test_date_slot(unavailable: bool) -> DateSlot {
    DateSlot {
        date: date!(2026 - 10 - 20),
        offset: 1,
        label: String::from("Tue, Oct 20"),
        unavailable,
        weekend: false,
    }
}

pub fn create_test_time_slot(booked: bool) -> TimeSlot {
    TimeSlot {
        time: time!(10:00),
        label: String::from("10:00 AM"),
        booked,
        popular: true,
    }
}

/// A draft that passes every gate up to confirmation.
pub fn create_complete_draft() -> BookingDraft {
    let mut draft: BookingDraft = BookingDraft::new(create_test_service());
    assert!(draft.select_date(create_test_date_slot(false)));
    assert!(draft.select_time(create_test_time_slot(false)));
    assert!(draft.select_provider(create_test_provider("p1", true)));
    draft.set_address(String::from("12 MG Road, Bengaluru"));
    draft.set_phone(String::from("9876543210"));
    draft
}
