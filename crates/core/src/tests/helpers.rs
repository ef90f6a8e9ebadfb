// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{BookingSession, Command, SessionCatalog, TransitionResult, apply};
use homebook_audit::{Actor, ActorKind, Cause};
use homebook_domain::{
    Addon, AddonId, AvailabilitySnapshot, BookingConfirmation, Provider, ProviderId, Rating,
    Service, ServiceId, SessionId, ValidatedBooking, generate_date_slots, generate_time_slots,
};
use std::collections::BTreeSet;
use time::macros::{date, datetime, time};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("customer-123"), ActorKind::Customer)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Wizard input"))
}

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

fn create_test_addon(id: &str, price: u32) -> Addon {
    Addon {
        id: AddonId::new(id),
        name: format!("Addon {id}"),
        description: String::new(),
        price,
        duration_delta_minutes: 30,
    }
}

fn create_test_provider(id: &str, available: bool) -> Provider {
    Provider {
        id: ProviderId::new(id),
        name: format!("Provider {id}"),
        rating: Rating::from_tenths(47).unwrap(),
        review_count: 80,
        specialties: vec![String::from("Deep cleaning")],
        available,
    }
}

/// Catalog opened on 2026-10-19 with offset 3 (2026-10-22) blacked out and
/// 09:30 already booked.
pub fn create_test_catalog() -> SessionCatalog {
    SessionCatalog::new(
        create_test_service(),
        vec![
            create_test_addon("balcony", 450),
            create_test_addon("fridge", 300),
        ],
        vec![
            create_test_provider("p1", true),
            create_test_provider("p2", false),
        ],
        AvailabilitySnapshot::new(
            generate_date_slots(date!(2026 - 10 - 19), 14, &BTreeSet::from([3])),
            generate_time_slots(&BTreeSet::from([time!(9:30)]), &BTreeSet::new()),
        ),
    )
}

pub fn create_test_session() -> BookingSession {
    BookingSession::new(SessionId::new(1), create_test_catalog())
}

pub fn run(state: &BookingSession, command: Command) -> TransitionResult {
    apply(state, command, create_test_actor(), create_test_cause()).unwrap()
}

pub fn run_all(state: &BookingSession, commands: Vec<Command>) -> BookingSession {
    commands
        .into_iter()
        .fold(state.clone(), |current, command| run(&current, command).new_state)
}

/// A session that has passed steps 1 to 3 and sits at the confirmation step.
pub fn create_session_at_confirmation() -> BookingSession {
    run_all(
        &create_test_session(),
        vec![
            Command::SelectDate {
                date: date!(2026 - 10 - 20),
            },
            Command::SelectTime { time: time!(10:00) },
            Command::Advance,
            Command::SelectProvider {
                provider_id: ProviderId::new("p1"),
            },
            Command::Advance,
            Command::SetAddress {
                address: String::from("12 MG Road, Bengaluru"),
            },
            Command::SetPhone {
                phone: String::from("+91 98765 43210"),
            },
            Command::Advance,
        ],
    )
}

pub fn create_test_confirmation(state: &BookingSession) -> BookingConfirmation {
    BookingConfirmation::new(
        String::from("HB-000001"),
        state.session_id(),
        ValidatedBooking::from_draft(state.draft()).unwrap(),
        datetime!(2026 - 10 - 19 12:00 UTC),
    )
    .unwrap()
}
