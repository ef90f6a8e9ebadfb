// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AvailabilityPolicy, BackendError, BookingBackend, BookingOrchestrator, CatalogEntry,
    ConfirmationListener, InMemoryCatalog, SessionRegistry, SimulatedBackend,
};
use homebook::Command;
use homebook_audit::{Actor, ActorKind, Cause};
use homebook_domain::{
    Addon, AddonId, BookingConfirmation, Provider, ProviderId, Rating, Service, ServiceId,
    ValidatedBooking,
};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use time::Date;
use time::macros::{date, time};
use tokio::sync::Notify;

pub const TODAY: Date = date!(2026 - 10 - 19);

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("customer-123"), ActorKind::Customer)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Wizard input"))
}

pub fn create_test_service_id() -> ServiceId {
    ServiceId::new("deep-cleaning")
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

pub fn create_test_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(vec![CatalogEntry {
        service: Service {
            id: create_test_service_id(),
            name: String::from("Deep Cleaning"),
            category: String::from("cleaning"),
            description: String::from("Full home deep clean"),
            price: 1200,
            duration_minutes: 180,
            icon: String::from("sparkles"),
        },
        addons: vec![
            create_test_addon("balcony", 450),
            create_test_addon("fridge", 300),
        ],
        providers: vec![
            create_test_provider("p1", true),
            create_test_provider("p2", false),
        ],
    }])
    .unwrap()
}

/// Offset 3 (2026-10-22) blacked out, 09:30 booked, 10:00 popular.
pub fn create_test_policy() -> AvailabilityPolicy {
    AvailabilityPolicy {
        window_days: 14,
        blackout_offsets: BTreeSet::from([3]),
        booked_times: BTreeSet::from([time!(9:30)]),
        popular_times: BTreeSet::from([time!(10:00)]),
    }
}

/// Collects every confirmation it is handed.
#[derive(Default)]
pub struct RecordingListener {
    confirmations: Mutex<Vec<BookingConfirmation>>,
}

impl RecordingListener {
    pub fn references(&self) -> Vec<String> {
        self.confirmations
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.reference.clone())
            .collect()
    }
}

impl ConfirmationListener for RecordingListener {
    fn on_confirmed(&self, confirmation: &BookingConfirmation) {
        self.confirmations.lock().unwrap().push(confirmation.clone());
    }
}

/// A backend that waits for the test to release it.
pub struct GatedBackend {
    pub started: Notify,
    pub release: Notify,
    calls: AtomicUsize,
    response: Result<String, BackendError>,
}

impl GatedBackend {
    pub fn accepting(reference: &str) -> Self {
        Self {
            started: Notify::new(),
            release: Notify::new(),
            calls: AtomicUsize::new(0),
            response: Ok(reference.to_string()),
        }
    }

    pub fn rejecting(message: &str) -> Self {
        Self {
            response: Err(BackendError::new(message)),
            ..Self::accepting("unused")
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl BookingBackend for GatedBackend {
    async fn submit(&self, _booking: &ValidatedBooking) -> Result<String, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        self.release.notified().await;
        self.response.clone()
    }
}

pub type TestRegistry<B> = SessionRegistry<InMemoryCatalog, B, RecordingListener>;

pub fn create_test_registry<B: BookingBackend>(
    backend: Arc<B>,
    listener: Arc<RecordingListener>,
) -> TestRegistry<B> {
    SessionRegistry::new(
        Arc::new(create_test_catalog()),
        create_test_policy(),
        backend,
        listener,
    )
}

pub fn create_instant_backend() -> Arc<SimulatedBackend> {
    Arc::new(SimulatedBackend::new(Duration::ZERO))
}

pub async fn open_test_session<B: BookingBackend>(
    registry: &TestRegistry<B>,
) -> Arc<BookingOrchestrator<B, RecordingListener>> {
    registry
        .open(&create_test_service_id(), TODAY)
        .await
        .unwrap()
}

pub fn wizard_commands() -> Vec<Command> {
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
            phone: String::from("9876543210"),
        },
        Command::Advance,
    ]
}

/// Runs steps 1 to 3 so the session sits at the confirmation step.
pub async fn drive_to_confirmation<B: BookingBackend>(
    orchestrator: &BookingOrchestrator<B, RecordingListener>,
) {
    for command in wizard_commands() {
        orchestrator
            .execute(command, create_test_actor(), create_test_cause())
            .await
            .unwrap();
    }
}
