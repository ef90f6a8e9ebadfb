// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod availability;
mod confirmation;
mod draft;
mod error;
mod pricing;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use availability::{
    AvailabilitySnapshot, CLOSING_HOUR, DEFAULT_WINDOW_DAYS, DateSlot, OPENING_HOUR,
    SLOT_INTERVAL_MINUTES, TimeSlot, generate_date_slots, generate_time_slots, is_weekend,
    operating_times,
};
pub use confirmation::{ARRIVAL_LEAD_MINUTES, ArrivalWindow, BookingConfirmation, ValidatedBooking};
pub use draft::{BookingDraft, CustomerDetails};
pub use error::DomainError;
pub use pricing::{PriceBreakdown, SERVICE_FEE, URGENT_FEE, compute_price, estimated_duration_minutes};
pub use types::{
    Addon, AddonId, ContactPreference, Field, PaymentMethod, Provider, ProviderId, Rating,
    Service, ServiceId, SessionId, Step,
};
pub use validation::{FieldErrors, is_valid_phone, validate_step, validate_steps_before};
