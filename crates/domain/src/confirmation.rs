// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Frozen booking values produced at submission time.
//!
//! A `ValidatedBooking` can only be obtained by running the gates of
//! steps 1 through 3, and a `BookingConfirmation` can only be built from a
//! `ValidatedBooking`. Together they make an unvalidated confirmation
//! unrepresentable.

use crate::availability::{DateSlot, TimeSlot};
use crate::draft::BookingDraft;
use crate::error::DomainError;
use crate::pricing::{PriceBreakdown, compute_price, estimated_duration_minutes};
use crate::types::{Field, Provider, SessionId, Step};
use crate::validation::{FieldErrors, validate_steps_before};
use time::{Duration, OffsetDateTime, PrimitiveDateTime};

/// Minutes before the booked time at which the provider may arrive.
pub const ARRIVAL_LEAD_MINUTES: i64 = 15;

/// A deep copy of a draft that passed every gate before confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBooking {
    draft: BookingDraft,
    date: DateSlot,
    time: TimeSlot,
    provider: Provider,
}

impl ValidatedBooking {
    /// Validates and freezes a draft.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IncompleteDraft` if any of steps 1 to 3 fails.
    pub fn from_draft(draft: &BookingDraft) -> Result<Self, DomainError> {
        validate_steps_before(Step::Confirmation, draft)?;

        let (Some(date), Some(time), Some(provider)) = (draft.date(), draft.time(), draft.provider())
        else {
            // Unreachable after the gates above, reported rather than assumed.
            let mut errors: FieldErrors = FieldErrors::new();
            errors.insert(Field::Date, "Incomplete selection");
            return Err(DomainError::IncompleteDraft {
                step: Step::DateTime,
                errors,
            });
        };

        Ok(Self {
            date: date.clone(),
            time: time.clone(),
            provider: provider.clone(),
            draft: draft.clone(),
        })
    }

    /// Returns the frozen draft.
    #[must_use]
    pub const fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Returns the booked date.
    #[must_use]
    pub const fn date(&self) -> &DateSlot {
        &self.date
    }

    /// Returns the booked time.
    #[must_use]
    pub const fn time(&self) -> &TimeSlot {
        &self.time
    }

    /// Returns the assigned provider.
    #[must_use]
    pub const fn provider(&self) -> &Provider {
        &self.provider
    }

    /// Returns the booked date and time combined.
    #[must_use]
    pub const fn scheduled_at(&self) -> PrimitiveDateTime {
        PrimitiveDateTime::new(self.date.date, self.time.time)
    }
}

/// The window in which the provider is expected to arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrivalWindow {
    /// Earliest expected arrival.
    pub start: PrimitiveDateTime,
    /// Latest expected arrival; the booked time.
    pub end: PrimitiveDateTime,
}

impl ArrivalWindow {
    /// Builds the window `[scheduled - 15 min, scheduled]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the subtraction leaves the representable range.
    pub fn ending_at(scheduled: PrimitiveDateTime) -> Result<Self, DomainError> {
        let start: PrimitiveDateTime = scheduled
            .checked_sub(Duration::minutes(ARRIVAL_LEAD_MINUTES))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("computing the arrival window for {scheduled}"),
            })?;
        Ok(Self {
            start,
            end: scheduled,
        })
    }
}

/// The immutable result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfirmation {
    /// Reference assigned by the booking backend.
    pub reference: String,
    /// The session the booking was made in.
    pub session_id: SessionId,
    /// The frozen booking.
    pub booking: ValidatedBooking,
    /// The final price.
    pub price: PriceBreakdown,
    /// Estimated visit length in minutes.
    pub estimated_duration_minutes: u32,
    /// Expected provider arrival.
    pub arrival_window: ArrivalWindow,
    /// When the backend accepted the booking.
    pub confirmed_at: OffsetDateTime,
}

impl BookingConfirmation {
    /// Builds a confirmation for a validated booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the arrival window cannot be computed.
    pub fn new(
        reference: String,
        session_id: SessionId,
        booking: ValidatedBooking,
        confirmed_at: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        let arrival_window: ArrivalWindow = ArrivalWindow::ending_at(booking.scheduled_at())?;
        let price: PriceBreakdown = compute_price(booking.draft());
        let estimated_duration_minutes: u32 = estimated_duration_minutes(booking.draft());

        Ok(Self {
            reference,
            session_id,
            booking,
            price,
            estimated_duration_minutes,
            arrival_window,
            confirmed_at,
        })
    }
}
