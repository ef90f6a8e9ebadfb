// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_complete_draft, create_test_addon, create_test_service};
use crate::{
    ArrivalWindow, BookingConfirmation, BookingDraft, DomainError, SessionId, Step,
    ValidatedBooking,
};
use time::macros::datetime;

#[test]
fn test_validated_booking_requires_complete_draft() {
    let draft: BookingDraft = BookingDraft::new(create_test_service());
    let result: Result<ValidatedBooking, DomainError> = ValidatedBooking::from_draft(&draft);

    assert!(matches!(
        result,
        Err(DomainError::IncompleteDraft {
            step: Step::DateTime,
            ..
        })
    ));
}

#[test]
fn test_validated_booking_freezes_a_copy() {
    let mut draft: BookingDraft = create_complete_draft();
    let booking: ValidatedBooking = ValidatedBooking::from_draft(&draft).unwrap();

    draft.set_address(String::from("Elsewhere"));
    assert_eq!(booking.draft().details().address, "12 MG Road, Bengaluru");
    assert_eq!(booking.provider().id.value(), "p1");
    assert_eq!(booking.scheduled_at(), datetime!(2026 - 10 - 20 10:00));
}

#[test]
fn test_arrival_window_starts_fifteen_minutes_early() {
    let window: ArrivalWindow = ArrivalWindow::ending_at(datetime!(2026 - 10 - 20 08:00)).unwrap();
    assert_eq!(window.start, datetime!(2026 - 10 - 20 07:45));
    assert_eq!(window.end, datetime!(2026 - 10 - 20 08:00));
}

#[test]
fn test_confirmation_carries_final_price() {
    let mut draft: BookingDraft = create_complete_draft();
    draft.toggle_addon(create_test_addon("balcony", 450));
    draft.set_urgent(true);
    let booking: ValidatedBooking = ValidatedBooking::from_draft(&draft).unwrap();

    let confirmation: BookingConfirmation = BookingConfirmation::new(
        String::from("HB-000001"),
        SessionId::new(7),
        booking,
        datetime!(2026 - 10 - 19 12:00 UTC),
    )
    .unwrap();

    assert_eq!(confirmation.price.total(), 2300);
    assert_eq!(confirmation.estimated_duration_minutes, 210);
    assert_eq!(
        confirmation.arrival_window.start,
        datetime!(2026 - 10 - 20 09:45)
    );
    assert_eq!(confirmation.session_id, SessionId::new(7));
}
