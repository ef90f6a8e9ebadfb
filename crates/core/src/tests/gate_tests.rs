// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_session, run, run_all};
use crate::{BookingSession, Command, TransitionOutcome, TransitionResult};
use homebook_domain::{Field, ProviderId, Step};
use time::macros::{date, time};

fn create_session_at_provider_step() -> BookingSession {
    run_all(
        &create_test_session(),
        vec![
            Command::SelectDate {
                date: date!(2026 - 10 - 20),
            },
            Command::SelectTime { time: time!(10:00) },
            Command::Advance,
        ],
    )
}

fn create_session_at_details_step() -> BookingSession {
    run_all(
        &create_session_at_provider_step(),
        vec![
            Command::SelectProvider {
                provider_id: ProviderId::new("p1"),
            },
            Command::Advance,
        ],
    )
}

#[test]
fn test_advance_from_empty_step_one_is_blocked() {
    let state: BookingSession = create_test_session();
    let result: TransitionResult = run(&state, Command::Advance);

    assert_eq!(result.new_state.step(), Step::DateTime);
    assert!(matches!(
        result.outcome,
        TransitionOutcome::AdvanceBlocked { .. }
    ));
    assert!(result.new_state.field_errors().contains(Field::Date));
    assert!(result.new_state.field_errors().contains(Field::Time));
    assert_eq!(result.new_state.draft(), state.draft());
}

#[test]
fn test_advance_after_blacked_out_date_fails_with_date_error() {
    let state: BookingSession = run_all(
        &create_test_session(),
        vec![
            Command::SelectDate {
                date: date!(2026 - 10 - 22),
            },
            Command::SelectTime { time: time!(10:00) },
        ],
    );
    let result: TransitionResult = run(&state, Command::Advance);

    assert_eq!(result.new_state.step(), Step::DateTime);
    assert!(result.new_state.field_errors().contains(Field::Date));
    assert!(!result.new_state.field_errors().contains(Field::Time));
}

#[test]
fn test_advance_with_valid_step_one_moves_to_provider() {
    let state: BookingSession = create_session_at_provider_step();
    assert_eq!(state.step(), Step::Provider);
    assert!(state.field_errors().is_empty());
}

#[test]
fn test_changing_a_field_clears_its_error() {
    let blocked: BookingSession = run(&create_test_session(), Command::Advance).new_state;
    assert!(blocked.field_errors().contains(Field::Date));

    let fixed: BookingSession = run(
        &blocked,
        Command::SelectDate {
            date: date!(2026 - 10 - 21),
        },
    )
    .new_state;
    assert!(!fixed.field_errors().contains(Field::Date));
    assert!(fixed.field_errors().contains(Field::Time));
}

#[test]
fn test_unavailable_provider_leaves_draft_and_blocks_advance() {
    let state: BookingSession = create_session_at_provider_step();
    let rejected: TransitionResult = run(
        &state,
        Command::SelectProvider {
            provider_id: ProviderId::new("p2"),
        },
    );
    assert_eq!(
        rejected.outcome,
        TransitionOutcome::SelectionRejected {
            field: Field::Provider
        }
    );
    assert!(rejected.new_state.draft().provider().is_none());

    let blocked: TransitionResult = run(&rejected.new_state, Command::Advance);
    assert_eq!(blocked.new_state.step(), Step::Provider);
    assert_eq!(
        blocked.new_state.field_errors().get(Field::Provider),
        Some("Please select a service provider")
    );
}

#[test]
fn test_valid_phone_passes_step_three() {
    let state: BookingSession = run_all(
        &create_session_at_details_step(),
        vec![
            Command::SetAddress {
                address: String::from("4 Park Street, Kolkata"),
            },
            Command::SetPhone {
                phone: String::from("9876543210"),
            },
            Command::Advance,
        ],
    );

    assert_eq!(state.step(), Step::Confirmation);
}

#[test]
fn test_short_phone_blocks_step_three() {
    let state: BookingSession = run_all(
        &create_session_at_details_step(),
        vec![
            Command::SetAddress {
                address: String::from("4 Park Street, Kolkata"),
            },
            Command::SetPhone {
                phone: String::from("12345"),
            },
            Command::Advance,
        ],
    );

    assert_eq!(state.step(), Step::Details);
    assert!(state.field_errors().contains(Field::Phone));
    assert!(!state.field_errors().contains(Field::Address));

    let corrected: BookingSession = run(
        &state,
        Command::SetPhone {
            phone: String::from("98765 43210"),
        },
    )
    .new_state;
    assert!(corrected.field_errors().is_empty());
}
