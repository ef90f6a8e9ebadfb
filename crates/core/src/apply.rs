// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{BookingSession, TransitionOutcome, TransitionResult};
use homebook_audit::{Action, Actor, AuditEvent, Cause, DraftSnapshot};
use homebook_domain::{
    Addon, BookingConfirmation, DateSlot, DomainError, Field, FieldErrors, Provider, Step,
    TimeSlot, validate_step,
};

/// Applies a command to a booking session, producing a new session and audit event.
///
/// # Arguments
///
/// * `state` - The current session (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new session, audit event and outcome
/// * `Err(CoreError)` if the command is invalid
///
/// Refused selections (a blacked-out date, a booked time, an unavailable
/// provider) and blocked advances are successful transitions that leave the
/// draft unchanged; the outcome says what happened.
///
/// # Errors
///
/// Returns an error if:
/// - The command edits a field that does not belong to the current step
/// - The command names a date, time, provider or add-on outside the session's catalog
/// - `BeginSubmission` is applied outside the confirmation step
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &BookingSession,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let before: DraftSnapshot = state.to_snapshot();
    let action_name: &'static str = command.name();
    let mut new_state: BookingSession = state.clone();

    let (outcome, details): (TransitionOutcome, Option<String>) = match command {
        Command::SelectDate { date } => {
            require_step(state, Step::DateTime, "date")?;
            let slot: DateSlot = state
                .catalog()
                .availability
                .date_slot(date)
                .cloned()
                .ok_or(DomainError::DateNotOffered(date))?;

            if new_state.draft_mut().select_date(slot) {
                new_state.clear_field_error(Field::Date);
                (TransitionOutcome::Updated, Some(format!("Selected date {date}")))
            } else {
                (
                    TransitionOutcome::SelectionRejected { field: Field::Date },
                    Some(format!("Date {date} is unavailable")),
                )
            }
        }
        Command::SelectTime { time } => {
            require_step(state, Step::DateTime, "time")?;
            let slot: TimeSlot = state
                .catalog()
                .availability
                .time_slot(time)
                .cloned()
                .ok_or(DomainError::TimeNotOffered(time))?;

            if new_state.draft_mut().select_time(slot) {
                new_state.clear_field_error(Field::Time);
                (TransitionOutcome::Updated, Some(format!("Selected time {time}")))
            } else {
                (
                    TransitionOutcome::SelectionRejected { field: Field::Time },
                    Some(format!("Time {time} is already booked")),
                )
            }
        }
        Command::SelectProvider { provider_id } => {
            require_step(state, Step::Provider, "provider")?;
            let provider: Provider = state
                .catalog()
                .provider(&provider_id)
                .cloned()
                .ok_or_else(|| DomainError::UnknownProvider(provider_id.clone()))?;

            if new_state.draft_mut().select_provider(provider) {
                new_state.clear_field_error(Field::Provider);
                (
                    TransitionOutcome::Updated,
                    Some(format!("Selected provider '{provider_id}'")),
                )
            } else {
                (
                    TransitionOutcome::SelectionRejected {
                        field: Field::Provider,
                    },
                    Some(format!("Provider '{provider_id}' is unavailable")),
                )
            }
        }
        Command::ToggleAddon { addon_id } => {
            let addon: Addon = state
                .catalog()
                .addon(&addon_id)
                .cloned()
                .ok_or_else(|| DomainError::UnknownAddon(addon_id.clone()))?;

            let selected: bool = new_state.draft_mut().toggle_addon(addon);
            let verb: &str = if selected { "Added" } else { "Removed" };
            (
                TransitionOutcome::Updated,
                Some(format!("{verb} add-on '{addon_id}'")),
            )
        }
        Command::SetUrgent { urgent } => {
            new_state.draft_mut().set_urgent(urgent);
            (
                TransitionOutcome::Updated,
                Some(format!("Urgent service {}", if urgent { "on" } else { "off" })),
            )
        }
        Command::SetAddress { address } => {
            require_step(state, Step::Details, "address")?;
            new_state.draft_mut().set_address(address);
            new_state.clear_field_error(Field::Address);
            (TransitionOutcome::Updated, None)
        }
        Command::SetPhone { phone } => {
            require_step(state, Step::Details, "phone")?;
            new_state.draft_mut().set_phone(phone);
            new_state.clear_field_error(Field::Phone);
            (TransitionOutcome::Updated, None)
        }
        Command::SetPaymentMethod { method } => {
            require_step(state, Step::Details, "payment_method")?;
            new_state.draft_mut().set_payment_method(method);
            (
                TransitionOutcome::Updated,
                Some(format!("Payment method {method}")),
            )
        }
        Command::SetContactPreference { preference } => {
            require_step(state, Step::Details, "contact_preference")?;
            new_state.draft_mut().set_contact_preference(preference);
            (
                TransitionOutcome::Updated,
                Some(format!("Contact preference {preference}")),
            )
        }
        Command::SetNotes { notes } => {
            require_step(state, Step::Details, "notes")?;
            new_state.draft_mut().set_notes(notes);
            (TransitionOutcome::Updated, None)
        }
        Command::Advance => {
            let from: Step = state.step();
            let errors: FieldErrors = validate_step(from, state.draft());
            if errors.is_empty() {
                match from.next() {
                    Some(to) => {
                        new_state.set_step(to);
                        new_state.set_field_errors(FieldErrors::new());
                        (
                            TransitionOutcome::Advanced { from, to },
                            Some(format!("Advanced from step {from} to step {to}")),
                        )
                    }
                    None => (TransitionOutcome::Unchanged, None),
                }
            } else {
                let details: String = format!("Advance blocked: {errors}");
                new_state.set_field_errors(errors.clone());
                (TransitionOutcome::AdvanceBlocked { errors }, Some(details))
            }
        }
        Command::Retreat => {
            let from: Step = state.step();
            match from.previous() {
                Some(to) => {
                    new_state.set_step(to);
                    new_state.set_field_errors(FieldErrors::new());
                    (
                        TransitionOutcome::Retreated { from, to },
                        Some(format!("Returned from step {from} to step {to}")),
                    )
                }
                None => (TransitionOutcome::Unchanged, None),
            }
        }
        Command::Cancel => {
            new_state.reset_draft();
            (TransitionOutcome::Reset, Some(String::from("Draft discarded")))
        }
        Command::DismissError => {
            new_state.set_general_error(None);
            (TransitionOutcome::Updated, None)
        }
        Command::BeginSubmission => {
            if state.step() != Step::Confirmation {
                return Err(CoreError::NotAtConfirmation { step: state.step() });
            }
            new_state.set_general_error(None);
            (TransitionOutcome::SubmissionStarted, None)
        }
        Command::RecordSubmissionFailure { message } => {
            let details: String = format!("Submission failed: {message}");
            new_state.set_general_error(Some(message));
            (TransitionOutcome::SubmissionFailed, Some(details))
        }
    };

    new_state.finish_transition();
    let after: DraftSnapshot = new_state.to_snapshot();
    let audit_event: AuditEvent = AuditEvent::new(
        state.session_id(),
        actor,
        cause,
        Action::new(String::from(action_name), details),
        before,
        after,
    );

    Ok(TransitionResult {
        new_state,
        audit_event,
        outcome,
    })
}

/// Applies a successful submission, discarding the draft that produced it.
///
/// The session returns to step 1 with an empty draft and a new generation.
///
/// # Arguments
///
/// * `state` - The current session (immutable)
/// * `confirmation` - The confirmation produced for this session's draft
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The session is not at the confirmation step
/// - The confirmation belongs to another session
/// - The draft differs from the one the confirmation was built from
pub fn apply_confirmation(
    state: &BookingSession,
    confirmation: &BookingConfirmation,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    if state.step() != Step::Confirmation {
        return Err(CoreError::NotAtConfirmation { step: state.step() });
    }
    if confirmation.session_id != state.session_id() {
        return Err(CoreError::SessionMismatch {
            expected: state.session_id(),
            actual: confirmation.session_id,
        });
    }
    if confirmation.booking.draft() != state.draft() {
        return Err(CoreError::DraftChanged);
    }

    let before: DraftSnapshot = state.to_snapshot();
    let mut new_state: BookingSession = state.clone();
    new_state.reset_draft();
    new_state.set_last_confirmation(confirmation.reference.clone());
    new_state.finish_transition();
    let after: DraftSnapshot = new_state.to_snapshot();

    let action: Action = Action::new(
        String::from("Confirm"),
        Some(format!(
            "Confirmed booking {} for {} (total {})",
            confirmation.reference,
            confirmation.booking.scheduled_at(),
            confirmation.price.total()
        )),
    );
    let audit_event: AuditEvent =
        AuditEvent::new(state.session_id(), actor, cause, action, before, after);

    Ok(TransitionResult {
        new_state,
        audit_event,
        outcome: TransitionOutcome::Confirmed {
            reference: confirmation.reference.clone(),
        },
    })
}

/// Rejects input that belongs to a step other than the current one.
fn require_step(state: &BookingSession, owner: Step, input: &'static str) -> Result<(), CoreError> {
    if state.step() == owner {
        Ok(())
    } else {
        Err(CoreError::NotEditableInStep {
            input,
            step: state.step(),
        })
    }
}
