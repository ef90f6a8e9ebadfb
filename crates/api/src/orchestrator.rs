// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One booking session and its submissions.
//!
//! The orchestrator serialises commands against a session and runs the
//! confirmation submitter. Transitions themselves are pure; this module owns
//! the only mutable copy of each session.
//!
//! ## Submission rules
//!
//! - At most one submission per session is in flight
//! - While it is in flight only `Cancel` is accepted
//! - The draft is re-validated before the backend is contacted
//! - The slot is claimed in the shared ledger before the backend is contacted
//! - A result that arrives after the draft was discarded is dropped
//! - A submission that is abandoned mid-flight gives its slot back

use crate::error::{ApiError, SubmissionError, translate_core_error};
use crate::ledger::{SlotKey, SlotLedger};
use crate::submitter::{BookingBackend, ConfirmationListener};
use homebook::{
    BookingSession, Command, TransitionOutcome, TransitionResult, apply, apply_confirmation,
};
use homebook_audit::{Actor, AuditEvent, AuditTrail, Cause};
use homebook_domain::{BookingConfirmation, SessionId, ValidatedBooking};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// The result of a command accepted by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// The session after the command.
    pub session: BookingSession,
    /// What the command did.
    pub outcome: TransitionOutcome,
}

struct SessionState {
    session: BookingSession,
    trail: AuditTrail,
}

impl SessionState {
    fn commit(&mut self, result: TransitionResult) -> TransitionOutcome {
        self.trail.record(result.audit_event);
        self.session = result.new_state;
        result.outcome
    }
}

/// Marks a submission as in flight for as long as it lives.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Owns a booking session and runs its submissions.
pub struct BookingOrchestrator<B, L> {
    session_id: SessionId,
    state: Mutex<SessionState>,
    in_flight: AtomicBool,
    backend: Arc<B>,
    listener: Arc<L>,
    ledger: Arc<SlotLedger>,
}

impl<B, L> BookingOrchestrator<B, L>
where
    B: BookingBackend,
    L: ConfirmationListener,
{
    /// Creates an orchestrator for a freshly opened session.
    #[must_use]
    pub fn new(
        session: BookingSession,
        backend: Arc<B>,
        listener: Arc<L>,
        ledger: Arc<SlotLedger>,
    ) -> Self {
        Self {
            session_id: session.session_id(),
            state: Mutex::new(SessionState {
                session,
                trail: AuditTrail::default(),
            }),
            in_flight: AtomicBool::new(false),
            backend,
            listener,
            ledger,
        }
    }

    /// Returns the session identifier.
    #[must_use]
    pub const fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Returns whether a submission is waiting on the backend.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Returns a copy of the current session.
    pub async fn session(&self) -> BookingSession {
        self.state.lock().await.session.clone()
    }

    /// Returns the recorded audit events, oldest first.
    pub async fn audit_events(&self) -> Vec<AuditEvent> {
        self.state.lock().await.trail.events().cloned().collect()
    }

    /// Applies a customer command.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::SubmissionInFlight` for anything but `Cancel` while
    /// a submission is running, or the translated transition error.
    pub async fn execute(
        &self,
        command: Command,
        actor: Actor,
        cause: Cause,
    ) -> Result<CommandOutcome, ApiError> {
        let mut state = self.state.lock().await;

        if self.is_submitting() && !matches!(command, Command::Cancel) {
            warn!(
                session_id = %self.session_id,
                command = command.name(),
                "Rejected command while submission is in flight"
            );
            return Err(ApiError::SubmissionInFlight {
                session_id: self.session_id,
            });
        }

        let name: &'static str = command.name();
        let result: TransitionResult =
            apply(&state.session, command, actor, cause).map_err(translate_core_error)?;
        let outcome: TransitionOutcome = state.commit(result);

        debug!(
            session_id = %self.session_id,
            command = name,
            step = %state.session.step(),
            total = state.session.price().total(),
            "Applied command"
        );

        Ok(CommandOutcome {
            session: state.session.clone(),
            outcome,
        })
    }

    /// Submits the session's draft for confirmation.
    ///
    /// On success the session has already been reset to step 1 and the
    /// listener has been notified.
    ///
    /// # Errors
    ///
    /// - `AlreadyInFlight` if another submission for this session is running;
    ///   the backend is not contacted
    /// - `NotReady` if the session is not at the confirmation step
    /// - `InvalidDraft` if the draft fails re-validation
    /// - `SlotNoLongerAvailable` if another booking took the slot first
    /// - `Backend` if the backend failed; the draft is kept for a retry
    /// - `Discarded` if the draft was cancelled before the backend answered
    pub async fn submit(
        &self,
        actor: Actor,
        cause: Cause,
    ) -> Result<BookingConfirmation, SubmissionError> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            warn!(session_id = %self.session_id, "Submission already in flight");
            return Err(SubmissionError::AlreadyInFlight);
        };

        let (booking, generation): (ValidatedBooking, u64) = {
            let mut state = self.state.lock().await;
            let started: TransitionResult = apply(
                &state.session,
                Command::BeginSubmission,
                actor.clone(),
                cause.clone(),
            )
            .map_err(|_| SubmissionError::NotReady {
                step: state.session.step(),
            })?;
            state.commit(started);

            match ValidatedBooking::from_draft(state.session.draft()) {
                Ok(booking) => (booking, state.session.generation()),
                Err(err) => {
                    error!(
                        session_id = %self.session_id,
                        error = %err,
                        "Draft failed re-validation at submission"
                    );
                    let failure = SubmissionError::InvalidDraft {
                        detail: err.to_string(),
                    };
                    Self::record_failure(&mut state, &failure, actor, cause);
                    return Err(failure);
                }
            }
        };

        let slot: SlotKey = SlotKey::for_booking(&booking);
        let Some(claim) = self.ledger.claim(slot.clone()) else {
            warn!(session_id = %self.session_id, slot = %slot, "Slot already claimed");
            let failure = SubmissionError::SlotNoLongerAvailable;
            Self::record_failure(&mut *self.state.lock().await, &failure, actor, cause);
            return Err(failure);
        };

        info!(
            session_id = %self.session_id,
            slot = %slot,
            generation,
            "Submitting booking"
        );
        let response = self.backend.submit(&booking).await;

        let mut state = self.state.lock().await;
        if state.session.generation() != generation {
            info!(
                session_id = %self.session_id,
                slot = %slot,
                "Draft discarded while submitting; dropping backend result"
            );
            return Err(SubmissionError::Discarded);
        }

        let reference: String = match response {
            Ok(reference) => reference,
            Err(err) => {
                drop(claim);
                warn!(session_id = %self.session_id, error = %err, "Backend rejected booking");
                let failure = SubmissionError::Backend {
                    message: err.message,
                };
                Self::record_failure(&mut state, &failure, actor, cause);
                return Err(failure);
            }
        };

        // The backend holds the booking from here on, so the slot stays claimed.
        claim.keep();

        let confirmation: BookingConfirmation = match BookingConfirmation::new(
            reference.clone(),
            self.session_id,
            booking,
            OffsetDateTime::now_utc(),
        ) {
            Ok(confirmation) => confirmation,
            Err(err) => {
                drop(state);
                return Err(self
                    .record_unconfirmed(&reference, &err.to_string(), cause)
                    .await);
            }
        };

        let confirmed: TransitionResult = match apply_confirmation(
            &state.session,
            &confirmation,
            Actor::system(),
            cause.clone(),
        ) {
            Ok(confirmed) => confirmed,
            Err(err) => {
                drop(state);
                return Err(self
                    .record_unconfirmed(&reference, &err.to_string(), cause)
                    .await);
            }
        };
        state.commit(confirmed);
        drop(state);

        info!(
            session_id = %self.session_id,
            reference = %confirmation.reference,
            total = confirmation.price.total(),
            "Booking confirmed"
        );
        self.listener.on_confirmed(&confirmation);

        Ok(confirmation)
    }

    /// Records a booking the backend accepted but the session could not
    /// confirm. The reference is kept in the general error so the customer
    /// can still quote it.
    pub(crate) async fn record_unconfirmed(
        &self,
        reference: &str,
        detail: &str,
        cause: Cause,
    ) -> SubmissionError {
        error!(
            session_id = %self.session_id,
            reference,
            detail,
            "Backend accepted booking but it could not be confirmed"
        );
        let failure = SubmissionError::Internal {
            message: format!("booking {reference} was accepted but could not be confirmed"),
        };
        Self::record_failure(
            &mut *self.state.lock().await,
            &failure,
            Actor::system(),
            cause,
        );
        failure
    }

    /// Stores a submission failure as the session's general error.
    fn record_failure(
        state: &mut SessionState,
        failure: &SubmissionError,
        actor: Actor,
        cause: Cause,
    ) {
        let command: Command = Command::RecordSubmissionFailure {
            message: failure.to_string(),
        };
        match apply(&state.session, command, actor, cause) {
            Ok(result) => {
                state.commit(result);
            }
            Err(err) => {
                error!(error = %err, "Could not record submission failure");
            }
        }
    }
}
