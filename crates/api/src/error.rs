// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use homebook::CoreError;
use homebook_domain::{DomainError, FieldErrors, SessionId, Step};
use thiserror::Error;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The requested service is not in the catalog.
    #[error("Service '{service_id}' not found")]
    ServiceNotFound {
        /// The identifier that was looked up.
        service_id: String,
    },
    /// The session does not exist or has been closed.
    #[error("Session {session_id} not found")]
    SessionNotFound {
        /// The identifier that was looked up.
        session_id: SessionId,
    },
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The draft does not pass a step gate.
    #[error("Step {step} is incomplete: {errors}")]
    IncompleteStep {
        /// The step whose gate failed.
        step: Step,
        /// The gate's field errors.
        errors: FieldErrors,
    },
    /// The session is waiting on its backend and only accepts cancellation.
    #[error("A submission is in progress for session {session_id}")]
    SubmissionInFlight {
        /// The busy session.
        session_id: SessionId,
    },
    /// The catalog document could not be loaded.
    #[error("Catalog could not be loaded: {message}")]
    CatalogLoad {
        /// What went wrong.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

/// Why a submission produced no confirmation.
///
/// Every variant except `Internal` carries a message fit to show the customer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// Another submission for the same session has not resolved yet.
    #[error("Your booking is already being submitted")]
    AlreadyInFlight,

    /// Submission was requested before the confirmation step.
    #[error("Please complete every step before confirming (currently at step {step})")]
    NotReady { step: Step },

    /// The draft failed re-validation. The detail is logged, not shown.
    #[error("Something went wrong with this booking. Please review your details and try again")]
    InvalidDraft { detail: String },

    /// Another booking claimed the same provider, date and time first.
    #[error("That time slot was just booked. Please choose another time or provider")]
    SlotNoLongerAvailable,

    /// The booking backend rejected the request or could not be reached.
    #[error("{message}")]
    Backend { message: String },

    /// The draft was cancelled while the backend was working.
    #[error("The booking was cancelled before it could be confirmed")]
    Discarded,

    /// The backend accepted the booking but the session could not record it.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::UnknownService(id) => ApiError::ServiceNotFound {
            service_id: id.to_string(),
        },
        DomainError::UnknownAddon(id) => ApiError::InvalidInput {
            field: String::from("addon_id"),
            message: format!("Add-on '{id}' is not offered for this service"),
        },
        DomainError::UnknownProvider(id) => ApiError::InvalidInput {
            field: String::from("provider_id"),
            message: format!("Provider '{id}' does not offer this service"),
        },
        DomainError::DateNotOffered(date) => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("{date} is outside the booking window"),
        },
        DomainError::TimeNotOffered(time) => ApiError::InvalidInput {
            field: String::from("time"),
            message: format!("{time} is outside operating hours"),
        },
        DomainError::InvalidPaymentMethod(value) => ApiError::InvalidInput {
            field: String::from("payment_method"),
            message: format!("Unknown payment method '{value}'"),
        },
        DomainError::InvalidContactPreference(value) => ApiError::InvalidInput {
            field: String::from("contact_preference"),
            message: format!("Unknown contact preference '{value}'"),
        },
        DomainError::InvalidRating(value) => ApiError::InvalidInput {
            field: String::from("rating"),
            message: format!("Rating '{value}' must be between 0 and 5"),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::Internal {
            message: format!("Date arithmetic overflow while {operation}"),
        },
        DomainError::IncompleteDraft { step, errors } => ApiError::IncompleteStep { step, errors },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NotEditableInStep { input, step } => ApiError::DomainRuleViolation {
            rule: String::from("field_owned_by_step"),
            message: format!("'{input}' cannot be changed in step {step}"),
        },
        CoreError::NotAtConfirmation { step } => ApiError::DomainRuleViolation {
            rule: String::from("confirmation_step_only"),
            message: format!("This action requires the confirmation step, not step {step}"),
        },
        CoreError::SessionMismatch { .. } | CoreError::DraftChanged => ApiError::Internal {
            message: err.to_string(),
        },
    }
}
