// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{AddonId, ProviderId, ServiceId, Step};
use crate::validation::FieldErrors;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The service is not part of the catalog.
    UnknownService(ServiceId),
    /// The add-on is not offered for the booked service.
    UnknownAddon(AddonId),
    /// The provider is not part of the session's provider pool.
    UnknownProvider(ProviderId),
    /// The date is outside the generated availability window.
    DateNotOffered(time::Date),
    /// The time is not part of the operating-hours catalog.
    TimeNotOffered(time::Time),
    /// Payment method string could not be parsed.
    InvalidPaymentMethod(String),
    /// Contact preference string could not be parsed.
    InvalidContactPreference(String),
    /// A rating outside `0.0..=5.0` was supplied.
    InvalidRating(String),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// The draft did not pass the gate of one of the required steps.
    IncompleteDraft {
        /// The first step whose gate failed.
        step: Step,
        /// The field errors reported by that step.
        errors: FieldErrors,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownService(id) => write!(f, "Service '{id}' not found in catalog"),
            Self::UnknownAddon(id) => write!(f, "Add-on '{id}' is not offered for this service"),
            Self::UnknownProvider(id) => {
                write!(f, "Provider '{id}' is not available for this service")
            }
            Self::DateNotOffered(date) => {
                write!(f, "Date {date} is outside the booking window")
            }
            Self::TimeNotOffered(time) => {
                write!(f, "Time {time} is outside operating hours")
            }
            Self::InvalidPaymentMethod(value) => {
                write!(f, "Invalid payment method '{value}'. Expected 'card' or 'cash'")
            }
            Self::InvalidContactPreference(value) => {
                write!(
                    f,
                    "Invalid contact preference '{value}'. Expected 'phone', 'sms' or 'email'"
                )
            }
            Self::InvalidRating(msg) => write!(f, "Invalid rating: {msg}"),
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::IncompleteDraft { step, errors } => {
                write!(f, "Draft failed validation at step {}: {errors}", step.number())
            }
        }
    }
}

impl std::error::Error for DomainError {}
