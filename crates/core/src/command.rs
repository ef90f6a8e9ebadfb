// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use homebook_domain::{AddonId, ContactPreference, PaymentMethod, ProviderId};
use time::{Date, Time};

/// A command represents customer or system intent as data only.
///
/// Commands are the only way to request changes to a booking session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Choose the service date (step 1).
    SelectDate {
        /// A date from the session's availability window.
        date: Date,
    },
    /// Choose the service time (step 1).
    SelectTime {
        /// A time from the operating-hours catalog.
        time: Time,
    },
    /// Choose the provider (step 2).
    SelectProvider {
        /// A provider from the session's pool.
        provider_id: ProviderId,
    },
    /// Add the add-on if absent, remove it if present.
    ToggleAddon {
        /// An add-on offered for the booked service.
        addon_id: AddonId,
    },
    /// Request or withdraw urgent service.
    SetUrgent {
        /// The new flag value.
        urgent: bool,
    },
    /// Set the service address (step 3).
    SetAddress {
        /// The address as entered.
        address: String,
    },
    /// Set the contact phone number (step 3).
    SetPhone {
        /// The phone number as entered.
        phone: String,
    },
    /// Set the payment method (step 3).
    SetPaymentMethod {
        /// The chosen method.
        method: PaymentMethod,
    },
    /// Set the contact preference (step 3).
    SetContactPreference {
        /// The chosen channel.
        preference: ContactPreference,
    },
    /// Set or clear the notes (step 3).
    SetNotes {
        /// The notes, `None` to clear.
        notes: Option<String>,
    },
    /// Run the current step's gate and move forward if it passes.
    Advance,
    /// Move back one step without validation.
    Retreat,
    /// Discard the draft and return to the initial state.
    Cancel,
    /// Clear the general (non-field) error.
    DismissError,
    /// Mark the start of a submission attempt (step 4 only).
    BeginSubmission,
    /// Record a failed submission attempt.
    RecordSubmissionFailure {
        /// Customer-facing failure message.
        message: String,
    },
}

impl Command {
    /// Returns the audit action name of this command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SelectDate { .. } => "SelectDate",
            Self::SelectTime { .. } => "SelectTime",
            Self::SelectProvider { .. } => "SelectProvider",
            Self::ToggleAddon { .. } => "ToggleAddon",
            Self::SetUrgent { .. } => "SetUrgent",
            Self::SetAddress { .. } => "SetAddress",
            Self::SetPhone { .. } => "SetPhone",
            Self::SetPaymentMethod { .. } => "SetPaymentMethod",
            Self::SetContactPreference { .. } => "SetContactPreference",
            Self::SetNotes { .. } => "SetNotes",
            Self::Advance => "Advance",
            Self::Retreat => "Retreat",
            Self::Cancel => "Cancel",
            Self::DismissError => "DismissError",
            Self::BeginSubmission => "BeginSubmission",
            Self::RecordSubmissionFailure { .. } => "RecordSubmissionFailure",
        }
    }
}
