// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response data transfer objects.
//!
//! These types define the wire contract and are distinct from domain types.
//! Dates cross the wire as `YYYY-MM-DD` and times as `HH:MM`.

use crate::error::{ApiError, translate_domain_error};
use homebook::{BookingSession, Command};
use homebook_domain::{
    Addon, AddonId, BookingConfirmation, BookingDraft, ContactPreference, DateSlot,
    PaymentMethod, PriceBreakdown, Provider, ProviderId, Service, TimeSlot,
    estimated_duration_minutes,
};
use std::collections::BTreeMap;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");
const DATE_TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Formats a time as `HH:MM`.
#[must_use]
pub fn format_time(time: Time) -> String {
    time.format(TIME_FORMAT)
        .unwrap_or_else(|_| time.to_string())
}

fn format_date_time(value: PrimitiveDateTime) -> String {
    value
        .format(DATE_TIME_FORMAT)
        .unwrap_or_else(|_| value.to_string())
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` naming `field` if the value is malformed.
pub fn parse_date(field: &str, value: &str) -> Result<Date, ApiError> {
    Date::parse(value, DATE_FORMAT).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: format!("Failed to parse date '{value}': {e}"),
    })
}

/// Parses an `HH:MM` time.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` naming `field` if the value is malformed.
pub fn parse_time(field: &str, value: &str) -> Result<Time, ApiError> {
    Time::parse(value, TIME_FORMAT).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: format!("Failed to parse time '{value}': {e}"),
    })
}

/// API request to open a booking session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct OpenSessionRequest {
    /// The service to book.
    pub service_id: String,
    /// The reference date for availability; the server's current date when absent.
    #[serde(default)]
    pub today: Option<String>,
}

/// A customer command as it arrives on the wire.
///
/// Tagged by `type`, e.g. `{"type": "select_date", "date": "2026-10-20"}`.
/// Submission commands are not part of this set; they are issued by the
/// orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandRequest {
    /// Choose the service date.
    SelectDate {
        /// `YYYY-MM-DD`.
        date: String,
    },
    /// Choose the service time.
    SelectTime {
        /// `HH:MM`.
        time: String,
    },
    /// Choose the provider.
    SelectProvider {
        /// Catalog provider identifier.
        provider_id: String,
    },
    /// Add or remove an add-on.
    ToggleAddon {
        /// Catalog add-on identifier.
        addon_id: String,
    },
    /// Turn urgent service on or off.
    SetUrgent {
        /// Whether urgent service is wanted.
        urgent: bool,
    },
    /// Set the service address.
    SetAddress {
        /// The address.
        address: String,
    },
    /// Set the contact phone number.
    SetPhone {
        /// The phone number as entered.
        phone: String,
    },
    /// Set the payment method.
    SetPaymentMethod {
        /// `card` or `cash`.
        method: String,
    },
    /// Set the contact preference.
    SetContactPreference {
        /// `phone`, `sms` or `email`.
        preference: String,
    },
    /// Set or clear the notes.
    SetNotes {
        /// The notes; null or blank clears them.
        #[serde(default)]
        notes: Option<String>,
    },
    /// Move to the next step if the current one passes validation.
    Advance,
    /// Move to the previous step.
    Retreat,
    /// Discard the draft and start over.
    Cancel,
    /// Clear the general error message.
    DismissError,
}

impl CommandRequest {
    /// Converts the request into a core command.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if a date or time is malformed, or if
    /// the payment method or contact preference is not recognised.
    pub fn into_command(self) -> Result<Command, ApiError> {
        let command: Command = match self {
            Self::SelectDate { date } => Command::SelectDate {
                date: parse_date("date", &date)?,
            },
            Self::SelectTime { time } => Command::SelectTime {
                time: parse_time("time", &time)?,
            },
            Self::SelectProvider { provider_id } => Command::SelectProvider {
                provider_id: ProviderId::new(&provider_id),
            },
            Self::ToggleAddon { addon_id } => Command::ToggleAddon {
                addon_id: AddonId::new(&addon_id),
            },
            Self::SetUrgent { urgent } => Command::SetUrgent { urgent },
            Self::SetAddress { address } => Command::SetAddress { address },
            Self::SetPhone { phone } => Command::SetPhone { phone },
            Self::SetPaymentMethod { method } => Command::SetPaymentMethod {
                method: method
                    .parse::<PaymentMethod>()
                    .map_err(translate_domain_error)?,
            },
            Self::SetContactPreference { preference } => Command::SetContactPreference {
                preference: preference
                    .parse::<ContactPreference>()
                    .map_err(translate_domain_error)?,
            },
            Self::SetNotes { notes } => Command::SetNotes { notes },
            Self::Advance => Command::Advance,
            Self::Retreat => Command::Retreat,
            Self::Cancel => Command::Cancel,
            Self::DismissError => Command::DismissError,
        };
        Ok(command)
    }
}

/// Itemised price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct PriceView {
    /// The service's base price.
    pub base_price: u64,
    /// The fixed service fee.
    pub service_fee: u64,
    /// Sum of the selected add-on prices.
    pub addons_total: u64,
    /// Urgent surcharge, zero when not urgent.
    pub urgent_fee: u64,
    /// Amount payable.
    pub total: u64,
}

impl From<PriceBreakdown> for PriceView {
    fn from(price: PriceBreakdown) -> Self {
        Self {
            base_price: price.base_price(),
            service_fee: price.service_fee(),
            addons_total: price.addons_total(),
            urgent_fee: price.urgent_fee(),
            total: price.total(),
        }
    }
}

/// A bookable day.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct DateSlotView {
    /// `YYYY-MM-DD`.
    pub date: String,
    /// Display label.
    pub label: String,
    /// Blacked out.
    pub unavailable: bool,
    /// Saturday or Sunday.
    pub weekend: bool,
}

impl From<&DateSlot> for DateSlotView {
    fn from(slot: &DateSlot) -> Self {
        Self {
            date: format_date(slot.date),
            label: slot.label.clone(),
            unavailable: slot.unavailable,
            weekend: slot.weekend,
        }
    }
}

/// A bookable time.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct TimeSlotView {
    /// `HH:MM`.
    pub time: String,
    /// Display label.
    pub label: String,
    /// Taken by an existing reservation.
    pub booked: bool,
    /// Frequently chosen.
    pub popular: bool,
}

impl From<&TimeSlot> for TimeSlotView {
    fn from(slot: &TimeSlot) -> Self {
        Self {
            time: format_time(slot.time),
            label: slot.label.clone(),
            booked: slot.booked,
            popular: slot.popular,
        }
    }
}

/// The draft's current selections.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct DraftView {
    /// Selected date.
    pub date: Option<String>,
    /// Selected time.
    pub time: Option<String>,
    /// Selected provider identifier.
    pub provider_id: Option<String>,
    /// Selected add-on identifiers in identifier order.
    pub addon_ids: Vec<String>,
    /// Service address.
    pub address: String,
    /// Contact phone.
    pub phone: String,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Contact preference.
    pub contact_preference: ContactPreference,
    /// Notes for the provider.
    pub notes: Option<String>,
    /// Urgent service requested.
    pub urgent: bool,
}

impl From<&BookingDraft> for DraftView {
    fn from(draft: &BookingDraft) -> Self {
        Self {
            date: draft.date().map(|slot| format_date(slot.date)),
            time: draft.time().map(|slot| format_time(slot.time)),
            provider_id: draft.provider().map(|provider| provider.id.to_string()),
            addon_ids: draft.addons().map(|addon| addon.id.to_string()).collect(),
            address: draft.details().address.clone(),
            phone: draft.details().phone.clone(),
            payment_method: draft.details().payment_method,
            contact_preference: draft.details().contact_preference,
            notes: draft.details().notes.clone(),
            urgent: draft.urgent(),
        }
    }
}

/// API response describing a booking session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct SessionView {
    /// The session identifier.
    pub session_id: u64,
    /// Current step number (1 to 4).
    pub step: u8,
    /// Current step title.
    pub step_title: String,
    /// Transition counter.
    pub version: u64,
    /// Draft generation.
    pub generation: u64,
    /// The booked service.
    pub service: Service,
    /// Offered add-ons.
    pub addons: Vec<Addon>,
    /// Provider pool.
    pub providers: Vec<Provider>,
    /// Offered dates.
    pub date_slots: Vec<DateSlotView>,
    /// Offered times.
    pub time_slots: Vec<TimeSlotView>,
    /// The draft.
    pub draft: DraftView,
    /// Field errors from the last blocked advance, keyed by field.
    pub field_errors: BTreeMap<String, String>,
    /// General (non-field) error.
    pub general_error: Option<String>,
    /// Current price.
    pub price: PriceView,
    /// Estimated visit length in minutes.
    pub estimated_duration_minutes: u32,
    /// Whether a submission is in flight.
    pub submitting: bool,
    /// Reference of the most recent confirmation in this session.
    pub last_confirmation: Option<String>,
}

impl SessionView {
    /// Builds the view of a session.
    #[must_use]
    pub fn new(session: &BookingSession, submitting: bool) -> Self {
        let catalog = session.catalog();
        Self {
            session_id: session.session_id().value(),
            step: session.step().number(),
            step_title: session.step().title().to_string(),
            version: session.version(),
            generation: session.generation(),
            service: catalog.service.clone(),
            addons: catalog.addons.clone(),
            providers: catalog.providers.clone(),
            date_slots: catalog
                .availability
                .date_slots
                .iter()
                .map(DateSlotView::from)
                .collect(),
            time_slots: catalog
                .availability
                .time_slots
                .iter()
                .map(TimeSlotView::from)
                .collect(),
            draft: DraftView::from(session.draft()),
            field_errors: session
                .field_errors()
                .iter()
                .map(|(field, message)| (field.as_str().to_string(), message.to_string()))
                .collect(),
            general_error: session.general_error().map(str::to_string),
            price: PriceView::from(session.price()),
            estimated_duration_minutes: estimated_duration_minutes(session.draft()),
            submitting,
            last_confirmation: session.last_confirmation().map(str::to_string),
        }
    }
}

/// API response describing a confirmed booking.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ConfirmationView {
    /// Booking reference.
    pub reference: String,
    /// The session the booking was made in.
    pub session_id: u64,
    /// Service name.
    pub service_name: String,
    /// Booked date.
    pub date: String,
    /// Booked date label.
    pub date_label: String,
    /// Booked time.
    pub time: String,
    /// Booked time label.
    pub time_label: String,
    /// Assigned provider name.
    pub provider_name: String,
    /// Selected add-on names.
    pub addons: Vec<String>,
    /// Service address.
    pub address: String,
    /// Contact phone.
    pub phone: String,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Contact preference.
    pub contact_preference: ContactPreference,
    /// Notes for the provider.
    pub notes: Option<String>,
    /// Urgent service requested.
    pub urgent: bool,
    /// Final price.
    pub price: PriceView,
    /// Estimated visit length in minutes.
    pub estimated_duration_minutes: u32,
    /// Earliest expected arrival, `YYYY-MM-DD HH:MM`.
    pub arrival_window_start: String,
    /// Latest expected arrival, `YYYY-MM-DD HH:MM`.
    pub arrival_window_end: String,
    /// When the booking was confirmed (RFC 3339).
    pub confirmed_at: String,
}

impl From<&BookingConfirmation> for ConfirmationView {
    fn from(confirmation: &BookingConfirmation) -> Self {
        let booking = &confirmation.booking;
        let draft: &BookingDraft = booking.draft();
        Self {
            reference: confirmation.reference.clone(),
            session_id: confirmation.session_id.value(),
            service_name: draft.service().name.clone(),
            date: format_date(booking.date().date),
            date_label: booking.date().label.clone(),
            time: format_time(booking.time().time),
            time_label: booking.time().label.clone(),
            provider_name: booking.provider().name.clone(),
            addons: draft.addons().map(|addon| addon.name.clone()).collect(),
            address: draft.details().address.clone(),
            phone: draft.details().phone.clone(),
            payment_method: draft.details().payment_method,
            contact_preference: draft.details().contact_preference,
            notes: draft.details().notes.clone(),
            urgent: draft.urgent(),
            price: PriceView::from(confirmation.price),
            estimated_duration_minutes: confirmation.estimated_duration_minutes,
            arrival_window_start: format_date_time(confirmation.arrival_window.start),
            arrival_window_end: format_date_time(confirmation.arrival_window.end),
            confirmed_at: confirmation
                .confirmed_at
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_else(|_| confirmation.confirmed_at.to_string()),
        }
    }
}

/// API error body.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Field-scoped messages, keyed by field.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}

impl ErrorResponse {
    /// Builds the body for an API error.
    #[must_use]
    pub fn from_api_error(err: &ApiError) -> Self {
        let fields: BTreeMap<String, String> = match err {
            ApiError::IncompleteStep { errors, .. } => errors
                .iter()
                .map(|(field, message)| (field.as_str().to_string(), message.to_string()))
                .collect(),
            ApiError::InvalidInput { field, message } => {
                BTreeMap::from([(field.clone(), message.clone())])
            }
            _ => BTreeMap::new(),
        };
        Self {
            error: err.to_string(),
            fields,
        }
    }

    /// Builds a body with no field messages.
    #[must_use]
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            fields: BTreeMap::new(),
        }
    }
}
