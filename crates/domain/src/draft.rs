// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::availability::{DateSlot, TimeSlot};
use crate::types::{Addon, AddonId, ContactPreference, PaymentMethod, Provider, Service};
use std::collections::BTreeMap;

/// Customer-entered details collected in step 3.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomerDetails {
    /// Service address.
    pub address: String,
    /// Contact phone number as entered.
    pub phone: String,
    /// Chosen payment method.
    pub payment_method: PaymentMethod,
    /// Preferred contact channel.
    pub contact_preference: ContactPreference,
    /// Optional free-text notes for the provider.
    pub notes: Option<String>,
}

/// The booking under construction.
///
/// The service is fixed when the draft is created. Selections that would
/// violate availability (a blacked-out date, a booked time, an unavailable
/// provider) are refused by the selection methods, so a draft never holds them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    service: Service,
    date: Option<DateSlot>,
    time: Option<TimeSlot>,
    provider: Option<Provider>,
    addons: BTreeMap<AddonId, Addon>,
    details: CustomerDetails,
    urgent: bool,
}

impl BookingDraft {
    /// Creates an empty draft for a service.
    #[must_use]
    pub fn new(service: Service) -> Self {
        Self {
            service,
            date: None,
            time: None,
            provider: None,
            addons: BTreeMap::new(),
            details: CustomerDetails::default(),
            urgent: false,
        }
    }

    /// Returns the booked service.
    #[must_use]
    pub const fn service(&self) -> &Service {
        &self.service
    }

    /// Returns the selected date slot.
    #[must_use]
    pub const fn date(&self) -> Option<&DateSlot> {
        self.date.as_ref()
    }

    /// Returns the selected time slot.
    #[must_use]
    pub const fn time(&self) -> Option<&TimeSlot> {
        self.time.as_ref()
    }

    /// Returns the selected provider.
    #[must_use]
    pub const fn provider(&self) -> Option<&Provider> {
        self.provider.as_ref()
    }

    /// Returns the selected add-ons, ordered by identifier.
    pub fn addons(&self) -> impl Iterator<Item = &Addon> {
        self.addons.values()
    }

    /// Returns whether an add-on is selected.
    #[must_use]
    pub fn has_addon(&self, id: &AddonId) -> bool {
        self.addons.contains_key(id)
    }

    /// Returns the customer details.
    #[must_use]
    pub const fn details(&self) -> &CustomerDetails {
        &self.details
    }

    /// Returns whether urgent service was requested.
    #[must_use]
    pub const fn urgent(&self) -> bool {
        self.urgent
    }

    /// Selects a date. Returns `false` and leaves the draft unchanged if the
    /// slot is unavailable.
    pub fn select_date(&mut self, slot: DateSlot) -> bool {
        if slot.unavailable {
            return false;
        }
        self.date = Some(slot);
        true
    }

    /// Selects a time. Returns `false` and leaves the draft unchanged if the
    /// slot is already booked.
    pub fn select_time(&mut self, slot: TimeSlot) -> bool {
        if slot.booked {
            return false;
        }
        self.time = Some(slot);
        true
    }

    /// Selects a provider. Returns `false` and leaves the draft unchanged if
    /// the provider is not available.
    pub fn select_provider(&mut self, provider: Provider) -> bool {
        if !provider.available {
            return false;
        }
        self.provider = Some(provider);
        true
    }

    /// Adds the add-on if absent, removes it if present.
    ///
    /// Returns `true` if the add-on is selected after the call.
    pub fn toggle_addon(&mut self, addon: Addon) -> bool {
        if self.addons.remove(&addon.id).is_some() {
            return false;
        }
        self.addons.insert(addon.id.clone(), addon);
        true
    }

    /// Sets the urgent-service flag.
    pub const fn set_urgent(&mut self, urgent: bool) {
        self.urgent = urgent;
    }

    /// Sets the service address.
    pub fn set_address(&mut self, address: String) {
        self.details.address = address;
    }

    /// Sets the contact phone number.
    pub fn set_phone(&mut self, phone: String) {
        self.details.phone = phone;
    }

    /// Sets the payment method.
    pub const fn set_payment_method(&mut self, method: PaymentMethod) {
        self.details.payment_method = method;
    }

    /// Sets the contact preference.
    pub const fn set_contact_preference(&mut self, preference: ContactPreference) {
        self.details.contact_preference = preference;
    }

    /// Sets the notes. Blank notes are stored as `None`.
    pub fn set_notes(&mut self, notes: Option<String>) {
        self.details.notes = notes.filter(|n| !n.trim().is_empty());
    }
}
