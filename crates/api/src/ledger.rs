// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Slot claims shared by every session.
//!
//! The availability pools a session sees are a snapshot taken when it
//! opened. Two sessions can therefore both offer the same provider at the
//! same date and time. The ledger is the single place where such a slot is
//! taken, and taking it is atomic.

use homebook_domain::{ProviderId, ValidatedBooking};
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use time::{Date, Time};

/// One provider at one date and time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    /// The assigned provider.
    pub provider_id: ProviderId,
    /// The booked date.
    pub date: Date,
    /// The booked time.
    pub time: Time,
}

impl SlotKey {
    /// Returns the slot a validated booking occupies.
    #[must_use]
    pub fn for_booking(booking: &ValidatedBooking) -> Self {
        Self {
            provider_id: booking.provider().id.clone(),
            date: booking.date().date,
            time: booking.time().time,
        }
    }
}

impl std::fmt::Display for SlotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.provider_id, self.date, self.time)
    }
}

/// The set of slots taken by submitted or confirmed bookings.
#[derive(Debug, Default)]
pub struct SlotLedger {
    claimed: Mutex<HashSet<SlotKey>>,
}

impl SlotLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a slot.
    ///
    /// Returns `false` without changing anything if the slot is already claimed.
    pub fn try_claim(&self, key: SlotKey) -> bool {
        self.claimed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key)
    }

    /// Claims a slot for as long as the returned guard lives.
    ///
    /// Returns `None` if the slot is already claimed. Dropping the guard
    /// releases the slot unless [`SlotClaim::keep`] was called.
    pub fn claim(&self, key: SlotKey) -> Option<SlotClaim<'_>> {
        self.try_claim(key.clone()).then(|| SlotClaim {
            ledger: self,
            key,
            kept: false,
        })
    }

    /// Releases a claim. Releasing an unclaimed slot does nothing.
    pub fn release(&self, key: &SlotKey) {
        self.claimed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    /// Returns whether a slot is claimed.
    #[must_use]
    pub fn is_claimed(&self, key: &SlotKey) -> bool {
        self.claimed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }

    /// Returns the number of claimed slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.claimed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns whether no slot is claimed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A slot held in a [`SlotLedger`].
#[must_use]
#[derive(Debug)]
pub struct SlotClaim<'a> {
    ledger: &'a SlotLedger,
    key: SlotKey,
    kept: bool,
}

impl SlotClaim<'_> {
    /// Returns the claimed slot.
    #[must_use]
    pub const fn key(&self) -> &SlotKey {
        &self.key
    }

    /// Keeps the slot claimed after the guard is gone.
    pub fn keep(mut self) {
        self.kept = true;
    }
}

impl Drop for SlotClaim<'_> {
    fn drop(&mut self) {
        if !self.kept {
            self.ledger.release(&self.key);
        }
    }
}
