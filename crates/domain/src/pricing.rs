// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Price and duration calculation for a draft.
//!
//! The total is always derived: there is no way to set it directly.

use crate::draft::BookingDraft;

/// Flat fee charged on every booking.
pub const SERVICE_FEE: u64 = 150;

/// Surcharge applied when urgent service is requested.
pub const URGENT_FEE: u64 = 500;

/// The itemised price of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PriceBreakdown {
    base_price: u64,
    service_fee: u64,
    addons_total: u64,
    urgent_fee: u64,
    total: u64,
}

impl PriceBreakdown {
    /// Returns the service's base price.
    #[must_use]
    pub const fn base_price(&self) -> u64 {
        self.base_price
    }

    /// Returns the fixed service fee.
    #[must_use]
    pub const fn service_fee(&self) -> u64 {
        self.service_fee
    }

    /// Returns the sum of the selected add-on prices.
    #[must_use]
    pub const fn addons_total(&self) -> u64 {
        self.addons_total
    }

    /// Returns the urgent surcharge, zero when not urgent.
    #[must_use]
    pub const fn urgent_fee(&self) -> u64 {
        self.urgent_fee
    }

    /// Returns the amount payable.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }
}

/// Computes the price of a draft.
///
/// `total = base + SERVICE_FEE + Σ add-ons + (urgent ? URGENT_FEE : 0)`
#[must_use]
pub fn compute_price(draft: &BookingDraft) -> PriceBreakdown {
    let base_price: u64 = u64::from(draft.service().price);
    let addons_total: u64 = draft.addons().map(|addon| u64::from(addon.price)).sum();
    let urgent_fee: u64 = if draft.urgent() { URGENT_FEE } else { 0 };

    PriceBreakdown {
        base_price,
        service_fee: SERVICE_FEE,
        addons_total,
        urgent_fee,
        total: base_price + SERVICE_FEE + addons_total + urgent_fee,
    }
}

/// Estimates the visit length in minutes: the service's nominal duration
/// adjusted by each selected add-on, never below zero.
#[must_use]
pub fn estimated_duration_minutes(draft: &BookingDraft) -> u32 {
    let delta: i64 = draft
        .addons()
        .map(|addon| i64::from(addon.duration_delta_minutes))
        .sum();
    let minutes: i64 = i64::from(draft.service().duration_minutes) + delta;
    u32::try_from(minutes.max(0)).unwrap_or(u32::MAX)
}
