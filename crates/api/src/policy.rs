// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use homebook_domain::{
    AvailabilitySnapshot, DEFAULT_WINDOW_DAYS, generate_date_slots, generate_time_slots,
};
use std::collections::BTreeSet;
use time::Date;
use time::Time;
use time::macros::time;

/// Existing reservations and operating constraints used to mark slots.
///
/// The policy is fixed when the process starts; every session opened on a
/// given day sees the same pools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityPolicy {
    /// Number of days offered after today.
    pub window_days: u16,
    /// Day offsets (1-based) that are blacked out.
    pub blackout_offsets: BTreeSet<u16>,
    /// Times already taken by existing reservations.
    pub booked_times: BTreeSet<Time>,
    /// Times flagged as popular.
    pub popular_times: BTreeSet<Time>,
}

impl Default for AvailabilityPolicy {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            blackout_offsets: BTreeSet::from([3, 9]),
            booked_times: BTreeSet::from([time!(9:30), time!(13:00), time!(15:30)]),
            popular_times: BTreeSet::from([time!(10:00), time!(14:00)]),
        }
    }
}

impl AvailabilityPolicy {
    /// Generates the slot pools for a session opened on `today`.
    #[must_use]
    pub fn snapshot(&self, today: Date) -> AvailabilitySnapshot {
        AvailabilitySnapshot::new(
            generate_date_slots(today, self.window_days, &self.blackout_offsets),
            generate_time_slots(&self.booked_times, &self.popular_times),
        )
    }
}
