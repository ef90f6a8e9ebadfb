// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The booking backend and the confirmation boundary.

use homebook_domain::{BookingConfirmation, ValidatedBooking};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// A backend failure, worded for the customer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BackendError {
    /// What went wrong.
    pub message: String,
}

impl BackendError {
    /// Creates a backend error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Accepts validated bookings and assigns them a reference.
pub trait BookingBackend: Send + Sync {
    /// Submits a booking.
    ///
    /// # Errors
    ///
    /// Returns a `BackendError` if the booking could not be accepted.
    fn submit(
        &self,
        booking: &ValidatedBooking,
    ) -> impl Future<Output = Result<String, BackendError>> + Send;
}

/// Receives every confirmed booking exactly once.
///
/// This is where a confirmation leaves the orchestrator for persistence or
/// notification.
pub trait ConfirmationListener: Send + Sync {
    /// Called after the session has recorded the confirmation.
    fn on_confirmed(&self, confirmation: &BookingConfirmation);
}

/// A backend that waits a fixed latency and then accepts every booking.
#[derive(Debug)]
pub struct SimulatedBackend {
    latency: Duration,
    failure: Option<String>,
    issued: AtomicU64,
}

impl SimulatedBackend {
    /// Creates a backend that accepts every booking after `latency`.
    #[must_use]
    pub const fn new(latency: Duration) -> Self {
        Self {
            latency,
            failure: None,
            issued: AtomicU64::new(0),
        }
    }

    /// Creates a backend that rejects every booking after `latency`.
    #[must_use]
    pub fn failing(latency: Duration, message: impl Into<String>) -> Self {
        Self {
            latency,
            failure: Some(message.into()),
            issued: AtomicU64::new(0),
        }
    }

    /// Returns how many references have been issued.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }
}

impl BookingBackend for SimulatedBackend {
    async fn submit(&self, booking: &ValidatedBooking) -> Result<String, BackendError> {
        tokio::time::sleep(self.latency).await;

        if let Some(message) = &self.failure {
            return Err(BackendError::new(message.clone()));
        }

        let number: u64 = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let reference: String = format!("HB-{number:06}");
        debug!(
            reference = %reference,
            scheduled_at = %booking.scheduled_at(),
            "Simulated backend accepted booking"
        );
        Ok(reference)
    }
}
