// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! The asynchronous boundary around booking sessions.
//!
//! This crate owns everything that is not a pure transition: catalog lookup,
//! availability pools, the shared slot ledger, the booking backend and the
//! per-session orchestrators that serialise commands and submissions.

mod catalog;
mod error;
mod ledger;
mod orchestrator;
mod policy;
mod registry;
mod request_response;
mod submitter;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogEntry, CatalogProvider, InMemoryCatalog};
pub use error::{ApiError, SubmissionError, translate_core_error, translate_domain_error};
pub use ledger::{SlotClaim, SlotKey, SlotLedger};
pub use orchestrator::{BookingOrchestrator, CommandOutcome};
pub use policy::AvailabilityPolicy;
pub use registry::SessionRegistry;
pub use request_response::{
    CommandRequest, ConfirmationView, DateSlotView, DraftView, ErrorResponse,
    OpenSessionRequest, PriceView, SessionView, TimeSlotView, format_date, format_time,
    parse_date, parse_time,
};
pub use submitter::{BackendError, BookingBackend, ConfirmationListener, SimulatedBackend};
