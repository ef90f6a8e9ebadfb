// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use homebook_audit::{AuditEvent, DraftSnapshot};
use homebook_domain::{
    Addon, AddonId, AvailabilitySnapshot, BookingDraft, Field, FieldErrors, PriceBreakdown,
    Provider, ProviderId, Service, SessionId, Step, compute_price,
};

/// The read-only catalog and availability data a session was opened with.
///
/// Captured once when the session starts and never refreshed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCatalog {
    /// The booked service.
    pub service: Service,
    /// Add-ons offered for the service.
    pub addons: Vec<Addon>,
    /// Providers offered for the service.
    pub providers: Vec<Provider>,
    /// Date and time slot pools.
    pub availability: AvailabilitySnapshot,
}

impl SessionCatalog {
    /// Creates a new session catalog.
    #[must_use]
    pub const fn new(
        service: Service,
        addons: Vec<Addon>,
        providers: Vec<Provider>,
        availability: AvailabilitySnapshot,
    ) -> Self {
        Self {
            service,
            addons,
            providers,
            availability,
        }
    }

    /// Finds an add-on by identifier.
    #[must_use]
    pub fn addon(&self, id: &AddonId) -> Option<&Addon> {
        self.addons.iter().find(|addon| &addon.id == id)
    }

    /// Finds a provider by identifier.
    #[must_use]
    pub fn provider(&self, id: &ProviderId) -> Option<&Provider> {
        self.providers.iter().find(|provider| &provider.id == id)
    }
}

/// One booking wizard session.
///
/// The session owns the draft. Its fields can only change through
/// [`crate::apply`] and [`crate::apply_confirmation`], which return a new
/// session rather than mutating this one. The price is recomputed on every
/// transition and is never stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSession {
    session_id: SessionId,
    catalog: SessionCatalog,
    draft: BookingDraft,
    step: Step,
    field_errors: FieldErrors,
    general_error: Option<String>,
    price: PriceBreakdown,
    version: u64,
    generation: u64,
    last_confirmation: Option<String>,
}

impl BookingSession {
    /// Opens a session at step 1 with an empty draft for the catalog's service.
    #[must_use]
    pub fn new(session_id: SessionId, catalog: SessionCatalog) -> Self {
        let draft: BookingDraft = BookingDraft::new(catalog.service.clone());
        let price: PriceBreakdown = compute_price(&draft);
        Self {
            session_id,
            catalog,
            draft,
            step: Step::DateTime,
            field_errors: FieldErrors::new(),
            general_error: None,
            price,
            version: 0,
            generation: 0,
            last_confirmation: None,
        }
    }

    /// Returns the session identifier.
    #[must_use]
    pub const fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Returns the catalog snapshot.
    #[must_use]
    pub const fn catalog(&self) -> &SessionCatalog {
        &self.catalog
    }

    /// Returns the draft.
    #[must_use]
    pub const fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Returns the current step.
    #[must_use]
    pub const fn step(&self) -> Step {
        self.step
    }

    /// Returns the field errors of the last blocked advance.
    #[must_use]
    pub const fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Returns the general (non-field) error, if any.
    #[must_use]
    pub fn general_error(&self) -> Option<&str> {
        self.general_error.as_deref()
    }

    /// Returns the current price.
    #[must_use]
    pub const fn price(&self) -> PriceBreakdown {
        self.price
    }

    /// Returns the transition counter.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the draft generation.
    ///
    /// The generation changes whenever the draft is discarded (cancel or
    /// confirmation), so it identifies the draft a submission was made for.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the reference of the most recent confirmation in this session.
    #[must_use]
    pub fn last_confirmation(&self) -> Option<&str> {
        self.last_confirmation.as_deref()
    }

    /// Converts the session to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> DraftSnapshot {
        let draft: &BookingDraft = &self.draft;
        let addons: Vec<&str> = draft.addons().map(|addon| addon.id.value()).collect();
        DraftSnapshot::new(
            self.step,
            self.version,
            self.generation,
            self.price.total(),
            format!(
                "service={},date={},time={},provider={},addons=[{}],urgent={}",
                draft.service().id,
                draft
                    .date()
                    .map_or_else(|| String::from("-"), |slot| slot.date.to_string()),
                draft
                    .time()
                    .map_or_else(|| String::from("-"), |slot| slot.time.to_string()),
                draft
                    .provider()
                    .map_or_else(|| String::from("-"), |provider| provider.id.to_string()),
                addons.join(","),
                draft.urgent()
            ),
        )
    }

    pub(crate) const fn draft_mut(&mut self) -> &mut BookingDraft {
        &mut self.draft
    }

    pub(crate) const fn set_step(&mut self, step: Step) {
        self.step = step;
    }

    pub(crate) fn set_field_errors(&mut self, errors: FieldErrors) {
        self.field_errors = errors;
    }

    pub(crate) fn clear_field_error(&mut self, field: Field) {
        self.field_errors.remove(field);
    }

    pub(crate) fn set_general_error(&mut self, message: Option<String>) {
        self.general_error = message;
    }

    /// Discards the draft and starts a new generation at step 1.
    pub(crate) fn reset_draft(&mut self) {
        self.draft = BookingDraft::new(self.catalog.service.clone());
        self.step = Step::DateTime;
        self.field_errors = FieldErrors::new();
        self.general_error = None;
        self.generation += 1;
    }

    pub(crate) fn set_last_confirmation(&mut self, reference: String) {
        self.last_confirmation = Some(reference);
    }

    /// Recomputes derived values and bumps the version. Called once at the
    /// end of every transition.
    pub(crate) fn finish_transition(&mut self) {
        self.price = compute_price(&self.draft);
        self.version += 1;
    }
}

/// What a successful transition did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// A draft value was changed.
    Updated,
    /// A selection was refused because the chosen slot or provider is not
    /// available; the draft is unchanged.
    SelectionRejected {
        /// The field the selection targeted.
        field: Field,
    },
    /// The step gate passed and the session moved forward.
    Advanced {
        /// The step that was left.
        from: Step,
        /// The step that was entered.
        to: Step,
    },
    /// The step gate failed; the session stayed in place.
    AdvanceBlocked {
        /// The gate's field errors.
        errors: FieldErrors,
    },
    /// The session moved back one step.
    Retreated {
        /// The step that was left.
        from: Step,
        /// The step that was entered.
        to: Step,
    },
    /// Nothing changed (advance at the last step, retreat at the first).
    Unchanged,
    /// The draft was discarded.
    Reset,
    /// A submission attempt started.
    SubmissionStarted,
    /// A submission attempt failed.
    SubmissionFailed,
    /// The booking was confirmed and the draft discarded.
    Confirmed {
        /// The confirmation reference.
        reference: String,
    },
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new session after the transition.
    pub new_state: BookingSession,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
    /// What the transition did.
    pub outcome: TransitionOutcome,
}
