// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::catalog::CatalogProvider;
use crate::error::{ApiError, translate_domain_error};
use crate::ledger::SlotLedger;
use crate::orchestrator::BookingOrchestrator;
use crate::policy::AvailabilityPolicy;
use crate::submitter::{BookingBackend, ConfirmationListener};
use homebook::{BookingSession, Command, SessionCatalog};
use homebook_audit::{Actor, Cause};
use homebook_domain::{DomainError, Service, ServiceId, SessionId};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;
use tokio::sync::RwLock;
use tracing::info;

/// The live booking sessions of the process.
///
/// Each session gets its own orchestrator. The catalog, availability policy,
/// backend, listener and slot ledger are shared.
pub struct SessionRegistry<C, B, L> {
    catalog: Arc<C>,
    policy: AvailabilityPolicy,
    backend: Arc<B>,
    listener: Arc<L>,
    ledger: Arc<SlotLedger>,
    sessions: RwLock<HashMap<SessionId, Arc<BookingOrchestrator<B, L>>>>,
    next_id: AtomicU64,
}

impl<C, B, L> SessionRegistry<C, B, L>
where
    C: CatalogProvider,
    B: BookingBackend,
    L: ConfirmationListener,
{
    /// Creates an empty registry.
    #[must_use]
    pub fn new(
        catalog: Arc<C>,
        policy: AvailabilityPolicy,
        backend: Arc<B>,
        listener: Arc<L>,
    ) -> Self {
        Self {
            catalog,
            policy,
            backend,
            listener,
            ledger: Arc::new(SlotLedger::new()),
            sessions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Returns the catalog sessions are opened against.
    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Returns the shared slot ledger.
    #[must_use]
    pub fn ledger(&self) -> &SlotLedger {
        &self.ledger
    }

    /// Opens a session for a service, with availability generated from `today`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ServiceNotFound` if the service is not in the catalog.
    pub async fn open(
        &self,
        service_id: &ServiceId,
        today: Date,
    ) -> Result<Arc<BookingOrchestrator<B, L>>, ApiError> {
        let service: Service = self.catalog.service(service_id).ok_or_else(|| {
            translate_domain_error(DomainError::UnknownService(service_id.clone()))
        })?;

        let session_catalog: SessionCatalog = SessionCatalog::new(
            service,
            self.catalog.list_addons(service_id),
            self.catalog.list_providers(service_id),
            self.policy.snapshot(today),
        );
        let session_id: SessionId = SessionId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let orchestrator: Arc<BookingOrchestrator<B, L>> = Arc::new(BookingOrchestrator::new(
            BookingSession::new(session_id, session_catalog),
            Arc::clone(&self.backend),
            Arc::clone(&self.listener),
            Arc::clone(&self.ledger),
        ));

        self.sessions
            .write()
            .await
            .insert(session_id, Arc::clone(&orchestrator));
        info!(session_id = %session_id, service_id = %service_id, today = %today, "Opened session");

        Ok(orchestrator)
    }

    /// Looks up a session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::SessionNotFound` if the session does not exist.
    pub async fn get(&self, session_id: SessionId) -> Result<Arc<BookingOrchestrator<B, L>>, ApiError> {
        self.sessions
            .read()
            .await
            .get(&session_id)
            .cloned()
            .ok_or(ApiError::SessionNotFound { session_id })
    }

    /// Cancels a session's draft and destroys the session.
    ///
    /// A submission still in flight for the session will find its draft
    /// discarded and drop its result.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::SessionNotFound` if the session does not exist.
    pub async fn close(&self, session_id: SessionId, actor: Actor, cause: Cause) -> Result<(), ApiError> {
        let orchestrator: Arc<BookingOrchestrator<B, L>> = self
            .sessions
            .write()
            .await
            .remove(&session_id)
            .ok_or(ApiError::SessionNotFound { session_id })?;

        orchestrator.execute(Command::Cancel, actor, cause).await?;
        info!(session_id = %session_id, "Closed session");
        Ok(())
    }

    /// Returns the number of open sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns whether no session is open.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
