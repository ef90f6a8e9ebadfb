// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only catalog lookups.

use crate::error::ApiError;
use homebook_domain::{Addon, Provider, Service, ServiceId};
use serde::Deserialize;
use std::collections::BTreeSet;

/// The catalog shipped with the binary.
const BUILTIN_CATALOG: &str = include_str!("../data/builtin_catalog.json");

/// Supplies immutable service, add-on and provider records.
///
/// Lookups for a service that does not exist return an empty list; callers
/// that need to distinguish use [`CatalogProvider::service`].
pub trait CatalogProvider: Send + Sync {
    /// Lists every service in catalog order.
    fn list_services(&self) -> Vec<Service>;

    /// Finds a service by identifier.
    fn service(&self, id: &ServiceId) -> Option<Service>;

    /// Lists the add-ons offered for a service.
    fn list_addons(&self, service_id: &ServiceId) -> Vec<Addon>;

    /// Lists the provider pool for a service.
    fn list_providers(&self, service_id: &ServiceId) -> Vec<Provider>;
}

/// A service together with its add-ons and provider pool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    /// The service record.
    pub service: Service,
    /// Add-ons offered for the service.
    #[serde(default)]
    pub addons: Vec<Addon>,
    /// Providers that perform the service.
    #[serde(default)]
    pub providers: Vec<Provider>,
}

#[derive(Deserialize)]
struct CatalogDocument {
    services: Vec<CatalogEntry>,
}

/// A catalog held entirely in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryCatalog {
    entries: Vec<CatalogEntry>,
}

impl InMemoryCatalog {
    /// Creates a catalog from entries.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::CatalogLoad` if a service identifier is repeated,
    /// or if a service repeats an add-on or provider identifier.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, ApiError> {
        let mut service_ids: BTreeSet<&str> = BTreeSet::new();
        for entry in &entries {
            let service_id: &str = entry.service.id.value();
            if !service_ids.insert(service_id) {
                return Err(duplicate("service", service_id));
            }

            let mut addon_ids: BTreeSet<&str> = BTreeSet::new();
            if let Some(addon) = entry.addons.iter().find(|a| !addon_ids.insert(a.id.value())) {
                return Err(duplicate("add-on", addon.id.value()));
            }

            let mut provider_ids: BTreeSet<&str> = BTreeSet::new();
            if let Some(provider) = entry
                .providers
                .iter()
                .find(|p| !provider_ids.insert(p.id.value()))
            {
                return Err(duplicate("provider", provider.id.value()));
            }
        }

        Ok(Self { entries })
    }

    /// Parses a catalog document of the form `{ "services": [ ... ] }`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::CatalogLoad` if the document is malformed or
    /// contains duplicate identifiers.
    pub fn from_json(json: &str) -> Result<Self, ApiError> {
        let document: CatalogDocument =
            serde_json::from_str(json).map_err(|e| ApiError::CatalogLoad {
                message: e.to_string(),
            })?;
        Self::new(document.services)
    }

    /// Loads the built-in home services catalog.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::CatalogLoad` if the embedded document is invalid.
    pub fn builtin() -> Result<Self, ApiError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    fn entry(&self, id: &ServiceId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| &entry.service.id == id)
    }
}

impl CatalogProvider for InMemoryCatalog {
    fn list_services(&self) -> Vec<Service> {
        self.entries
            .iter()
            .map(|entry| entry.service.clone())
            .collect()
    }

    fn service(&self, id: &ServiceId) -> Option<Service> {
        self.entry(id).map(|entry| entry.service.clone())
    }

    fn list_addons(&self, service_id: &ServiceId) -> Vec<Addon> {
        self.entry(service_id)
            .map(|entry| entry.addons.clone())
            .unwrap_or_default()
    }

    fn list_providers(&self, service_id: &ServiceId) -> Vec<Provider> {
        self.entry(service_id)
            .map(|entry| entry.providers.clone())
            .unwrap_or_default()
    }
}

fn duplicate(kind: &str, id: &str) -> ApiError {
    ApiError::CatalogLoad {
        message: format!("duplicate {kind} identifier '{id}'"),
    }
}
