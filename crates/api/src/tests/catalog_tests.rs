// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_catalog, create_test_service_id};
use crate::{ApiError, CatalogProvider, InMemoryCatalog};
use homebook_domain::ServiceId;

#[test]
fn test_builtin_catalog_loads() {
    let catalog: InMemoryCatalog = InMemoryCatalog::builtin().unwrap();
    let services = catalog.list_services();

    assert!(!services.is_empty());
    for service in &services {
        assert!(service.price > 0);
        assert!(!catalog.list_providers(&service.id).is_empty());
    }
}

#[test]
fn test_builtin_catalog_offers_unavailable_provider() {
    let catalog: InMemoryCatalog = InMemoryCatalog::builtin().unwrap();
    let providers = catalog.list_providers(&ServiceId::new("deep-cleaning"));

    assert!(providers.iter().any(|p| p.available));
    assert!(providers.iter().any(|p| !p.available));
}

#[test]
fn test_lookups_for_known_service() {
    let catalog: InMemoryCatalog = create_test_catalog();
    let id: ServiceId = create_test_service_id();

    assert_eq!(catalog.service(&id).unwrap().price, 1200);
    assert_eq!(catalog.list_addons(&id).len(), 2);
    assert_eq!(catalog.list_providers(&id).len(), 2);
}

#[test]
fn test_lookups_for_unknown_service_are_empty() {
    let catalog: InMemoryCatalog = create_test_catalog();
    let id: ServiceId = ServiceId::new("roofing");

    assert!(catalog.service(&id).is_none());
    assert!(catalog.list_addons(&id).is_empty());
    assert!(catalog.list_providers(&id).is_empty());
}

#[test]
fn test_from_json_reads_ratings_and_defaults() {
    let json: &str = r#"{
        "services": [{
            "service": {
                "id": "pest-control",
                "name": "Pest Control",
                "category": "hygiene",
                "description": "Cockroach and ant treatment",
                "price": 1499,
                "duration_minutes": 120,
                "icon": "bug"
            },
            "providers": [{
                "id": "meena-j",
                "name": "Meena Joshi",
                "rating": 4.6,
                "review_count": 75,
                "specialties": ["Gel treatment"],
                "available": true
            }]
        }]
    }"#;

    let catalog: InMemoryCatalog = InMemoryCatalog::from_json(json).unwrap();
    let id: ServiceId = ServiceId::new("pest-control");

    assert!(catalog.list_addons(&id).is_empty());
    assert_eq!(catalog.list_providers(&id)[0].rating.tenths(), 46);
}

#[test]
fn test_from_json_rejects_rating_above_five() {
    let json: &str = r#"{
        "services": [{
            "service": {
                "id": "s", "name": "S", "category": "c", "description": "d",
                "price": 100, "duration_minutes": 30, "icon": "i"
            },
            "providers": [{
                "id": "p", "name": "P", "rating": 5.5, "review_count": 1,
                "specialties": [], "available": true
            }]
        }]
    }"#;

    assert!(matches!(
        InMemoryCatalog::from_json(json),
        Err(ApiError::CatalogLoad { .. })
    ));
}

#[test]
fn test_from_json_rejects_duplicate_service() {
    let service: &str = r#"{"service": {
        "id": "dup", "name": "S", "category": "c", "description": "d",
        "price": 100, "duration_minutes": 30, "icon": "i"
    }}"#;
    let json: String = format!(r#"{{"services": [{service}, {service}]}}"#);

    let err: ApiError = InMemoryCatalog::from_json(&json).unwrap_err();

    assert_eq!(
        err,
        ApiError::CatalogLoad {
            message: String::from("duplicate service identifier 'dup'")
        }
    );
}

#[test]
fn test_from_json_rejects_malformed_document() {
    assert!(matches!(
        InMemoryCatalog::from_json("{\"services\": 3}"),
        Err(ApiError::CatalogLoad { .. })
    ));
}
