// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ContactPreference, DomainError, Field, PaymentMethod, Provider, Rating, Step};
use std::str::FromStr;

#[test]
fn test_step_navigation() {
    assert_eq!(Step::DateTime.next(), Some(Step::Provider));
    assert_eq!(Step::Confirmation.next(), None);
    assert_eq!(Step::DateTime.previous(), None);
    assert_eq!(Step::Confirmation.previous(), Some(Step::Details));
}

#[test]
fn test_step_numbers_are_ordered() {
    let numbers: Vec<u8> = Step::ALL.iter().map(Step::number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
}

#[test]
fn test_field_owning_steps() {
    assert_eq!(Field::Date.step(), Step::DateTime);
    assert_eq!(Field::Time.step(), Step::DateTime);
    assert_eq!(Field::Provider.step(), Step::Provider);
    assert_eq!(Field::Address.step(), Step::Details);
    assert_eq!(Field::Phone.step(), Step::Details);
}

#[test]
fn test_payment_method_parsing() {
    assert_eq!(PaymentMethod::from_str("cash").unwrap(), PaymentMethod::Cash);
    assert_eq!(PaymentMethod::default(), PaymentMethod::Card);
    assert!(matches!(
        PaymentMethod::from_str("cheque"),
        Err(DomainError::InvalidPaymentMethod(_))
    ));
}

#[test]
fn test_contact_preference_parsing() {
    assert_eq!(ContactPreference::from_str("sms").unwrap(), ContactPreference::Sms);
    assert_eq!(ContactPreference::Email.to_string(), "email");
    assert!(ContactPreference::from_str("fax").is_err());
}

#[test]
fn test_rating_bounds() {
    assert_eq!(Rating::try_from(4.8_f32).unwrap().tenths(), 48);
    assert!(Rating::try_from(5.1_f32).is_err());
    assert!(Rating::try_from(-0.5_f32).is_err());
    assert!(Rating::try_from(f32::NAN).is_err());
    assert!(Rating::from_tenths(51).is_err());
}

#[test]
fn test_provider_deserializes_from_catalog_json() {
    let json: &str = r#"{
        "id": "p7",
        "name": "Asha Verma",
        "rating": 4.9,
        "review_count": 212,
        "specialties": ["Plumbing", "Leak repair"],
        "available": true
    }"#;

    let provider: Provider = serde_json::from_str(json).unwrap();
    assert_eq!(provider.id.value(), "p7");
    assert_eq!(provider.rating.tenths(), 49);
    assert_eq!(provider.specialties.len(), 2);
}

#[test]
fn test_provider_rejects_out_of_range_rating() {
    let json: &str = r#"{
        "id": "p8",
        "name": "Bad Rating",
        "rating": 7.5,
        "review_count": 1,
        "specialties": [],
        "available": true
    }"#;

    assert!(serde_json::from_str::<Provider>(json).is_err());
}
