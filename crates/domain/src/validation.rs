// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::draft::BookingDraft;
use crate::error::DomainError;
use crate::types::{Field, Step};
use std::collections::BTreeMap;

/// Country calling code accepted in front of a mobile number.
const INDIA_CALLING_CODE: &str = "+91";

/// Digits in a mobile number without the calling code.
const MOBILE_DIGITS: usize = 10;

/// Field-scoped validation messages produced by a step gate.
///
/// An empty set means the step passes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    /// Creates an empty error set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Records a message for a field, replacing any previous one.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Clears the message for a field.
    pub fn remove(&mut self, field: Field) {
        self.0.remove(&field);
    }

    /// Returns the message for a field.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Returns whether a field has an error.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Returns whether there are no errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of fields with errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the errors in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first: bool = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Runs the gate for a single wizard step.
///
/// The validator is stateless: it inspects only the draft it is given.
///
/// # Arguments
///
/// * `step` - The step whose gate to run
/// * `draft` - The draft to inspect
///
/// # Returns
///
/// The field errors for the step; empty when the step passes.
/// Step 4 has no fields of its own and always passes.
#[must_use]
pub fn validate_step(step: Step, draft: &BookingDraft) -> FieldErrors {
    let mut errors: FieldErrors = FieldErrors::new();

    match step {
        Step::DateTime => {
            match draft.date() {
                None => errors.insert(Field::Date, "Please select a date"),
                Some(slot) if slot.unavailable => {
                    errors.insert(Field::Date, "The selected date is not available");
                }
                Some(_) => {}
            }
            match draft.time() {
                None => errors.insert(Field::Time, "Please select a time"),
                Some(slot) if slot.booked => {
                    errors.insert(Field::Time, "The selected time is already booked");
                }
                Some(_) => {}
            }
        }
        Step::Provider => match draft.provider() {
            None => errors.insert(Field::Provider, "Please select a service provider"),
            Some(provider) if !provider.available => {
                errors.insert(Field::Provider, "The selected provider is not available");
            }
            Some(_) => {}
        },
        Step::Details => {
            if draft.details().address.trim().is_empty() {
                errors.insert(Field::Address, "Address is required");
            }
            let phone: &str = &draft.details().phone;
            if phone.trim().is_empty() {
                errors.insert(Field::Phone, "Phone number is required");
            } else if !is_valid_phone(phone) {
                errors.insert(Field::Phone, "Please enter a valid Indian mobile number");
            }
        }
        Step::Confirmation => {}
    }

    errors
}

/// Runs the gates of every step before `step`.
///
/// # Errors
///
/// Returns `DomainError::IncompleteDraft` naming the first step whose gate
/// fails, together with that step's field errors.
pub fn validate_steps_before(step: Step, draft: &BookingDraft) -> Result<(), DomainError> {
    for gate in Step::ALL.into_iter().take_while(|s| *s < step) {
        let errors: FieldErrors = validate_step(gate, draft);
        if !errors.is_empty() {
            return Err(DomainError::IncompleteDraft { step: gate, errors });
        }
    }
    Ok(())
}

/// Checks a phone number against the Indian mobile format.
///
/// Internal whitespace is ignored. Accepted forms are ten bare digits, or
/// `+91` followed by ten digits.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    let digits: &str = compact
        .strip_prefix(INDIA_CALLING_CODE)
        .unwrap_or(compact.as_str());

    digits.len() == MOBILE_DIGITS && digits.chars().all(|c| c.is_ascii_digit())
}
