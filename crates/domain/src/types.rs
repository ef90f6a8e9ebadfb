// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier.
            #[must_use]
            pub fn new(value: &str) -> Self {
                Self(value.to_string())
            }

            /// Returns the identifier value.
            #[must_use]
            pub fn value(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Catalog identifier of a bookable service.
    ServiceId
);
string_id!(
    /// Catalog identifier of an add-on line item.
    AddonId
);
string_id!(
    /// Catalog identifier of a service provider.
    ProviderId
);

/// Identifies one booking wizard session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(u64);

impl SessionId {
    /// Creates a new session identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bookable home service.
///
/// Services are read-only catalog records. The base price is in whole
/// currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// The catalog identifier.
    pub id: ServiceId,
    /// Display name.
    pub name: String,
    /// Grouping used by the catalog (e.g. "cleaning").
    pub category: String,
    /// Customer-facing description.
    pub description: String,
    /// Base price in currency units.
    pub price: u32,
    /// Nominal duration in minutes.
    pub duration_minutes: u32,
    /// Display icon key.
    pub icon: String,
}

/// An optional supplementary line item for a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addon {
    /// The catalog identifier.
    pub id: AddonId,
    /// Display name.
    pub name: String,
    /// Customer-facing description.
    pub description: String,
    /// Price in currency units.
    pub price: u32,
    /// Minutes added to (or removed from) the nominal service duration.
    pub duration_delta_minutes: i32,
}

/// A provider rating between 0.0 and 5.0, stored in tenths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Rating(u8);

impl Rating {
    /// The highest possible rating in tenths.
    pub const MAX_TENTHS: u8 = 50;

    /// Creates a rating from tenths of a star.
    ///
    /// # Errors
    ///
    /// Returns an error if `tenths` exceeds 50.
    pub fn from_tenths(tenths: u8) -> Result<Self, DomainError> {
        if tenths > Self::MAX_TENTHS {
            return Err(DomainError::InvalidRating(format!(
                "{tenths} tenths exceeds the maximum of {}",
                Self::MAX_TENTHS
            )));
        }
        Ok(Self(tenths))
    }

    /// Returns the rating in tenths of a star.
    #[must_use]
    pub const fn tenths(&self) -> u8 {
        self.0
    }

    /// Returns the rating as stars.
    #[must_use]
    pub fn stars(&self) -> f32 {
        f32::from(self.0) / 10.0
    }
}

impl TryFrom<f32> for Rating {
    type Error = DomainError;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn try_from(value: f32) -> Result<Self, Self::Error> {
        if !(0.0..=5.0).contains(&value) {
            return Err(DomainError::InvalidRating(format!(
                "{value} is outside 0.0 to 5.0"
            )));
        }
        // Range checked above, so the rounded value fits in 0..=50.
        Self::from_tenths((value * 10.0).round() as u8)
    }
}

impl From<Rating> for f32 {
    fn from(rating: Rating) -> Self {
        rating.stars()
    }
}

/// A service provider that can be assigned to a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// The catalog identifier.
    pub id: ProviderId,
    /// Display name.
    pub name: String,
    /// Average rating.
    pub rating: Rating,
    /// Number of reviews behind the rating.
    pub review_count: u32,
    /// Specialty tags in display order.
    pub specialties: Vec<String>,
    /// Whether the provider can be selected in this session.
    pub available: bool,
}

/// How the customer will pay on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Card payment.
    #[default]
    Card,
    /// Cash on completion.
    Cash,
}

impl PaymentMethod {
    /// Converts this payment method to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Cash => "cash",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "cash" => Ok(Self::Cash),
            _ => Err(DomainError::InvalidPaymentMethod(s.to_string())),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The channel the customer prefers for booking updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContactPreference {
    /// Voice call.
    #[default]
    Phone,
    /// Text message.
    Sms,
    /// Email.
    Email,
}

impl ContactPreference {
    /// Converts this preference to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Sms => "sms",
            Self::Email => "email",
        }
    }
}

impl FromStr for ContactPreference {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "phone" => Ok(Self::Phone),
            "sms" => Ok(Self::Sms),
            "email" => Ok(Self::Email),
            _ => Err(DomainError::InvalidContactPreference(s.to_string())),
        }
    }
}

impl std::fmt::Display for ContactPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A step of the booking wizard.
///
/// Steps are ordered; forward transitions are gated by validation,
/// backward transitions are not.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Step 1: date and time selection.
    #[default]
    DateTime,
    /// Step 2: provider selection.
    Provider,
    /// Step 3: address, phone and preferences.
    Details,
    /// Step 4: review and confirm.
    Confirmation,
}

impl Step {
    /// All steps in wizard order.
    pub const ALL: [Self; 4] = [
        Self::DateTime,
        Self::Provider,
        Self::Details,
        Self::Confirmation,
    ];

    /// Returns the 1-based step number.
    #[must_use]
    pub const fn number(&self) -> u8 {
        match self {
            Self::DateTime => 1,
            Self::Provider => 2,
            Self::Details => 3,
            Self::Confirmation => 4,
        }
    }

    /// Returns the step after this one, or `None` at the last step.
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        match self {
            Self::DateTime => Some(Self::Provider),
            Self::Provider => Some(Self::Details),
            Self::Details => Some(Self::Confirmation),
            Self::Confirmation => None,
        }
    }

    /// Returns the step before this one, or `None` at the first step.
    #[must_use]
    pub const fn previous(&self) -> Option<Self> {
        match self {
            Self::DateTime => None,
            Self::Provider => Some(Self::DateTime),
            Self::Details => Some(Self::Provider),
            Self::Confirmation => Some(Self::Details),
        }
    }

    /// Returns the display title of this step.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::DateTime => "Date & Time",
            Self::Provider => "Provider",
            Self::Details => "Details",
            Self::Confirmation => "Confirmation",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.number(), self.title())
    }
}

/// A draft field that can carry a step-scoped validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// The selected date.
    Date,
    /// The selected time.
    Time,
    /// The selected provider.
    Provider,
    /// The service address.
    Address,
    /// The contact phone number.
    Phone,
}

impl Field {
    /// Converts this field to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Time => "time",
            Self::Provider => "provider",
            Self::Address => "address",
            Self::Phone => "phone",
        }
    }

    /// Returns the wizard step that owns this field.
    #[must_use]
    pub const fn step(&self) -> Step {
        match self {
            Self::Date | Self::Time => Step::DateTime,
            Self::Provider => Step::Provider,
            Self::Address | Self::Phone => Step::Details,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
