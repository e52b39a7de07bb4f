//! Venue data model.
//!
//! Venues are read-only to the engine: catalogue management happens in an
//! external system and the engine consumes a seeded directory of them.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ids::{VenueId, VenueIdValidationError};

/// Validation errors returned by [`Venue::try_from_parts`].
#[derive(Debug, Clone, PartialEq)]
pub enum VenueValidationError {
    InvalidId(VenueIdValidationError),
    EmptyName,
    EmptyCategory,
    EmptyAddress,
    InvalidLatitude { value: f64 },
    InvalidLongitude { value: f64 },
}

impl fmt::Display for VenueValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId(err) => write!(f, "{err}"),
            Self::EmptyName => write!(f, "venue name must not be empty"),
            Self::EmptyCategory => write!(f, "venue category must not be empty"),
            Self::EmptyAddress => write!(f, "venue address must not be empty"),
            Self::InvalidLatitude { value } => {
                write!(f, "latitude {value} must be finite and within [-90, 90]")
            }
            Self::InvalidLongitude { value } => {
                write!(f, "longitude {value} must be finite and within [-180, 180]")
            }
        }
    }
}

impl std::error::Error for VenueValidationError {}

impl From<VenueIdValidationError> for VenueValidationError {
    fn from(value: VenueIdValidationError) -> Self {
        Self::InvalidId(value)
    }
}

#[rustfmt::skip]
pub(crate) fn valid_longitude(value: f64) -> bool { value.is_finite() && (-180.0..=180.0).contains(&value) }

#[rustfmt::skip]
pub(crate) fn valid_latitude(value: f64) -> bool { value.is_finite() && (-90.0..=90.0).contains(&value) }

/// Geographic point used for venue locations and proximity queries.
///
/// ## Invariants
/// - `latitude` is finite and within [-90, 90].
/// - `longitude` is finite and within [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    #[schema(example = 51.5261)]
    latitude: f64,
    #[schema(example = -0.0876)]
    longitude: f64,
}

impl GeoPoint {
    /// Validate and construct a [`GeoPoint`].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, VenueValidationError> {
        if !valid_latitude(latitude) {
            return Err(VenueValidationError::InvalidLatitude { value: latitude });
        }
        if !valid_longitude(longitude) {
            return Err(VenueValidationError::InvalidLongitude { value: longitude });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in decimal degrees.
    #[rustfmt::skip]
    #[must_use]
    pub fn latitude(&self) -> f64 { self.latitude }

    /// Longitude in decimal degrees.
    #[rustfmt::skip]
    #[must_use]
    pub fn longitude(&self) -> f64 { self.longitude }
}

/// Venue available for group reservations.
///
/// ## Invariants
/// - `id` must be a valid UUID string.
/// - `name`, `category`, and `address` must be non-empty once trimmed.
/// - `location` satisfies the [`GeoPoint`] range invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Venue {
    #[schema(value_type = String, example = "7c9e6679-7425-40de-944b-e07fc1f90ae7")]
    id: VenueId,
    #[schema(example = "The Old Crown")]
    name: String,
    #[schema(example = "pub")]
    category: String,
    #[schema(example = "33 New Oxford St, London")]
    address: String,
    location: GeoPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Venue {
    /// Build a new [`Venue`] from validated components.
    #[must_use]
    pub fn new(
        id: VenueId,
        name: String,
        category: String,
        address: String,
        location: GeoPoint,
    ) -> Self {
        Self {
            id,
            name,
            category,
            address,
            location,
            description: None,
        }
    }

    /// Fallible constructor enforcing identifier, text, and coordinate
    /// invariants.
    pub fn try_from_parts(
        id: impl AsRef<str>,
        name: impl Into<String>,
        category: impl Into<String>,
        address: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, VenueValidationError> {
        let id = VenueId::new(id)?;
        let name = non_empty(name.into(), VenueValidationError::EmptyName)?;
        let category = non_empty(category.into(), VenueValidationError::EmptyCategory)?;
        let address = non_empty(address.into(), VenueValidationError::EmptyAddress)?;
        let location = GeoPoint::new(latitude, longitude)?;

        Ok(Self::new(id, name, category, address, location))
    }

    /// Attach a free-form description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Stable venue identifier.
    #[must_use]
    pub fn id(&self) -> &VenueId {
        &self.id
    }

    /// Venue display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Coarse venue category, e.g. `pub` or `restaurant`.
    #[must_use]
    pub fn category(&self) -> &str {
        self.category.as_str()
    }

    /// Postal address shown to participants.
    #[must_use]
    pub fn address(&self) -> &str {
        self.address.as_str()
    }

    /// Geographic location used for proximity scoring.
    #[must_use]
    pub fn location(&self) -> GeoPoint {
        self.location
    }

    /// Free-form description, when one is set.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

fn non_empty(value: String, error: VenueValidationError) -> Result<String, VenueValidationError> {
    if value.trim().is_empty() {
        return Err(error);
    }
    Ok(value)
}
