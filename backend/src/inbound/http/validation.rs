//! Shared validation helpers for inbound HTTP adapters.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, GeoPoint, InterestStatus};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidTimestamp,
    InvalidStatus,
    InvalidCoordinates,
    IncompleteCoordinates,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
            ErrorCode::InvalidStatus => "invalid_status",
            ErrorCode::InvalidCoordinates => "invalid_coordinates",
            ErrorCode::IncompleteCoordinates => "incomplete_coordinates",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }

    fn with_index(self, code: ErrorCode, index: usize, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "index": index,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

pub(crate) fn invalid_uuid_index_error(field: FieldName, index: usize, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must contain valid UUIDs")).with_index(
        ErrorCode::InvalidUuid,
        index,
        value,
    )
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn parse_uuid_list(values: Vec<String>, field: FieldName) -> Result<Vec<Uuid>, Error> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            Uuid::parse_str(&value).map_err(|_| invalid_uuid_index_error(field, index, &value))
        })
        .collect()
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be an RFC 3339 timestamp"))
        .with_value(ErrorCode::InvalidTimestamp, value)
}

pub(crate) fn parse_rfc3339_timestamp(
    value: String,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(&value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| invalid_timestamp_error(field, &value))
}

pub(crate) fn parse_interest_status(value: &str, field: FieldName) -> Result<InterestStatus, Error> {
    InterestStatus::from_str(value).map_err(|_| {
        let field = field.as_str();
        ValidationError::new(
            field,
            format!(
                "{field} must be one of INTERESTED, NOT_INTERESTED, INVITED, CONFIRMED"
            ),
        )
        .with_value(ErrorCode::InvalidStatus, value)
    })
}

/// Resolve the optional query location from `lat`/`lon` parameters.
///
/// The pair is all-or-nothing: a request naming only one of them is
/// rejected, matching the scoring rule that proximity either applies with a
/// full origin or not at all.
pub(crate) fn parse_origin(lat: Option<f64>, lon: Option<f64>) -> Result<Option<GeoPoint>, Error> {
    match (lat, lon) {
        (None, None) => Ok(None),
        (Some(latitude), Some(longitude)) => GeoPoint::new(latitude, longitude)
            .map(Some)
            .map_err(|err| {
                ValidationError::new("lat", err.to_string())
                    .with_code(ErrorCode::InvalidCoordinates)
            }),
        (Some(_), None) => Err(ValidationError::new(
            "lon",
            "lat and lon must be provided together",
        )
        .with_code(ErrorCode::IncompleteCoordinates)),
        (None, Some(_)) => Err(ValidationError::new(
            "lat",
            "lat and lon must be provided together",
        )
        .with_code(ErrorCode::IncompleteCoordinates)),
    }
}
