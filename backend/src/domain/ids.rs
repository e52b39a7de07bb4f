//! Validated identifier newtypes shared across the engine.
//!
//! Purpose: every entity is addressed by an opaque UUID; adapters and
//! services exchange these newtypes instead of raw strings so malformed
//! identifiers are rejected at the boundary exactly once.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_uuid_id {
    (
        $(#[$outer:meta])*
        pub struct $name:ident ($label:literal);
    ) => {
        ::paste::paste! {
            #[doc = "Validation errors returned by [`" $name "::new`]."]
            #[derive(Debug, Clone, PartialEq, Eq)]
            pub enum [<$name ValidationError>] {
                /// Returned when the provided ID is empty.
                EmptyId,
                /// Returned when the ID is not a valid UUID or carries whitespace padding.
                InvalidId,
            }

            impl fmt::Display for [<$name ValidationError>] {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    match self {
                        Self::EmptyId => write!(f, concat!($label, " must not be empty")),
                        Self::InvalidId => write!(f, concat!($label, " must be a valid UUID")),
                    }
                }
            }

            impl std::error::Error for [<$name ValidationError>] {}

            $(#[$outer])*
            #[derive(
                Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
            )]
            #[serde(try_from = "String", into = "String")]
            pub struct $name(Uuid, String);

            impl $name {
                #[doc = "Validate and construct a [`" $name "`] from borrowed input."]
                pub fn new(id: impl AsRef<str>) -> Result<Self, [<$name ValidationError>]> {
                    let raw = id.as_ref();
                    let parsed = Self::validate_and_parse(raw)?;
                    Ok(Self(parsed, raw.to_owned()))
                }

                #[doc = "Construct a [`" $name "`] directly from a UUID."]
                #[must_use]
                pub fn from_uuid(uuid: Uuid) -> Self {
                    Self(uuid, uuid.to_string())
                }

                #[doc = "Generate a new random [`" $name "`]."]
                #[must_use]
                pub fn random() -> Self {
                    Self::from_uuid(Uuid::new_v4())
                }

                /// Access the underlying UUID.
                #[rustfmt::skip]
                #[must_use]
                pub fn as_uuid(&self) -> &Uuid { &self.0 }

                fn validate_and_parse(id: &str) -> Result<Uuid, [<$name ValidationError>]> {
                    if id.is_empty() {
                        return Err([<$name ValidationError>]::EmptyId);
                    }
                    if id.trim() != id {
                        return Err([<$name ValidationError>]::InvalidId);
                    }
                    Uuid::parse_str(id).map_err(|_| [<$name ValidationError>]::InvalidId)
                }
            }

            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    self.1.as_str()
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_ref())
                }
            }

            impl From<$name> for String {
                fn from(value: $name) -> Self {
                    let $name(_, raw) = value;
                    raw
                }
            }

            impl TryFrom<String> for $name {
                type Error = [<$name ValidationError>];

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    let parsed = Self::validate_and_parse(&value)?;
                    Ok(Self(parsed, value))
                }
            }
        }
    };
}

define_uuid_id! {
    /// Stable user identifier stored as a UUID.
    pub struct UserId("user id");
}

define_uuid_id! {
    /// Stable venue identifier stored as a UUID.
    pub struct VenueId("venue id");
}

define_uuid_id! {
    /// Stable reservation identifier stored as a UUID.
    pub struct ReservationId("reservation id");
}

define_uuid_id! {
    /// Stable interest record identifier stored as a UUID.
    pub struct InterestId("interest id");
}

define_uuid_id! {
    /// Stable reservation participant identifier stored as a UUID.
    pub struct ParticipantId("participant id");
}
