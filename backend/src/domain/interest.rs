//! Interest data model.
//!
//! An interest records one user's current disposition toward one venue. The
//! store is append-only: a new record supersedes the previous one for the
//! same (user, venue) pair and the full history is retained for audit.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ids::{InterestId, UserId, VenueId};

/// A user's declared disposition toward a venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterestStatus {
    /// The user wants to go.
    Interested,
    /// The user has opted out; the venue is excluded from their
    /// recommendations.
    NotInterested,
    /// The user was pulled into a reservation and has not yet answered.
    Invited,
    /// The user has committed to attending.
    Confirmed,
}

impl InterestStatus {
    /// Whether this status counts toward quorum and peer scoring.
    #[must_use]
    pub fn counts_toward_quorum(self) -> bool {
        matches!(self, Self::Interested | Self::Confirmed)
    }
}

impl fmt::Display for InterestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Interested => "INTERESTED",
            Self::NotInterested => "NOT_INTERESTED",
            Self::Invited => "INVITED",
            Self::Confirmed => "CONFIRMED",
        };
        f.write_str(label)
    }
}

/// Error returned when parsing an unknown interest status label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterestStatusParseError {
    input: String,
}

impl fmt::Display for InterestStatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown interest status {:?}; expected one of INTERESTED, NOT_INTERESTED, INVITED, CONFIRMED",
            self.input
        )
    }
}

impl std::error::Error for InterestStatusParseError {}

impl FromStr for InterestStatus {
    type Err = InterestStatusParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "INTERESTED" => Ok(Self::Interested),
            "NOT_INTERESTED" => Ok(Self::NotInterested),
            "INVITED" => Ok(Self::Invited),
            "CONFIRMED" => Ok(Self::Confirmed),
            other => Err(InterestStatusParseError {
                input: other.to_owned(),
            }),
        }
    }
}

/// One user's current interest state for one venue.
///
/// ## Invariants
/// - At most one *current* record exists per (user, venue) pair; superseded
///   records live only in the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Interest {
    #[schema(value_type = String)]
    id: InterestId,
    #[schema(value_type = String)]
    user_id: UserId,
    #[schema(value_type = String)]
    venue_id: VenueId,
    status: InterestStatus,
    #[schema(value_type = String, format = DateTime)]
    created_at: DateTime<Utc>,
}

impl Interest {
    /// Build a new interest record.
    #[must_use]
    pub fn new(
        id: InterestId,
        user_id: UserId,
        venue_id: VenueId,
        status: InterestStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            venue_id,
            status,
            created_at,
        }
    }

    /// Stable record identifier.
    #[must_use]
    pub fn id(&self) -> &InterestId {
        &self.id
    }

    /// User who declared the interest.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Venue the interest applies to.
    #[must_use]
    pub fn venue_id(&self) -> &VenueId {
        &self.venue_id
    }

    /// Current disposition.
    #[must_use]
    pub fn status(&self) -> InterestStatus {
        self.status
    }

    /// Instant the record was written.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Copy of this record with a superseding status and timestamp.
    #[must_use]
    pub fn superseded_by(&self, id: InterestId, status: InterestStatus, at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: self.user_id.clone(),
            venue_id: self.venue_id.clone(),
            status,
            created_at: at,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(InterestStatus::Interested, true)]
    #[case(InterestStatus::Confirmed, true)]
    #[case(InterestStatus::NotInterested, false)]
    #[case(InterestStatus::Invited, false)]
    fn quorum_counting(#[case] status: InterestStatus, #[case] counts: bool) {
        assert_eq!(status.counts_toward_quorum(), counts);
    }

    #[rstest]
    #[case("INTERESTED", InterestStatus::Interested)]
    #[case("NOT_INTERESTED", InterestStatus::NotInterested)]
    #[case("INVITED", InterestStatus::Invited)]
    #[case("CONFIRMED", InterestStatus::Confirmed)]
    fn parse_accepts_wire_labels(#[case] input: &str, #[case] expected: InterestStatus) {
        assert_eq!(input.parse::<InterestStatus>().unwrap(), expected);
    }

    #[rstest]
    fn parse_rejects_unknown_labels() {
        let err = "MAYBE".parse::<InterestStatus>().unwrap_err();
        assert!(err.to_string().contains("MAYBE"));
    }

    #[rstest]
    fn status_serialises_as_screaming_snake_case() {
        let json = serde_json::to_string(&InterestStatus::NotInterested).unwrap();
        assert_eq!(json, r#""NOT_INTERESTED""#);
    }
}
