//! Driving port for interest writes.
//!
//! Recording an interest is the engine's triggering event: every accepted
//! write re-evaluates quorum for the venue and may create a reservation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    ConsensusOutcome, Error, Interest, InterestId, InterestStatus, UserId, VenueId,
};

/// Request to record a user's current disposition toward a venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetInterestRequest {
    pub user_id: UserId,
    pub venue_id: VenueId,
    pub status: InterestStatus,
}

/// Response carrying the stored record and the consensus outcome it
/// triggered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetInterestResponse {
    pub interest: Interest,
    pub outcome: ConsensusOutcome,
}

/// Driving port for interest write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InterestCommand: Send + Sync {
    /// Record the user's latest disposition toward the venue and re-evaluate
    /// quorum for it.
    ///
    /// The write supersedes any earlier record for the same (user, venue)
    /// pair. Writing the same status twice leaves the projection unchanged.
    async fn set_interest(&self, request: SetInterestRequest)
    -> Result<SetInterestResponse, Error>;
}

/// Fixture command for tests that do not exercise the write path.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureInterestCommand;

#[async_trait]
impl InterestCommand for FixtureInterestCommand {
    async fn set_interest(
        &self,
        request: SetInterestRequest,
    ) -> Result<SetInterestResponse, Error> {
        let interest = Interest::new(
            InterestId::random(),
            request.user_id,
            request.venue_id,
            request.status,
            DateTime::<Utc>::UNIX_EPOCH,
        );

        Ok(SetInterestResponse {
            interest,
            outcome: ConsensusOutcome::BelowQuorum { interested: 1 },
        })
    }
}
