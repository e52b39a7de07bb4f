//! Driving port for reservation mutations.
//!
//! Manual creation goes through the same conflict check as the consensus
//! path; invitation answers drive the confirm and cancel rules.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Reservation, ReservationId, UserId, VenueId};

/// Request to create a pending reservation by hand.
///
/// The first listed participant is the creator and starts accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub venue_id: VenueId,
    pub scheduled_time: DateTime<Utc>,
    pub participant_user_ids: Vec<UserId>,
}

/// Response carrying the stored reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationResponse {
    pub reservation: Reservation,
}

/// Request to answer an invitation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationAnswerRequest {
    pub reservation_id: ReservationId,
    pub user_id: UserId,
}

/// Response carrying the reservation after the answer was applied.
///
/// Callers read the reservation status to learn whether the answer
/// confirmed or cancelled it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationAnswerResponse {
    pub reservation: Reservation,
}

/// Driving port for reservation write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationCommand: Send + Sync {
    /// Create a pending reservation, rejecting overlapping duplicates with
    /// `Conflict`.
    async fn create_reservation(
        &self,
        request: CreateReservationRequest,
    ) -> Result<CreateReservationResponse, Error>;

    /// Record a participant's acceptance; confirms the reservation once the
    /// acceptance threshold is met.
    async fn accept_invitation(
        &self,
        request: InvitationAnswerRequest,
    ) -> Result<InvitationAnswerResponse, Error>;

    /// Record a participant's refusal; cancels the reservation once the
    /// threshold can no longer be reached.
    async fn decline_invitation(
        &self,
        request: InvitationAnswerRequest,
    ) -> Result<InvitationAnswerResponse, Error>;
}

/// Fixture command for tests that do not exercise reservation writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReservationCommand;

#[async_trait]
impl ReservationCommand for FixtureReservationCommand {
    async fn create_reservation(
        &self,
        request: CreateReservationRequest,
    ) -> Result<CreateReservationResponse, Error> {
        let created_by = request
            .participant_user_ids
            .first()
            .cloned()
            .ok_or_else(|| Error::invalid_request("at least one participant is required"))?;
        let participants = request
            .participant_user_ids
            .iter()
            .map(|user_id| {
                let status = if user_id == &created_by {
                    crate::domain::ParticipantStatus::Accepted
                } else {
                    crate::domain::ParticipantStatus::Invited
                };
                crate::domain::ReservationParticipant::new(
                    crate::domain::ParticipantId::random(),
                    user_id.clone(),
                    status,
                )
            })
            .collect();
        let reservation = Reservation::try_new(
            ReservationId::random(),
            request.venue_id,
            created_by,
            request.scheduled_time,
            DateTime::<Utc>::UNIX_EPOCH,
            participants,
        )
        .map_err(|err| Error::invalid_request(format!("invalid reservation: {err}")))?;

        Ok(CreateReservationResponse { reservation })
    }

    async fn accept_invitation(
        &self,
        request: InvitationAnswerRequest,
    ) -> Result<InvitationAnswerResponse, Error> {
        Err(Error::not_found(format!(
            "reservation {} not found",
            request.reservation_id
        )))
    }

    async fn decline_invitation(
        &self,
        request: InvitationAnswerRequest,
    ) -> Result<InvitationAnswerResponse, Error> {
        Err(Error::not_found(format!(
            "reservation {} not found",
            request.reservation_id
        )))
    }
}
