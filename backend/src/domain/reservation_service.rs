//! Reservation lifecycle services.
//!
//! Creation, invitation answers, and the confirm/cancel rules live here.
//! Every mutation runs under the venue's write lease so the conflict check
//! and the write are atomic with respect to other writers for that venue.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::info;

use crate::domain::Error;
use crate::domain::ids::{ParticipantId, ReservationId, UserId, VenueId};
use crate::domain::ports::{
    CreateReservationRequest, CreateReservationResponse, InvitationAnswerRequest,
    InvitationAnswerResponse, ListUserReservationsRequest, ListUserReservationsResponse,
    ReservationCommand, ReservationQuery, ReservationRepository, ReservationRepositoryError,
    UserDirectory, UserDirectoryError, VenueDirectory, VenueDirectoryError,
};
use crate::domain::reservation::{
    ParticipantStatus, Reservation, ReservationParticipant, ReservationStatus,
    ReservationTransitionError,
};
use crate::domain::retry::retry_once_on_timeout;
use crate::domain::settings::ConsensusPolicy;
use crate::domain::venue_locks::{VenueLease, VenueLockRegistry};

fn map_reservation_repository_error(error: ReservationRepositoryError) -> Error {
    match error {
        ReservationRepositoryError::Timeout { message } => {
            Error::timeout(format!("reservation store timed out: {message}"))
        }
        ReservationRepositoryError::Storage { message } => {
            Error::internal(format!("reservation store failed: {message}"))
        }
        ReservationRepositoryError::MissingReservation { id } => {
            Error::internal(format!("reservation {id} vanished from the store"))
        }
    }
}

fn map_user_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Timeout { message } => {
            Error::timeout(format!("user directory timed out: {message}"))
        }
        UserDirectoryError::Lookup { message } => {
            Error::internal(format!("user directory failed: {message}"))
        }
    }
}

fn map_venue_directory_error(error: VenueDirectoryError) -> Error {
    match error {
        VenueDirectoryError::Timeout { message } => {
            Error::timeout(format!("venue directory timed out: {message}"))
        }
        VenueDirectoryError::Lookup { message } => {
            Error::internal(format!("venue directory failed: {message}"))
        }
    }
}

fn map_transition_error(reservation_id: &ReservationId, error: &ReservationTransitionError) -> Error {
    match error {
        ReservationTransitionError::NotParticipant => {
            Error::not_found("user is not a participant in this reservation")
        }
        ReservationTransitionError::ClosedReservation {
            status: ReservationStatus::Cancelled,
        } => Error::not_found(format!("reservation {reservation_id} is cancelled")),
        other => Error::invalid_transition(other.to_string()),
    }
}

/// Create and persist a pending reservation under a held venue lease.
///
/// The lease makes the conflict check and the insert one atomic step
/// relative to other writers for the venue. The creator starts accepted;
/// everyone else starts invited.
pub(crate) async fn create_pending_reservation<R>(
    reservations: &R,
    lease: &VenueLease,
    created_by_user_id: &UserId,
    participant_user_ids: &[UserId],
    scheduled_time: DateTime<Utc>,
    overlap_window: chrono::Duration,
    now: DateTime<Utc>,
) -> Result<Reservation, Error>
where
    R: ReservationRepository,
{
    let existing = reservations
        .list_for_venue(lease.venue_id())
        .await
        .map_err(map_reservation_repository_error)?;
    let window_start = scheduled_time - overlap_window;
    let window_end = scheduled_time + overlap_window;
    let conflict = existing.iter().find(|reservation| {
        reservation.is_active_at(now)
            && reservation.scheduled_time() >= window_start
            && reservation.scheduled_time() <= window_end
            && participant_user_ids
                .iter()
                .any(|user_id| reservation.has_participant(user_id))
    });
    if let Some(blocking) = conflict {
        return Err(Error::conflict(format!(
            "reservation {} already covers venue {} in this time window",
            blocking.id(),
            lease.venue_id(),
        )));
    }

    let participants = participant_user_ids
        .iter()
        .map(|user_id| {
            let status = if user_id == created_by_user_id {
                ParticipantStatus::Accepted
            } else {
                ParticipantStatus::Invited
            };
            ReservationParticipant::new(ParticipantId::random(), user_id.clone(), status)
        })
        .collect();
    let reservation = Reservation::try_new(
        ReservationId::random(),
        lease.venue_id().clone(),
        created_by_user_id.clone(),
        scheduled_time,
        now,
        participants,
    )
    .map_err(|error| Error::invalid_request(format!("invalid reservation: {error}")))?;

    reservations
        .insert(&reservation)
        .await
        .map_err(map_reservation_repository_error)?;

    Ok(reservation)
}

#[derive(Clone, Copy)]
enum InvitationAnswer {
    Accept,
    Decline,
}

/// Reservation service implementing the command and query driving ports.
#[derive(Clone)]
pub struct ReservationLifecycleService<R, U, V> {
    reservations: Arc<R>,
    users: Arc<U>,
    venues: Arc<V>,
    locks: Arc<VenueLockRegistry>,
    policy: ConsensusPolicy,
    clock: Arc<dyn Clock>,
}

impl<R, U, V> ReservationLifecycleService<R, U, V> {
    /// Create the service over its stores, directories, and the shared
    /// venue lock registry.
    pub fn new(
        reservations: Arc<R>,
        users: Arc<U>,
        venues: Arc<V>,
        locks: Arc<VenueLockRegistry>,
        policy: ConsensusPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            reservations,
            users,
            venues,
            locks,
            policy,
            clock,
        }
    }

    async fn acquire_lease(&self, venue_id: &VenueId) -> Result<VenueLease, Error> {
        self.locks
            .acquire(venue_id, self.policy.lock_timeout())
            .await
            .map_err(|error| Error::timeout(error.to_string()))
    }
}

impl<R, U, V> ReservationLifecycleService<R, U, V>
where
    R: ReservationRepository,
    U: UserDirectory,
    V: VenueDirectory,
{
    async fn answer_invitation(
        &self,
        request: InvitationAnswerRequest,
        answer: InvitationAnswer,
    ) -> Result<InvitationAnswerResponse, Error> {
        self.users
            .find_by_id(&request.user_id)
            .await
            .map_err(map_user_directory_error)?
            .ok_or_else(|| Error::not_found(format!("user {} not found", request.user_id)))?;

        // First lookup only learns the venue; the authoritative read happens
        // under the lease.
        let located = self
            .reservations
            .find_by_id(&request.reservation_id)
            .await
            .map_err(map_reservation_repository_error)?
            .ok_or_else(|| {
                Error::not_found(format!("reservation {} not found", request.reservation_id))
            })?;
        let _lease = self.acquire_lease(located.venue_id()).await?;

        let mut reservation = self
            .reservations
            .find_by_id(&request.reservation_id)
            .await
            .map_err(map_reservation_repository_error)?
            .ok_or_else(|| {
                Error::not_found(format!("reservation {} not found", request.reservation_id))
            })?;

        if reservation.has_lapsed(self.clock.utc()) {
            reservation
                .cancel()
                .map_err(|error| Error::internal(format!("lapse cancel failed: {error}")))?;
            self.reservations
                .update(&reservation)
                .await
                .map_err(map_reservation_repository_error)?;
            info!(
                reservation_id = %request.reservation_id,
                "pending reservation lapsed; cancelled"
            );
            return Err(Error::not_found(format!(
                "reservation {} is cancelled",
                request.reservation_id
            )));
        }

        let applied = match answer {
            InvitationAnswer::Accept => reservation.accept(&request.user_id),
            InvitationAnswer::Decline => reservation.decline(&request.user_id),
        };
        applied.map_err(|error| map_transition_error(&request.reservation_id, &error))?;

        if reservation.status() == ReservationStatus::Pending {
            let required = self
                .policy
                .confirmation_threshold()
                .required_for(reservation.participants().len());
            match answer {
                InvitationAnswer::Accept => {
                    if reservation.accepted_count() >= required {
                        reservation
                            .confirm()
                            .map_err(|error| Error::internal(format!("confirm failed: {error}")))?;
                    }
                }
                InvitationAnswer::Decline => {
                    if reservation.accepted_count() + reservation.unanswered_count() < required {
                        reservation
                            .cancel()
                            .map_err(|error| Error::internal(format!("cancel failed: {error}")))?;
                    }
                }
            }
        }

        self.reservations
            .update(&reservation)
            .await
            .map_err(map_reservation_repository_error)?;
        info!(
            reservation_id = %request.reservation_id,
            user_id = %request.user_id,
            status = ?reservation.status(),
            "invitation answer recorded"
        );

        Ok(InvitationAnswerResponse { reservation })
    }
}

#[async_trait]
impl<R, U, V> ReservationCommand for ReservationLifecycleService<R, U, V>
where
    R: ReservationRepository,
    U: UserDirectory,
    V: VenueDirectory,
{
    async fn create_reservation(
        &self,
        request: CreateReservationRequest,
    ) -> Result<CreateReservationResponse, Error> {
        let created_by = request
            .participant_user_ids
            .first()
            .cloned()
            .ok_or_else(|| Error::invalid_request("at least one participant is required"))?;
        self.venues
            .find_by_id(&request.venue_id)
            .await
            .map_err(map_venue_directory_error)?
            .ok_or_else(|| Error::not_found(format!("venue {} not found", request.venue_id)))?;
        for user_id in &request.participant_user_ids {
            self.users
                .find_by_id(user_id)
                .await
                .map_err(map_user_directory_error)?
                .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))?;
        }

        let lease = self.acquire_lease(&request.venue_id).await?;
        let reservation = create_pending_reservation(
            self.reservations.as_ref(),
            &lease,
            &created_by,
            &request.participant_user_ids,
            request.scheduled_time,
            self.policy.reservation_overlap(),
            self.clock.utc(),
        )
        .await?;
        info!(
            reservation_id = %reservation.id(),
            venue_id = %request.venue_id,
            participants = reservation.participants().len(),
            "reservation created"
        );

        Ok(CreateReservationResponse { reservation })
    }

    async fn accept_invitation(
        &self,
        request: InvitationAnswerRequest,
    ) -> Result<InvitationAnswerResponse, Error> {
        self.answer_invitation(request, InvitationAnswer::Accept).await
    }

    async fn decline_invitation(
        &self,
        request: InvitationAnswerRequest,
    ) -> Result<InvitationAnswerResponse, Error> {
        self.answer_invitation(request, InvitationAnswer::Decline).await
    }
}

#[async_trait]
impl<R, U, V> ReservationQuery for ReservationLifecycleService<R, U, V>
where
    R: ReservationRepository,
    U: UserDirectory,
    V: VenueDirectory,
{
    async fn list_for_user(
        &self,
        request: ListUserReservationsRequest,
    ) -> Result<ListUserReservationsResponse, Error> {
        retry_once_on_timeout(
            || self.users.find_by_id(&request.user_id),
            |error| matches!(error, UserDirectoryError::Timeout { .. }),
        )
        .await
        .map_err(map_user_directory_error)?
        .ok_or_else(|| Error::not_found(format!("user {} not found", request.user_id)))?;

        let mut reservations = retry_once_on_timeout(
            || self.reservations.list_for_user(&request.user_id),
            |error| matches!(error, ReservationRepositoryError::Timeout { .. }),
        )
        .await
        .map_err(map_reservation_repository_error)?;
        reservations.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });

        Ok(ListUserReservationsResponse { reservations })
    }
}

#[cfg(test)]
#[path = "reservation_service_tests.rs"]
mod tests;
