//! Consensus coordination.
//!
//! The coordinator owns quorum-driven reservation creation. Holding the
//! venue lease across the interest write, the quorum evaluation, and the
//! reservation insert is what makes creation exactly-once per qualifying
//! roster: concurrent writers for the same venue serialize, and whichever
//! writer completes the quorum creates the reservation while the rest see
//! it as already served.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use utoipa::ToSchema;

use crate::domain::ids::{ReservationId, UserId, VenueId};
use crate::domain::ports::{
    InterestRepository, InterestRepositoryError, ReservationRepository,
    ReservationRepositoryError,
};
use crate::domain::quorum::{QuorumDecision, QuorumDetector};
use crate::domain::reservation::Reservation;
use crate::domain::reservation_service::create_pending_reservation;
use crate::domain::settings::ConsensusPolicy;
use crate::domain::venue_locks::{VenueLease, VenueLockRegistry};
use crate::domain::{Error, ErrorCode};

fn map_interest_repository_error(error: InterestRepositoryError) -> Error {
    match error {
        InterestRepositoryError::Timeout { message } => {
            Error::timeout(format!("interest store timed out: {message}"))
        }
        InterestRepositoryError::Storage { message } => {
            Error::internal(format!("interest store failed: {message}"))
        }
    }
}

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

/// Result of one consensus evaluation for a venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsensusOutcome {
    /// Quorum was reached and a reservation was created.
    #[serde(rename_all = "camelCase")]
    Created { reservation: Reservation },
    /// An active reservation already serves this quorum's time window.
    #[serde(rename_all = "camelCase")]
    SkippedDuplicate {
        #[schema(value_type = String)]
        reservation_id: ReservationId,
    },
    /// Not enough mutually interested users yet.
    #[serde(rename_all = "camelCase")]
    BelowQuorum { interested: usize },
    /// Reservation creation collided with a concurrent booking.
    Conflict,
}

impl fmt::Display for ConsensusOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Created { .. } => "CREATED",
            Self::SkippedDuplicate { .. } => "SKIPPED_DUPLICATE",
            Self::BelowQuorum { .. } => "BELOW_QUORUM",
            Self::Conflict => "CONFLICT",
        };
        f.write_str(label)
    }
}

/// Coordinates quorum evaluation and reservation creation per venue.
#[derive(Clone)]
pub struct ConsensusCoordinator<I, R> {
    interests: Arc<I>,
    reservations: Arc<R>,
    locks: Arc<VenueLockRegistry>,
    detector: QuorumDetector,
    policy: ConsensusPolicy,
    clock: Arc<dyn Clock>,
}

impl<I, R> ConsensusCoordinator<I, R> {
    /// Create the coordinator over the stores it arbitrates.
    pub fn new(
        interests: Arc<I>,
        reservations: Arc<R>,
        locks: Arc<VenueLockRegistry>,
        policy: ConsensusPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let detector = QuorumDetector::new(policy.min_participants(), policy.reservation_overlap());
        Self {
            interests,
            reservations,
            locks,
            detector,
            policy,
            clock,
        }
    }

    /// The candidate slot for a reservation triggered now: the next day at
    /// the configured hour, UTC.
    fn auto_schedule_time(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, Error> {
        (now + Duration::days(1))
            .date_naive()
            .and_hms_opt(self.policy.auto_schedule_hour_utc(), 0, 0)
            .map(|slot| slot.and_utc())
            .ok_or_else(|| Error::internal("auto-schedule hour is out of range"))
    }
}

impl<I, R> ConsensusCoordinator<I, R>
where
    I: InterestRepository,
    R: ReservationRepository,
{
    /// Acquire the write lease for a venue, bounded by the configured
    /// timeout.
    pub async fn lease(&self, venue_id: &VenueId) -> Result<VenueLease, Error> {
        self.locks
            .acquire(venue_id, self.policy.lock_timeout())
            .await
            .map_err(|error| Error::timeout(error.to_string()))
    }

    /// Evaluate quorum for the leased venue and create a reservation when
    /// it is reached.
    ///
    /// The triggering user becomes the creator when the quorum includes
    /// them; otherwise the first roster member does. A `Conflict` from the
    /// creation step is absorbed into the outcome: the interest write that
    /// triggered the evaluation has already succeeded.
    pub async fn evaluate_venue(
        &self,
        lease: &VenueLease,
        triggering_user_id: &UserId,
    ) -> Result<ConsensusOutcome, Error> {
        let now = self.clock.utc();
        let candidate_time = self.auto_schedule_time(now)?;
        let projection = self
            .interests
            .current_for_venue(lease.venue_id())
            .await
            .map_err(map_interest_repository_error)?;
        let reservations = self
            .reservations
            .list_for_venue(lease.venue_id())
            .await
            .map_err(map_reservation_repository_error)?;

        let decision = self
            .detector
            .evaluate(&projection, &reservations, candidate_time, now);
        let outcome = match decision {
            QuorumDecision::BelowThreshold { interested } => {
                ConsensusOutcome::BelowQuorum { interested }
            }
            QuorumDecision::AlreadyServed { reservation_id } => {
                ConsensusOutcome::SkippedDuplicate { reservation_id }
            }
            QuorumDecision::Reached {
                participant_user_ids,
            } => {
                let created_by = participant_user_ids
                    .iter()
                    .find(|user_id| *user_id == triggering_user_id)
                    .or_else(|| participant_user_ids.first())
                    .cloned()
                    .ok_or_else(|| Error::internal("quorum roster cannot be empty"))?;
                let created = create_pending_reservation(
                    self.reservations.as_ref(),
                    lease,
                    &created_by,
                    &participant_user_ids,
                    candidate_time,
                    self.policy.reservation_overlap(),
                    now,
                )
                .await;
                match created {
                    Ok(reservation) => ConsensusOutcome::Created { reservation },
                    Err(error) if error.code() == ErrorCode::Conflict => {
                        warn!(
                            venue_id = %lease.venue_id(),
                            error = %error,
                            "consensus creation collided with a concurrent booking"
                        );
                        ConsensusOutcome::Conflict
                    }
                    Err(error) => return Err(error),
                }
            }
        };

        match &outcome {
            ConsensusOutcome::Created { reservation } => info!(
                venue_id = %lease.venue_id(),
                reservation_id = %reservation.id(),
                participants = reservation.participants().len(),
                scheduled_time = %reservation.scheduled_time(),
                outcome = %outcome,
                "consensus reached; reservation created"
            ),
            ConsensusOutcome::SkippedDuplicate { reservation_id } => debug!(
                venue_id = %lease.venue_id(),
                reservation_id = %reservation_id,
                outcome = %outcome,
                "quorum already served"
            ),
            ConsensusOutcome::BelowQuorum { interested } => debug!(
                venue_id = %lease.venue_id(),
                interested,
                outcome = %outcome,
                "quorum not reached"
            ),
            ConsensusOutcome::Conflict => {}
        }

        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "consensus_tests.rs"]
mod tests;
