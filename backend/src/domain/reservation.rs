//! Reservation data model.
//!
//! A reservation owns its participant roster. The roster is fixed at
//! creation; only the per-participant status moves afterwards, and each
//! participant answers at most once.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ids::{ParticipantId, ReservationId, UserId, VenueId};

/// Lifecycle state of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    /// Created and awaiting participant answers.
    Pending,
    /// Enough participants accepted; the booking stands.
    Confirmed,
    /// Withdrawn, either explicitly or because the threshold became
    /// unreachable.
    Cancelled,
}

/// Per-participant answer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantStatus {
    /// Invited and not yet answered.
    Invited,
    /// Accepted the invitation. Terminal.
    Accepted,
    /// Declined the invitation. Terminal.
    Declined,
}

/// Validation errors returned by [`Reservation::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationValidationError {
    EmptyParticipants,
    DuplicateParticipant { user_id: String },
    CreatorNotParticipant,
}

impl fmt::Display for ReservationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyParticipants => {
                write!(f, "a reservation needs at least one participant")
            }
            Self::DuplicateParticipant { user_id } => {
                write!(f, "user {user_id} appears more than once in the roster")
            }
            Self::CreatorNotParticipant => {
                write!(f, "the creating user must be on the roster")
            }
        }
    }
}

impl std::error::Error for ReservationValidationError {}

/// Illegal state transitions rejected by the mutators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationTransitionError {
    /// The user is not on this reservation's roster.
    NotParticipant,
    /// The participant already answered; answers are terminal.
    AlreadyAnswered { status: ParticipantStatus },
    /// The reservation is no longer open to this transition.
    ClosedReservation { status: ReservationStatus },
}

impl fmt::Display for ReservationTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotParticipant => write!(f, "user is not a participant of this reservation"),
            Self::AlreadyAnswered { status } => {
                write!(f, "participant already answered with {status:?}")
            }
            Self::ClosedReservation { status } => {
                write!(f, "reservation is {status:?} and cannot change")
            }
        }
    }
}

impl std::error::Error for ReservationTransitionError {}

/// One user's slot on a reservation roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct ReservationParticipant {
    #[schema(value_type = String)]
    id: ParticipantId,
    #[schema(value_type = String)]
    user_id: UserId,
    status: ParticipantStatus,
}

impl ReservationParticipant {
    /// Build a roster slot.
    #[must_use]
    pub fn new(id: ParticipantId, user_id: UserId, status: ParticipantStatus) -> Self {
        Self {
            id,
            user_id,
            status,
        }
    }

    /// Stable participant identifier.
    #[must_use]
    pub fn id(&self) -> &ParticipantId {
        &self.id
    }

    /// User occupying this slot.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Current answer state.
    #[must_use]
    pub fn status(&self) -> ParticipantStatus {
        self.status
    }
}

/// Group reservation with its participant roster.
///
/// ## Invariants
/// - The roster is non-empty and each user appears at most once.
/// - The creating user is on the roster.
/// - Participant answers are terminal; `Accepted` and `Declined` never
///   change again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Reservation {
    #[schema(value_type = String)]
    id: ReservationId,
    #[schema(value_type = String)]
    venue_id: VenueId,
    #[schema(value_type = String)]
    created_by_user_id: UserId,
    #[schema(value_type = String, format = DateTime)]
    scheduled_time: DateTime<Utc>,
    status: ReservationStatus,
    #[schema(value_type = String, format = DateTime)]
    created_at: DateTime<Utc>,
    participants: Vec<ReservationParticipant>,
}

impl Reservation {
    /// Validate and construct a pending reservation.
    pub fn try_new(
        id: ReservationId,
        venue_id: VenueId,
        created_by_user_id: UserId,
        scheduled_time: DateTime<Utc>,
        created_at: DateTime<Utc>,
        participants: Vec<ReservationParticipant>,
    ) -> Result<Self, ReservationValidationError> {
        if participants.is_empty() {
            return Err(ReservationValidationError::EmptyParticipants);
        }
        let mut seen: Vec<&UserId> = Vec::with_capacity(participants.len());
        for participant in &participants {
            if seen.contains(&participant.user_id()) {
                return Err(ReservationValidationError::DuplicateParticipant {
                    user_id: participant.user_id().to_string(),
                });
            }
            seen.push(participant.user_id());
        }
        if !seen.contains(&&created_by_user_id) {
            return Err(ReservationValidationError::CreatorNotParticipant);
        }

        Ok(Self {
            id,
            venue_id,
            created_by_user_id,
            scheduled_time,
            status: ReservationStatus::Pending,
            created_at,
            participants,
        })
    }

    /// Stable reservation identifier.
    #[must_use]
    pub fn id(&self) -> &ReservationId {
        &self.id
    }

    /// Venue the reservation is for.
    #[must_use]
    pub fn venue_id(&self) -> &VenueId {
        &self.venue_id
    }

    /// User on whose behalf the reservation was created.
    #[must_use]
    pub fn created_by_user_id(&self) -> &UserId {
        &self.created_by_user_id
    }

    /// Scheduled start of the gathering.
    #[must_use]
    pub fn scheduled_time(&self) -> DateTime<Utc> {
        self.scheduled_time
    }

    /// Lifecycle state.
    #[must_use]
    pub fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Instant the reservation was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Participant roster in creation order.
    #[must_use]
    pub fn participants(&self) -> &[ReservationParticipant] {
        &self.participants
    }

    /// Whether the reservation still occupies its venue slot.
    ///
    /// Pending reservations stop being active once their scheduled time has
    /// lapsed without confirmation.
    #[must_use]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        match self.status {
            ReservationStatus::Confirmed => true,
            ReservationStatus::Pending => self.scheduled_time > now,
            ReservationStatus::Cancelled => false,
        }
    }

    /// Whether a pending reservation's scheduled time has passed unanswered.
    #[must_use]
    pub fn has_lapsed(&self, now: DateTime<Utc>) -> bool {
        matches!(self.status, ReservationStatus::Pending) && self.scheduled_time <= now
    }

    /// User ids on the roster, in creation order.
    #[must_use]
    pub fn participant_user_ids(&self) -> Vec<UserId> {
        self.participants
            .iter()
            .map(|p| p.user_id().clone())
            .collect()
    }

    /// Whether the user occupies a roster slot.
    #[must_use]
    pub fn has_participant(&self, user_id: &UserId) -> bool {
        self.participants.iter().any(|p| p.user_id() == user_id)
    }

    /// Count of participants who accepted.
    #[must_use]
    pub fn accepted_count(&self) -> usize {
        self.count_with(ParticipantStatus::Accepted)
    }

    /// Count of participants who declined.
    #[must_use]
    pub fn declined_count(&self) -> usize {
        self.count_with(ParticipantStatus::Declined)
    }

    /// Count of participants who have not answered yet.
    #[must_use]
    pub fn unanswered_count(&self) -> usize {
        self.count_with(ParticipantStatus::Invited)
    }

    fn count_with(&self, status: ParticipantStatus) -> usize {
        self.participants
            .iter()
            .filter(|p| p.status() == status)
            .count()
    }

    /// Record a participant's acceptance.
    pub fn accept(&mut self, user_id: &UserId) -> Result<(), ReservationTransitionError> {
        self.answer(user_id, ParticipantStatus::Accepted)
    }

    /// Record a participant's refusal.
    pub fn decline(&mut self, user_id: &UserId) -> Result<(), ReservationTransitionError> {
        self.answer(user_id, ParticipantStatus::Declined)
    }

    fn answer(
        &mut self,
        user_id: &UserId,
        answer: ParticipantStatus,
    ) -> Result<(), ReservationTransitionError> {
        if matches!(self.status, ReservationStatus::Cancelled) {
            return Err(ReservationTransitionError::ClosedReservation {
                status: self.status,
            });
        }
        let participant = self
            .participants
            .iter_mut()
            .find(|p| p.user_id() == user_id)
            .ok_or(ReservationTransitionError::NotParticipant)?;
        match participant.status {
            ParticipantStatus::Invited => {
                participant.status = answer;
                Ok(())
            }
            status => Err(ReservationTransitionError::AlreadyAnswered { status }),
        }
    }

    /// Transition the reservation from pending to confirmed.
    pub fn confirm(&mut self) -> Result<(), ReservationTransitionError> {
        match self.status {
            ReservationStatus::Pending => {
                self.status = ReservationStatus::Confirmed;
                Ok(())
            }
            status => Err(ReservationTransitionError::ClosedReservation { status }),
        }
    }

    /// Transition the reservation from pending to cancelled.
    pub fn cancel(&mut self) -> Result<(), ReservationTransitionError> {
        match self.status {
            ReservationStatus::Pending => {
                self.status = ReservationStatus::Cancelled;
                Ok(())
            }
            status => Err(ReservationTransitionError::ClosedReservation { status }),
        }
    }
}
