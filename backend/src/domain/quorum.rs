//! Quorum detection.
//!
//! Pure evaluation of one venue's current interest projection against its
//! active reservations. The detector answers a single question: should a
//! reservation be created right now? It never performs the creation itself;
//! the consensus coordinator owns that side effect.
//!
//! Duplicate suppression is deliberately conservative: a candidate roster
//! that intersects any active reservation scheduled within the overlap
//! window counts as already served. Growing a group around an existing
//! booking therefore never spawns a second booking for the same slot.

use chrono::{DateTime, Duration, Utc};

use crate::domain::ids::{ReservationId, UserId};
use crate::domain::interest::Interest;
use crate::domain::reservation::Reservation;

/// Outcome of one quorum evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuorumDecision {
    /// Enough mutually interested users and a free slot: create a
    /// reservation for exactly these users.
    Reached {
        /// Candidate roster, sorted by user id for determinism.
        participant_user_ids: Vec<UserId>,
    },
    /// Not enough interested users yet.
    BelowThreshold {
        /// How many users currently count toward quorum.
        interested: usize,
    },
    /// An active reservation in the candidate window already covers part of
    /// this roster.
    AlreadyServed {
        /// The reservation that absorbs this quorum signal.
        reservation_id: ReservationId,
    },
}

/// Detects when a venue's interest projection crosses the quorum threshold.
#[derive(Debug, Clone)]
pub struct QuorumDetector {
    min_participants: usize,
    overlap_window: Duration,
}

impl QuorumDetector {
    /// Build a detector.
    ///
    /// `min_participants` must already be validated to be at least 1;
    /// `overlap_window` is the half-width of the duplicate-suppression
    /// window around the candidate time.
    #[must_use]
    pub fn new(min_participants: usize, overlap_window: Duration) -> Self {
        Self {
            min_participants,
            overlap_window,
        }
    }

    /// Minimum number of mutually interested users required.
    #[must_use]
    pub fn min_participants(&self) -> usize {
        self.min_participants
    }

    /// Evaluate one venue.
    ///
    /// `projection` is the venue's latest-wins interest projection and
    /// `reservations` its known reservations (any status; inactive ones are
    /// ignored here). `candidate_time` is the slot a new reservation would
    /// take and `now` anchors the activity check.
    #[must_use]
    pub fn evaluate(
        &self,
        projection: &[Interest],
        reservations: &[Reservation],
        candidate_time: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> QuorumDecision {
        let mut candidates: Vec<UserId> = projection
            .iter()
            .filter(|interest| interest.status().counts_toward_quorum())
            .map(|interest| interest.user_id().clone())
            .collect();
        candidates.sort();
        candidates.dedup();

        if candidates.len() < self.min_participants {
            return QuorumDecision::BelowThreshold {
                interested: candidates.len(),
            };
        }

        let window_start = candidate_time - self.overlap_window;
        let window_end = candidate_time + self.overlap_window;
        let blocking = reservations.iter().find(|reservation| {
            reservation.is_active_at(now)
                && reservation.scheduled_time() >= window_start
                && reservation.scheduled_time() <= window_end
                && candidates
                    .iter()
                    .any(|candidate| reservation.has_participant(candidate))
        });

        match blocking {
            Some(reservation) => QuorumDecision::AlreadyServed {
                reservation_id: reservation.id().clone(),
            },
            None => QuorumDecision::Reached {
                participant_user_ids: candidates,
            },
        }
    }
}
