//! Port for reservation persistence.

use async_trait::async_trait;

use crate::domain::ids::{ReservationId, UserId, VenueId};
use crate::domain::reservation::Reservation;

use super::define_port_error;

define_port_error! {
    /// Errors raised by reservation repository adapters.
    pub enum ReservationRepositoryError {
        /// The store could not serve the request in time.
        Timeout { message: String } =>
            "reservation repository timed out: {message}",
        /// Read or write failed inside the store.
        Storage { message: String } =>
            "reservation repository storage failed: {message}",
        /// An update referenced a reservation the store does not hold.
        MissingReservation { id: String } =>
            "reservation {id} is not in the store",
    }
}

/// Port for writing reservations and reading them back by id, venue, or
/// participant.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Persist a new reservation.
    async fn insert(&self, reservation: &Reservation) -> Result<(), ReservationRepositoryError>;

    /// Replace a stored reservation with an updated copy.
    async fn update(&self, reservation: &Reservation) -> Result<(), ReservationRepositoryError>;

    /// Find a reservation by id.
    async fn find_by_id(
        &self,
        id: &ReservationId,
    ) -> Result<Option<Reservation>, ReservationRepositoryError>;

    /// All reservations for a venue, any status.
    async fn list_for_venue(
        &self,
        venue_id: &VenueId,
    ) -> Result<Vec<Reservation>, ReservationRepositoryError>;

    /// All reservations where the user is on the roster, any status.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Reservation>, ReservationRepositoryError>;
}

/// Fixture implementation for tests that do not exercise reservation
/// storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReservationRepository;

#[async_trait]
impl ReservationRepository for FixtureReservationRepository {
    async fn insert(&self, _reservation: &Reservation) -> Result<(), ReservationRepositoryError> {
        Ok(())
    }

    async fn update(&self, reservation: &Reservation) -> Result<(), ReservationRepositoryError> {
        Err(ReservationRepositoryError::missing_reservation(
            reservation.id().to_string(),
        ))
    }

    async fn find_by_id(
        &self,
        _id: &ReservationId,
    ) -> Result<Option<Reservation>, ReservationRepositoryError> {
        Ok(None)
    }

    async fn list_for_venue(
        &self,
        _venue_id: &VenueId,
    ) -> Result<Vec<Reservation>, ReservationRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_for_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<Reservation>, ReservationRepositoryError> {
        Ok(Vec::new())
    }
}
