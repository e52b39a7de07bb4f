//! Port for interest history writes and projection reads.

use async_trait::async_trait;

use crate::domain::ids::{UserId, VenueId};
use crate::domain::interest::Interest;

use super::define_port_error;

define_port_error! {
    /// Errors raised by interest repository adapters.
    pub enum InterestRepositoryError {
        /// The store could not serve the request in time.
        Timeout { message: String } =>
            "interest repository timed out: {message}",
        /// Read or write failed inside the store.
        Storage { message: String } =>
            "interest repository storage failed: {message}",
    }
}

/// Port for appending interest records and reading the latest-wins
/// projection.
///
/// Writes are append-only: `record` must retain superseded records in the
/// history while replacing the projection entry for the (user, venue) pair.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InterestRepository: Send + Sync {
    /// Append a record and make it the current status for its pair.
    async fn record(&self, interest: &Interest) -> Result<(), InterestRepositoryError>;

    /// Current status for one (user, venue) pair.
    async fn current_for_pair(
        &self,
        user_id: &UserId,
        venue_id: &VenueId,
    ) -> Result<Option<Interest>, InterestRepositoryError>;

    /// Current projection rows for one user.
    async fn current_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Interest>, InterestRepositoryError>;

    /// Current projection rows for one venue.
    async fn current_for_venue(
        &self,
        venue_id: &VenueId,
    ) -> Result<Vec<Interest>, InterestRepositoryError>;

    /// Every current projection row. Powers snapshot scoring.
    async fn current_all(&self) -> Result<Vec<Interest>, InterestRepositoryError>;

    /// Full append-only history for one (user, venue) pair, oldest first.
    async fn history_for_pair(
        &self,
        user_id: &UserId,
        venue_id: &VenueId,
    ) -> Result<Vec<Interest>, InterestRepositoryError>;
}

/// Fixture implementation for tests that do not exercise interest storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureInterestRepository;

#[async_trait]
impl InterestRepository for FixtureInterestRepository {
    async fn record(&self, _interest: &Interest) -> Result<(), InterestRepositoryError> {
        Ok(())
    }

    async fn current_for_pair(
        &self,
        _user_id: &UserId,
        _venue_id: &VenueId,
    ) -> Result<Option<Interest>, InterestRepositoryError> {
        Ok(None)
    }

    async fn current_for_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<Interest>, InterestRepositoryError> {
        Ok(Vec::new())
    }

    async fn current_for_venue(
        &self,
        _venue_id: &VenueId,
    ) -> Result<Vec<Interest>, InterestRepositoryError> {
        Ok(Vec::new())
    }

    async fn current_all(&self) -> Result<Vec<Interest>, InterestRepositoryError> {
        Ok(Vec::new())
    }

    async fn history_for_pair(
        &self,
        _user_id: &UserId,
        _venue_id: &VenueId,
    ) -> Result<Vec<Interest>, InterestRepositoryError> {
        Ok(Vec::new())
    }
}
