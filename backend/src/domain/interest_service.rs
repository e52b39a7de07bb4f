//! Interest domain services.
//!
//! The command service owns the engine's write path: it validates the
//! subject user and venue, records the interest under the venue's write
//! lease, and keeps the lease held while the consensus coordinator
//! evaluates quorum. The query service serves the latest-wins projection.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::Error;
use crate::domain::consensus::ConsensusCoordinator;
use crate::domain::ids::InterestId;
use crate::domain::interest::Interest;
use crate::domain::ports::{
    InterestCommand, InterestQuery, InterestRepository, InterestRepositoryError,
    ListUserInterestsRequest, ListUserInterestsResponse, ReservationRepository,
    SetInterestRequest, SetInterestResponse, UserDirectory, UserDirectoryError, VenueDirectory,
    VenueDirectoryError,
};
use crate::domain::retry::retry_once_on_timeout;

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

/// Interest service implementing the write driving port.
#[derive(Clone)]
pub struct InterestCommandService<U, V, I, R> {
    users: Arc<U>,
    venues: Arc<V>,
    interests: Arc<I>,
    coordinator: Arc<ConsensusCoordinator<I, R>>,
    clock: Arc<dyn Clock>,
}

impl<U, V, I, R> InterestCommandService<U, V, I, R> {
    /// Create the command service over the directories, the interest store,
    /// and the coordinator that serializes the venue.
    pub fn new(
        users: Arc<U>,
        venues: Arc<V>,
        interests: Arc<I>,
        coordinator: Arc<ConsensusCoordinator<I, R>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            venues,
            interests,
            coordinator,
            clock,
        }
    }
}

#[async_trait]
impl<U, V, I, R> InterestCommand for InterestCommandService<U, V, I, R>
where
    U: UserDirectory,
    V: VenueDirectory,
    I: InterestRepository,
    R: ReservationRepository,
{
    async fn set_interest(
        &self,
        request: SetInterestRequest,
    ) -> Result<SetInterestResponse, Error> {
        self.users
            .find_by_id(&request.user_id)
            .await
            .map_err(map_user_directory_error)?
            .ok_or_else(|| Error::not_found(format!("user {} not found", request.user_id)))?;
        self.venues
            .find_by_id(&request.venue_id)
            .await
            .map_err(map_venue_directory_error)?
            .ok_or_else(|| Error::not_found(format!("venue {} not found", request.venue_id)))?;

        let lease = self.coordinator.lease(&request.venue_id).await?;
        let interest = Interest::new(
            InterestId::random(),
            request.user_id.clone(),
            request.venue_id.clone(),
            request.status,
            self.clock.utc(),
        );
        self.interests
            .record(&interest)
            .await
            .map_err(map_interest_repository_error)?;
        let outcome = self
            .coordinator
            .evaluate_venue(&lease, &request.user_id)
            .await?;

        Ok(SetInterestResponse { interest, outcome })
    }
}

/// Interest service implementing the read driving port.
#[derive(Clone)]
pub struct InterestQueryService<U, I> {
    users: Arc<U>,
    interests: Arc<I>,
}

impl<U, I> InterestQueryService<U, I> {
    /// Create the query service over the user directory and interest store.
    pub fn new(users: Arc<U>, interests: Arc<I>) -> Self {
        Self { users, interests }
    }
}

#[async_trait]
impl<U, I> InterestQuery for InterestQueryService<U, I>
where
    U: UserDirectory,
    I: InterestRepository,
{
    async fn list_for_user(
        &self,
        request: ListUserInterestsRequest,
    ) -> Result<ListUserInterestsResponse, Error> {
        retry_once_on_timeout(
            || self.users.find_by_id(&request.user_id),
            |error| matches!(error, UserDirectoryError::Timeout { .. }),
        )
        .await
        .map_err(map_user_directory_error)?
        .ok_or_else(|| Error::not_found(format!("user {} not found", request.user_id)))?;

        let mut interests = retry_once_on_timeout(
            || self.interests.current_for_user(&request.user_id),
            |error| matches!(error, InterestRepositoryError::Timeout { .. }),
        )
        .await
        .map_err(map_interest_repository_error)?;
        interests.sort_by(|a, b| a.venue_id().cmp(b.venue_id()));

        Ok(ListUserInterestsResponse { interests })
    }
}

#[cfg(test)]
#[path = "interest_service_tests.rs"]
mod tests;
