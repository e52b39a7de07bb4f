//! Venue recommendation views and the service that builds them.
//!
//! Recommendations are computed over one coherent snapshot of users,
//! venues, friendships, and current interests. Once the snapshot is loaded
//! the computation is pure, and the ordering is fully deterministic: score
//! descending, then venue id ascending, with the same rule for people.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ids::{UserId, VenueId};
use crate::domain::interest::InterestStatus;
use crate::domain::ports::{
    FriendshipDirectory, FriendshipDirectoryError, InterestRepository, InterestRepositoryError,
    RecommendationQuery, RecommendationRequest, RecommendationResponse, UserDirectory,
    UserDirectoryError, VenueDirectory, VenueDirectoryError,
};
use crate::domain::retry::retry_once_on_timeout;
use crate::domain::scoring::CompatibilityScorer;
use crate::domain::settings::ConsensusPolicy;
use crate::domain::user::User;
use crate::domain::venue::Venue;

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

fn map_friendship_directory_error(error: FriendshipDirectoryError) -> Error {
    match error {
        FriendshipDirectoryError::Timeout { message } => {
            Error::timeout(format!("friendship directory timed out: {message}"))
        }
        FriendshipDirectoryError::Lookup { message } => {
            Error::internal(format!("friendship directory failed: {message}"))
        }
    }
}

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

/// A compatible person attached to a recommended venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedPerson {
    user: User,
    compatibility_score: f64,
}

impl RecommendedPerson {
    /// Pair a user with their compatibility score for the viewer.
    #[must_use]
    pub fn new(user: User, compatibility_score: f64) -> Self {
        Self {
            user,
            compatibility_score,
        }
    }

    /// The recommended person.
    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Pairwise compatibility with the viewer, in `[0, 1]`.
    #[must_use]
    pub fn compatibility_score(&self) -> f64 {
        self.compatibility_score
    }
}

/// One venue with its aggregate score for the requesting user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedVenue {
    venue: Venue,
    score: f64,
    recommended_people: Vec<RecommendedPerson>,
}

impl RecommendedVenue {
    /// Assemble a scored venue entry.
    #[must_use]
    pub fn new(venue: Venue, score: f64, recommended_people: Vec<RecommendedPerson>) -> Self {
        Self {
            venue,
            score,
            recommended_people,
        }
    }

    /// The recommended venue.
    #[must_use]
    pub fn venue(&self) -> &Venue {
        &self.venue
    }

    /// Aggregate score for the viewer.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Compatible people currently positive on this venue, best first.
    #[must_use]
    pub fn recommended_people(&self) -> &[RecommendedPerson] {
        &self.recommended_people
    }
}

/// Recommendation service implementing the query driving port.
#[derive(Clone)]
pub struct RecommendationService<U, V, F, I> {
    users: Arc<U>,
    venues: Arc<V>,
    friendships: Arc<F>,
    interests: Arc<I>,
    policy: ConsensusPolicy,
}

impl<U, V, F, I> RecommendationService<U, V, F, I> {
    /// Create the service over the read-side directories and stores.
    pub fn new(
        users: Arc<U>,
        venues: Arc<V>,
        friendships: Arc<F>,
        interests: Arc<I>,
        policy: ConsensusPolicy,
    ) -> Self {
        Self {
            users,
            venues,
            friendships,
            interests,
            policy,
        }
    }
}

#[async_trait]
impl<U, V, F, I> RecommendationQuery for RecommendationService<U, V, F, I>
where
    U: UserDirectory,
    V: VenueDirectory,
    F: FriendshipDirectory,
    I: InterestRepository,
{
    async fn recommend_for_user(
        &self,
        request: RecommendationRequest,
    ) -> Result<RecommendationResponse, Error> {
        retry_once_on_timeout(
            || self.users.find_by_id(&request.user_id),
            |error| matches!(error, UserDirectoryError::Timeout { .. }),
        )
        .await
        .map_err(map_user_directory_error)?
        .ok_or_else(|| Error::not_found(format!("user {} not found", request.user_id)))?;

        let venues = retry_once_on_timeout(
            || self.venues.list(),
            |error| matches!(error, VenueDirectoryError::Timeout { .. }),
        )
        .await
        .map_err(map_venue_directory_error)?;
        let friendships = retry_once_on_timeout(
            || self.friendships.list_all(),
            |error| matches!(error, FriendshipDirectoryError::Timeout { .. }),
        )
        .await
        .map_err(map_friendship_directory_error)?;
        let interests = retry_once_on_timeout(
            || self.interests.current_all(),
            |error| matches!(error, InterestRepositoryError::Timeout { .. }),
        )
        .await
        .map_err(map_interest_repository_error)?;
        let people = retry_once_on_timeout(
            || self.users.list(),
            |error| matches!(error, UserDirectoryError::Timeout { .. }),
        )
        .await
        .map_err(map_user_directory_error)?;

        let scorer = CompatibilityScorer::new(&interests, &friendships);
        let users_by_id: HashMap<UserId, User> = people
            .into_iter()
            .map(|user| (user.id().clone(), user))
            .collect();

        let excluded: HashSet<&VenueId> = interests
            .iter()
            .filter(|interest| {
                interest.user_id() == &request.user_id
                    && interest.status() == InterestStatus::NotInterested
            })
            .map(|interest| interest.venue_id())
            .collect();
        let mut positive_by_venue: HashMap<&VenueId, Vec<UserId>> = HashMap::new();
        for interest in &interests {
            if interest.status().counts_toward_quorum() {
                positive_by_venue
                    .entry(interest.venue_id())
                    .or_default()
                    .push(interest.user_id().clone());
            }
        }

        let mut recommended_venues = Vec::with_capacity(venues.len());
        for venue in venues {
            if excluded.contains(venue.id()) {
                continue;
            }
            let peers = positive_by_venue
                .get(venue.id())
                .cloned()
                .unwrap_or_default();
            let score = scorer.venue_score(
                &request.user_id,
                venue.id(),
                venue.location(),
                &peers,
                request.origin,
            );

            let mut recommended_people: Vec<RecommendedPerson> = peers
                .iter()
                .filter(|peer| *peer != &request.user_id)
                .filter_map(|peer| users_by_id.get(peer).cloned())
                .map(|user| {
                    let compatibility_score = scorer.pairwise(&request.user_id, user.id());
                    RecommendedPerson::new(user, compatibility_score)
                })
                .collect();
            recommended_people.sort_by(|a, b| {
                b.compatibility_score
                    .total_cmp(&a.compatibility_score)
                    .then_with(|| a.user.id().cmp(b.user.id()))
            });
            recommended_people.truncate(self.policy.recommended_people_limit());

            recommended_venues.push(RecommendedVenue::new(venue, score, recommended_people));
        }
        recommended_venues.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.venue.id().cmp(b.venue.id()))
        });

        Ok(RecommendationResponse { recommended_venues })
    }
}

#[cfg(test)]
#[path = "recommendation_tests.rs"]
mod tests;
