//! Builders wiring domain services to their adapters for the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use backend::domain::ports::{ReservationCommand, ReservationQuery};
use backend::domain::{
    ConsensusCoordinator, InterestCommandService, InterestQueryService, RecommendationService,
    ReservationLifecycleService, VenueLockRegistry,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::{
    MemoryInterestRepository, MemoryReservationRepository, SeededFriendshipDirectory,
    SeededUserDirectory, SeededVenueDirectory,
};

use super::ServerConfig;

/// Build the shared HTTP state from seeded directories and memory stores.
///
/// All services observe the same interest and reservation stores, the same
/// per-venue lock registry, and the same clock, so quorum evaluation and the
/// reservation lifecycle agree on what they see.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let users = Arc::new(SeededUserDirectory::new(config.seed.users.iter().cloned()));
    let venues = Arc::new(SeededVenueDirectory::new(config.seed.venues.iter().cloned()));
    let friendships = Arc::new(SeededFriendshipDirectory::new(
        config.seed.friendships.iter().cloned(),
    ));

    let interests = Arc::new(MemoryInterestRepository::new());
    let reservations = Arc::new(MemoryReservationRepository::new());
    let locks = Arc::new(VenueLockRegistry::new());

    let coordinator = Arc::new(ConsensusCoordinator::new(
        interests.clone(),
        reservations.clone(),
        locks.clone(),
        config.policy.clone(),
        clock.clone(),
    ));

    let interest_command = Arc::new(InterestCommandService::new(
        users.clone(),
        venues.clone(),
        interests.clone(),
        coordinator,
        clock.clone(),
    ));
    let interest_query = Arc::new(InterestQueryService::new(users.clone(), interests.clone()));

    let lifecycle = Arc::new(ReservationLifecycleService::new(
        reservations,
        users.clone(),
        venues.clone(),
        locks,
        config.policy.clone(),
        clock,
    ));

    let recommendations = Arc::new(RecommendationService::new(
        users,
        venues,
        friendships,
        interests,
        config.policy.clone(),
    ));

    web::Data::new(HttpState {
        interests: interest_command,
        interests_query: interest_query,
        recommendations,
        reservations: lifecycle.clone() as Arc<dyn ReservationCommand>,
        reservations_query: lifecycle as Arc<dyn ReservationQuery>,
    })
}
