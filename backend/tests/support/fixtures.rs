//! Deterministic population and wiring helpers for engine integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! shared fixtures live here and are pulled in per test crate with a
//! `#[path]` include. The population is small enough to reason about by
//! hand: four users, three venues, and a friendship triangle that leaves
//! one user isolated.

use std::sync::Arc;

use actix_web::web;
use backend::domain::ports::{ReservationCommand, ReservationQuery};
use backend::domain::{
    ConsensusCoordinator, ConsensusPolicy, ConsensusSettings, DisplayName, Friendship, GeoPoint,
    InterestCommandService, InterestQueryService, RecommendationService,
    ReservationLifecycleService, User, UserId, Venue, VenueId, VenueLockRegistry,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::{
    MemoryInterestRepository, MemoryReservationRepository, SeededFriendshipDirectory,
    SeededUserDirectory, SeededVenueDirectory,
};
use mockable::{Clock, DefaultClock};
use uuid::Uuid;

pub(crate) fn ada() -> Uuid {
    Uuid::from_u128(0xA1)
}

pub(crate) fn grace() -> Uuid {
    Uuid::from_u128(0xA2)
}

pub(crate) fn alan() -> Uuid {
    Uuid::from_u128(0xA3)
}

pub(crate) fn edsger() -> Uuid {
    Uuid::from_u128(0xA4)
}

pub(crate) fn old_crown() -> Uuid {
    Uuid::from_u128(0xB1)
}

pub(crate) fn verdant_cafe() -> Uuid {
    Uuid::from_u128(0xB2)
}

pub(crate) fn spice_merchant() -> Uuid {
    Uuid::from_u128(0xB3)
}

fn user(id: Uuid, name: &str) -> User {
    User::new(
        UserId::from_uuid(id),
        DisplayName::new(name).expect("valid fixture name"),
    )
}

fn venue(id: Uuid, name: &str, category: &str, address: &str, lat: f64, lon: f64) -> Venue {
    Venue::new(
        VenueId::from_uuid(id),
        name.to_owned(),
        category.to_owned(),
        address.to_owned(),
        GeoPoint::new(lat, lon).expect("valid fixture location"),
    )
}

fn both_ways(a: Uuid, b: Uuid, strength: f64) -> [Friendship; 2] {
    let forward = Friendship::try_new(UserId::from_uuid(a), UserId::from_uuid(b), strength)
        .expect("valid fixture friendship");
    let reverse = Friendship::try_new(UserId::from_uuid(b), UserId::from_uuid(a), strength)
        .expect("valid fixture friendship");
    [forward, reverse]
}

/// Seed data shared by the integration suites.
pub(crate) struct Population {
    pub(crate) users: Vec<User>,
    pub(crate) venues: Vec<Venue>,
    pub(crate) friendships: Vec<Friendship>,
}

/// Ada, Grace, and Alan form a friendship triangle; Edsger knows nobody.
pub(crate) fn standard_population() -> Population {
    let mut friendships = Vec::new();
    friendships.extend(both_ways(ada(), grace(), 0.9));
    friendships.extend(both_ways(ada(), alan(), 0.5));
    friendships.extend(both_ways(grace(), alan(), 0.8));

    Population {
        users: vec![
            user(ada(), "Ada Lovelace"),
            user(grace(), "Grace Hopper"),
            user(alan(), "Alan Turing"),
            user(edsger(), "Edsger Dijkstra"),
        ],
        venues: vec![
            venue(
                old_crown(),
                "The Old Crown",
                "pub",
                "33 New Oxford St",
                51.5185,
                -0.1265,
            ),
            venue(
                verdant_cafe(),
                "Verdant Cafe",
                "cafe",
                "12 Camden Passage",
                51.5360,
                -0.1030,
            ),
            venue(
                spice_merchant(),
                "Spice Merchant",
                "restaurant",
                "78 Brick Lane",
                51.5200,
                -0.0715,
            ),
        ],
        friendships,
    }
}

/// Settings matching the engine defaults; tests tweak individual fields.
pub(crate) fn engine_settings() -> ConsensusSettings {
    ConsensusSettings {
        min_participants: 2,
        confirmation_threshold: None,
        recommended_people_limit: 5,
        reservation_overlap_minutes: 30,
        auto_schedule_hour_utc: 19,
        lock_timeout_ms: 2000,
    }
}

pub(crate) fn policy_from(settings: ConsensusSettings) -> ConsensusPolicy {
    ConsensusPolicy::try_from(settings).expect("valid test policy")
}

pub(crate) fn policy(
    min_participants: usize,
    confirmation_threshold: Option<usize>,
) -> ConsensusPolicy {
    let mut settings = engine_settings();
    settings.min_participants = min_participants;
    settings.confirmation_threshold = confirmation_threshold;
    policy_from(settings)
}

/// Wire real memory adapters and domain services into the shared state.
///
/// Mirrors the production composition: one interest store, one reservation
/// store, one lock registry, and one clock shared by every service.
pub(crate) fn engine_state(policy: ConsensusPolicy, population: &Population) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let users = Arc::new(SeededUserDirectory::new(population.users.iter().cloned()));
    let venues = Arc::new(SeededVenueDirectory::new(population.venues.iter().cloned()));
    let friendships = Arc::new(SeededFriendshipDirectory::new(
        population.friendships.iter().cloned(),
    ));

    let interests = Arc::new(MemoryInterestRepository::new());
    let reservations = Arc::new(MemoryReservationRepository::new());
    let locks = Arc::new(VenueLockRegistry::new());

    let coordinator = Arc::new(ConsensusCoordinator::new(
        interests.clone(),
        reservations.clone(),
        locks.clone(),
        policy.clone(),
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
        policy.clone(),
        clock,
    ));
    let recommendations = Arc::new(RecommendationService::new(
        users,
        venues,
        friendships,
        interests,
        policy,
    ));

    web::Data::new(HttpState {
        interests: interest_command,
        interests_query: interest_query,
        recommendations,
        reservations: lifecycle.clone() as Arc<dyn ReservationCommand>,
        reservations_query: lifecycle as Arc<dyn ReservationQuery>,
    })
}
