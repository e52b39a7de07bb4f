#![cfg(feature = "example-data")]
//! End-to-end flow over a generated demo population.
//!
//! Proves the embedded seed registry produces data that passes domain
//! validation and drives the engine: two generated users reach quorum on a
//! generated venue, and recommendations rank the full venue set.

#[allow(dead_code)]
#[path = "support/fixtures.rs"]
mod fixtures;

use backend::domain::ports::{RecommendationRequest, SetInterestRequest};
use backend::domain::{ConsensusOutcome, ConsensusPolicy, InterestStatus, UserId, VenueId};
use backend::example_data::{ExampleDataSettings, demo_population_on_startup};

fn generated_population() -> fixtures::Population {
    let settings = ExampleDataSettings {
        enabled: true,
        seed_name: None,
        registry_path: None,
    };
    let data = demo_population_on_startup(&settings)
        .expect("embedded registry generates")
        .expect("seeding is enabled");
    fixtures::Population {
        users: data.users,
        venues: data.venues,
        friendships: data.friendships,
    }
}

#[tokio::test]
async fn generated_users_reach_quorum_on_a_generated_venue() {
    let population = generated_population();
    let actors: Vec<UserId> = population
        .users
        .iter()
        .take(2)
        .map(|user| user.id().clone())
        .collect();
    let venue: VenueId = population
        .venues
        .first()
        .expect("generated venue")
        .id()
        .clone();
    assert_eq!(actors.len(), 2, "registry seeds enough users for quorum");
    let state = fixtures::engine_state(ConsensusPolicy::default(), &population);

    let first = state
        .interests
        .set_interest(SetInterestRequest {
            user_id: actors[0].clone(),
            venue_id: venue.clone(),
            status: InterestStatus::Interested,
        })
        .await
        .expect("first write succeeds");
    assert_eq!(first.outcome, ConsensusOutcome::BelowQuorum { interested: 1 });

    let second = state
        .interests
        .set_interest(SetInterestRequest {
            user_id: actors[1].clone(),
            venue_id: venue,
            status: InterestStatus::Interested,
        })
        .await
        .expect("second write succeeds");
    let ConsensusOutcome::Created { reservation } = second.outcome else {
        panic!("expected quorum to create a reservation, got {}", second.outcome);
    };
    assert_eq!(reservation.participants().len(), 2);
}

#[tokio::test]
async fn recommendations_cover_the_generated_venues() {
    let population = generated_population();
    let viewer = population
        .users
        .first()
        .expect("generated user")
        .id()
        .clone();
    let venue_count = population.venues.len();
    let state = fixtures::engine_state(ConsensusPolicy::default(), &population);

    let response = state
        .recommendations
        .recommend_for_user(RecommendationRequest {
            user_id: viewer,
            origin: None,
        })
        .await
        .expect("recommendations succeed");

    assert_eq!(response.recommended_venues.len(), venue_count);
}
