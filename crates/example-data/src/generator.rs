//! Deterministic demo population generation.
//!
//! Generation is driven entirely by a seeded [`ChaCha8Rng`], so a given seed
//! definition always produces the same users, venues, and friendships. Names
//! come from the `fake` crate and are sanitised until they satisfy the
//! backend's display name rules.

use fake::Fake;
use fake::faker::address::en::{BuildingNumber, StreetName};
use fake::faker::name::en::{FirstName, LastName};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::error::GenerationError;
use crate::registry::{SeedDefinition, SeedRegistry};
use crate::seed::{DemoPopulation, ExampleFriendshipSeed, ExampleUserSeed, ExampleVenueSeed};
use crate::validation::{DISPLAY_NAME_MAX, is_valid_display_name, sanitize_display_name};

/// Retry budget for producing a valid display name from faker output.
const MAX_NAME_ATTEMPTS: usize = 100;

/// Establishment suffixes for venue names.
const VENUE_SUFFIXES: &[&str] = &["Arms", "Tavern", "House", "Kitchen", "Cafe"];

/// Centre of the generated coordinate cluster.
const BASE_LATITUDE: f64 = 51.5074;
const BASE_LONGITUDE: f64 = -0.1278;

/// Maximum coordinate offset from the cluster centre, in degrees.
const COORDINATE_JITTER: f64 = 0.05;

/// Generates a deterministic demo population from a seed definition.
///
/// The same registry and definition always yield the same population. Venue
/// categories are drawn from the registry; friendship counts are clamped to
/// the number of available peers.
///
/// # Errors
///
/// Returns [`GenerationError::DisplayNameGenerationFailed`] if no valid
/// display name emerges within the retry budget, and
/// [`GenerationError::NoVenueCategories`] if the registry offers no
/// categories to draw from.
pub fn generate_demo_population(
    registry: &SeedRegistry,
    definition: &SeedDefinition,
) -> Result<DemoPopulation, GenerationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(definition.seed());

    let mut users = Vec::with_capacity(definition.user_count());
    for _ in 0..definition.user_count() {
        users.push(ExampleUserSeed {
            id: Uuid::from_u128(rng.random()),
            display_name: generate_display_name(&mut rng)?,
        });
    }

    let mut venues = Vec::with_capacity(definition.venue_count());
    for _ in 0..definition.venue_count() {
        venues.push(generate_venue(&mut rng, registry)?);
    }

    let friendships = generate_friendships(&mut rng, &users, definition.friendships_per_user());

    Ok(DemoPopulation {
        users,
        venues,
        friendships,
    })
}

fn generate_display_name(rng: &mut ChaCha8Rng) -> Result<String, GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let first: String = FirstName().fake_with_rng(rng);
        let last: String = LastName().fake_with_rng(rng);
        let sanitised = sanitize_display_name(&format!("{first} {last}"));
        let candidate: String = sanitised.chars().take(DISPLAY_NAME_MAX).collect();
        if is_valid_display_name(&candidate) {
            return Ok(candidate);
        }
    }
    Err(GenerationError::DisplayNameGenerationFailed {
        max_attempts: MAX_NAME_ATTEMPTS,
    })
}

fn generate_venue(
    rng: &mut ChaCha8Rng,
    registry: &SeedRegistry,
) -> Result<ExampleVenueSeed, GenerationError> {
    let category = pick(rng, registry.venue_categories())
        .cloned()
        .ok_or(GenerationError::NoVenueCategories)?;
    let family: String = LastName().fake_with_rng(rng);
    let suffix = pick(rng, VENUE_SUFFIXES).copied().unwrap_or("House");
    let number: String = BuildingNumber().fake_with_rng(rng);
    let street: String = StreetName().fake_with_rng(rng);
    Ok(ExampleVenueSeed {
        id: Uuid::from_u128(rng.random()),
        name: format!("The {family} {suffix}"),
        category,
        address: format!("{number} {street}"),
        latitude: BASE_LATITUDE + rng.random_range(-COORDINATE_JITTER..=COORDINATE_JITTER),
        longitude: BASE_LONGITUDE + rng.random_range(-COORDINATE_JITTER..=COORDINATE_JITTER),
    })
}

fn generate_friendships(
    rng: &mut ChaCha8Rng,
    users: &[ExampleUserSeed],
    friendships_per_user: usize,
) -> Vec<ExampleFriendshipSeed> {
    let mut friendships = Vec::new();
    for user in users {
        let mut peers: Vec<Uuid> = users
            .iter()
            .filter(|peer| peer.id != user.id)
            .map(|peer| peer.id)
            .collect();
        peers.shuffle(rng);
        peers.truncate(friendships_per_user.min(peers.len()));
        for friend_id in peers {
            friendships.push(ExampleFriendshipSeed {
                user_id: user.id,
                friend_id,
                strength: f64::from(rng.random_range(1..=10_u32)) / 10.0,
            });
        }
    }
    friendships
}

fn pick<'a, T>(rng: &mut ChaCha8Rng, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let index = rng.random_range(0..items.len());
    items.get(index)
}
