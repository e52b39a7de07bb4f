//! Demo population seeding.
//!
//! Converts generated example-data populations into validated domain
//! entities so the in-memory directories can be pre-filled at startup. Only
//! compiled with the `example-data` feature.

use example_data::{
    DemoPopulation, GenerationError, RegistryError, SeedRegistry, generate_demo_population,
};
use thiserror::Error;

use crate::domain::friendship::{Friendship, FriendshipValidationError};
use crate::domain::ids::UserId;
use crate::domain::user::{User, UserValidationError};
use crate::domain::venue::{Venue, VenueValidationError};

/// Seed name used when no seed is configured.
pub const DEFAULT_SEED_NAME: &str = "demo";

/// Registry used when no registry file is configured.
const DEFAULT_REGISTRY_JSON: &str = r#"{
    "version": 1,
    "venueCategories": ["pub", "cafe", "restaurant", "bar"],
    "seeds": [
        {"name": "demo", "seed": 20260822, "userCount": 12, "venueCount": 6, "friendshipsPerUser": 4},
        {"name": "crowd", "seed": 31337, "userCount": 60, "venueCount": 15, "friendshipsPerUser": 8}
    ]
}"#;

/// Errors raised while generating or converting a demo population.
#[derive(Debug, Error)]
pub enum ExampleDataError {
    /// The seed registry could not be parsed or queried.
    #[error("seed registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Population generation failed.
    #[error("population generation error: {0}")]
    Generation(#[from] GenerationError),
    /// A generated user failed domain validation.
    #[error("generated user failed validation: {0}")]
    User(#[from] UserValidationError),
    /// A generated venue failed domain validation.
    #[error("generated venue failed validation: {0}")]
    Venue(#[from] VenueValidationError),
    /// A generated friendship failed domain validation.
    #[error("generated friendship failed validation: {0}")]
    Friendship(#[from] FriendshipValidationError),
}

/// Domain-typed demo population ready for directory seeding.
#[derive(Debug, Clone, Default)]
pub struct DemoData {
    /// Seeded users.
    pub users: Vec<User>,
    /// Seeded venues.
    pub venues: Vec<Venue>,
    /// Seeded friendship edges.
    pub friendships: Vec<Friendship>,
}

impl DemoData {
    /// Parses the registry bundled into the binary.
    ///
    /// # Errors
    ///
    /// Returns [`ExampleDataError::Registry`] if the embedded document is
    /// invalid; this indicates a build-time defect rather than bad input.
    pub fn default_registry() -> Result<SeedRegistry, ExampleDataError> {
        Ok(SeedRegistry::from_json(DEFAULT_REGISTRY_JSON)?)
    }

    /// Generates the named seed and converts it into domain entities.
    ///
    /// # Errors
    ///
    /// Returns [`ExampleDataError`] when the seed is unknown, generation
    /// fails, or a generated record does not satisfy domain invariants.
    pub fn generate(registry: &SeedRegistry, seed_name: &str) -> Result<Self, ExampleDataError> {
        let definition = registry.find_seed(seed_name)?;
        let population = generate_demo_population(registry, definition)?;
        Self::try_from_population(population)
    }

    fn try_from_population(population: DemoPopulation) -> Result<Self, ExampleDataError> {
        let users = population
            .users
            .into_iter()
            .map(|seed| User::try_from_parts(seed.id.to_string(), seed.display_name))
            .collect::<Result<Vec<_>, _>>()?;
        let venues = population
            .venues
            .into_iter()
            .map(|seed| {
                Venue::try_from_parts(
                    seed.id.to_string(),
                    seed.name,
                    seed.category,
                    seed.address,
                    seed.latitude,
                    seed.longitude,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        let friendships = population
            .friendships
            .into_iter()
            .map(|seed| {
                Friendship::try_new(
                    UserId::from_uuid(seed.user_id),
                    UserId::from_uuid(seed.friend_id),
                    seed.strength,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            users,
            venues,
            friendships,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn the_embedded_registry_parses() {
        let registry = DemoData::default_registry().expect("embedded registry is valid");
        assert!(registry.find_seed(DEFAULT_SEED_NAME).is_ok());
    }

    #[rstest]
    fn generation_yields_validated_domain_entities() {
        let registry = DemoData::default_registry().expect("embedded registry is valid");
        let data = DemoData::generate(&registry, DEFAULT_SEED_NAME).expect("generation succeeds");
        assert_eq!(data.users.len(), 12);
        assert_eq!(data.venues.len(), 6);
        assert!(!data.friendships.is_empty());

        let user_ids: Vec<&UserId> = data.users.iter().map(User::id).collect();
        for friendship in &data.friendships {
            assert!(user_ids.contains(&friendship.user_id()));
            assert!(user_ids.contains(&friendship.friend_id()));
        }
    }

    #[rstest]
    fn generation_is_deterministic() {
        let registry = DemoData::default_registry().expect("embedded registry is valid");
        let first = DemoData::generate(&registry, DEFAULT_SEED_NAME).expect("generation succeeds");
        let second = DemoData::generate(&registry, DEFAULT_SEED_NAME).expect("generation succeeds");
        assert_eq!(first.users, second.users);
        assert_eq!(first.venues, second.venues);
    }

    #[rstest]
    fn an_unknown_seed_name_is_a_registry_error() {
        let registry = DemoData::default_registry().expect("embedded registry is valid");
        let result = DemoData::generate(&registry, "missing");
        assert!(matches!(result, Err(ExampleDataError::Registry(_))));
    }
}
