//! Deterministic demo population generation for demonstration purposes.
//!
//! This crate produces believable, reproducible users, venues, and a
//! friendship graph from a JSON seed registry. It is designed to be
//! independent of backend domain types to avoid circular dependencies.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading seed registries from JSON files
//! - Deterministic population generation using named seeds
//! - Display name validation matching backend constraints
//! - Configurable venue categories and population sizes
//!
//! # Example
//!
//! ```
//! use example_data::{SeedRegistry, generate_demo_population};
//!
//! let json = r#"{
//!     "version": 1,
//!     "venueCategories": ["pub", "cafe"],
//!     "seeds": [{
//!         "name": "test-seed",
//!         "seed": 42,
//!         "userCount": 3,
//!         "venueCount": 2,
//!         "friendshipsPerUser": 1
//!     }]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed_def = registry.find_seed("test-seed").expect("seed exists");
//! let population = generate_demo_population(&registry, seed_def).expect("generation succeeds");
//!
//! assert_eq!(population.users.len(), 3);
//! assert_eq!(population.venues.len(), 2);
//! ```

mod error;
mod generator;
mod registry;
mod seed;
mod validation;

pub use error::{GenerationError, RegistryError};
pub use generator::generate_demo_population;
pub use registry::{SeedDefinition, SeedRegistry};
pub use seed::{DemoPopulation, ExampleFriendshipSeed, ExampleUserSeed, ExampleVenueSeed};
pub use validation::{DISPLAY_NAME_MAX, DISPLAY_NAME_MIN, is_valid_display_name};
