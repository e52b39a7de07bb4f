//! Seed registry parsing and validation.
//!
//! A registry is a versioned JSON document listing the venue categories a
//! demo population may draw from and the named seed definitions that make
//! generation reproducible. Parsing validates the document shape before any
//! seed is used, so lookup and generation can rely on a well-formed registry.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::RegistryError;

/// Registry schema version this crate understands.
const SUPPORTED_VERSION: u32 = 1;

/// A named, reproducible seed definition.
///
/// Each definition fixes the RNG seed and the population dimensions, so the
/// same name always yields the same demo population.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDefinition {
    name: String,
    seed: u64,
    user_count: usize,
    venue_count: usize,
    friendships_per_user: usize,
}

impl SeedDefinition {
    /// The seed's registry name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The RNG seed value.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of users to generate.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.user_count
    }

    /// Number of venues to generate.
    #[must_use]
    pub fn venue_count(&self) -> usize {
        self.venue_count
    }

    /// Target number of friendships per generated user.
    #[must_use]
    pub fn friendships_per_user(&self) -> usize {
        self.friendships_per_user
    }
}

/// A validated collection of seed definitions and venue categories.
///
/// Construct one with [`SeedRegistry::from_json`] or
/// [`SeedRegistry::from_file`]; both reject unsupported versions, empty or
/// blank venue categories, and empty seed lists.
///
/// # Examples
///
/// ```
/// use example_data::SeedRegistry;
///
/// let json = r#"{
///     "version": 1,
///     "venueCategories": ["pub", "cafe"],
///     "seeds": [
///         {"name": "demo", "seed": 7, "userCount": 4, "venueCount": 2, "friendshipsPerUser": 1}
///     ]
/// }"#;
/// let registry = SeedRegistry::from_json(json).expect("registry parses");
/// assert_eq!(registry.venue_categories(), ["pub", "cafe"]);
/// assert_eq!(registry.find_seed("demo").expect("seed exists").seed(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistry {
    venue_categories: Vec<String>,
    seeds: Vec<SeedDefinition>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRegistry {
    version: u32,
    venue_categories: Vec<String>,
    seeds: Vec<RawSeedDefinition>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedDefinition {
    name: String,
    seed: u64,
    user_count: usize,
    venue_count: usize,
    friendships_per_user: usize,
}

impl SeedRegistry {
    /// Parses a registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ParseError`] for malformed JSON,
    /// [`RegistryError::UnsupportedVersion`] for a version mismatch, and the
    /// relevant validation variant for empty categories or seeds.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawRegistry =
            serde_json::from_str(json).map_err(|err| RegistryError::ParseError {
                message: err.to_string(),
            })?;
        Self::from_raw(raw)
    }

    /// Reads and parses a registry from a file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::IoError`] when the file cannot be read, plus
    /// any error [`SeedRegistry::from_json`] can return.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let json = fs::read_to_string(path).map_err(|err| RegistryError::IoError {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Self::from_json(&json)
    }

    fn from_raw(raw: RawRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }
        if raw.venue_categories.is_empty() {
            return Err(RegistryError::EmptyVenueCategories);
        }
        for (index, category) in raw.venue_categories.iter().enumerate() {
            if category.trim().is_empty() {
                return Err(RegistryError::BlankVenueCategory { index });
            }
        }
        if raw.seeds.is_empty() {
            return Err(RegistryError::EmptySeeds);
        }
        let seeds = raw
            .seeds
            .into_iter()
            .map(|seed| SeedDefinition {
                name: seed.name,
                seed: seed.seed,
                user_count: seed.user_count,
                venue_count: seed.venue_count,
                friendships_per_user: seed.friendships_per_user,
            })
            .collect();
        Ok(Self {
            venue_categories: raw.venue_categories,
            seeds,
        })
    }

    /// Venue categories generated venues may take.
    #[must_use]
    pub fn venue_categories(&self) -> &[String] {
        &self.venue_categories
    }

    /// All seed definitions in registry order.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Looks up a seed definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SeedNotFound`] when no seed has the given
    /// name.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|seed| seed.name() == name)
            .ok_or_else(|| RegistryError::SeedNotFound {
                name: name.to_owned(),
            })
    }
}
