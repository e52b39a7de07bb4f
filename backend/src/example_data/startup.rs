//! Startup seeding orchestration.

use std::path::Path;

use example_data::{RegistryError, SeedRegistry};
use thiserror::Error;
use tracing::info;

use crate::domain::example_data::{DemoData, ExampleDataError};
use crate::example_data::config::ExampleDataSettings;

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Registry loading failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Population generation or conversion failed.
    #[error("demo population error: {0}")]
    Population(#[from] ExampleDataError),
    /// Seed name must not be empty.
    #[error("seed name must not be empty")]
    EmptySeedName,
}

/// Generate the configured demo population when seeding is enabled.
///
/// Returns `Ok(None)` when seeding is disabled. The registry comes from
/// `registry_path` when set, otherwise from the registry embedded in the
/// binary.
///
/// # Examples
///
/// ```rust
/// use backend::example_data::{ExampleDataSettings, demo_population_on_startup};
///
/// let settings = ExampleDataSettings {
///     enabled: false,
///     seed_name: None,
///     registry_path: None,
/// };
/// let population = demo_population_on_startup(&settings).expect("disabled seeding succeeds");
/// assert!(population.is_none());
/// ```
pub fn demo_population_on_startup(
    settings: &ExampleDataSettings,
) -> Result<Option<DemoData>, StartupSeedingError> {
    if !settings.is_enabled() {
        info!(reason = "disabled", "demo population seeding skipped");
        return Ok(None);
    }

    let seed_name = settings.seed_name().trim();
    if seed_name.is_empty() {
        return Err(StartupSeedingError::EmptySeedName);
    }

    let registry = match settings.registry_path() {
        Some(path) => load_registry(path)?,
        None => DemoData::default_registry()?,
    };

    let data = DemoData::generate(&registry, seed_name)?;
    info!(
        seed = seed_name,
        users = data.users.len(),
        venues = data.venues.len(),
        friendships = data.friendships.len(),
        "demo population seeded"
    );
    Ok(Some(data))
}

fn load_registry(path: &Path) -> Result<SeedRegistry, StartupSeedingError> {
    Ok(SeedRegistry::from_file(path)?)
}
