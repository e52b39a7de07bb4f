//! Startup wiring for demo population seeding.

mod config;
mod startup;

pub use config::ExampleDataSettings;
pub use startup::{StartupSeedingError, demo_population_on_startup};
