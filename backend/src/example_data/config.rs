//! Demo population configuration loaded via OrthoConfig.

use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::example_data::DEFAULT_SEED_NAME;

/// Configuration values controlling demo population seeding at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXAMPLE_DATA")]
pub struct ExampleDataSettings {
    /// Enable demo population seeding on startup.
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// Seed name to load from the registry.
    pub seed_name: Option<String>,
    /// Registry file overriding the registry embedded in the binary.
    pub registry_path: Option<PathBuf>,
}

impl ExampleDataSettings {
    /// Whether seeding runs on startup.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Return the configured seed name, falling back to the default.
    #[must_use]
    pub fn seed_name(&self) -> &str {
        self.seed_name.as_deref().unwrap_or(DEFAULT_SEED_NAME)
    }

    /// Return the registry file path, when one overrides the embedded
    /// registry.
    #[must_use]
    pub fn registry_path(&self) -> Option<&Path> {
        self.registry_path.as_deref()
    }
}
