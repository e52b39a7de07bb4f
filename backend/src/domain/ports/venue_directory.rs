//! Port for the read-only venue directory.

use async_trait::async_trait;

use crate::domain::ids::VenueId;
use crate::domain::venue::Venue;

use super::define_port_error;

define_port_error! {
    /// Errors raised by venue directory adapters.
    pub enum VenueDirectoryError {
        /// The directory could not serve the request in time.
        Timeout { message: String } =>
            "venue directory timed out: {message}",
        /// Lookup failed inside the directory.
        Lookup { message: String } =>
            "venue directory lookup failed: {message}",
    }
}

/// Port for reading the venue catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VenueDirectory: Send + Sync {
    /// Find a venue by id.
    async fn find_by_id(&self, venue_id: &VenueId) -> Result<Option<Venue>, VenueDirectoryError>;

    /// All known venues.
    async fn list(&self) -> Result<Vec<Venue>, VenueDirectoryError>;
}

/// Fixture implementation for tests that do not exercise the catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVenueDirectory;

#[async_trait]
impl VenueDirectory for FixtureVenueDirectory {
    async fn find_by_id(&self, _venue_id: &VenueId) -> Result<Option<Venue>, VenueDirectoryError> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<Venue>, VenueDirectoryError> {
        Ok(Vec::new())
    }
}
