//! Port for the read-only user directory.
//!
//! Profile management lives outside the engine; this port exposes the seeded
//! directory the engine validates request identities against.

use async_trait::async_trait;

use crate::domain::ids::UserId;
use crate::domain::user::User;

use super::define_port_error;

define_port_error! {
    /// Errors raised by user directory adapters.
    pub enum UserDirectoryError {
        /// The directory could not serve the request in time.
        Timeout { message: String } =>
            "user directory timed out: {message}",
        /// Lookup failed inside the directory.
        Lookup { message: String } =>
            "user directory lookup failed: {message}",
    }
}

/// Port for reading user profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by id.
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, UserDirectoryError>;

    /// All known users.
    async fn list(&self) -> Result<Vec<User>, UserDirectoryError>;
}

/// Fixture implementation for tests that do not exercise the directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn find_by_id(&self, _user_id: &UserId) -> Result<Option<User>, UserDirectoryError> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<User>, UserDirectoryError> {
        Ok(Vec::new())
    }
}
