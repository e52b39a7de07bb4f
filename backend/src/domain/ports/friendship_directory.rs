//! Port for the read-only friendship graph.

use async_trait::async_trait;

use crate::domain::friendship::Friendship;
use crate::domain::ids::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by friendship directory adapters.
    pub enum FriendshipDirectoryError {
        /// The directory could not serve the request in time.
        Timeout { message: String } =>
            "friendship directory timed out: {message}",
        /// Lookup failed inside the directory.
        Lookup { message: String } =>
            "friendship directory lookup failed: {message}",
    }
}

/// Port for reading directed friendship edges.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FriendshipDirectory: Send + Sync {
    /// Directed edges owned by the user.
    async fn edges_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Friendship>, FriendshipDirectoryError>;

    /// Every directed edge in the graph. Powers snapshot scoring.
    async fn list_all(&self) -> Result<Vec<Friendship>, FriendshipDirectoryError>;
}

/// Fixture implementation for tests that do not exercise the graph.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFriendshipDirectory;

#[async_trait]
impl FriendshipDirectory for FixtureFriendshipDirectory {
    async fn edges_for_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<Friendship>, FriendshipDirectoryError> {
        Ok(Vec::new())
    }

    async fn list_all(&self) -> Result<Vec<Friendship>, FriendshipDirectoryError> {
        Ok(Vec::new())
    }
}
