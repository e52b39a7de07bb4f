//! Seeded read-only directories for users, venues, and friendships.
//!
//! Profile, catalogue, and social-graph management live outside the engine.
//! These adapters hold a fixed seed behind an `Arc`, so cloning a directory
//! shares the data and every read is lock-free.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::friendship::Friendship;
use crate::domain::ids::{UserId, VenueId};
use crate::domain::ports::{
    FriendshipDirectory, FriendshipDirectoryError, UserDirectory, UserDirectoryError,
    VenueDirectory, VenueDirectoryError,
};
use crate::domain::user::User;
use crate::domain::venue::Venue;

/// Read-only [`UserDirectory`] backed by a seeded profile set.
#[derive(Debug, Default, Clone)]
pub struct SeededUserDirectory {
    users: Arc<HashMap<UserId, User>>,
}

impl SeededUserDirectory {
    /// Build a directory from seed profiles. A later profile with a repeated
    /// id replaces the earlier one.
    #[must_use]
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: Arc::new(
                users
                    .into_iter()
                    .map(|user| (user.id().clone(), user))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl UserDirectory for SeededUserDirectory {
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, UserDirectoryError> {
        Ok(self.users.get(user_id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserDirectoryError> {
        let mut users: Vec<User> = self.users.values().cloned().collect();
        users.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(users)
    }
}

/// Read-only [`VenueDirectory`] backed by a seeded catalogue.
#[derive(Debug, Default, Clone)]
pub struct SeededVenueDirectory {
    venues: Arc<HashMap<VenueId, Venue>>,
}

impl SeededVenueDirectory {
    /// Build a catalogue from seed venues. A later venue with a repeated id
    /// replaces the earlier one.
    #[must_use]
    pub fn new(venues: impl IntoIterator<Item = Venue>) -> Self {
        Self {
            venues: Arc::new(
                venues
                    .into_iter()
                    .map(|venue| (venue.id().clone(), venue))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl VenueDirectory for SeededVenueDirectory {
    async fn find_by_id(&self, venue_id: &VenueId) -> Result<Option<Venue>, VenueDirectoryError> {
        Ok(self.venues.get(venue_id).cloned())
    }

    async fn list(&self) -> Result<Vec<Venue>, VenueDirectoryError> {
        let mut venues: Vec<Venue> = self.venues.values().cloned().collect();
        venues.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(venues)
    }
}

/// Read-only [`FriendshipDirectory`] backed by a seeded edge list.
#[derive(Debug, Default, Clone)]
pub struct SeededFriendshipDirectory {
    edges: Arc<Vec<Friendship>>,
}

impl SeededFriendshipDirectory {
    /// Build a graph from seed edges, kept in seed order.
    #[must_use]
    pub fn new(edges: impl IntoIterator<Item = Friendship>) -> Self {
        Self {
            edges: Arc::new(edges.into_iter().collect()),
        }
    }
}

#[async_trait]
impl FriendshipDirectory for SeededFriendshipDirectory {
    async fn edges_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Friendship>, FriendshipDirectoryError> {
        Ok(self
            .edges
            .iter()
            .filter(|edge| edge.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Friendship>, FriendshipDirectoryError> {
        Ok(self.edges.as_ref().clone())
    }
}
