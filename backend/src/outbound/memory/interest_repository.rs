//! In-memory interest store with copy-on-write snapshot reads.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ids::{UserId, VenueId};
use crate::domain::interest::Interest;
use crate::domain::ports::{InterestRepository, InterestRepositoryError};

/// Append-only record list plus the latest-wins projection derived from it.
#[derive(Debug, Default, Clone)]
struct Ledger {
    history: Vec<Interest>,
    current: HashMap<(UserId, VenueId), Interest>,
}

/// In-memory [`InterestRepository`] adapter.
///
/// Writes append to the history, replace the projection entry for the
/// (user, venue) pair, and publish the result as a fresh snapshot. Reads
/// clone the snapshot `Arc` and release the lock before scanning, so a slow
/// reader never stalls a writer and every read observes one coherent state.
///
/// Listing methods order their rows by id so repeated reads of an unchanged
/// store return identical output.
#[derive(Debug, Default)]
pub struct MemoryInterestRepository {
    ledger: RwLock<Arc<Ledger>>,
}

impl MemoryInterestRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn snapshot(&self) -> Arc<Ledger> {
        Arc::clone(&*self.ledger.read().await)
    }
}

#[async_trait]
impl InterestRepository for MemoryInterestRepository {
    async fn record(&self, interest: &Interest) -> Result<(), InterestRepositoryError> {
        let mut guard = self.ledger.write().await;
        // Clones the ledger only while a reader still holds the previous
        // snapshot; otherwise mutates in place.
        let ledger = Arc::make_mut(&mut guard);
        ledger.history.push(interest.clone());
        ledger.current.insert(
            (interest.user_id().clone(), interest.venue_id().clone()),
            interest.clone(),
        );
        Ok(())
    }

    async fn current_for_pair(
        &self,
        user_id: &UserId,
        venue_id: &VenueId,
    ) -> Result<Option<Interest>, InterestRepositoryError> {
        let snapshot = self.snapshot().await;
        Ok(snapshot
            .current
            .get(&(user_id.clone(), venue_id.clone()))
            .cloned())
    }

    async fn current_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Interest>, InterestRepositoryError> {
        let snapshot = self.snapshot().await;
        let mut rows: Vec<Interest> = snapshot
            .current
            .values()
            .filter(|interest| interest.user_id() == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.venue_id().cmp(b.venue_id()));
        Ok(rows)
    }

    async fn current_for_venue(
        &self,
        venue_id: &VenueId,
    ) -> Result<Vec<Interest>, InterestRepositoryError> {
        let snapshot = self.snapshot().await;
        let mut rows: Vec<Interest> = snapshot
            .current
            .values()
            .filter(|interest| interest.venue_id() == venue_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.user_id().cmp(b.user_id()));
        Ok(rows)
    }

    async fn current_all(&self) -> Result<Vec<Interest>, InterestRepositoryError> {
        let snapshot = self.snapshot().await;
        let mut rows: Vec<Interest> = snapshot.current.values().cloned().collect();
        rows.sort_by(|a, b| {
            a.user_id()
                .cmp(b.user_id())
                .then_with(|| a.venue_id().cmp(b.venue_id()))
        });
        Ok(rows)
    }

    async fn history_for_pair(
        &self,
        user_id: &UserId,
        venue_id: &VenueId,
    ) -> Result<Vec<Interest>, InterestRepositoryError> {
        let snapshot = self.snapshot().await;
        Ok(snapshot
            .history
            .iter()
            .filter(|interest| interest.user_id() == user_id && interest.venue_id() == venue_id)
            .cloned()
            .collect())
    }
}
