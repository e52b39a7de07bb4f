//! Per-venue write serialization.
//!
//! Every state change for a venue (interest write, quorum evaluation,
//! reservation mutation) runs while holding that venue's lease. Venues never
//! contend with each other; the registry grows one entry per venue touched
//! and entries are never evicted.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::ids::VenueId;

/// Returned when a venue lease could not be acquired within its bound.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("timed out waiting for the write lock on venue {venue_id}")]
pub struct VenueLockTimeout {
    venue_id: VenueId,
}

impl VenueLockTimeout {
    /// Venue whose lock stayed held past the deadline.
    #[must_use]
    pub fn venue_id(&self) -> &VenueId {
        &self.venue_id
    }
}

/// Proof that the holder serializes writes for one venue.
///
/// Dropping the lease releases the lock.
#[derive(Debug)]
pub struct VenueLease {
    venue_id: VenueId,
    _guard: OwnedMutexGuard<()>,
}

impl VenueLease {
    /// Venue this lease covers.
    #[must_use]
    pub fn venue_id(&self) -> &VenueId {
        &self.venue_id
    }
}

/// Lazily populated registry of per-venue async locks.
#[derive(Debug, Default)]
pub struct VenueLockRegistry {
    locks: Mutex<HashMap<VenueId, Arc<Mutex<()>>>>,
}

impl VenueLockRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the venue's lease, waiting at most `wait`.
    pub async fn acquire(
        &self,
        venue_id: &VenueId,
        wait: Duration,
    ) -> Result<VenueLease, VenueLockTimeout> {
        let entry = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(venue_id.clone()).or_default())
        };

        match tokio::time::timeout(wait, entry.lock_owned()).await {
            Ok(guard) => Ok(VenueLease {
                venue_id: venue_id.clone(),
                _guard: guard,
            }),
            Err(_) => Err(VenueLockTimeout {
                venue_id: venue_id.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    const PATIENT: Duration = Duration::from_millis(200);
    const IMPATIENT: Duration = Duration::from_millis(10);

    #[rstest]
    #[tokio::test]
    async fn lease_is_reacquirable_after_release() {
        let registry = VenueLockRegistry::new();
        let venue = VenueId::random();

        let first = registry.acquire(&venue, PATIENT).await.unwrap();
        drop(first);
        let second = registry.acquire(&venue, PATIENT).await;

        assert!(second.is_ok());
    }

    #[rstest]
    #[tokio::test]
    async fn contended_acquire_times_out() {
        let registry = VenueLockRegistry::new();
        let venue = VenueId::random();

        let held = registry.acquire(&venue, PATIENT).await.unwrap();
        let denied = registry.acquire(&venue, IMPATIENT).await;

        let err = denied.unwrap_err();
        assert_eq!(err.venue_id(), &venue);
        assert!(err.to_string().contains(&venue.to_string()));
        drop(held);
    }

    #[rstest]
    #[tokio::test]
    async fn distinct_venues_do_not_contend() {
        let registry = VenueLockRegistry::new();
        let one = VenueId::random();
        let other = VenueId::random();

        let held = registry.acquire(&one, PATIENT).await.unwrap();
        let unrelated = registry.acquire(&other, IMPATIENT).await;

        assert!(unrelated.is_ok());
        drop(held);
    }

    #[rstest]
    #[tokio::test]
    async fn lease_reports_its_venue() {
        let registry = VenueLockRegistry::new();
        let venue = VenueId::random();

        let lease = registry.acquire(&venue, PATIENT).await.unwrap();

        assert_eq!(lease.venue_id(), &venue);
    }
}
