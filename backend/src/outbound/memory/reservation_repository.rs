//! In-memory reservation store with copy-on-write snapshot reads.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ids::{ReservationId, UserId, VenueId};
use crate::domain::ports::{ReservationRepository, ReservationRepositoryError};
use crate::domain::reservation::Reservation;

/// In-memory [`ReservationRepository`] adapter.
///
/// The store holds one copy per reservation id. `insert` refuses ids it has
/// already seen and `update` refuses ids it has never seen, so lifecycle
/// transitions cannot silently resurrect or fork a reservation. Reads clone
/// the shared snapshot and scan it outside the lock; listing methods order
/// rows newest first (creation time descending, id ascending on ties).
#[derive(Debug, Default)]
pub struct MemoryReservationRepository {
    rows: RwLock<Arc<HashMap<ReservationId, Reservation>>>,
}

impl MemoryReservationRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn snapshot(&self) -> Arc<HashMap<ReservationId, Reservation>> {
        Arc::clone(&*self.rows.read().await)
    }
}

fn newest_first(a: &Reservation, b: &Reservation) -> std::cmp::Ordering {
    b.created_at()
        .cmp(&a.created_at())
        .then_with(|| a.id().cmp(b.id()))
}

#[async_trait]
impl ReservationRepository for MemoryReservationRepository {
    async fn insert(&self, reservation: &Reservation) -> Result<(), ReservationRepositoryError> {
        let mut guard = self.rows.write().await;
        if guard.contains_key(reservation.id()) {
            return Err(ReservationRepositoryError::storage(format!(
                "reservation {} is already stored",
                reservation.id()
            )));
        }
        let rows = Arc::make_mut(&mut guard);
        rows.insert(reservation.id().clone(), reservation.clone());
        Ok(())
    }

    async fn update(&self, reservation: &Reservation) -> Result<(), ReservationRepositoryError> {
        let mut guard = self.rows.write().await;
        if !guard.contains_key(reservation.id()) {
            return Err(ReservationRepositoryError::missing_reservation(
                reservation.id().to_string(),
            ));
        }
        let rows = Arc::make_mut(&mut guard);
        rows.insert(reservation.id().clone(), reservation.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ReservationId,
    ) -> Result<Option<Reservation>, ReservationRepositoryError> {
        let snapshot = self.snapshot().await;
        Ok(snapshot.get(id).cloned())
    }

    async fn list_for_venue(
        &self,
        venue_id: &VenueId,
    ) -> Result<Vec<Reservation>, ReservationRepositoryError> {
        let snapshot = self.snapshot().await;
        let mut rows: Vec<Reservation> = snapshot
            .values()
            .filter(|reservation| reservation.venue_id() == venue_id)
            .cloned()
            .collect();
        rows.sort_by(newest_first);
        Ok(rows)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Reservation>, ReservationRepositoryError> {
        let snapshot = self.snapshot().await;
        let mut rows: Vec<Reservation> = snapshot
            .values()
            .filter(|reservation| reservation.has_participant(user_id))
            .cloned()
            .collect();
        rows.sort_by(newest_first);
        Ok(rows)
    }
}
