//! Driving port for reservation reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Reservation, UserId};

/// Request for the reservations a user participates in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUserReservationsRequest {
    pub user_id: UserId,
}

/// Response carrying the user's reservations, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUserReservationsResponse {
    pub reservations: Vec<Reservation>,
}

/// Driving port for reservation read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationQuery: Send + Sync {
    /// Reservations where the user is on the roster, newest first.
    async fn list_for_user(
        &self,
        request: ListUserReservationsRequest,
    ) -> Result<ListUserReservationsResponse, Error>;
}

/// Fixture query for tests that do not exercise reservation reads.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReservationQuery;

#[async_trait]
impl ReservationQuery for FixtureReservationQuery {
    async fn list_for_user(
        &self,
        _request: ListUserReservationsRequest,
    ) -> Result<ListUserReservationsResponse, Error> {
        Ok(ListUserReservationsResponse {
            reservations: Vec::new(),
        })
    }
}
