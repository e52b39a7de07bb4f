//! Driving port for interest projection reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Interest, UserId};

/// Request for one user's current interest projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUserInterestsRequest {
    pub user_id: UserId,
}

/// Response carrying the latest-wins projection, one row per venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUserInterestsResponse {
    pub interests: Vec<Interest>,
}

/// Driving port for interest read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InterestQuery: Send + Sync {
    /// Current projection rows for the user, ordered by venue id.
    async fn list_for_user(
        &self,
        request: ListUserInterestsRequest,
    ) -> Result<ListUserInterestsResponse, Error>;
}

/// Fixture query for tests that do not exercise interest reads.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureInterestQuery;

#[async_trait]
impl InterestQuery for FixtureInterestQuery {
    async fn list_for_user(
        &self,
        _request: ListUserInterestsRequest,
    ) -> Result<ListUserInterestsResponse, Error> {
        Ok(ListUserInterestsResponse {
            interests: Vec::new(),
        })
    }
}
