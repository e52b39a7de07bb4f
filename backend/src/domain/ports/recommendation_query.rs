//! Driving port for venue recommendations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, GeoPoint, RecommendedVenue, UserId};

/// Request for a user's ranked venue recommendations.
///
/// `origin` is the optional query location; without it the proximity term
/// contributes nothing to the scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub user_id: UserId,
    pub origin: Option<GeoPoint>,
}

/// Response carrying recommendations in descending score order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub recommended_venues: Vec<RecommendedVenue>,
}

/// Driving port for recommendation reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationQuery: Send + Sync {
    /// Ranked venues for the user, highest score first, venue id as the
    /// tiebreak. Venues the user marked NOT_INTERESTED are excluded.
    async fn recommend_for_user(
        &self,
        request: RecommendationRequest,
    ) -> Result<RecommendationResponse, Error>;
}

/// Fixture query for tests that do not exercise recommendations.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecommendationQuery;

#[async_trait]
impl RecommendationQuery for FixtureRecommendationQuery {
    async fn recommend_for_user(
        &self,
        _request: RecommendationRequest,
    ) -> Result<RecommendationResponse, Error> {
        Ok(RecommendationResponse {
            recommended_venues: Vec::new(),
        })
    }
}
