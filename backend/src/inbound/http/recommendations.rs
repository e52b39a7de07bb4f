//! Recommendation HTTP handlers.
//!
//! ```text
//! GET /api/v1/recommendations/{user_id}?lat={lat}&lon={lon}
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::RecommendationRequest;
use crate::domain::{Error, RecommendedVenue, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_origin, parse_uuid};

/// Optional query location for proximity scoring.
///
/// `lat` and `lon` are all-or-nothing; venue scores carry no proximity term
/// without them.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct RecommendationQueryParams {
    #[param(example = 51.5261)]
    pub lat: Option<f64>,
    #[param(example = -0.0876)]
    pub lon: Option<f64>,
}

/// Response payload carrying ranked venues for the user.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsResponseBody {
    pub recommended_venues: Vec<RecommendedVenue>,
}

/// Rank venues for a user, highest aggregate score first.
///
/// Venues the user currently marks NOT_INTERESTED are excluded; each entry
/// attaches the top compatible people among the venue's interested peers.
#[utoipa::path(
    get,
    path = "/api/v1/recommendations/{user_id}",
    params(
        ("user_id" = String, Path, format = "uuid", description = "User to recommend venues for"),
        RecommendationQueryParams
    ),
    responses(
        (status = 200, description = "Ranked venues", body = RecommendationsResponseBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 503, description = "Engine busy, retry", body = Error)
    ),
    tags = ["recommendations"],
    operation_id = "recommendVenues"
)]
#[get("/recommendations/{user_id}")]
pub async fn recommend_venues(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<RecommendationQueryParams>,
) -> ApiResult<web::Json<RecommendationsResponseBody>> {
    let user_id = UserId::from_uuid(parse_uuid(&path.into_inner(), FieldName::new("user_id"))?);
    let origin = parse_origin(query.lat, query.lon)?;
    let response = state
        .recommendations
        .recommend_for_user(RecommendationRequest { user_id, origin })
        .await?;
    Ok(web::Json(RecommendationsResponseBody {
        recommended_venues: response.recommended_venues,
    }))
}

#[cfg(test)]
#[path = "recommendations_tests.rs"]
mod tests;
