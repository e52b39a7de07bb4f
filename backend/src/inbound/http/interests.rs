//! Interest HTTP handlers.
//!
//! ```text
//! POST /api/v1/interests
//! GET  /api/v1/users/{user_id}/interests
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{ListUserInterestsRequest, SetInterestRequest, SetInterestResponse};
use crate::domain::{ConsensusOutcome, Error, Interest, UserId, VenueId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_interest_status, parse_uuid};

/// Request payload for declaring interest in a venue.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetInterestRequestBody {
    #[schema(format = "uuid")]
    pub user_id: String,
    #[schema(format = "uuid")]
    pub venue_id: String,
    #[schema(example = "INTERESTED")]
    pub status: String,
}

/// Response payload carrying the stored record and the consensus outcome
/// the write triggered.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetInterestResponseBody {
    pub interest: Interest,
    pub outcome: ConsensusOutcome,
}

impl From<SetInterestResponse> for SetInterestResponseBody {
    fn from(value: SetInterestResponse) -> Self {
        Self {
            interest: value.interest,
            outcome: value.outcome,
        }
    }
}

/// Response payload listing a user's current interest projection.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInterestsResponseBody {
    pub interests: Vec<Interest>,
}

fn parse_set_interest_payload(body: SetInterestRequestBody) -> Result<SetInterestRequest, Error> {
    Ok(SetInterestRequest {
        user_id: UserId::from_uuid(parse_uuid(&body.user_id, FieldName::new("userId"))?),
        venue_id: VenueId::from_uuid(parse_uuid(&body.venue_id, FieldName::new("venueId"))?),
        status: parse_interest_status(&body.status, FieldName::new("status"))?,
    })
}

/// Record a user's current disposition toward a venue.
///
/// Every accepted write re-evaluates quorum for the venue; the response
/// reports the outcome alongside the stored record.
#[utoipa::path(
    post,
    path = "/api/v1/interests",
    request_body = SetInterestRequestBody,
    responses(
        (status = 201, description = "Interest recorded", body = SetInterestResponseBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown user or venue", body = Error),
        (status = 503, description = "Engine busy, retry", body = Error)
    ),
    tags = ["interests"],
    operation_id = "setInterest"
)]
#[post("/interests")]
pub async fn set_interest(
    state: web::Data<HttpState>,
    payload: web::Json<SetInterestRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_set_interest_payload(payload.into_inner())?;
    let response = state.interests.set_interest(request).await?;
    Ok(HttpResponse::Created().json(SetInterestResponseBody::from(response)))
}

/// List a user's current interest projection, one row per venue.
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/interests",
    params(
        ("user_id" = String, Path, format = "uuid", description = "User to list interests for")
    ),
    responses(
        (status = 200, description = "Current projection", body = UserInterestsResponseBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 503, description = "Engine busy, retry", body = Error)
    ),
    tags = ["interests"],
    operation_id = "listUserInterests"
)]
#[get("/users/{user_id}/interests")]
pub async fn list_user_interests(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserInterestsResponseBody>> {
    let user_id = UserId::from_uuid(parse_uuid(&path.into_inner(), FieldName::new("user_id"))?);
    let response = state
        .interests_query
        .list_for_user(ListUserInterestsRequest { user_id })
        .await?;
    Ok(web::Json(UserInterestsResponseBody {
        interests: response.interests,
    }))
}

#[cfg(test)]
#[path = "interests_tests.rs"]
mod tests;
