//! Reservation HTTP handlers.
//!
//! ```text
//! POST /api/v1/reservations
//! POST /api/v1/reservations/accept
//! POST /api/v1/reservations/decline
//! GET  /api/v1/reservations/{user_id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    CreateReservationRequest, InvitationAnswerRequest, ListUserReservationsRequest,
};
use crate::domain::{Error, Reservation, ReservationId, ReservationStatus, UserId, VenueId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_rfc3339_timestamp, parse_uuid, parse_uuid_list,
};

/// Request payload for creating a reservation by hand.
///
/// The first listed participant is the creator and starts accepted.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequestBody {
    #[schema(format = "uuid")]
    pub venue_id: String,
    #[schema(format = "date-time")]
    pub time: String,
    #[schema(value_type = Vec<String>)]
    pub participant_user_ids: Vec<String>,
}

/// Request payload for answering an invitation.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvitationAnswerRequestBody {
    #[schema(format = "uuid")]
    pub reservation_id: String,
    #[schema(format = "uuid")]
    pub user_id: String,
}

/// Fixed response envelope for invitation answers.
///
/// All fields are always present; failed answers surface as typed errors
/// rather than a `success: false` payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvitationAnswerResponseBody {
    pub success: bool,
    pub message: String,
    pub reservation: Reservation,
}

/// Response payload listing a user's reservations, newest first.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserReservationsResponseBody {
    pub reservations: Vec<Reservation>,
}

fn parse_create_payload(
    body: CreateReservationRequestBody,
) -> Result<CreateReservationRequest, Error> {
    let venue_id = VenueId::from_uuid(parse_uuid(&body.venue_id, FieldName::new("venueId"))?);
    let scheduled_time = parse_rfc3339_timestamp(body.time, FieldName::new("time"))?;
    let participant_user_ids = parse_uuid_list(
        body.participant_user_ids,
        FieldName::new("participantUserIds"),
    )?
    .into_iter()
    .map(UserId::from_uuid)
    .collect();
    Ok(CreateReservationRequest {
        venue_id,
        scheduled_time,
        participant_user_ids,
    })
}

fn parse_answer_payload(
    body: InvitationAnswerRequestBody,
) -> Result<InvitationAnswerRequest, Error> {
    Ok(InvitationAnswerRequest {
        reservation_id: ReservationId::from_uuid(parse_uuid(
            &body.reservation_id,
            FieldName::new("reservationId"),
        )?),
        user_id: UserId::from_uuid(parse_uuid(&body.user_id, FieldName::new("userId"))?),
    })
}

fn accept_message(reservation: &Reservation) -> &'static str {
    if reservation.status() == ReservationStatus::Confirmed {
        "Reservation accepted and confirmed"
    } else {
        "Reservation accepted, waiting for other participants"
    }
}

fn decline_message(reservation: &Reservation) -> &'static str {
    if reservation.status() == ReservationStatus::Cancelled {
        "Reservation declined and cancelled"
    } else {
        "Reservation declined"
    }
}

/// Create a pending reservation and invite the listed participants.
#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    request_body = CreateReservationRequestBody,
    responses(
        (status = 201, description = "Reservation created", body = Reservation),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown venue or participant", body = Error),
        (status = 409, description = "Overlapping reservation exists", body = Error),
        (status = 503, description = "Engine busy, retry", body = Error)
    ),
    tags = ["reservations"],
    operation_id = "createReservation"
)]
#[post("/reservations")]
pub async fn create_reservation(
    state: web::Data<HttpState>,
    payload: web::Json<CreateReservationRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_create_payload(payload.into_inner())?;
    let response = state.reservations.create_reservation(request).await?;
    Ok(HttpResponse::Created().json(response.reservation))
}

/// Accept an invitation; confirms the reservation once the acceptance
/// threshold is met.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/accept",
    request_body = InvitationAnswerRequestBody,
    responses(
        (status = 200, description = "Acceptance recorded", body = InvitationAnswerResponseBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown reservation or participant", body = Error),
        (status = 409, description = "Answer already recorded", body = Error),
        (status = 503, description = "Engine busy, retry", body = Error)
    ),
    tags = ["reservations"],
    operation_id = "acceptInvitation"
)]
#[post("/reservations/accept")]
pub async fn accept_invitation(
    state: web::Data<HttpState>,
    payload: web::Json<InvitationAnswerRequestBody>,
) -> ApiResult<web::Json<InvitationAnswerResponseBody>> {
    let request = parse_answer_payload(payload.into_inner())?;
    let response = state.reservations.accept_invitation(request).await?;
    let message = accept_message(&response.reservation).to_owned();
    Ok(web::Json(InvitationAnswerResponseBody {
        success: true,
        message,
        reservation: response.reservation,
    }))
}

/// Decline an invitation; cancels the reservation once the threshold can no
/// longer be reached.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/decline",
    request_body = InvitationAnswerRequestBody,
    responses(
        (status = 200, description = "Refusal recorded", body = InvitationAnswerResponseBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown reservation or participant", body = Error),
        (status = 409, description = "Answer already recorded", body = Error),
        (status = 503, description = "Engine busy, retry", body = Error)
    ),
    tags = ["reservations"],
    operation_id = "declineInvitation"
)]
#[post("/reservations/decline")]
pub async fn decline_invitation(
    state: web::Data<HttpState>,
    payload: web::Json<InvitationAnswerRequestBody>,
) -> ApiResult<web::Json<InvitationAnswerResponseBody>> {
    let request = parse_answer_payload(payload.into_inner())?;
    let response = state.reservations.decline_invitation(request).await?;
    let message = decline_message(&response.reservation).to_owned();
    Ok(web::Json(InvitationAnswerResponseBody {
        success: true,
        message,
        reservation: response.reservation,
    }))
}

/// List the reservations a user participates in, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/reservations/{user_id}",
    params(
        ("user_id" = String, Path, format = "uuid", description = "User to list reservations for")
    ),
    responses(
        (status = 200, description = "User's reservations", body = UserReservationsResponseBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 503, description = "Engine busy, retry", body = Error)
    ),
    tags = ["reservations"],
    operation_id = "listUserReservations"
)]
#[get("/reservations/{user_id}")]
pub async fn list_user_reservations(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserReservationsResponseBody>> {
    let user_id = UserId::from_uuid(parse_uuid(&path.into_inner(), FieldName::new("user_id"))?);
    let response = state
        .reservations_query
        .list_for_user(ListUserReservationsRequest { user_id })
        .await?;
    Ok(web::Json(UserReservationsResponseBody {
        reservations: response.reservations,
    }))
}

#[cfg(test)]
#[path = "reservations_tests.rs"]
mod tests;
