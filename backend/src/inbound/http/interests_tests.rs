//! Tests for interest HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::domain::ports::{
    FixtureInterestQuery, FixtureRecommendationQuery, FixtureReservationCommand,
    FixtureReservationQuery, InterestCommand, InterestQuery, MockInterestCommand,
    MockInterestQuery, ListUserInterestsResponse, SetInterestResponse,
};
use crate::domain::{ConsensusOutcome, Interest, InterestId, InterestStatus, UserId, VenueId};

use super::*;

const USER: &str = "00000000-0000-0000-0000-000000000001";
const VENUE: &str = "00000000-0000-0000-0000-000000000101";

fn uid() -> UserId {
    UserId::new(USER).expect("valid fixture user id")
}

fn vid() -> VenueId {
    VenueId::new(VENUE).expect("valid fixture venue id")
}

fn stored_interest(status: InterestStatus) -> Interest {
    let at = Utc
        .with_ymd_and_hms(2026, 3, 10, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp");
    Interest::new(
        InterestId::from_uuid(Uuid::from_u128(0x51)),
        uid(),
        vid(),
        status,
        at,
    )
}

fn state_with(
    interests: Arc<dyn InterestCommand>,
    interests_query: Arc<dyn InterestQuery>,
) -> HttpState {
    HttpState {
        interests,
        interests_query,
        recommendations: Arc::new(FixtureRecommendationQuery),
        reservations: Arc::new(FixtureReservationCommand),
        reservations_query: Arc::new(FixtureReservationQuery),
    }
}

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .service(set_interest)
            .service(list_user_interests),
    )
}

#[actix_web::test]
async fn set_interest_returns_created_with_the_outcome() {
    let mut interests = MockInterestCommand::new();
    interests
        .expect_set_interest()
        .withf(|request| {
            request.user_id.as_ref() == USER
                && request.venue_id.as_ref() == VENUE
                && request.status == InterestStatus::Interested
        })
        .times(1)
        .return_once(|_| {
            Ok(SetInterestResponse {
                interest: stored_interest(InterestStatus::Interested),
                outcome: ConsensusOutcome::BelowQuorum { interested: 1 },
            })
        });
    let app = actix_test::init_service(test_app(state_with(
        Arc::new(interests),
        Arc::new(FixtureInterestQuery),
    )))
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/interests")
        .set_json(json!({
            "userId": USER,
            "venueId": VENUE,
            "status": "INTERESTED",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["interest"]["userId"], USER);
    assert_eq!(body["interest"]["status"], "INTERESTED");
    assert_eq!(body["outcome"]["kind"], "BELOW_QUORUM");
    assert_eq!(body["outcome"]["interested"], 1);
}

#[actix_web::test]
async fn set_interest_rejects_a_malformed_user_id() {
    let app = actix_test::init_service(test_app(state_with(
        Arc::new(MockInterestCommand::new()),
        Arc::new(FixtureInterestQuery),
    )))
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/interests")
        .set_json(json!({
            "userId": "not-a-uuid",
            "venueId": VENUE,
            "status": "INTERESTED",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], "userId");
    assert_eq!(body["details"]["code"], "invalid_uuid");
}

#[actix_web::test]
async fn set_interest_rejects_an_unknown_status_label() {
    let app = actix_test::init_service(test_app(state_with(
        Arc::new(MockInterestCommand::new()),
        Arc::new(FixtureInterestQuery),
    )))
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/interests")
        .set_json(json!({
            "userId": USER,
            "venueId": VENUE,
            "status": "MAYBE",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "invalid_status");
}

#[actix_web::test]
async fn set_interest_surfaces_unknown_users_as_not_found() {
    let mut interests = MockInterestCommand::new();
    interests
        .expect_set_interest()
        .times(1)
        .return_once(|request| {
            Err(crate::domain::Error::not_found(format!(
                "user {} is not registered",
                request.user_id
            )))
        });
    let app = actix_test::init_service(test_app(state_with(
        Arc::new(interests),
        Arc::new(FixtureInterestQuery),
    )))
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/interests")
        .set_json(json!({
            "userId": USER,
            "venueId": VENUE,
            "status": "CONFIRMED",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "not_found");
}

#[actix_web::test]
async fn listing_returns_the_projection_rows() {
    let mut interests_query = MockInterestQuery::new();
    interests_query
        .expect_list_for_user()
        .withf(|request| request.user_id.as_ref() == USER)
        .times(1)
        .return_once(|_| {
            Ok(ListUserInterestsResponse {
                interests: vec![
                    stored_interest(InterestStatus::Interested),
                    stored_interest(InterestStatus::Confirmed),
                ],
            })
        });
    let app = actix_test::init_service(test_app(state_with(
        Arc::new(MockInterestCommand::new()),
        Arc::new(interests_query),
    )))
    .await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/users/{USER}/interests"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    let rows = body["interests"].as_array().expect("interests is an array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["venueId"], VENUE);
}

#[actix_web::test]
async fn listing_rejects_a_malformed_user_id() {
    let app = actix_test::init_service(test_app(state_with(
        Arc::new(MockInterestCommand::new()),
        Arc::new(MockInterestQuery::new()),
    )))
    .await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/users/not-a-uuid/interests")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
